//! Rendering of the stage chain

use super::types::Error;
use std::error::Error as StdError;
use std::fmt;

impl Error {
    /// `<stage> failed (<context>)` without any cause
    fn write_headline(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner.kind)?;
        match &self.inner.context {
            Some(context) => write!(f, " ({context})"),
            None => Ok(()),
        }
    }
}

/// One line per link of the `source()` chain, outermost first.
///
/// Wrapped stage errors contribute only their headline, so a chain built by
/// repeated `context()` calls prints each level once.
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_headline(f)?;

        let mut cause = self.source();
        while let Some(error) = cause {
            f.write_str("\nCaused by: ")?;
            match error.downcast_ref::<Error>() {
                Some(stage) => stage.write_headline(f)?,
                None => write!(f, "{error}")?,
            }
            cause = error.source();
        }
        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        let source = self.inner.source.as_deref()?;
        Some(source as &(dyn StdError + 'static))
    }
}
