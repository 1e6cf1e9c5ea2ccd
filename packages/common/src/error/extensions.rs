//! Extension traits for tagging foreign errors with a pipeline stage

use super::types::{Error, ErrorKind, Result};
use std::fmt;

/// Converts any library error into an [`Error`] of the given kind
pub trait ResultExt<T> {
    /// Tag the error with the stage it was raised in
    ///
    /// # Errors
    /// Returns the original error wrapped as the source of an [`Error`] of `kind`.
    fn stage(self, kind: ErrorKind) -> Result<T>;

    /// Tag the error with a stage and attach a context message
    ///
    /// # Errors
    /// Returns the original error wrapped as the source of an [`Error`] of `kind`.
    fn stage_context<C: fmt::Display>(self, kind: ErrorKind, context: C) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn stage(self, kind: ErrorKind) -> Result<T> {
        self.map_err(|e| Error::with_source(kind, e))
    }

    fn stage_context<C: fmt::Display>(self, kind: ErrorKind, context: C) -> Result<T> {
        self.map_err(|e| Error::with_source(kind, e).context(context))
    }
}
