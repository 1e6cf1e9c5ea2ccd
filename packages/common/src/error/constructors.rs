//! Error constructors and methods

use super::types::{Error, ErrorInner, ErrorKind};
use std::fmt;
use std::sync::Arc;

impl Error {
    /// Create a new error with the given kind
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            inner: Arc::new(ErrorInner {
                kind,
                context: None,
                source: None,
            }),
        }
    }

    /// Create an error with a source error
    #[must_use]
    pub fn with_source<E>(kind: ErrorKind, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(ErrorInner {
                kind,
                context: None,
                source: Some(Box::new(source)),
            }),
        }
    }

    /// Add context to this error
    ///
    /// The first context is attached in place. Adding context to an error that
    /// already carries one wraps the existing error as the source.
    #[must_use]
    pub fn context<C: fmt::Display>(self, context: C) -> Self {
        let context = Some(context.to_string());
        if self.inner.context.is_none() {
            match Arc::try_unwrap(self.inner) {
                Ok(inner) => {
                    return Self {
                        inner: Arc::new(ErrorInner { context, ..inner }),
                    };
                }
                Err(shared) => {
                    return Self::wrap(Self { inner: shared }, context);
                }
            }
        }
        Self::wrap(self, context)
    }

    fn wrap(previous: Self, context: Option<String>) -> Self {
        Self {
            inner: Arc::new(ErrorInner {
                kind: previous.inner.kind.clone(),
                context,
                source: Some(Box::new(previous)),
            }),
        }
    }

    /// Get the error kind
    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.inner.kind
    }

    /// Get the error context if any
    #[must_use]
    pub fn get_context(&self) -> Option<&str> {
        self.inner.context.as_deref()
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration() -> Self {
        Self::new(ErrorKind::Configuration)
    }
}
