//! Error handling with context propagation
//!
//! Provides the error type used at the outer edge of the jwtplay pipeline:
//! - A kind naming the pipeline stage that failed
//! - Optional context attached while the error travels upward
//! - The underlying library error preserved as `source()`

pub mod constructors;
pub mod display;
pub mod extensions;
pub mod logging;
pub mod types;

pub use extensions::ResultExt;
pub use logging::LoggingTransformer;
pub use types::{Error, ErrorKind, Result};
