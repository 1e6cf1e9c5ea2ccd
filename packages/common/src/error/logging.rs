//! Structured logging bootstrap
//!
//! Provides env_logger-based logging that never writes key material and
//! integrates with the standard log crate. Events emitted through `tracing`
//! in the library crates reach this logger via tracing's `log` feature.

use log::{debug, error, info, warn};
use std::sync::Once;
use std::time::Duration;

static INIT_LOGGER: Once = Once::new();

/// Logging infrastructure using `env_logger`
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging system (should be called once at application startup)
    ///
    /// Configure logging levels via `RUST_LOG` environment variable:
    /// - `RUST_LOG=debug` - Enable all debug logs
    /// - `RUST_LOG=info` - Enable info and above
    /// - `RUST_LOG=jwtplay_jwt=debug` - Module-specific levels
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .init();

            debug!("Structured logging initialized");
        });
    }

    /// Initialize logging for test environments
    ///
    /// Use this in test modules to avoid initialization conflicts
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Secure logging of cryptographic errors
    ///
    /// Logs the error type and message, never the data involved
    pub fn log_crypto_error<E: std::error::Error>(operation: &str, error: &E) {
        error!(
            "Cryptographic operation failed: {} (error_type: {}): {}",
            operation,
            std::any::type_name::<E>(),
            error
        );
    }

    /// Log how long a pipeline step took
    pub fn log_performance_metric(operation: &str, duration: Duration, success: bool) {
        let duration_ms = duration.as_millis();
        if success {
            info!("Performance: {operation} completed in {duration_ms}ms");
        } else {
            warn!("Performance: {operation} failed after {duration_ms}ms");
        }
    }
}
