//! Common infrastructure for the jwtplay crates
//!
//! This crate provides the functionality shared by the token library and the
//! playground binary:
//! - Error handling with stage and context propagation
//! - `env_logger` based logging bootstrap

pub mod error;

pub use error::*;
