//! RS512 playground
//!
//! Provisions an RSA key pair, issues a short-lived token, verifies it with the
//! in-memory public key and again with a key rebuilt from its base64 text.

pub mod config;
pub mod pipeline;

pub use config::PlaygroundConfig;
pub use pipeline::{
    export_public_key, issue, provision, run, run_to, run_with_keys, run_with_keys_to,
    verify_with_original, verify_with_reconstructed, PipelineReport,
};
