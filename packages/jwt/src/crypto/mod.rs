//! Signature backends

pub mod rs512;
