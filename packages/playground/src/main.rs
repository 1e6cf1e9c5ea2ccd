//! `jwtplay`: sign a token with a fresh RSA key and verify it twice.

use jwtplay::{run_to, PlaygroundConfig};
use jwtplay_common::{LoggingTransformer, Result};
use std::io;

fn main() -> Result<()> {
    LoggingTransformer::init();

    run_to(&PlaygroundConfig::default(), &mut io::stdout(), &mut io::stderr())
        .map(|_| ())
        .inspect_err(|e| LoggingTransformer::log_crypto_error("jwtplay demo", e))
}
