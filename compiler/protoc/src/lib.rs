//! Command-line driver for the Protobuf front end.
//!
//! `protoc lex`, `protoc parse` and `protoc dump` load files from disk, run
//! the lexer and parser, and render the resulting diagnostics. Independent
//! files are parsed in parallel.

pub mod commands;
mod config;
mod error;

use std::sync::Once;

pub use commands::{run, Status};
pub use config::{Command, DriverConfig};
pub use error::DriverError;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call more than once. Does nothing unless `RUST_LOG` is set, e.g.
/// `RUST_LOG=proto_parse=debug` or `RUST_LOG=proto_lexer=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
