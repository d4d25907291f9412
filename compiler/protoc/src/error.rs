use std::io;
use std::path::PathBuf;

/// Failures of the driver itself. Problems in the input files are
/// diagnostics, not errors.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    #[error("unknown option `{0}`")]
    UnknownOption(String),

    #[error("{0}")]
    InvalidColor(String),

    #[error("`{command}` expects {expected}, got {got}")]
    FileCount {
        command: &'static str,
        expected: &'static str,
        got: usize,
    },

    #[error("cannot read `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),
}
