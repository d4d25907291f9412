//! Command-line configuration.

use std::path::PathBuf;

use proto_diagnostic::ColorMode;
use proto_ir::ast::ContextOptions;
use proto_parse::ParseOptions;

use crate::DriverError;

/// A driver command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print the token stream of one file.
    Lex,
    /// Parse files and report diagnostics.
    Parse,
    /// Print the syntax tree of one file.
    Dump,
    Help,
    Version,
}

impl Command {
    pub fn name(self) -> &'static str {
        match self {
            Command::Lex => "lex",
            Command::Parse => "parse",
            Command::Dump => "dump",
            Command::Help => "help",
            Command::Version => "version",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "lex" => Some(Command::Lex),
            "parse" => Some(Command::Parse),
            "dump" => Some(Command::Dump),
            "help" => Some(Command::Help),
            "version" => Some(Command::Version),
            _ => None,
        }
    }
}

/// Everything parsed from argv.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DriverConfig {
    pub command: Command,
    pub files: Vec<PathBuf>,
    pub color: ColorMode,
    /// Record where every node was built, and show it for corrupt
    /// definitions in `dump`.
    pub trace_nodes: bool,
}

impl DriverConfig {
    /// Parse arguments, without the program name.
    ///
    /// Options may appear anywhere. `--` ends option parsing.
    pub fn from_args<I, S>(args: I) -> Result<Self, DriverError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut command = None;
        let mut files = Vec::new();
        let mut color = ColorMode::default();
        let mut trace_nodes = false;
        let mut options_done = false;

        for arg in args {
            let arg: String = arg.into();
            if !options_done && arg.starts_with('-') {
                if arg == "--" {
                    options_done = true;
                } else if let Some(mode) = arg.strip_prefix("--color=") {
                    color = mode.parse().map_err(DriverError::InvalidColor)?;
                } else if arg == "--trace-nodes" {
                    trace_nodes = true;
                } else if arg == "--help" || arg == "-h" {
                    command = Some(Command::Help);
                } else if arg == "--version" || arg == "-V" {
                    command = Some(Command::Version);
                } else {
                    return Err(DriverError::UnknownOption(arg));
                }
                continue;
            }
            if command.is_none() {
                command = Some(Command::from_name(&arg).ok_or(DriverError::UnknownCommand(arg))?);
            } else {
                files.push(PathBuf::from(arg));
            }
        }

        let command = command.unwrap_or(Command::Help);
        let config = DriverConfig {
            command,
            files,
            color,
            trace_nodes,
        };
        config.check_file_count()?;
        Ok(config)
    }

    fn check_file_count(&self) -> Result<(), DriverError> {
        let got = self.files.len();
        let expected = match self.command {
            Command::Lex | Command::Dump if got != 1 => "exactly one file",
            Command::Parse if got == 0 => "at least one file",
            _ => return Ok(()),
        };
        Err(DriverError::FileCount {
            command: self.command.name(),
            expected,
            got,
        })
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            context: ContextOptions {
                trace_creation: self.trace_nodes,
            },
            ..ParseOptions::default()
        }
    }
}

#[cfg(test)]
mod tests;
