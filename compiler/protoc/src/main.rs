//! Protobuf front-end CLI.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use proto_diagnostic::TerminalEmitter;
use protoc::{Command, DriverConfig, Status};

fn main() -> ExitCode {
    protoc::init_tracing();

    let config = match DriverConfig::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!();
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    match config.command {
        Command::Help => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Command::Version => {
            println!("protoc {}", env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
        Command::Lex | Command::Parse | Command::Dump => {}
    }

    let mut diagnostics = TerminalEmitter::<io::Stderr>::stderr(config.color, io::stderr().is_terminal());
    let mut out = io::stdout().lock();
    match protoc::run(&config, &mut out, &mut diagnostics) {
        Ok(Status::Clean) => ExitCode::SUCCESS,
        Ok(Status::Failed) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    println!("Protobuf front end");
    println!();
    println!("Usage: protoc <command> [options] <files...>");
    println!();
    println!("Commands:");
    println!("  lex <file.proto>       Tokenize and display tokens");
    println!("  parse <files...>       Parse files and report diagnostics");
    println!("  dump <file.proto>      Parse and display the syntax tree");
    println!("  help                   Show this help message");
    println!("  version                Show version information");
    println!();
    println!("Options:");
    println!("  --color=<when>         Color diagnostics: auto (default), always, never");
    println!("  --trace-nodes          Record node creation sites; `dump` shows them");
    println!("                         for corrupt definitions");
    println!();
    println!("Logging is enabled by RUST_LOG, e.g. RUST_LOG=proto_parse=debug.");
}
