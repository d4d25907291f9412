//! The driver commands.
//!
//! Commands write their regular output to `out` and diagnostics to a
//! [`TerminalEmitter`], so both can be captured.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use proto_diagnostic::{DiagnosticEmitter, Report, TerminalEmitter};
use proto_ir::ast::dump::dump;
use proto_ir::ast::{Context, DeclBody, DeclDef};
use proto_ir::SourceFile;
use proto_parse::ParseOptions;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{Command, DriverConfig, DriverError};

/// Whether a command found errors in its input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Clean,
    Failed,
}

/// Run the command of `config`. `Help` and `Version` are left to the caller.
pub fn run<O: Write, E: Write>(
    config: &DriverConfig,
    out: &mut O,
    diagnostics: &mut TerminalEmitter<E>,
) -> Result<Status, DriverError> {
    let mut totals = Totals::default();
    match config.command {
        Command::Lex => {
            for path in &config.files {
                lex_file(path, out, diagnostics, &mut totals)?;
            }
        }
        Command::Parse => {
            let options = config.parse_options();
            parse_files(&config.files, options, out, diagnostics, &mut totals)?;
        }
        Command::Dump => {
            for path in &config.files {
                dump_file(path, config, out, diagnostics, &mut totals)?;
            }
        }
        Command::Help | Command::Version => {}
    }
    out.flush()?;
    if totals.errors > 0 || totals.warnings > 0 {
        diagnostics.emit_summary(totals.errors, totals.warnings);
    }
    diagnostics.flush();
    Ok(if totals.errors > 0 {
        Status::Failed
    } else {
        Status::Clean
    })
}

#[derive(Default)]
struct Totals {
    errors: usize,
    warnings: usize,
}

/// A file that went through the parser.
struct Parsed {
    path: PathBuf,
    ctx: Context,
    report: Report,
}

fn read(path: &Path) -> Result<Vec<u8>, DriverError> {
    std::fs::read(path).map_err(|source| DriverError::Read {
        path: path.to_owned(),
        source,
    })
}

fn load(path: &Path, options: ParseOptions) -> Result<Parsed, DriverError> {
    let bytes = read(path)?;
    let mut report = Report::new();
    let ctx = proto_parse::parse_bytes(path.display().to_string(), bytes, &mut report, options);
    Ok(Parsed {
        path: path.to_owned(),
        ctx,
        report,
    })
}

fn emit<E: Write>(
    diagnostics: &mut TerminalEmitter<E>,
    file: &Arc<SourceFile>,
    report: &Report,
    totals: &mut Totals,
) {
    diagnostics.set_source(Arc::clone(file));
    diagnostics.emit_report(report);
    totals.errors += report.error_count();
    totals.warnings += report.warning_count();
}

/// Print every natural token with its span, then the lexical diagnostics.
fn lex_file<O: Write, E: Write>(
    path: &Path,
    out: &mut O,
    diagnostics: &mut TerminalEmitter<E>,
    totals: &mut Totals,
) -> Result<(), DriverError> {
    let bytes = read(path)?;
    let mut report = Report::new();
    let stream = proto_lexer::lex_bytes(path.display().to_string(), bytes, &mut report);

    writeln!(out, "Tokens for '{}' ({} tokens):", path.display(), stream.natural_len())?;
    for tok in stream.iter_natural() {
        let span = tok.span();
        let mark = if tok.is_open() {
            " (open)"
        } else if tok.is_close() {
            " (close)"
        } else {
            ""
        };
        let kind = tok.kind().to_string();
        writeln!(out, "  {:>6}..{:<6} {kind:<8} {:?}{mark}", span.start, span.end, tok.text())?;
    }

    emit(diagnostics, stream.file(), &report, totals);
    Ok(())
}

/// Parse `paths` in parallel and report each file in argument order.
fn parse_files<O: Write, E: Write>(
    paths: &[PathBuf],
    options: ParseOptions,
    out: &mut O,
    diagnostics: &mut TerminalEmitter<E>,
    totals: &mut Totals,
) -> Result<(), DriverError> {
    // Deep nesting is handled by stack growth; a larger initial stack just
    // makes growth rarer on worker threads.
    let results: Vec<Result<Parsed, DriverError>> = rayon::ThreadPoolBuilder::new()
        .stack_size(8 * 1024 * 1024)
        .build_scoped(rayon::ThreadBuilder::run, |pool| {
            pool.install(|| paths.par_iter().map(|path| load(path, options)).collect())
        })
        .unwrap_or_else(|e| {
            warn!("failed to create thread pool ({e}), parsing sequentially");
            paths.iter().map(|path| load(path, options)).collect()
        });

    for result in results {
        let parsed = result?;
        let errors = parsed.report.error_count();
        debug!(path = %parsed.path.display(), errors, "reporting");
        writeln!(
            out,
            "{}: {} declarations, {} nodes, {} error{}",
            parsed.path.display(),
            parsed.ctx.root().len(),
            parsed.ctx.arena().node_count(),
            errors,
            if errors == 1 { "" } else { "s" },
        )?;
        emit(diagnostics, parsed.ctx.file(), &parsed.report, totals);
    }
    Ok(())
}

/// Print the tree of one file. With `--trace-nodes`, also where each
/// corrupt definition was built.
fn dump_file<O: Write, E: Write>(
    path: &Path,
    config: &DriverConfig,
    out: &mut O,
    diagnostics: &mut TerminalEmitter<E>,
    totals: &mut Totals,
) -> Result<(), DriverError> {
    let parsed = load(path, config.parse_options())?;
    out.write_all(dump(&parsed.ctx).as_bytes())?;

    if config.trace_nodes {
        for def in corrupt_defs(parsed.ctx.root()) {
            writeln!(out, "\ncorrupt {} at {:?}", def.classify(), def.span())?;
            if let Some(site) = parsed.ctx.arena().creation_site(def.id()) {
                writeln!(out, "{site}")?;
            }
        }
    }

    emit(diagnostics, parsed.ctx.file(), &parsed.report, totals);
    Ok(())
}

/// Corrupt definitions under `root`, in source order.
fn corrupt_defs(root: DeclBody<'_>) -> Vec<DeclDef<'_>> {
    let mut found = Vec::new();
    let mut pending = vec![root];
    while let Some(body) = pending.pop() {
        for decl in body.iter() {
            if let Some(def) = decl.as_def() {
                if def.is_corrupt() {
                    found.push(def);
                }
                pending.extend(def.body());
            } else if let Some(inner) = decl.as_body() {
                pending.push(inner);
            }
        }
    }
    found.sort_by_key(|def| def.span().start);
    found
}

#[cfg(test)]
mod tests;
