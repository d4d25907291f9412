//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI color support.
//!
//! With a source file attached, labels are rendered as `path:line:col`
//! followed by the source line and an underline:
//!
//! ```text
//! error[E1005]: missing `;` after definition
//!   --> foo.proto:2:14
//!    |
//!  2 |   int32 x = 1
//!    |              ^ expected `;`
//!    = help: insert `;`
//! ```

use std::io::{self, Write};
use std::sync::Arc;

use proto_ir::SourceFile;

use super::DiagnosticEmitter;
use crate::span_utils::LineOffsetTable;
use crate::{Diagnostic, Label, Severity};

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const NOTE: &str = "\x1b[1;36m"; // Bold cyan
    pub const HELP: &str = "\x1b[1;32m"; // Bold green
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

#[inline]
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Color when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve to a boolean. `is_tty` only matters for [`ColorMode::Auto`].
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

impl std::str::FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            other => Err(format!(
                "invalid color mode `{other}` (expected auto, always or never)"
            )),
        }
    }
}

struct Source {
    file: Arc<SourceFile>,
    lines: LineOffsetTable,
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
    source: Option<Source>,
}

impl<W: Write> TerminalEmitter<W> {
    /// Create a terminal emitter.
    ///
    /// `is_tty` says whether `writer` is a terminal; it decides
    /// [`ColorMode::Auto`].
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            source: None,
        }
    }

    pub fn stdout(mode: ColorMode, is_tty: bool) -> TerminalEmitter<io::Stdout> {
        TerminalEmitter::with_color_mode(io::stdout(), mode, is_tty)
    }

    pub fn stderr(mode: ColorMode, is_tty: bool) -> TerminalEmitter<io::Stderr> {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }

    /// Render locations against `file` from now on.
    #[must_use]
    pub fn with_source(mut self, file: Arc<SourceFile>) -> Self {
        self.set_source(file);
        self
    }

    /// Switch the file locations are rendered against.
    pub fn set_source(&mut self, file: Arc<SourceFile>) {
        let lines = LineOffsetTable::build(file.text());
        self.source = Some(Source { file, lines });
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_severity(&mut self, severity: Severity) {
        let color = match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
            Severity::Note => colors::NOTE,
            Severity::Help => colors::HELP,
        };
        self.write_colored(&severity.to_string(), color);
    }

    fn write_code(&mut self, code: &str) {
        if self.colors {
            let _ = write!(self.writer, "{}[{code}]{}", colors::BOLD, colors::RESET);
        } else {
            let _ = write!(self.writer, "[{code}]");
        }
    }

    fn label_color(label: &Label) -> &'static str {
        if label.is_primary {
            colors::ERROR
        } else {
            colors::SECONDARY
        }
    }

    /// `  --> 10..15: message`, used when no source is attached.
    fn write_bare_label(&mut self, label: &Label) {
        let marker = if label.is_primary { "-->" } else { ":::" };
        let _ = write!(self.writer, "  {marker} {:?}: ", label.span);
        self.write_colored(&label.message, Self::label_color(label));
        let _ = writeln!(self.writer);
    }

    fn write_snippet_label(&mut self, label: &Label, gutter: usize) {
        let Some(source) = &self.source else {
            return;
        };
        let text = source.file.text();
        let (line, col) = source.lines.offset_to_line_col(text, label.span.start);
        let line_text = source.lines.line_text(text, line).unwrap_or("").to_owned();
        let path = source.file.path().to_owned();

        // Underline up to the end of the span or the end of its first line.
        let (end_line, end_col) = source.lines.offset_to_line_col(text, label.span.end);
        let width = if end_line == line {
            end_col.saturating_sub(col).max(1)
        } else {
            let line_len = u32::try_from(line_text.chars().count()).unwrap_or(u32::MAX);
            (line_len + 1).saturating_sub(col).max(1)
        };

        let marker = if label.is_primary { "-->" } else { ":::" };
        let pad = " ".repeat(gutter);
        let _ = writeln!(self.writer, "{pad}{marker} {path}:{line}:{col}");
        let _ = writeln!(self.writer, "{pad} |");
        let _ = writeln!(self.writer, "{line:>gutter$} | {line_text}");

        let indent = " ".repeat(col.saturating_sub(1) as usize);
        let mark = if label.is_primary { "^" } else { "-" };
        let underline = mark.repeat(width as usize);
        let _ = write!(self.writer, "{pad} | {indent}");
        self.write_colored(&underline, Self::label_color(label));
        if !label.message.is_empty() {
            let _ = write!(self.writer, " ");
            self.write_colored(&label.message, Self::label_color(label));
        }
        let _ = writeln!(self.writer);
    }

    /// Width of the line-number gutter for `labels`.
    fn gutter(&self, labels: &[Label]) -> usize {
        let Some(source) = &self.source else {
            return 0;
        };
        labels
            .iter()
            .map(|l| source.lines.line_from_offset(l.span.start))
            .max()
            .map_or(1, |n| n.to_string().len())
            .max(2)
    }

    fn write_trailer(&mut self, kind: &str, color: &str, text: &str, gutter: usize) {
        let pad = if gutter == 0 { 2 } else { gutter + 1 };
        let _ = write!(self.writer, "{:pad$}= ", "");
        self.write_colored(kind, color);
        let _ = writeln!(self.writer, ": {text}");
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        // Header: severity[CODE]: message
        self.write_severity(diagnostic.severity);
        self.write_code(diagnostic.code.as_str());
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        let gutter = self.gutter(&diagnostic.labels);
        for label in &diagnostic.labels {
            if self.source.is_some() && label.span.is_some() {
                self.write_snippet_label(label, gutter);
            } else {
                self.write_bare_label(label);
            }
        }

        for note in &diagnostic.notes {
            self.write_trailer("note", colors::BOLD, note, gutter);
        }
        for help in &diagnostic.suggestions {
            self.write_trailer("help", colors::HELP, help, gutter);
        }
        for suggestion in &diagnostic.structured_suggestions {
            let text = match suggestion.substitutions.as_slice() {
                [only] if !only.snippet.trim().is_empty() => {
                    format!("{}: `{}`", suggestion.message, only.snippet.trim())
                }
                _ => suggestion.message.clone(),
            };
            self.write_trailer("help", colors::HELP, &text, gutter);
        }

        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        if error_count > 0 {
            self.write_colored("error", colors::ERROR);
            let error_part = if error_count == 1 {
                "previous error".to_owned()
            } else {
                format!("{error_count} previous errors")
            };
            if warning_count > 0 {
                let _ = writeln!(
                    self.writer,
                    ": aborting due to {error_part}; {warning_count} warning{} emitted",
                    plural_s(warning_count)
                );
            } else {
                let _ = writeln!(self.writer, ": aborting due to {error_part}");
            }
        } else if warning_count > 0 {
            self.write_colored("warning", colors::WARNING);
            let _ = writeln!(
                self.writer,
                ": {warning_count} warning{} emitted",
                plural_s(warning_count)
            );
        }
    }
}

#[cfg(test)]
mod tests;
