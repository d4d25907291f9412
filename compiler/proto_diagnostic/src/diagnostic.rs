use std::fmt;

use proto_ir::Span;

use crate::ErrorCode;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Note,
    Help,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
            Severity::Help => write!(f, "help"),
        }
    }
}

/// How confident a suggested edit is.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Applicability {
    /// The edit is definitely correct and can be applied by a tool.
    MachineApplicable,
    /// The edit is probably correct but needs a human to confirm.
    MaybeIncorrect,
    /// The edit contains placeholders such as `<name>`.
    HasPlaceholders,
    #[default]
    Unspecified,
}

impl Applicability {
    pub fn is_machine_applicable(self) -> bool {
        matches!(self, Applicability::MachineApplicable)
    }
}

/// Replace the text under `span` with `snippet`.
///
/// An empty span is an insertion.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Substitution {
    pub span: Span,
    pub snippet: String,
}

impl Substitution {
    pub fn new(span: Span, snippet: impl Into<String>) -> Self {
        Substitution {
            span,
            snippet: snippet.into(),
        }
    }

    /// Whether this inserts text without removing any.
    pub fn is_insertion(&self) -> bool {
        self.span.is_empty()
    }
}

/// A suggested edit: a message plus the substitutions that implement it.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Suggestion {
    pub message: String,
    pub substitutions: Vec<Substitution>,
    pub applicability: Applicability,
}

impl Suggestion {
    pub fn new(message: impl Into<String>, applicability: Applicability) -> Self {
        Suggestion {
            message: message.into(),
            substitutions: Vec::new(),
            applicability,
        }
    }

    /// A single-substitution edit that tools may apply unattended.
    pub fn machine_applicable(message: impl Into<String>, sub: Substitution) -> Self {
        Suggestion::new(message, Applicability::MachineApplicable).with_substitution(sub)
    }

    pub fn maybe_incorrect(message: impl Into<String>, sub: Substitution) -> Self {
        Suggestion::new(message, Applicability::MaybeIncorrect).with_substitution(sub)
    }

    #[must_use]
    pub fn with_substitution(mut self, sub: Substitution) -> Self {
        self.substitutions.push(sub);
        self
    }

    /// Apply the substitutions to `source`.
    ///
    /// Substitutions are applied back to front so earlier spans stay valid.
    /// Returns `None` if two substitutions overlap or one falls outside the
    /// text.
    pub fn apply(&self, source: &str) -> Option<String> {
        let mut subs: Vec<&Substitution> = self.substitutions.iter().collect();
        subs.sort_by_key(|s| (s.span.start, s.span.end));
        for pair in subs.windows(2) {
            if pair[0].span.end > pair[1].span.start {
                return None;
            }
        }
        let mut out = source.to_owned();
        for sub in subs.iter().rev() {
            let range = sub.span.to_range();
            out.get(range.clone())?;
            out.replace_range(range, &sub.snippet);
        }
        Some(out)
    }
}

/// A span with a caption.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub span: Span,
    pub message: String,
    /// The primary label marks the error location; secondary labels give
    /// context such as a previous occurrence.
    pub is_primary: bool,
}

impl Label {
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Label {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Label {
            span,
            message: message.into(),
            is_primary: false,
        }
    }
}

/// A problem found in a source file.
///
/// Built with a chain of `with_*` calls:
///
/// ```
/// use proto_diagnostic::{Diagnostic, ErrorCode};
/// use proto_ir::Span;
///
/// let diag = Diagnostic::error(ErrorCode::E1005)
///     .with_message("missing `;` after field")
///     .with_label(Span::point(11), "expected `;`");
/// assert!(diag.is_error());
/// ```
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
    /// Free-form help text.
    pub suggestions: Vec<String>,
    /// Suggested edits with exact spans.
    pub structured_suggestions: Vec<Suggestion>,
}

impl Diagnostic {
    #[cold]
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic::new(code, Severity::Error)
    }

    #[cold]
    pub fn warning(code: ErrorCode) -> Self {
        Diagnostic::new(code, Severity::Warning)
    }

    fn new(code: ErrorCode, severity: Severity) -> Self {
        Diagnostic {
            code,
            severity,
            message: String::new(),
            labels: Vec::new(),
            notes: Vec::new(),
            suggestions: Vec::new(),
            structured_suggestions: Vec::new(),
        }
    }

    pub fn with_message(mut self, msg: impl Into<String>) -> Self {
        self.message = msg.into();
        self
    }

    pub fn with_label(mut self, span: Span, msg: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, msg));
        self
    }

    pub fn with_secondary_label(mut self, span: Span, msg: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, msg));
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_structured_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.structured_suggestions.push(suggestion);
        self
    }

    /// Attach a machine-applicable edit.
    pub fn with_fix(self, message: impl Into<String>, sub: Substitution) -> Self {
        self.with_structured_suggestion(Suggestion::machine_applicable(message, sub))
    }

    /// Attach an edit that needs review before applying.
    pub fn with_maybe_fix(self, message: impl Into<String>, sub: Substitution) -> Self {
        self.with_structured_suggestion(Suggestion::maybe_incorrect(message, sub))
    }

    /// Span of the first primary label.
    pub fn primary_span(&self) -> Option<Span> {
        self.labels.iter().find(|l| l.is_primary).map(|l| l.span)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn machine_applicable_fixes(&self) -> impl Iterator<Item = &Suggestion> {
        self.structured_suggestions
            .iter()
            .filter(|s| s.applicability.is_machine_applicable())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.severity, self.code, self.message)?;
        for label in &self.labels {
            let marker = if label.is_primary { "-->" } else { ":::" };
            write!(f, "\n  {marker} {:?}: {}", label.span, label.message)?;
        }
        for note in &self.notes {
            write!(f, "\n  = note: {note}")?;
        }
        for help in &self.suggestions {
            write!(f, "\n  = help: {help}")?;
        }
        for s in &self.structured_suggestions {
            write!(f, "\n  = help: {}", s.message)?;
        }
        Ok(())
    }
}

// Common diagnostic shapes shared by the lexer and parser.

/// Tokens that could not be consumed by any rule.
#[cold]
pub fn unexpected_tokens(span: Span, context: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1001)
        .with_message(format!("unexpected tokens {context}"))
        .with_label(span, "not expected here")
}

/// Something required was missing; `found` describes what was there.
#[cold]
pub fn expected(code: ErrorCode, span: Span, what: &str, found: &str) -> Diagnostic {
    Diagnostic::error(code)
        .with_message(format!("expected {what}, found {found}"))
        .with_label(span, format!("expected {what}"))
}

/// A part that may appear once was given twice.
#[cold]
pub fn more_than_once(first: Span, second: Span, what: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1008)
        .with_message(format!("{what} given more than once"))
        .with_label(second, "repeated here")
        .with_secondary_label(first, "first given here")
        .with_note("only the first occurrence is used")
}

/// An opening delimiter with no matching close.
#[cold]
pub fn unclosed_delimiter(open: Span, eof: Span, delimiter: char) -> Diagnostic {
    Diagnostic::error(ErrorCode::E0010)
        .with_message(format!("unclosed delimiter `{delimiter}`"))
        .with_label(eof, "file ends here")
        .with_secondary_label(open, "opened here")
}
