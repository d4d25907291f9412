//! The reporter the lexer and parser write into.
//!
//! A [`Report`] is created by the caller, passed by `&mut` through a parse,
//! and inspected afterwards. It keeps diagnostics in the order they were
//! produced; [`Report::sorted`] orders them by location for rendering.

use std::hash::{Hash, Hasher};

use rustc_hash::{FxHashSet, FxHasher};
use tracing::trace;

use crate::{Diagnostic, Severity};

/// Configuration for a [`Report`].
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ReportConfig {
    /// Maximum number of errors kept (0 = unlimited). Errors past the limit
    /// are counted but dropped.
    pub error_limit: usize,
    /// Drop diagnostics identical in code, message and primary span to one
    /// already reported.
    pub deduplicate: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            error_limit: 0,
            deduplicate: true,
        }
    }
}

impl ReportConfig {
    /// Keep at most `limit` errors.
    pub fn with_error_limit(limit: usize) -> Self {
        ReportConfig {
            error_limit: limit,
            ..ReportConfig::default()
        }
    }
}

/// Collected diagnostics for one file.
#[derive(Clone, Debug, Default)]
pub struct Report {
    config: ReportConfig,
    diagnostics: Vec<Diagnostic>,
    seen: FxHashSet<u64>,
    error_count: usize,
    suppressed: usize,
}

impl Report {
    pub fn new() -> Self {
        Report::default()
    }

    pub fn with_config(config: ReportConfig) -> Self {
        Report {
            config,
            ..Report::default()
        }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Record a diagnostic.
    pub fn push(&mut self, diag: Diagnostic) {
        if self.config.deduplicate && !self.seen.insert(dedup_key(&diag)) {
            trace!(code = %diag.code, "dropping duplicate diagnostic");
            return;
        }
        if diag.severity == Severity::Error {
            if self.limit_reached() {
                self.suppressed += 1;
                return;
            }
            self.error_count += 1;
        }
        trace!(code = %diag.code, message = %diag.message, "diagnostic");
        self.diagnostics.push(diag);
    }

    fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.error_count >= self.config.error_limit
    }

    /// Number of errors kept.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// Errors dropped because the limit was reached.
    pub fn suppressed(&self) -> usize {
        self.suppressed
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0 || self.suppressed > 0
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Diagnostics in the order they were reported.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    /// Diagnostics ordered by primary span, then severity.
    ///
    /// Diagnostics without a primary span come last. The sort is stable.
    pub fn sorted(&self) -> Vec<&Diagnostic> {
        let mut out: Vec<&Diagnostic> = self.diagnostics.iter().collect();
        out.sort_by_key(|d| {
            let start = d.primary_span().filter(|s| s.is_some()).map_or(u32::MAX, |s| s.start);
            (start, d.severity)
        });
        out
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}

impl Extend<Diagnostic> for Report {
    fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, iter: I) {
        for diag in iter {
            self.push(diag);
        }
    }
}

fn dedup_key(diag: &Diagnostic) -> u64 {
    let mut hasher = FxHasher::default();
    diag.code.hash(&mut hasher);
    diag.message.hash(&mut hasher);
    diag.primary_span().hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests;
