//! Compact options: `[deprecated = true, (my.ext).x = 1]`.

use std::fmt;

use super::commas::FromRaw;
use super::expr::ExprAny;
use super::nodes::{RawOptionEntry, RawOptions};
use super::path::Path;
use super::{tok_span, tree_span, Commas, Context};
use crate::{Span, TokenRef};

define_view!(CompactOptions, OptionsId, options, RawOptions);

impl<'a> CompactOptions<'a> {
    /// The `[` token.
    pub fn brackets(self) -> Option<TokenRef<'a>> {
        self.tok(self.row().brackets)
    }

    pub fn entries(self) -> Commas<'a, OptionEntry<'a>> {
        Commas::new(self.ctx, &self.row().entries)
    }

    /// The entry whose path is exactly `name`, e.g. `"deprecated"`.
    pub fn find(self, name: &str) -> Option<OptionEntry<'a>> {
        self.entries()
            .iter()
            .find(|e| e.path().is_some_and(|p| p.to_string() == name))
    }

    pub fn span(self) -> Span {
        tree_span(self.brackets()).join(self.entries().span())
    }
}

/// One `path = value` entry.
#[derive(Copy, Clone)]
pub struct OptionEntry<'a> {
    ctx: &'a Context,
    raw: RawOptionEntry,
}

impl<'a> OptionEntry<'a> {
    pub fn path(self) -> Option<Path<'a>> {
        Path::new(self.ctx, self.raw.path)
    }

    pub fn equals(self) -> Option<TokenRef<'a>> {
        self.ctx.stream().resolve(self.raw.equals)
    }

    pub fn value(self) -> Option<ExprAny<'a>> {
        self.raw.value.map(|v| ExprAny::new(self.ctx, v))
    }

    pub fn span(self) -> Span {
        self.path()
            .map_or(Span::NONE, Path::span)
            .join(tok_span(self.equals()))
            .join(self.value().map_or(Span::NONE, ExprAny::span))
    }
}

impl<'a> FromRaw<'a> for OptionEntry<'a> {
    type Raw = RawOptionEntry;

    fn from_raw(ctx: &'a Context, raw: RawOptionEntry) -> Self {
        OptionEntry { ctx, raw }
    }

    fn elem_span(&self) -> Span {
        self.span()
    }
}

impl fmt::Debug for OptionEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path() {
            Some(p) => write!(f, "OptionEntry({p}) @ {:?}", self.span()),
            None => write!(f, "OptionEntry(<missing>) @ {:?}", self.span()),
        }
    }
}
