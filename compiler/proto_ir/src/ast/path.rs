//! Dotted paths: `foo`, `.foo.Bar`, `(my.ext).field`.
//!
//! A path is stored as the inclusive range of tokens it spans. Components
//! are recovered by walking that range: each is an optional separator (`.`
//! or `/`) followed by a name, where the name is an identifier or a
//! parenthesised extension path.

use std::fmt;

use super::Context;
use crate::{ContextId, Cursor, RawToken, Span, Token, TokenKind, TokenRef};

/// Storage form of a path: first and last token, inclusive.
///
/// Both are [`RawToken::NONE`] for an absent path.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct RawPath {
    pub(crate) start: RawToken,
    pub(crate) end: RawToken,
}

impl RawPath {
    pub(crate) const NONE: RawPath = RawPath {
        start: RawToken::NONE,
        end: RawToken::NONE,
    };

    #[inline]
    pub(crate) fn is_none(self) -> bool {
        self.start.is_none()
    }
}

/// A detached path, as passed to node constructors.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct PathTokens {
    pub start: Token,
    pub end: Token,
}

impl PathTokens {
    /// A path consisting of a single token.
    pub fn single(tok: Token) -> Self {
        PathTokens {
            start: tok,
            end: tok,
        }
    }

    #[track_caller]
    pub(crate) fn raw_in(self, ctx: ContextId) -> RawPath {
        RawPath {
            start: self.start.raw_in(ctx),
            end: self.end.raw_in(ctx),
        }
    }
}

#[track_caller]
pub(crate) fn raw_path_opt(path: Option<PathTokens>, ctx: ContextId) -> RawPath {
    path.map_or(RawPath::NONE, |p| p.raw_in(ctx))
}

/// A path resolved against its context.
#[derive(Copy, Clone)]
pub struct Path<'a> {
    ctx: &'a Context,
    raw: RawPath,
}

impl<'a> Path<'a> {
    pub(crate) fn new(ctx: &'a Context, raw: RawPath) -> Option<Self> {
        (!raw.is_none()).then_some(Path { ctx, raw })
    }

    /// A path known to be present, e.g. from a node that requires one.
    pub(crate) fn present(ctx: &'a Context, raw: RawPath) -> Self {
        debug_assert!(!raw.is_none(), "required path is absent");
        Path { ctx, raw }
    }

    /// The detached form of this path.
    pub fn tokens(self) -> PathTokens {
        let id = self.ctx.id();
        PathTokens {
            start: Token::new(id, self.raw.start),
            end: Token::new(id, self.raw.end),
        }
    }

    /// First token of the path.
    pub fn start(self) -> TokenRef<'a> {
        TokenRef::new(self.ctx.stream(), self.raw.start)
    }

    /// Last token of the path.
    pub fn end(self) -> TokenRef<'a> {
        TokenRef::new(self.ctx.stream(), self.raw.end)
    }

    /// Source span from the first through the last token.
    pub fn span(self) -> Span {
        self.start().outer_span().join(self.end().outer_span())
    }

    /// The components of this path in order.
    pub fn components(self) -> Components<'a> {
        let start = self.start();
        let cursor = if start.is_natural() {
            let mut c = self.ctx.stream().cursor();
            c.seek(start.token());
            Some(c)
        } else {
            None
        };
        Components {
            ctx: self.ctx,
            cursor,
            single: Some(start),
            end: self.raw.end,
            done: false,
        }
    }

    /// Whether the path starts with a `.`.
    pub fn is_absolute(self) -> bool {
        self.components()
            .next()
            .is_some_and(|c| c.separator().is_some_and(|s| s.text() == "."))
    }

    /// The identifier, if this path is a single unqualified identifier.
    pub fn as_ident(self) -> Option<TokenRef<'a>> {
        let mut comps = self.components();
        let first = comps.next()?;
        if comps.next().is_some() || first.separator().is_some() {
            return None;
        }
        first.name().filter(|n| n.kind() == TokenKind::Ident)
    }

    /// Whether this path is exactly the identifier `word`.
    pub fn is_keyword(self, word: &str) -> bool {
        self.as_ident().is_some_and(|t| t.text() == word)
    }

    /// The keyword this path spells, if it is one of `words`.
    pub fn as_keyword(self, words: &[&'static str]) -> Option<&'static str> {
        let ident = self.as_ident()?;
        words.iter().copied().find(|w| *w == ident.text())
    }

    /// Whether this path is a single unqualified identifier.
    pub fn is_single_ident(self) -> bool {
        self.as_ident().is_some()
    }
}

impl fmt::Display for Path<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for comp in self.components() {
            if let Some(sep) = comp.separator() {
                f.write_str(sep.text())?;
            }
            match comp.extension() {
                Some(ext) => write!(f, "({ext})")?,
                None => {
                    if let Some(name) = comp.name() {
                        f.write_str(name.text())?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Path<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Path({self})")
    }
}

/// One component of a [`Path`].
#[derive(Copy, Clone, Debug)]
pub struct PathComponent<'a> {
    ctx: &'a Context,
    separator: Option<TokenRef<'a>>,
    name: Option<TokenRef<'a>>,
}

impl<'a> PathComponent<'a> {
    /// The `.` or `/` before the name, if any.
    pub fn separator(self) -> Option<TokenRef<'a>> {
        self.separator
    }

    /// The name token: an identifier, or the `(` of an extension name.
    /// Absent for a trailing separator.
    pub fn name(self) -> Option<TokenRef<'a>> {
        self.name
    }

    /// The path inside the parentheses of an extension name.
    pub fn extension(self) -> Option<Path<'a>> {
        let name = self.name?;
        if !name.is_open() {
            return None;
        }
        let mut inner = name.children();
        let first = inner.next()?;
        let mut last = first;
        while let Some(t) = inner.next() {
            last = t;
        }
        Path::new(
            self.ctx,
            RawPath {
                start: first.raw(),
                end: last.raw(),
            },
        )
    }

    /// Span of separator and name.
    pub fn span(self) -> Span {
        self.separator
            .map_or(Span::NONE, TokenRef::span)
            .join(self.name.map_or(Span::NONE, TokenRef::outer_span))
    }
}

/// Iterator over [`PathComponent`]s.
pub struct Components<'a> {
    ctx: &'a Context,
    cursor: Option<Cursor<'a>>,
    /// The sole token of a synthetic path.
    single: Option<TokenRef<'a>>,
    end: RawToken,
    done: bool,
}

impl<'a> Components<'a> {
    fn next_token(&mut self) -> Option<TokenRef<'a>> {
        if self.done {
            return None;
        }
        let tok = match &mut self.cursor {
            Some(c) => c.next()?,
            None => self.single.take()?,
        };
        if tok.raw() == self.end || tok.partner().is_some_and(|p| p.raw() == self.end) {
            self.done = true;
        }
        Some(tok)
    }

    fn peek_token(&self) -> Option<TokenRef<'a>> {
        if self.done {
            return None;
        }
        match &self.cursor {
            Some(c) => c.peek(),
            None => self.single,
        }
    }
}

impl<'a> Iterator for Components<'a> {
    type Item = PathComponent<'a>;

    fn next(&mut self) -> Option<PathComponent<'a>> {
        let first = self.next_token()?;
        if is_separator(first) {
            let name = match self.peek_token() {
                Some(t) if !is_separator(t) => self.next_token(),
                _ => None,
            };
            Some(PathComponent {
                ctx: self.ctx,
                separator: Some(first),
                name,
            })
        } else {
            Some(PathComponent {
                ctx: self.ctx,
                separator: None,
                name: Some(first),
            })
        }
    }
}

/// Whether `tok` separates path components.
pub fn is_separator(tok: TokenRef<'_>) -> bool {
    tok.kind() == TokenKind::Punct && matches!(tok.text(), "." | "/")
}
