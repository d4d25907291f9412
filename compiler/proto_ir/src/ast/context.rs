//! The per-file context: token stream plus node arena.

use std::fmt;
use std::sync::Arc;

use super::arena::{AstArena, ContextOptions};
use super::decl::{DeclAny, DeclBody, DeclDef, File};
use super::expr::ExprAny;
use super::ids::{DeclBodyId, DeclDefId, DeclId, ExprId, OptionsId, TypeId};
use super::options::CompactOptions;
use super::ty::TypeAny;
use crate::{ContextId, SourceFile, Token, TokenRef, TokenStream};

/// Everything known about one source file.
///
/// Created from a lexed [`TokenStream`] and populated by the parser. Owns
/// both halves so that views can resolve tokens and nodes together; use
/// [`split_mut`](Self::split_mut) to read tokens while adding nodes.
pub struct Context {
    stream: TokenStream,
    arena: AstArena,
}

impl Context {
    /// Adopt `stream`, sharing its [`ContextId`].
    pub fn new(stream: TokenStream) -> Self {
        Self::with_options(stream, ContextOptions::default())
    }

    pub fn with_options(stream: TokenStream, options: ContextOptions) -> Self {
        let arena = AstArena::new(stream.id(), options);
        Context { stream, arena }
    }

    /// The stamp shared by the stream and arena.
    #[inline]
    pub fn id(&self) -> ContextId {
        self.stream.id()
    }

    #[inline]
    pub fn file(&self) -> &Arc<SourceFile> {
        self.stream.file()
    }

    #[inline]
    pub fn stream(&self) -> &TokenStream {
        &self.stream
    }

    /// The stream, for minting synthetic tokens.
    #[inline]
    pub fn stream_mut(&mut self) -> &mut TokenStream {
        &mut self.stream
    }

    #[inline]
    pub fn arena(&self) -> &AstArena {
        &self.arena
    }

    #[inline]
    pub fn arena_mut(&mut self) -> &mut AstArena {
        &mut self.arena
    }

    /// Borrow the stream immutably and the arena mutably at the same time.
    #[inline]
    pub fn split_mut(&mut self) -> (&TokenStream, &mut AstArena) {
        (&self.stream, &mut self.arena)
    }

    /// Resolve a detached token.
    #[inline]
    #[track_caller]
    pub fn token(&self, tok: Token) -> TokenRef<'_> {
        self.stream.get(tok)
    }

    /// The file body.
    pub fn root(&self) -> DeclBody<'_> {
        self.body(self.arena.root())
    }

    /// The file-level view of the root body.
    pub fn file_view(&self) -> File<'_> {
        File::new(self.root())
    }

    #[track_caller]
    pub fn decl(&self, id: DeclId) -> DeclAny<'_> {
        DeclAny::new(self, id.raw_in(self.id()))
    }

    /// The view of any node with a fixed kind.
    #[track_caller]
    pub fn get<I: NodeView>(&self, id: I) -> I::View<'_> {
        id.view(self)
    }

    #[track_caller]
    pub fn def(&self, id: DeclDefId) -> DeclDef<'_> {
        self.get(id)
    }

    #[track_caller]
    pub fn body(&self, id: DeclBodyId) -> DeclBody<'_> {
        self.get(id)
    }

    #[track_caller]
    pub fn expr(&self, id: ExprId) -> ExprAny<'_> {
        ExprAny::new(self, id.raw_in(self.id()))
    }

    #[track_caller]
    pub fn ty(&self, id: TypeId) -> TypeAny<'_> {
        TypeAny::new(self, id.raw_in(self.id()))
    }

    #[track_caller]
    pub fn options(&self, id: OptionsId) -> CompactOptions<'_> {
        self.get(id)
    }
}

/// A node id with a view of a fixed type. Implemented for every id minted by
/// [`AstArena`](super::AstArena) constructors.
pub trait NodeView: Copy {
    type View<'a>;

    /// Resolve against `ctx`.
    ///
    /// # Panics
    /// Panics if the id was minted by another context.
    fn view(self, ctx: &Context) -> Self::View<'_>;
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("id", &self.id())
            .field("file", &self.file().path())
            .field("tokens", &self.stream.natural_len())
            .field("nodes", &self.arena.node_count())
            .finish()
    }
}
