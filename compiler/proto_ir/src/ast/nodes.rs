//! Storage rows for each node variant.
//!
//! Rows hold raw tokens and raw child handles only; everything is resolved
//! through the owning [`Context`](super::Context).

use std::num::NonZeroU32;

use super::commas::RawWithComma;
use super::ids::{DeclKind, RawExpr, RawType};
use super::path::RawPath;
use crate::RawToken;

#[derive(Clone, Debug)]
pub(crate) struct RawDeclEmpty {
    pub(crate) semi: RawToken,
}

#[derive(Clone, Debug)]
pub(crate) struct RawDeclSyntax {
    pub(crate) keyword: RawToken,
    pub(crate) equals: RawToken,
    pub(crate) value: Option<RawExpr>,
    pub(crate) options: Option<NonZeroU32>,
    pub(crate) semi: RawToken,
}

#[derive(Clone, Debug)]
pub(crate) struct RawDeclPackage {
    pub(crate) keyword: RawToken,
    pub(crate) path: RawPath,
    pub(crate) options: Option<NonZeroU32>,
    pub(crate) semi: RawToken,
}

#[derive(Clone, Debug)]
pub(crate) struct RawDeclImport {
    pub(crate) keyword: RawToken,
    pub(crate) modifier: RawToken,
    pub(crate) path: Option<RawExpr>,
    pub(crate) options: Option<NonZeroU32>,
    pub(crate) semi: RawToken,
}

/// Method signature: `(inputs) returns (outputs)`.
#[derive(Clone, Debug, Default)]
pub(crate) struct RawSignature {
    pub(crate) inputs: RawToken,
    pub(crate) input_list: Vec<RawWithComma<RawType>>,
    pub(crate) returns: RawToken,
    pub(crate) outputs: RawToken,
    pub(crate) output_list: Vec<RawWithComma<RawType>>,
}

#[derive(Clone, Debug)]
pub(crate) struct RawDeclDef {
    pub(crate) ty: Option<RawType>,
    pub(crate) name: RawPath,
    pub(crate) signature: Option<Box<RawSignature>>,
    pub(crate) equals: RawToken,
    pub(crate) value: Option<RawExpr>,
    pub(crate) options: Option<NonZeroU32>,
    pub(crate) body: Option<NonZeroU32>,
    pub(crate) semi: RawToken,
    pub(crate) corrupt: bool,
}

/// A sequence of declarations stored as parallel kind and index arrays.
#[derive(Clone, Debug, Default)]
pub(crate) struct RawDeclBody {
    pub(crate) braces: RawToken,
    pub(crate) kinds: Vec<DeclKind>,
    pub(crate) idxs: Vec<u32>,
}

#[derive(Clone, Debug)]
pub(crate) struct RawDeclRange {
    pub(crate) keyword: RawToken,
    pub(crate) args: Vec<RawWithComma<RawExpr>>,
    pub(crate) options: Option<NonZeroU32>,
    pub(crate) semi: RawToken,
}

#[derive(Clone, Debug)]
pub(crate) struct RawExprLiteral {
    pub(crate) token: RawToken,
    /// Further pieces of an implicitly concatenated string: `"a" "b"`.
    pub(crate) rest: Box<[RawToken]>,
}

#[derive(Clone, Debug)]
pub(crate) struct RawExprPath {
    pub(crate) path: RawPath,
}

#[derive(Clone, Debug)]
pub(crate) struct RawExprPrefixed {
    pub(crate) prefix: RawToken,
    pub(crate) expr: Option<RawExpr>,
}

#[derive(Clone, Debug)]
pub(crate) struct RawExprRange {
    pub(crate) start: Option<RawExpr>,
    pub(crate) to: RawToken,
    pub(crate) end: Option<RawExpr>,
}

#[derive(Clone, Debug)]
pub(crate) struct RawExprArray {
    pub(crate) brackets: RawToken,
    pub(crate) elems: Vec<RawWithComma<RawExpr>>,
}

#[derive(Clone, Debug)]
pub(crate) struct RawExprDict {
    pub(crate) braces: RawToken,
    pub(crate) entries: Vec<RawWithComma<NonZeroU32>>,
}

#[derive(Clone, Debug)]
pub(crate) struct RawExprField {
    pub(crate) key: Option<RawExpr>,
    pub(crate) colon: RawToken,
    pub(crate) value: Option<RawExpr>,
}

#[derive(Clone, Debug)]
pub(crate) struct RawTypePath {
    pub(crate) path: RawPath,
}

#[derive(Clone, Debug)]
pub(crate) struct RawTypePrefixed {
    pub(crate) prefix: RawToken,
    pub(crate) ty: Option<RawType>,
}

#[derive(Clone, Debug)]
pub(crate) struct RawTypeGeneric {
    pub(crate) path: RawPath,
    pub(crate) open: RawToken,
    pub(crate) args: Vec<RawWithComma<RawType>>,
    pub(crate) close: RawToken,
}

/// One `path = value` entry of a compact options list.
#[derive(Copy, Clone, Debug)]
pub struct RawOptionEntry {
    pub(crate) path: RawPath,
    pub(crate) equals: RawToken,
    pub(crate) value: Option<RawExpr>,
}

#[derive(Clone, Debug)]
pub(crate) struct RawOptions {
    pub(crate) brackets: RawToken,
    pub(crate) entries: Vec<RawWithComma<RawOptionEntry>>,
}
