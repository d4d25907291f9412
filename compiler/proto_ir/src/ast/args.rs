//! Constructor arguments, one record per node variant.
//!
//! Every token and child id is detached and stamped; constructors check the
//! stamps against the arena before storing anything.

use super::commas::WithComma;
use super::ids::{DeclBodyId, ExprFieldId, ExprId, OptionsId, TypeId};
use super::path::PathTokens;
use crate::Token;

/// `syntax = "proto3";` or `edition = "2023";`.
#[derive(Clone, Debug)]
pub struct DeclSyntaxArgs {
    pub keyword: Token,
    pub equals: Option<Token>,
    pub value: Option<ExprId>,
    pub options: Option<OptionsId>,
    pub semi: Option<Token>,
}

/// `package foo.bar;`.
#[derive(Clone, Debug)]
pub struct DeclPackageArgs {
    pub keyword: Token,
    pub path: Option<PathTokens>,
    pub options: Option<OptionsId>,
    pub semi: Option<Token>,
}

/// `import public "foo.proto";`.
#[derive(Clone, Debug)]
pub struct DeclImportArgs {
    pub keyword: Token,
    pub modifier: Option<Token>,
    pub path: Option<ExprId>,
    pub options: Option<OptionsId>,
    pub semi: Option<Token>,
}

/// `(In) returns (Out)`.
#[derive(Clone, Debug, Default)]
pub struct SignatureArgs {
    pub inputs: Option<Token>,
    pub input_list: Vec<WithComma<TypeId>>,
    pub returns: Option<Token>,
    pub outputs: Option<Token>,
    pub output_list: Vec<WithComma<TypeId>>,
}

/// Any general definition: `message M { ... }`, `int32 x = 1;`,
/// `rpc M(In) returns (Out);`, `option foo = 1;`, ...
#[derive(Clone, Debug, Default)]
pub struct DeclDefArgs {
    pub ty: Option<TypeId>,
    pub name: Option<PathTokens>,
    pub signature: Option<SignatureArgs>,
    pub equals: Option<Token>,
    pub value: Option<ExprId>,
    pub options: Option<OptionsId>,
    pub body: Option<DeclBodyId>,
    pub semi: Option<Token>,
    pub corrupt: bool,
}

/// `reserved 1 to 5, "foo";` or `extensions 100 to max;`.
#[derive(Clone, Debug)]
pub struct DeclRangeArgs {
    pub keyword: Token,
    pub args: Vec<WithComma<ExprId>>,
    pub options: Option<OptionsId>,
    pub semi: Option<Token>,
}

/// `-1`.
#[derive(Clone, Debug)]
pub struct ExprPrefixedArgs {
    pub prefix: Token,
    pub expr: Option<ExprId>,
}

/// `1 to 5`.
#[derive(Clone, Debug)]
pub struct ExprRangeArgs {
    pub start: Option<ExprId>,
    pub to: Token,
    pub end: Option<ExprId>,
}

/// `[1, 2, 3]`.
#[derive(Clone, Debug)]
pub struct ExprArrayArgs {
    pub brackets: Token,
    pub elems: Vec<WithComma<ExprId>>,
}

/// `{ a: 1, b: 2 }`.
#[derive(Clone, Debug)]
pub struct ExprDictArgs {
    pub braces: Token,
    pub entries: Vec<WithComma<ExprFieldId>>,
}

/// `key: value`.
#[derive(Clone, Debug)]
pub struct ExprFieldArgs {
    pub key: Option<ExprId>,
    pub colon: Option<Token>,
    pub value: Option<ExprId>,
}

/// `repeated T`.
#[derive(Clone, Debug)]
pub struct TypePrefixedArgs {
    pub prefix: Token,
    pub ty: Option<TypeId>,
}

/// `map<K, V>`.
#[derive(Clone, Debug)]
pub struct TypeGenericArgs {
    pub path: PathTokens,
    pub open: Option<Token>,
    pub args: Vec<WithComma<TypeId>>,
    pub close: Option<Token>,
}

/// `[deprecated = true, (my.opt) = 1]`.
#[derive(Clone, Debug)]
pub struct OptionsArgs {
    pub brackets: Token,
    pub entries: Vec<WithComma<OptionEntryArgs>>,
}

/// `deprecated = true`.
#[derive(Copy, Clone, Debug)]
pub struct OptionEntryArgs {
    pub path: Option<PathTokens>,
    pub equals: Option<Token>,
    pub value: Option<ExprId>,
}
