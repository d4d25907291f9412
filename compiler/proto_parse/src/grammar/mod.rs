//! Grammar Modules
//!
//! Each module extends `Parser` with methods for one family of productions:
//!
//! - [`decl`]: bodies and the declarations with a grammar of their own
//!   (`syntax`, `package`, `import`, `reserved`, `extensions`)
//! - [`def`]: general definitions and their followers
//! - [`ty`]: types, including modifier chains and `map<K, V>`
//! - [`expr`]: values, ranges, arrays and message literals
//! - [`options`]: compact options
//! - [`delimited`]: the comma-delimited list shared by all of the above
//!
//! Ambiguities such as `message Foo` (a message, or a field of type
//! `message`?) are resolved by parsing greedily and deciding afterwards from
//! what followed.

mod decl;
mod def;
mod delimited;
mod expr;
mod options;
mod ty;

pub(crate) use delimited::ListRules;
pub(crate) use ty::TypeParts;
