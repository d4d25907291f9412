//! Indented textual dump of a syntax tree.
//!
//! One line per declaration, children indented by two spaces. Expressions and
//! types are rendered inline in a normalized source form. Missing children
//! render as `<missing>`; corrupt definitions end in `!corrupt`.
//!
//! ```text
//! file
//!   syntax "proto3"
//!   package foo.bar
//!   message Foo
//!     field optional int32 x = 1 [deprecated = true]
//! ```

use std::fmt::Write as _;

use proto_stack::ensure_sufficient_stack;

use super::{
    Context, DeclAny, DeclBody, DeclDef, DeclKind, DefKind, ExprAny, ExprKind, TypeAny, TypeKind,
};
use super::{CompactOptions, Signature};
use crate::Span;

/// Dump settings.
#[derive(Copy, Clone, Debug, Default)]
pub struct DumpOptions {
    /// Append ` @ start..end` to every declaration line.
    pub spans: bool,
}

/// Dump the whole tree of `ctx`.
pub fn dump(ctx: &Context) -> String {
    dump_with(ctx, DumpOptions::default())
}

pub fn dump_with(ctx: &Context, options: DumpOptions) -> String {
    let mut d = Dumper {
        buffer: String::new(),
        depth: 0,
        options,
    };
    d.line("file", ctx.root().span());
    d.depth += 1;
    d.body(ctx.root());
    d.buffer
}

/// Render an expression on one line.
pub fn expr_to_string(expr: ExprAny<'_>) -> String {
    let mut out = String::new();
    write_expr(&mut out, Some(expr));
    out
}

/// Render a type on one line.
pub fn type_to_string(ty: TypeAny<'_>) -> String {
    let mut out = String::new();
    write_type(&mut out, Some(ty));
    out
}

struct Dumper {
    buffer: String,
    depth: usize,
    options: DumpOptions,
}

impl Dumper {
    fn line(&mut self, text: &str, span: Span) {
        for _ in 0..self.depth {
            self.buffer.push_str("  ");
        }
        self.buffer.push_str(text);
        if self.options.spans {
            let _ = write!(self.buffer, " @ {span:?}");
        }
        self.buffer.push('\n');
    }

    fn body(&mut self, body: DeclBody<'_>) {
        for decl in body.iter() {
            self.decl(decl);
        }
    }

    fn decl(&mut self, decl: DeclAny<'_>) {
        ensure_sufficient_stack(|| self.decl_inner(decl));
    }

    fn decl_inner(&mut self, decl: DeclAny<'_>) {
        let mut text = String::new();
        match decl.kind() {
            DeclKind::Empty => text.push_str("empty"),
            DeclKind::Syntax => {
                if let Some(s) = decl.as_syntax() {
                    text.push_str(if s.is_edition() { "edition " } else { "syntax " });
                    write_expr(&mut text, s.value());
                    write_options(&mut text, s.options());
                }
            }
            DeclKind::Package => {
                if let Some(p) = decl.as_package() {
                    text.push_str("package ");
                    match p.path() {
                        Some(path) => {
                            let _ = write!(text, "{path}");
                        }
                        None => text.push_str(MISSING),
                    }
                    write_options(&mut text, p.options());
                }
            }
            DeclKind::Import => {
                if let Some(i) = decl.as_import() {
                    text.push_str("import ");
                    if let Some(m) = i.modifier_token() {
                        text.push_str(m.text());
                        text.push(' ');
                    }
                    write_expr(&mut text, i.import_path());
                    write_options(&mut text, i.options());
                }
            }
            DeclKind::Range => {
                if let Some(r) = decl.as_range() {
                    text.push_str(r.keyword().map_or(MISSING, |k| k.text()));
                    for (i, arg) in r.args().iter().enumerate() {
                        text.push_str(if i == 0 { " " } else { ", " });
                        write_expr(&mut text, Some(arg));
                    }
                    write_options(&mut text, r.options());
                }
            }
            DeclKind::Body => {
                if let Some(b) = decl.as_body() {
                    self.line("body", b.span());
                    self.nested(b);
                }
                return;
            }
            DeclKind::Def => {
                if let Some(def) = decl.as_def() {
                    self.def(def);
                }
                return;
            }
        }
        self.line(&text, decl.span());
    }

    fn def(&mut self, def: DeclDef<'_>) {
        let kind = def.classify();
        let mut text = String::from(kind_label(kind));
        let keyword = def.keyword();
        if keyword.is_none() {
            // Fields print their type; keyword definitions print nothing.
            if let Some(ty) = def.ty() {
                text.push(' ');
                write_type(&mut text, Some(ty));
            } else if kind == DefKind::Field {
                text.push(' ');
                text.push_str(MISSING);
            }
        } else if let Some(pre) = def.ty().filter(|t| t.kind() == TypeKind::Prefixed) {
            for p in pre.prefixes() {
                if let Some(tok) = p.prefix_token() {
                    text.push(' ');
                    text.push_str(tok.text());
                }
            }
        }
        text.push(' ');
        match def.name() {
            Some(name) => {
                let _ = write!(text, "{name}");
            }
            None => text.push_str(MISSING),
        }
        if let Some(sig) = def.signature() {
            write_signature(&mut text, sig);
        }
        if def.equals().is_some() || def.value().is_some() {
            text.push_str(" = ");
            write_expr(&mut text, def.value());
        }
        write_options(&mut text, def.options());
        if def.is_corrupt() {
            text.push_str(" !corrupt");
        }
        self.line(&text, def.span());
        if let Some(body) = def.body() {
            self.nested(body);
        }
    }

    fn nested(&mut self, body: DeclBody<'_>) {
        self.depth += 1;
        self.body(body);
        self.depth -= 1;
    }
}

const MISSING: &str = "<missing>";

fn kind_label(kind: DefKind) -> &'static str {
    match kind {
        DefKind::Message => "message",
        DefKind::Enum => "enum",
        DefKind::Service => "service",
        DefKind::Extend => "extend",
        DefKind::Field => "field",
        DefKind::EnumValue => "enum-value",
        DefKind::Oneof => "oneof",
        DefKind::Group => "group",
        DefKind::Method => "method",
        DefKind::Option => "option",
    }
}

fn write_signature(out: &mut String, sig: Signature<'_>) {
    write_type_list(out, sig.input_parens().is_some(), sig.inputs().iter());
    if sig.returns().is_some() || sig.output_parens().is_some() {
        out.push_str(" returns ");
        write_type_list(out, sig.output_parens().is_some(), sig.outputs().iter());
    }
}

fn write_type_list<'a>(out: &mut String, present: bool, types: impl Iterator<Item = TypeAny<'a>>) {
    if !present {
        out.push_str(MISSING);
        return;
    }
    out.push('(');
    for (i, ty) in types.enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_type(out, Some(ty));
    }
    out.push(')');
}

fn write_options(out: &mut String, options: Option<CompactOptions<'_>>) {
    let Some(options) = options else { return };
    out.push_str(" [");
    for (i, entry) in options.entries().iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        match entry.path() {
            Some(p) => {
                let _ = write!(out, "{p}");
            }
            None => out.push_str(MISSING),
        }
        out.push_str(" = ");
        write_expr(out, entry.value());
    }
    out.push(']');
}

fn write_type(out: &mut String, ty: Option<TypeAny<'_>>) {
    ensure_sufficient_stack(|| write_type_inner(out, ty));
}

fn write_type_inner(out: &mut String, ty: Option<TypeAny<'_>>) {
    let Some(ty) = ty else {
        out.push_str(MISSING);
        return;
    };
    match ty.kind() {
        TypeKind::Path => {
            if let Some(p) = ty.as_path() {
                let _ = write!(out, "{}", p.path());
            }
        }
        TypeKind::Prefixed => {
            if let Some(p) = ty.as_prefixed() {
                out.push_str(p.prefix_token().map_or(MISSING, |t| t.text()));
                out.push(' ');
                write_type(out, p.ty());
            }
        }
        TypeKind::Generic => {
            if let Some(g) = ty.as_generic() {
                let _ = write!(out, "{}<", g.path());
                for (i, arg) in g.args().iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_type(out, Some(arg));
                }
                out.push('>');
            }
        }
    }
}

fn write_expr(out: &mut String, expr: Option<ExprAny<'_>>) {
    ensure_sufficient_stack(|| write_expr_inner(out, expr));
}

fn write_expr_inner(out: &mut String, expr: Option<ExprAny<'_>>) {
    let Some(expr) = expr else {
        out.push_str(MISSING);
        return;
    };
    match expr.kind() {
        ExprKind::Literal => {
            if let Some(lit) = expr.as_literal() {
                let mut pieces = lit.pieces().peekable();
                if pieces.peek().is_none() {
                    out.push_str(MISSING);
                }
                for (i, piece) in pieces.enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    out.push_str(piece.text());
                }
            }
        }
        ExprKind::Path => {
            if let Some(p) = expr.as_path() {
                let _ = write!(out, "{}", p.path());
            }
        }
        ExprKind::Prefixed => {
            if let Some(p) = expr.as_prefixed() {
                out.push_str(p.prefix().map_or(MISSING, |t| t.text()));
                write_expr(out, p.expr());
            }
        }
        ExprKind::Range => {
            if let Some(r) = expr.as_range() {
                write_expr(out, r.start());
                out.push_str(" to ");
                write_expr(out, r.end());
            }
        }
        ExprKind::Array => {
            if let Some(a) = expr.as_array() {
                out.push('[');
                for (i, e) in a.elems().iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_expr(out, Some(e));
                }
                out.push(']');
            }
        }
        ExprKind::Dict => {
            if let Some(d) = expr.as_dict() {
                out.push('{');
                for (i, f) in d.entries().iter().enumerate() {
                    out.push_str(if i == 0 { " " } else { ", " });
                    write_expr(out, Some(ExprAny::from(f)));
                }
                out.push_str(if d.entries().is_empty() { "}" } else { " }" });
            }
        }
        ExprKind::Field => {
            if let Some(f) = expr.as_field() {
                write_expr(out, f.key());
                if f.colon().is_some() {
                    out.push_str(": ");
                } else {
                    out.push(' ');
                }
                write_expr(out, f.value());
            }
        }
    }
}
