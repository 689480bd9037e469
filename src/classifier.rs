use serde::{Deserialize, Serialize};
use std::fmt;
use swc_common::Spanned;
use swc_ecma_ast::*;

use crate::config::{Settings, SortMode};
use crate::module_path::{classify_module_path, ModuleType};
use crate::source::{SourceFile, TextRange};

/// Surface shape of the binding a `require` statement introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyntaxGroup {
    /// `require("x");`
    None,
    /// `const x = require("x");`
    Single,
    /// `const { a, b } = require("x");`
    Multiple,
}

impl SyntaxGroup {
    pub fn as_str(self) -> &'static str {
        match self {
            SyntaxGroup::None => "none",
            SyntaxGroup::Single => "single",
            SyntaxGroup::Multiple => "multiple",
        }
    }
}

impl fmt::Display for SyntaxGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the declaration binds: the load itself, a member of it, or the result of calling it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationGroup {
    /// `const x = require("x").y;`
    Member,
    /// `const x = require("x");`
    Static,
    /// `const x = require("x")(options);`
    Call,
}

impl DeclarationGroup {
    pub fn as_str(self) -> &'static str {
        match self {
            DeclarationGroup::Member => "member",
            DeclarationGroup::Static => "static",
            DeclarationGroup::Call => "call",
        }
    }
}

impl fmt::Display for DeclarationGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The binding side of a recognised statement.
#[derive(Debug, Clone, Copy)]
pub enum Binding<'a> {
    None,
    Single(&'a Pat),
    Destructured(&'a ObjectPat),
}

/// A top-level statement recognised as a module load. The shape is resolved once here;
/// everything downstream works on the tags.
#[derive(Debug, Clone, Copy)]
pub struct RequireStatement<'a> {
    pub stmt: &'a Stmt,
    pub binding: Binding<'a>,
    pub declaration: DeclarationGroup,
    /// The load call, `require(...)`.
    pub call: &'a CallExpr,
}

impl<'a> RequireStatement<'a> {
    /// Recognise a statement as a load. Returns `None` for anything else.
    pub fn recognize(stmt: &'a Stmt) -> Option<Self> {
        match stmt {
            Stmt::Expr(ExprStmt { expr, .. }) => {
                let call = expr.as_call()?;
                if !is_require_call(call) || call.args.len() != 1 {
                    return None;
                }
                Some(Self {
                    stmt,
                    binding: Binding::None,
                    declaration: DeclarationGroup::Static,
                    call,
                })
            }
            Stmt::Decl(Decl::Var(var)) => {
                let declarator = var.decls.first()?;
                let init = declarator.init.as_deref()?;
                let (call, declaration) = match init {
                    Expr::Call(call) if is_require_call(call) => {
                        string_argument(call)?;
                        (call, DeclarationGroup::Static)
                    }
                    Expr::Member(member) => {
                        let call = member.obj.as_call().filter(|call| is_require_call(call))?;
                        (call, DeclarationGroup::Member)
                    }
                    Expr::Call(outer) => {
                        let callee = outer.callee.as_expr()?;
                        let call = callee.as_call().filter(|call| is_require_call(call))?;
                        (call, DeclarationGroup::Call)
                    }
                    _ => return None,
                };
                let binding = match &declarator.name {
                    Pat::Object(pattern) => Binding::Destructured(pattern),
                    other => Binding::Single(other),
                };
                Some(Self {
                    stmt,
                    binding,
                    declaration,
                    call,
                })
            }
            _ => None,
        }
    }

    pub fn syntax(&self) -> SyntaxGroup {
        match self.binding {
            Binding::None => SyntaxGroup::None,
            Binding::Single(_) => SyntaxGroup::Single,
            Binding::Destructured(_) => SyntaxGroup::Multiple,
        }
    }

    /// The module path with escapes decoded, if the load is given a string literal.
    pub fn module_path(&self) -> Option<String> {
        string_argument(self.call).map(|literal| literal.value.to_string())
    }

    /// The name the statement binds, used as its key in `name` mode.
    pub fn binding_name(&self) -> Option<String> {
        match self.binding {
            Binding::None => None,
            Binding::Single(Pat::Ident(ident)) => Some(ident.id.sym.to_string()),
            Binding::Single(_) => None,
            Binding::Destructured(pattern) => pattern.props.first().and_then(local_binding_name),
        }
    }
}

/// One classified load statement. Lives only while its file is processed.
#[derive(Debug, Clone)]
pub struct SortingNode<'a> {
    pub range: TextRange,
    pub name: String,
    pub syntax_group: SyntaxGroup,
    pub module_group: ModuleType,
    pub declaration_group: DeclarationGroup,
    pub statement: RequireStatement<'a>,
}

impl<'a> SortingNode<'a> {
    /// Whether any of the three group tags differs between the two nodes.
    pub fn differs_in_group(&self, other: &SortingNode<'_>) -> bool {
        self.syntax_group != other.syntax_group
            || self.module_group != other.module_group
            || self.declaration_group != other.declaration_group
    }
}

/// Classify a recognised statement under the active settings. Never fails: a
/// statement without a usable literal or identifier gets an empty key.
pub fn classify<'a>(
    statement: RequireStatement<'a>,
    source: &SourceFile,
    settings: &Settings,
) -> SortingNode<'a> {
    let range = source.range_of(statement.stmt.span());
    let path = statement.module_path();

    let name = match settings.config.sort_mode {
        SortMode::Path => path.clone(),
        SortMode::Length => source.slice(range).ok().map(str::to_string),
        SortMode::Name => match statement.binding {
            Binding::None => path.clone(),
            _ => statement.binding_name(),
        },
    }
    .unwrap_or_default();

    let module_group = classify_module_path(
        path.as_deref().unwrap_or_default(),
        settings.config.environment,
        settings.internal_patterns(),
    );

    SortingNode {
        range,
        name,
        syntax_group: statement.syntax(),
        module_group,
        declaration_group: statement.declaration,
        statement,
    }
}

/// The identifier a destructured property binds locally, following a default
/// value to its left-hand side. Rest elements and nested patterns have none.
pub fn local_binding_name(prop: &ObjectPatProp) -> Option<String> {
    match prop {
        ObjectPatProp::Assign(assign) => Some(assign.key.sym.to_string()),
        ObjectPatProp::KeyValue(kv) => match kv.value.as_ref() {
            Pat::Ident(ident) => Some(ident.id.sym.to_string()),
            Pat::Assign(assign) => match assign.left.as_ref() {
                Pat::Ident(ident) => Some(ident.id.sym.to_string()),
                _ => None,
            },
            _ => None,
        },
        ObjectPatProp::Rest(_) => None,
    }
}

fn is_require_call(call: &CallExpr) -> bool {
    matches!(
        call.callee.as_expr().map(|callee| callee.as_ref()),
        Some(Expr::Ident(ident)) if &*ident.sym == "require"
    )
}

fn string_argument(call: &CallExpr) -> Option<&Str> {
    let first = call.args.first()?;
    if first.spread.is_some() {
        return None;
    }
    match first.expr.as_ref() {
        Expr::Lit(Lit::Str(literal)) => Some(literal),
        _ => None,
    }
}
