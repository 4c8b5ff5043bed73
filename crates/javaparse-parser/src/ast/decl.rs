//! Declaration AST nodes: the program root, imports, types and members.

use javaparse_core::Position;
use std::fmt;

use crate::ast::expr::Expr;
use crate::ast::stmt::Block;
use crate::ast::types::TypeExpr;
use crate::ast::{Ident, Modifiers, QualifiedName};

/// The root of a parsed compilation unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Program<'ast> {
    pub package: Option<QualifiedName<'ast>>,
    pub imports: &'ast [ImportDecl<'ast>],
    pub classes: &'ast [ClassDecl<'ast>],
    pub position: Position,
}

impl<'ast> Program<'ast> {
    /// Find a top-level type by name.
    pub fn class(&self, name: &str) -> Option<&'ast ClassDecl<'ast>> {
        self.classes.iter().find(|c| c.name.name == name)
    }
}

/// `import static? a.b.C;` or `import a.b.*;`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImportDecl<'ast> {
    /// Imported name without the trailing `.*`.
    pub path: QualifiedName<'ast>,
    pub is_static: bool,
    pub is_wildcard: bool,
    pub position: Position,
}

impl fmt::Display for ImportDecl<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_static {
            f.write_str("static ")?;
        }
        write!(f, "{}", self.path)?;
        if self.is_wildcard {
            f.write_str(".*")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
}

impl ClassKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            ClassKind::Class => "class",
            ClassKind::Interface => "interface",
            ClassKind::Enum => "enum",
        }
    }
}

/// A class, interface or enum declaration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassDecl<'ast> {
    pub kind: ClassKind,
    pub modifiers: Modifiers,
    pub name: Ident<'ast>,
    /// Type parameter names (`class Box<T>`).
    pub type_params: &'ast [Ident<'ast>],
    /// Superclass for classes (at most one), super-interfaces for interfaces.
    pub extends: &'ast [TypeExpr<'ast>],
    pub implements: &'ast [TypeExpr<'ast>],
    pub body: ClassBody<'ast>,
    pub position: Position,
}

impl<'ast> ClassDecl<'ast> {
    pub fn fields(&self) -> &'ast [FieldDecl<'ast>] {
        self.body.fields
    }

    pub fn methods(&self) -> &'ast [MethodDecl<'ast>] {
        self.body.methods
    }

    pub fn constructors(&self) -> &'ast [ConstructorDecl<'ast>] {
        self.body.constructors
    }

    pub fn initializers(&self) -> &'ast [Initializer<'ast>] {
        self.body.initializers
    }

    pub fn method(&self, name: &str) -> Option<&'ast MethodDecl<'ast>> {
        self.body.methods.iter().find(|m| m.name.name == name)
    }

    pub fn field(&self, name: &str) -> Option<&'ast FieldDecl<'ast>> {
        self.body.fields.iter().find(|f| f.name.name == name)
    }
}

/// Members of a class body, partitioned by kind. Each list keeps source order.
///
/// Also used for anonymous class bodies in `new T() { .. }`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassBody<'ast> {
    pub fields: &'ast [FieldDecl<'ast>],
    pub methods: &'ast [MethodDecl<'ast>],
    pub constructors: &'ast [ConstructorDecl<'ast>],
    pub initializers: &'ast [Initializer<'ast>],
    pub position: Position,
}

impl ClassBody<'_> {
    pub fn member_count(&self) -> usize {
        self.fields.len() + self.methods.len() + self.constructors.len() + self.initializers.len()
    }
}

/// One field declarator; `int a, b;` yields two of these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDecl<'ast> {
    pub modifiers: Modifiers,
    pub ty: TypeExpr<'ast>,
    pub name: Ident<'ast>,
    pub init: Option<&'ast Expr<'ast>>,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MethodDecl<'ast> {
    pub modifiers: Modifiers,
    pub return_type: TypeExpr<'ast>,
    pub name: Ident<'ast>,
    pub params: &'ast [Parameter<'ast>],
    pub throws: &'ast [TypeExpr<'ast>],
    /// Always present; an empty placeholder when the method has no body.
    pub body: Block<'ast>,
    /// False when the declaration ended in `;`.
    pub has_body: bool,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstructorDecl<'ast> {
    pub modifiers: Modifiers,
    pub name: Ident<'ast>,
    pub params: &'ast [Parameter<'ast>],
    pub throws: &'ast [TypeExpr<'ast>],
    pub body: Block<'ast>,
    pub position: Position,
}

/// `static { .. }` or an instance initializer `{ .. }`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Initializer<'ast> {
    pub is_static: bool,
    pub body: Block<'ast>,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameter<'ast> {
    pub ty: TypeExpr<'ast>,
    pub name: Ident<'ast>,
    pub is_final: bool,
    /// `Type... name`
    pub is_varargs: bool,
    pub position: Position,
}
