//! Statement AST nodes.

use javaparse_core::Position;

use crate::ast::expr::Expr;
use crate::ast::types::TypeExpr;
use crate::ast::{Ident, Modifiers};

/// A statement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stmt<'ast> {
    /// Expression followed by `;`
    Expr(ExprStmt<'ast>),
    /// Local variable declaration
    VarDecl(VarDeclStmt<'ast>),
    Block(Block<'ast>),
    If(&'ast IfStmt<'ast>),
    While(&'ast WhileStmt<'ast>),
    DoWhile(&'ast DoWhileStmt<'ast>),
    For(&'ast ForStmt<'ast>),
    ForEach(&'ast ForEachStmt<'ast>),
    Switch(&'ast SwitchStmt<'ast>),
    Try(&'ast TryStmt<'ast>),
    Throw(ThrowStmt<'ast>),
    Return(ReturnStmt<'ast>),
    Break(JumpStmt<'ast>),
    Continue(JumpStmt<'ast>),
    Synchronized(&'ast SynchronizedStmt<'ast>),
    Labeled(&'ast LabeledStmt<'ast>),
    /// A lone `;`
    Empty(Position),
    /// `this(args);` at the start of a constructor body
    ThisCall(ConstructorCall<'ast>),
    /// `super(args);` at the start of a constructor body
    SuperCall(ConstructorCall<'ast>),
}

impl<'ast> Stmt<'ast> {
    pub fn position(&self) -> Position {
        match self {
            Self::Expr(s) => s.position,
            Self::VarDecl(s) => s.position,
            Self::Block(s) => s.position,
            Self::If(s) => s.position,
            Self::While(s) => s.position,
            Self::DoWhile(s) => s.position,
            Self::For(s) => s.position,
            Self::ForEach(s) => s.position,
            Self::Switch(s) => s.position,
            Self::Try(s) => s.position,
            Self::Throw(s) => s.position,
            Self::Return(s) => s.position,
            Self::Break(s) | Self::Continue(s) => s.position,
            Self::Synchronized(s) => s.position,
            Self::Labeled(s) => s.position,
            Self::Empty(pos) => *pos,
            Self::ThisCall(s) | Self::SuperCall(s) => s.position,
        }
    }

    /// Node name used by the interchange format.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Expr(_) => "ExpressionStatement",
            Self::VarDecl(_) => "VariableDeclaration",
            Self::Block(_) => "Block",
            Self::If(_) => "IfStatement",
            Self::While(_) => "WhileStatement",
            Self::DoWhile(_) => "DoWhileStatement",
            Self::For(_) => "ForStatement",
            Self::ForEach(_) => "ForEachStatement",
            Self::Switch(_) => "SwitchStatement",
            Self::Try(_) => "TryStatement",
            Self::Throw(_) => "ThrowStatement",
            Self::Return(_) => "ReturnStatement",
            Self::Break(_) => "BreakStatement",
            Self::Continue(_) => "ContinueStatement",
            Self::Synchronized(_) => "SynchronizedStatement",
            Self::Labeled(_) => "LabeledStatement",
            Self::Empty(_) => "EmptyStatement",
            Self::ThisCall(_) => "ThisCall",
            Self::SuperCall(_) => "SuperCall",
        }
    }
}

/// `{ stmt* }`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block<'ast> {
    /// Statements in source order.
    pub stmts: &'ast [Stmt<'ast>],
    pub position: Position,
}

impl<'ast> Block<'ast> {
    pub fn empty(position: Position) -> Self {
        Self {
            stmts: &[],
            position,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExprStmt<'ast> {
    pub expr: &'ast Expr<'ast>,
    pub position: Position,
}

/// `final? Type a = 1, b;`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarDeclStmt<'ast> {
    /// Only `final` is legal here.
    pub modifiers: Modifiers,
    pub ty: TypeExpr<'ast>,
    pub vars: &'ast [VarDeclarator<'ast>],
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarDeclarator<'ast> {
    pub name: Ident<'ast>,
    pub init: Option<&'ast Expr<'ast>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IfStmt<'ast> {
    pub condition: &'ast Expr<'ast>,
    pub then_stmt: &'ast Stmt<'ast>,
    pub else_stmt: Option<&'ast Stmt<'ast>>,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhileStmt<'ast> {
    pub condition: &'ast Expr<'ast>,
    pub body: &'ast Stmt<'ast>,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoWhileStmt<'ast> {
    pub body: &'ast Stmt<'ast>,
    pub condition: &'ast Expr<'ast>,
    pub position: Position,
}

/// Three-clause `for`. Omitted clauses hold empty placeholders, never absent children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForStmt<'ast> {
    pub init: ForInit<'ast>,
    /// [`Expr::Empty`] when omitted.
    pub condition: &'ast Expr<'ast>,
    /// [`Expr::Empty`] when omitted.
    pub update: &'ast Expr<'ast>,
    pub body: &'ast Stmt<'ast>,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ForInit<'ast> {
    Empty(Position),
    VarDecl(VarDeclStmt<'ast>),
    Expr(&'ast Expr<'ast>),
}

impl ForInit<'_> {
    pub fn is_empty(&self) -> bool {
        matches!(self, ForInit::Empty(_))
    }
}

/// `for (Type name : iterable) body`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForEachStmt<'ast> {
    pub modifiers: Modifiers,
    pub var_type: TypeExpr<'ast>,
    pub var_name: Ident<'ast>,
    pub iterable: &'ast Expr<'ast>,
    pub body: &'ast Stmt<'ast>,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwitchStmt<'ast> {
    pub expr: &'ast Expr<'ast>,
    pub cases: &'ast [SwitchCase<'ast>],
    pub position: Position,
}

/// One `case x:` or `default:` group with the statements that follow it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwitchCase<'ast> {
    /// `None` for `default`.
    pub label: Option<&'ast Expr<'ast>>,
    pub stmts: &'ast [Stmt<'ast>],
    pub position: Position,
}

impl SwitchCase<'_> {
    pub fn is_default(&self) -> bool {
        self.label.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TryStmt<'ast> {
    pub body: &'ast Stmt<'ast>,
    pub catches: &'ast [CatchClause<'ast>],
    pub finally: Option<Block<'ast>>,
    pub position: Position,
}

/// `catch (A | B name) { .. }`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatchClause<'ast> {
    /// At least one type; more than one for a multi-catch.
    pub exception_types: &'ast [TypeExpr<'ast>],
    pub name: Ident<'ast>,
    pub body: Block<'ast>,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrowStmt<'ast> {
    pub expr: &'ast Expr<'ast>,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnStmt<'ast> {
    pub value: Option<&'ast Expr<'ast>>,
    pub position: Position,
}

/// `break label?;` or `continue label?;`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpStmt<'ast> {
    pub label: Option<Ident<'ast>>,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynchronizedStmt<'ast> {
    pub lock: &'ast Expr<'ast>,
    pub body: Block<'ast>,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabeledStmt<'ast> {
    pub label: Ident<'ast>,
    pub body: &'ast Stmt<'ast>,
    pub position: Position,
}

/// Arguments of an explicit `this(..)`/`super(..)` constructor invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstructorCall<'ast> {
    pub args: &'ast [&'ast Expr<'ast>],
    pub position: Position,
}
