//! Expression AST nodes.
//!
//! # Expression Precedence
//!
//! Lowest to highest binding:
//! 1. Assignment (`=`, `+=`, ...) - right associative
//! 2. Ternary (`?:`) - right associative
//! 3. Logical OR (`||`)
//! 4. Logical AND (`&&`)
//! 5. Bitwise OR, XOR, AND (`|`, `^`, `&`)
//! 6. Equality (`==`, `!=`)
//! 7. Relational (`<`, `<=`, `>`, `>=`, `instanceof`)
//! 8. Shift (`<<`, `>>`, `>>>`)
//! 9. Additive (`+`, `-`)
//! 10. Multiplicative (`*`, `/`, `%`)
//! 11. Prefix unary and cast (`!`, `-`, `+`, `~`, `++`, `--`, `(T)`)
//! 12. Postfix (`++`, `--`)
//! 13. Primary with access chain (`.f`, `(args)`, `[i]`)
//!
//! Parentheses do not produce a node; grouping is encoded in tree shape.

use javaparse_core::Position;
use ordered_float::OrderedFloat;

use crate::ast::decl::ClassBody;
use crate::ast::stmt::Block;
use crate::ast::types::TypeExpr;
use crate::ast::{AssignOp, BinaryOp, Ident, UnaryOp};

/// An expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expr<'ast> {
    /// Name reference
    Ident(Ident<'ast>),
    Literal(LiteralExpr<'ast>),
    Binary(&'ast BinaryExpr<'ast>),
    /// Prefix or postfix unary operation
    Unary(&'ast UnaryExpr<'ast>),
    Ternary(&'ast TernaryExpr<'ast>),
    Assign(&'ast AssignExpr<'ast>),
    MethodCall(&'ast MethodCallExpr<'ast>),
    FieldAccess(&'ast FieldAccessExpr<'ast>),
    ArrayAccess(&'ast ArrayAccessExpr<'ast>),
    /// `new T[n]`, `new T[] {..}`
    ArrayCreation(&'ast ArrayCreationExpr<'ast>),
    /// `new T(args)` with an optional anonymous class body
    ObjectCreation(&'ast ObjectCreationExpr<'ast>),
    /// `{a, b, c}`
    ArrayInit(ArrayInitExpr<'ast>),
    Cast(&'ast CastExpr<'ast>),
    Instanceof(&'ast InstanceofExpr<'ast>),
    Lambda(&'ast LambdaExpr<'ast>),
    This(Position),
    Super(Position),
    /// Placeholder for an omitted `for` clause.
    Empty(Position),
}

impl<'ast> Expr<'ast> {
    /// Where this expression's parse began.
    pub fn position(&self) -> Position {
        match self {
            Self::Ident(e) => e.position,
            Self::Literal(e) => e.position,
            Self::Binary(e) => e.position,
            Self::Unary(e) => e.position,
            Self::Ternary(e) => e.position,
            Self::Assign(e) => e.position,
            Self::MethodCall(e) => e.position,
            Self::FieldAccess(e) => e.position,
            Self::ArrayAccess(e) => e.position,
            Self::ArrayCreation(e) => e.position,
            Self::ObjectCreation(e) => e.position,
            Self::ArrayInit(e) => e.position,
            Self::Cast(e) => e.position,
            Self::Instanceof(e) => e.position,
            Self::Lambda(e) => e.position,
            Self::This(pos) | Self::Super(pos) | Self::Empty(pos) => *pos,
        }
    }

    /// Node name used by the interchange format.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Ident(_) => "Identifier",
            Self::Literal(_) => "Literal",
            Self::Binary(_) => "BinaryOperation",
            Self::Unary(_) => "UnaryOperation",
            Self::Ternary(_) => "TernaryOperation",
            Self::Assign(_) => "Assignment",
            Self::MethodCall(_) => "MethodCall",
            Self::FieldAccess(_) => "FieldAccess",
            Self::ArrayAccess(_) => "ArrayAccess",
            Self::ArrayCreation(_) => "ArrayCreation",
            Self::ObjectCreation(_) => "ObjectCreation",
            Self::ArrayInit(_) => "ArrayInitializer",
            Self::Cast(_) => "CastExpression",
            Self::Instanceof(_) => "InstanceofExpression",
            Self::Lambda(_) => "LambdaExpression",
            Self::This(_) => "This",
            Self::Super(_) => "Super",
            Self::Empty(_) => "EmptyExpression",
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty(_))
    }

    /// The identifier name if this is a bare name reference.
    pub fn as_ident(&self) -> Option<&'ast str> {
        match self {
            Self::Ident(ident) => Some(ident.name),
            _ => None,
        }
    }
}

/// A literal with its decoded value and the raw token text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiteralExpr<'ast> {
    pub kind: LiteralKind<'ast>,
    pub text: &'ast str,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind<'ast> {
    Int(i64),
    Float(OrderedFloat<f64>),
    Char(char),
    /// Contents without quotes, escapes decoded.
    String(&'ast str),
    Bool(bool),
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryExpr<'ast> {
    pub left: &'ast Expr<'ast>,
    pub op: BinaryOp,
    pub right: &'ast Expr<'ast>,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnaryExpr<'ast> {
    pub op: UnaryOp,
    pub operand: &'ast Expr<'ast>,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TernaryExpr<'ast> {
    pub condition: &'ast Expr<'ast>,
    pub then_expr: &'ast Expr<'ast>,
    pub else_expr: &'ast Expr<'ast>,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssignExpr<'ast> {
    pub target: &'ast Expr<'ast>,
    pub op: AssignOp,
    pub value: &'ast Expr<'ast>,
    pub position: Position,
}

/// `name(args)` or `target.name(args)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MethodCallExpr<'ast> {
    /// Receiver; `None` for an unqualified call.
    pub target: Option<&'ast Expr<'ast>>,
    pub name: Ident<'ast>,
    pub args: &'ast [&'ast Expr<'ast>],
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldAccessExpr<'ast> {
    pub target: &'ast Expr<'ast>,
    pub field: Ident<'ast>,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrayAccessExpr<'ast> {
    pub array: &'ast Expr<'ast>,
    pub index: &'ast Expr<'ast>,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrayCreationExpr<'ast> {
    /// The type named after `new`, without brackets.
    pub element_type: TypeExpr<'ast>,
    /// Sized dimensions in order; empty when an initializer supplies the contents.
    pub dimensions: &'ast [&'ast Expr<'ast>],
    pub initializer: Option<ArrayInitExpr<'ast>>,
    pub position: Position,
}

impl<'ast> ArrayCreationExpr<'ast> {
    /// The first dimension's size expression.
    pub fn size(&self) -> Option<&'ast Expr<'ast>> {
        self.dimensions.first().copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectCreationExpr<'ast> {
    pub class_type: TypeExpr<'ast>,
    pub args: &'ast [&'ast Expr<'ast>],
    /// Anonymous class body.
    pub body: Option<&'ast ClassBody<'ast>>,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrayInitExpr<'ast> {
    pub elements: &'ast [&'ast Expr<'ast>],
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CastExpr<'ast> {
    pub target_type: TypeExpr<'ast>,
    pub expr: &'ast Expr<'ast>,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceofExpr<'ast> {
    pub expr: &'ast Expr<'ast>,
    pub check_type: TypeExpr<'ast>,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LambdaExpr<'ast> {
    pub params: &'ast [LambdaParam<'ast>],
    pub body: LambdaBody<'ast>,
    pub position: Position,
}

/// A lambda parameter; `ty` is `None` when the type is inferred.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LambdaParam<'ast> {
    pub ty: Option<TypeExpr<'ast>>,
    pub name: Ident<'ast>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LambdaBody<'ast> {
    Expr(&'ast Expr<'ast>),
    Block(Block<'ast>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_reports_left_position_and_kind() {
        let left = Expr::Ident(Ident::new("a", Position::new(1, 1)));
        let right = Expr::Ident(Ident::new("b", Position::new(1, 5)));
        let binary = BinaryExpr {
            left: &left,
            op: BinaryOp::Add,
            right: &right,
            position: Position::new(1, 1),
        };
        let expr = Expr::Binary(&binary);
        assert_eq!(expr.position(), Position::new(1, 1));
        assert_eq!(expr.kind_name(), "BinaryOperation");
    }

    #[test]
    fn empty_placeholder() {
        let expr = Expr::Empty(Position::new(2, 10));
        assert!(expr.is_empty());
        assert_eq!(expr.kind_name(), "EmptyExpression");
        assert_eq!(expr.as_ident(), None);
    }

    #[test]
    fn array_creation_size_is_first_dimension() {
        let three = Expr::Literal(LiteralExpr {
            kind: LiteralKind::Int(3),
            text: "3",
            position: Position::new(1, 13),
        });
        let dims = [&three];
        let creation = ArrayCreationExpr {
            element_type: TypeExpr::named("int", Position::new(1, 5)),
            dimensions: &dims,
            initializer: None,
            position: Position::new(1, 1),
        };
        assert_eq!(creation.size(), Some(&three));
    }
}
