//! Operator definitions for Java expressions.
//!
//! Binary operators carry their precedence level; the expression parser
//! climbs these levels from [`BinaryOp::LOWEST_PRECEDENCE`] up to
//! [`BinaryOp::HIGHEST_PRECEDENCE`].

use std::fmt;

/// Binary operators, grouped from lowest to highest binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    // Level 1
    /// `||`
    LogicalOr,

    // Level 2
    /// `&&`
    LogicalAnd,

    // Levels 3-5
    /// `|`
    BitwiseOr,
    /// `^`
    BitwiseXor,
    /// `&`
    BitwiseAnd,

    // Level 6
    /// `==`
    Equal,
    /// `!=`
    NotEqual,

    // Level 7 (`instanceof` also lives here but builds its own node)
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,

    // Level 8
    /// `<<`
    ShiftLeft,
    /// `>>`
    ShiftRight,
    /// `>>>`
    ShiftRightUnsigned,

    // Level 9
    /// `+`
    Add,
    /// `-`
    Sub,

    // Level 10
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
}

impl BinaryOp {
    pub const LOWEST_PRECEDENCE: u8 = 1;
    pub const HIGHEST_PRECEDENCE: u8 = 10;
    /// Level at which `instanceof` is parsed.
    pub const RELATIONAL_PRECEDENCE: u8 = 7;

    /// Precedence level; higher binds tighter. All levels are left-associative.
    pub fn precedence(&self) -> u8 {
        use BinaryOp::*;
        match self {
            LogicalOr => 1,
            LogicalAnd => 2,
            BitwiseOr => 3,
            BitwiseXor => 4,
            BitwiseAnd => 5,
            Equal | NotEqual => 6,
            Less | LessEqual | Greater | GreaterEqual => 7,
            ShiftLeft | ShiftRight | ShiftRightUnsigned => 8,
            Add | Sub => 9,
            Mul | Div | Mod => 10,
        }
    }

    /// Operator spelled by a single token. Shifts to the right arrive as
    /// joined `>` pieces and are recognised by the expression parser.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        use BinaryOp::*;
        Some(match symbol {
            "||" => LogicalOr,
            "&&" => LogicalAnd,
            "|" => BitwiseOr,
            "^" => BitwiseXor,
            "&" => BitwiseAnd,
            "==" => Equal,
            "!=" => NotEqual,
            "<" => Less,
            "<=" => LessEqual,
            ">" => Greater,
            ">=" => GreaterEqual,
            "<<" => ShiftLeft,
            ">>" => ShiftRight,
            ">>>" => ShiftRightUnsigned,
            "+" => Add,
            "-" => Sub,
            "*" => Mul,
            "/" => Div,
            "%" => Mod,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        use BinaryOp::*;
        match self {
            LogicalOr => "||",
            LogicalAnd => "&&",
            BitwiseOr => "|",
            BitwiseXor => "^",
            BitwiseAnd => "&",
            Equal => "==",
            NotEqual => "!=",
            Less => "<",
            LessEqual => "<=",
            Greater => ">",
            GreaterEqual => ">=",
            ShiftLeft => "<<",
            ShiftRight => ">>",
            ShiftRightUnsigned => ">>>",
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unary operators, prefix and postfix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `-x`
    Neg,
    /// `+x`
    Plus,
    /// `!x`
    LogicalNot,
    /// `~x`
    BitwiseNot,
    /// `++x`
    PreInc,
    /// `--x`
    PreDec,
    /// `x++`
    PostInc,
    /// `x--`
    PostDec,
}

impl UnaryOp {
    pub fn prefix_from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "-" => UnaryOp::Neg,
            "+" => UnaryOp::Plus,
            "!" => UnaryOp::LogicalNot,
            "~" => UnaryOp::BitwiseNot,
            "++" => UnaryOp::PreInc,
            "--" => UnaryOp::PreDec,
            _ => return None,
        })
    }

    pub fn postfix_from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "++" => UnaryOp::PostInc,
            "--" => UnaryOp::PostDec,
            _ => return None,
        })
    }

    pub fn is_postfix(&self) -> bool {
        matches!(self, UnaryOp::PostInc | UnaryOp::PostDec)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Plus => "+",
            UnaryOp::LogicalNot => "!",
            UnaryOp::BitwiseNot => "~",
            UnaryOp::PreInc | UnaryOp::PostInc => "++",
            UnaryOp::PreDec | UnaryOp::PostDec => "--",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assignment operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignOp {
    /// `=`
    Assign,
    /// `+=`
    AddAssign,
    /// `-=`
    SubAssign,
    /// `*=`
    MulAssign,
    /// `/=`
    DivAssign,
    /// `%=`
    ModAssign,
    /// `&=`
    AndAssign,
    /// `|=`
    OrAssign,
    /// `^=`
    XorAssign,
    /// `<<=`
    ShlAssign,
    /// `>>=`
    ShrAssign,
    /// `>>>=`
    UshrAssign,
}

impl AssignOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        use AssignOp::*;
        Some(match symbol {
            "=" => Assign,
            "+=" => AddAssign,
            "-=" => SubAssign,
            "*=" => MulAssign,
            "/=" => DivAssign,
            "%=" => ModAssign,
            "&=" => AndAssign,
            "|=" => OrAssign,
            "^=" => XorAssign,
            "<<=" => ShlAssign,
            ">>=" => ShrAssign,
            ">>>=" => UshrAssign,
            _ => return None,
        })
    }

    /// The binary operator a compound assignment applies, `None` for `=`.
    pub fn binary_op(&self) -> Option<BinaryOp> {
        use AssignOp::*;
        match self {
            Assign => None,
            AddAssign => Some(BinaryOp::Add),
            SubAssign => Some(BinaryOp::Sub),
            MulAssign => Some(BinaryOp::Mul),
            DivAssign => Some(BinaryOp::Div),
            ModAssign => Some(BinaryOp::Mod),
            AndAssign => Some(BinaryOp::BitwiseAnd),
            OrAssign => Some(BinaryOp::BitwiseOr),
            XorAssign => Some(BinaryOp::BitwiseXor),
            ShlAssign => Some(BinaryOp::ShiftLeft),
            ShrAssign => Some(BinaryOp::ShiftRight),
            UshrAssign => Some(BinaryOp::ShiftRightUnsigned),
        }
    }

    pub fn as_str(&self) -> &'static str {
        use AssignOp::*;
        match self {
            Assign => "=",
            AddAssign => "+=",
            SubAssign => "-=",
            MulAssign => "*=",
            DivAssign => "/=",
            ModAssign => "%=",
            AndAssign => "&=",
            OrAssign => "|=",
            XorAssign => "^=",
            ShlAssign => "<<=",
            ShrAssign => ">>=",
            UshrAssign => ">>>=",
        }
    }
}

impl fmt::Display for AssignOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplicative_binds_tighter_than_additive() {
        assert!(BinaryOp::Mul.precedence() > BinaryOp::Add.precedence());
        assert!(BinaryOp::Add.precedence() > BinaryOp::ShiftLeft.precedence());
        assert!(BinaryOp::Less.precedence() > BinaryOp::Equal.precedence());
        assert!(BinaryOp::LogicalAnd.precedence() > BinaryOp::LogicalOr.precedence());
    }

    #[test]
    fn precedence_bounds() {
        assert_eq!(BinaryOp::LogicalOr.precedence(), BinaryOp::LOWEST_PRECEDENCE);
        assert_eq!(BinaryOp::Mod.precedence(), BinaryOp::HIGHEST_PRECEDENCE);
        assert_eq!(BinaryOp::GreaterEqual.precedence(), BinaryOp::RELATIONAL_PRECEDENCE);
    }

    #[test]
    fn binary_symbols_round_trip() {
        for symbol in ["||", "&&", "==", "!=", "<", ">=", "<<", ">>>", "+", "%"] {
            let op = BinaryOp::from_symbol(symbol).unwrap();
            assert_eq!(op.to_string(), symbol);
        }
        assert_eq!(BinaryOp::from_symbol("="), None);
    }

    #[test]
    fn unary_prefix_and_postfix() {
        assert_eq!(UnaryOp::prefix_from_symbol("++"), Some(UnaryOp::PreInc));
        assert_eq!(UnaryOp::postfix_from_symbol("++"), Some(UnaryOp::PostInc));
        assert_eq!(UnaryOp::postfix_from_symbol("!"), None);
        assert!(UnaryOp::PostDec.is_postfix());
        assert!(!UnaryOp::Neg.is_postfix());
        assert_eq!(UnaryOp::PostDec.to_string(), "--");
    }

    #[test]
    fn compound_assignment_maps_to_binary() {
        assert_eq!(AssignOp::from_symbol("+="), Some(AssignOp::AddAssign));
        assert_eq!(AssignOp::AddAssign.binary_op(), Some(BinaryOp::Add));
        assert_eq!(AssignOp::UshrAssign.binary_op(), Some(BinaryOp::ShiftRightUnsigned));
        assert_eq!(AssignOp::Assign.binary_op(), None);
        assert_eq!(AssignOp::from_symbol("=="), None);
    }
}
