//! Type expression AST nodes.
//!
//! ```text
//! int                          // Primitive
//! String                       // Reference type
//! java.util.List<String>       // Qualified generic
//! Map<String, List<Integer>>   // Nested generics
//! int[][]                      // Array (rank is not tracked)
//! ArrayList<>                  // Diamond: empty argument list
//! ```
//!
//! Array rank collapses into [`TypeExpr::is_array`]: `int[]` and `int[][]`
//! produce the same node. Consumers that need the rank cannot recover it
//! from the tree.

use javaparse_core::Position;
use std::fmt;

/// A parsed type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeExpr<'ast> {
    /// Type name; qualified names keep their dots (`java.util.List`).
    pub name: &'ast str,
    /// Generic arguments, empty when none were written (or for `<>`).
    pub generic_args: &'ast [TypeExpr<'ast>],
    /// Whether one or more `[]` pairs followed the type.
    pub is_array: bool,
    pub position: Position,
}

impl<'ast> TypeExpr<'ast> {
    /// A plain named type with no arguments or array suffix.
    pub fn named(name: &'ast str, position: Position) -> Self {
        Self {
            name,
            generic_args: &[],
            is_array: false,
            position,
        }
    }

    pub fn primitive(&self) -> Option<PrimitiveType> {
        PrimitiveType::from_keyword(self.name)
    }

    /// Primitive and not an array.
    pub fn is_primitive(&self) -> bool {
        !self.is_array && self.primitive().is_some()
    }

    pub fn is_void(&self) -> bool {
        self.primitive() == Some(PrimitiveType::Void)
    }

    /// The `?` wildcard in a generic argument list.
    pub fn is_wildcard(&self) -> bool {
        self.name == "?"
    }
}

impl fmt::Display for TypeExpr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)?;
        if !self.generic_args.is_empty() {
            f.write_str("<")?;
            for (i, arg) in self.generic_args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(">")?;
        }
        if self.is_array {
            f.write_str("[]")?;
        }
        Ok(())
    }
}

/// Java primitive types, plus `void` for method return types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl PrimitiveType {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "boolean" => PrimitiveType::Boolean,
            "byte" => PrimitiveType::Byte,
            "char" => PrimitiveType::Char,
            "short" => PrimitiveType::Short,
            "int" => PrimitiveType::Int,
            "long" => PrimitiveType::Long,
            "float" => PrimitiveType::Float,
            "double" => PrimitiveType::Double,
            "void" => PrimitiveType::Void,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Char => "char",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
            PrimitiveType::Void => "void",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_nested_generic_array() {
        let pos = Position::new(1, 1);
        let inner = [TypeExpr::named("Integer", pos)];
        let args = [
            TypeExpr::named("String", pos),
            TypeExpr {
                name: "List",
                generic_args: &inner,
                is_array: false,
                position: pos,
            },
        ];
        let ty = TypeExpr {
            name: "Map",
            generic_args: &args,
            is_array: true,
            position: pos,
        };
        assert_eq!(ty.to_string(), "Map<String, List<Integer>>[]");
    }

    #[test]
    fn primitive_classification() {
        let pos = Position::new(1, 1);
        assert!(TypeExpr::named("int", pos).is_primitive());
        assert!(!TypeExpr::named("Integer", pos).is_primitive());
        assert!(TypeExpr::named("void", pos).is_void());

        let int_array = TypeExpr {
            is_array: true,
            ..TypeExpr::named("int", pos)
        };
        assert!(!int_array.is_primitive());
        assert_eq!(int_array.primitive(), Some(PrimitiveType::Int));
    }

    #[test]
    fn primitive_keywords() {
        assert_eq!(PrimitiveType::from_keyword("double"), Some(PrimitiveType::Double));
        assert_eq!(PrimitiveType::from_keyword("String"), None);
        assert_eq!(PrimitiveType::Boolean.to_string(), "boolean");
    }
}
