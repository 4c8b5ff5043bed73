//! Type parsing.
//!
//! Grammar: `type := name ('.' name)* genericArgs? ('[' ']')*` where `name`
//! is a primitive keyword or an identifier and
//! `genericArgs := '<' (typeArg (',' typeArg)*)? '>'`, `typeArg := type | '?' (('extends' | 'super') type)?`.

use javaparse_core::ParseError;

use super::parser::Parser;
use crate::ast::types::{PrimitiveType, TypeExpr};
use crate::tokens::{Lexeme, TokenKind};

/// Whether `token` can begin a type.
pub(super) fn starts_type(token: &Lexeme<'_>) -> bool {
    token.is_identifier()
        || (token.kind == TokenKind::Keyword && PrimitiveType::from_keyword(token.text).is_some())
}

impl<'ast> Parser<'ast> {
    /// Parse a complete type, including any array suffix.
    ///
    /// Examples:
    /// - `int`
    /// - `String[]`
    /// - `Map<String, List<Integer>>`
    pub fn parse_type(&mut self) -> Result<TypeExpr<'ast>, ParseError> {
        self.nested(|p| {
            let mut ty = p.parse_type_base()?;
            ty.is_array = p.eat_array_dims();
            Ok(ty)
        })
    }

    /// Parse a type name with generic arguments but no array suffix.
    ///
    /// Used directly by `new`, where `[` starts a dimension expression.
    pub(super) fn parse_type_base(&mut self) -> Result<TypeExpr<'ast>, ParseError> {
        let first = self.cursor.current();
        if !starts_type(&first) {
            return Err(self.cursor.unexpected("type"));
        }
        self.cursor.advance();

        let name = if first.is_identifier() && self.at_qualified_segment() {
            let mut qualified = String::from(first.text);
            while self.at_qualified_segment() {
                self.cursor.advance();
                qualified.push('.');
                qualified.push_str(self.cursor.advance().text);
            }
            self.arena.alloc_str(&qualified)
        } else {
            first.text
        };

        let generic_args = if self.cursor.check_punct("<") {
            self.parse_generic_args()?
        } else {
            &[]
        };

        Ok(TypeExpr {
            name,
            generic_args,
            is_array: false,
            position: first.position,
        })
    }

    /// `'.' IDENTIFIER` continues a qualified type name.
    fn at_qualified_segment(&self) -> bool {
        self.cursor.current().is_punct(".") && self.cursor.peek_nth(1).is_identifier()
    }

    /// Parse `<T, U>`; `<>` yields an empty list.
    fn parse_generic_args(&mut self) -> Result<&'ast [TypeExpr<'ast>], ParseError> {
        self.cursor.expect_punct("<")?;
        let mut args = bumpalo::collections::Vec::new_in(self.arena);

        if !self.cursor.check_punct(">") {
            loop {
                if let Some(wildcard) = self.cursor.eat_punct("?") {
                    // Wildcard bounds are not recorded.
                    if self.cursor.eat_keyword("extends").is_some() || self.cursor.eat_keyword("super").is_some() {
                        self.parse_type()?;
                    }
                    args.push(TypeExpr::named("?", wildcard.position));
                } else {
                    args.push(self.parse_type()?);
                }
                if self.cursor.eat_punct(",").is_none() {
                    break;
                }
            }
        }

        self.cursor.expect_punct(">")?;
        Ok(args.into_bump_slice())
    }

    /// Consume any number of `[]` pairs. Rank is not recorded.
    pub(super) fn eat_array_dims(&mut self) -> bool {
        let mut is_array = false;
        while self.cursor.check_punct("[") && self.cursor.peek_nth(1).is_punct("]") {
            self.cursor.advance();
            self.cursor.advance();
            is_array = true;
        }
        is_array
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserConfig;
    use crate::tokens::testing::tokenize;
    use bumpalo::Bump;
    use javaparse_core::Position;

    fn parse_type<'a>(source: &str, arena: &'a Bump) -> Result<TypeExpr<'a>, ParseError> {
        let mut parser = Parser::new(&tokenize(source), arena);
        let ty = parser.parse_type()?;
        parser.expect_eof()?;
        Ok(ty)
    }

    #[test]
    fn parse_primitive_type() {
        let arena = Bump::new();
        let ty = parse_type("int", &arena).unwrap();
        assert_eq!(ty.name, "int");
        assert!(ty.is_primitive());
        assert!(!ty.is_array);
    }

    #[test]
    fn parse_reference_type() {
        let arena = Bump::new();
        let ty = parse_type("String", &arena).unwrap();
        assert_eq!(ty, TypeExpr::named("String", Position::new(1, 1)));
    }

    #[test]
    fn array_rank_collapses() {
        let arena = Bump::new();
        let one = parse_type("int[]", &arena).unwrap();
        let two = parse_type("int[][]", &arena).unwrap();
        assert!(one.is_array);
        assert_eq!(one, two);
    }

    #[test]
    fn parse_generic_type() {
        let arena = Bump::new();
        let ty = parse_type("Map<String, List<Integer>>", &arena).unwrap();
        assert_eq!(ty.name, "Map");
        assert_eq!(ty.generic_args.len(), 2);
        assert_eq!(ty.generic_args[0].name, "String");
        assert_eq!(ty.generic_args[1].name, "List");
        assert_eq!(ty.generic_args[1].generic_args[0].name, "Integer");
        assert_eq!(ty.to_string(), "Map<String, List<Integer>>");
    }

    #[test]
    fn triple_closing_angle() {
        let arena = Bump::new();
        let ty = parse_type("A<B<C<D>>>[]", &arena).unwrap();
        assert!(ty.is_array);
        assert_eq!(ty.to_string(), "A<B<C<D>>>[]");
    }

    #[test]
    fn qualified_name() {
        let arena = Bump::new();
        let ty = parse_type("java.util.List<String>", &arena).unwrap();
        assert_eq!(ty.name, "java.util.List");
        assert_eq!(ty.generic_args.len(), 1);
    }

    #[test]
    fn diamond_and_wildcard() {
        let arena = Bump::new();
        let diamond = parse_type("ArrayList<>", &arena).unwrap();
        assert!(diamond.generic_args.is_empty());

        let wildcard = parse_type("Class<?>", &arena).unwrap();
        assert!(wildcard.generic_args[0].is_wildcard());

        let bounded = parse_type("List<? extends Number>", &arena).unwrap();
        assert!(bounded.generic_args[0].is_wildcard());
        assert!(bounded.generic_args[0].generic_args.is_empty());
        assert!(parse_type("Comparator<? super T>", &arena).is_ok());
    }

    #[test]
    fn rejects_non_type_token() {
        let arena = Bump::new();
        let err = parse_type("return", &arena).unwrap_err();
        assert_eq!(err.message(), "expected type, found keyword 'return'");
        let err = parse_type("42", &arena).unwrap_err();
        assert_eq!(err.position(), Position::new(1, 1));
    }

    #[test]
    fn unclosed_generic_fails() {
        let arena = Bump::new();
        assert!(parse_type("List<String", &arena).is_err());
    }

    #[test]
    fn lone_bracket_is_not_consumed() {
        let arena = Bump::new();
        let mut parser = Parser::new(&tokenize("int[5]"), &arena);
        let ty = parser.parse_type().unwrap();
        assert!(!ty.is_array);
        assert!(parser.cursor.check_punct("["));
    }

    #[test]
    fn deep_generics_hit_depth_limit() {
        let arena = Bump::new();
        let source = format!("{}T{}", "L<".repeat(20), ">".repeat(20));
        let tokens = tokenize(&source);
        let mut parser =
            Parser::new(&tokens, &arena).with_config(ParserConfig::default().with_max_depth(8));
        assert!(matches!(
            parser.parse_type(),
            Err(ParseError::DepthExceeded { limit: 8, .. })
        ));
    }
}
