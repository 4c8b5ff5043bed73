//! Expression parsing using precedence climbing.
//!
//! Assignment and the ternary operator are handled by dedicated
//! right-associative productions. Binary operators below them are folded
//! by a single precedence-climbing loop over [`BinaryOp::precedence`], so
//! one level of parentheses costs a fixed handful of stack frames rather
//! than one frame per precedence level.
//!
//! Two decisions need lookahead:
//! - `(` may open a cast, a lambda parameter list or a parenthesized
//!   expression. Lambdas are found by scanning to the matching `)` and
//!   checking for an arrow; casts are tried speculatively.
//! - An identifier directly followed by an arrow is a single-parameter lambda.

use javaparse_core::ParseError;
use ordered_float::OrderedFloat;

use super::literal;
use super::parser::Parser;
use crate::ast::decl::ClassKind;
use crate::ast::expr::*;
use crate::ast::types::{PrimitiveType, TypeExpr};
use crate::ast::{AssignOp, BinaryOp, UnaryOp};
use crate::tokens::{Lexeme, TokenKind};

/// Nesting levels charged for each full expression.
const EXPRESSION_DEPTH_COST: usize = 2;

impl<'ast> Parser<'ast> {
    /// Parse a required expression.
    pub fn parse_expression(&mut self) -> Result<&'ast Expr<'ast>, ParseError> {
        match self.parse_optional_expression()? {
            Some(expr) => Ok(expr),
            None => Err(self.cursor.unexpected("expression")),
        }
    }

    /// Parse an expression if one starts at the cursor.
    ///
    /// Returns `Ok(None)` without consuming anything when the current token
    /// cannot begin an expression.
    pub fn parse_optional_expression(&mut self) -> Result<Option<&'ast Expr<'ast>>, ParseError> {
        self.nested_by(EXPRESSION_DEPTH_COST, |p| p.parse_assignment())
    }

    fn alloc(&self, expr: Expr<'ast>) -> &'ast Expr<'ast> {
        self.arena.alloc(expr)
    }

    /// Turn a missing operand into an error at the current token.
    fn required(&self, expr: Option<&'ast Expr<'ast>>) -> Result<&'ast Expr<'ast>, ParseError> {
        expr.ok_or_else(|| self.cursor.unexpected("expression"))
    }

    // ========================================================================
    // Assignment and ternary
    // ========================================================================

    fn parse_assignment(&mut self) -> Result<Option<&'ast Expr<'ast>>, ParseError> {
        let Some(target) = self.parse_ternary()? else {
            return Ok(None);
        };

        let token = self.cursor.current();
        let op = if token.kind.is_punctuation() {
            AssignOp::from_symbol(token.text)
        } else {
            None
        };
        let Some(op) = op else {
            return Ok(Some(target));
        };
        self.cursor.advance();

        // right associative: a = b = c is a = (b = c)
        let value = self.parse_expression()?;
        Ok(Some(self.alloc(Expr::Assign(self.arena.alloc(AssignExpr {
            target,
            op,
            value,
            position: target.position(),
        })))))
    }

    fn parse_ternary(&mut self) -> Result<Option<&'ast Expr<'ast>>, ParseError> {
        let Some(condition) = self.parse_binary(BinaryOp::LOWEST_PRECEDENCE)? else {
            return Ok(None);
        };
        if self.cursor.eat_punct("?").is_none() {
            return Ok(Some(condition));
        }

        let then_expr = self.parse_expression()?;
        self.cursor.expect_punct(":")?;
        let else_expr = self.nested(|p| p.parse_ternary())?;
        let else_expr = self.required(else_expr)?;

        Ok(Some(self.alloc(Expr::Ternary(self.arena.alloc(TernaryExpr {
            condition,
            then_expr,
            else_expr,
            position: condition.position(),
        })))))
    }

    // ========================================================================
    // Binary levels
    // ========================================================================

    /// Parse a unary operand and fold every following binary operator that
    /// binds at least as tightly as `min_level`, left to right.
    fn parse_binary(&mut self, min_level: u8) -> Result<Option<&'ast Expr<'ast>>, ParseError> {
        let Some(mut left) = self.parse_unary()? else {
            return Ok(None);
        };

        loop {
            if min_level <= BinaryOp::RELATIONAL_PRECEDENCE && self.cursor.eat_keyword("instanceof").is_some() {
                let check_type = self.parse_type()?;
                left = self.alloc(Expr::Instanceof(self.arena.alloc(InstanceofExpr {
                    expr: left,
                    check_type,
                    position: left.position(),
                })));
                continue;
            }

            let Some((op, width)) = self.peek_binary_op() else {
                break;
            };
            let level = op.precedence();
            if level < min_level {
                break;
            }
            for _ in 0..width {
                self.cursor.advance();
            }

            let right = self.parse_binary(level + 1)?;
            let right = self.required(right)?;
            left = self.alloc(Expr::Binary(self.arena.alloc(BinaryExpr {
                left,
                op,
                right,
                position: left.position(),
            })));
        }

        Ok(Some(left))
    }

    /// The binary operator at the cursor and how many tokens it spans.
    ///
    /// Shift-right operators arrive as joined `>` pieces from the cursor.
    fn peek_binary_op(&self) -> Option<(BinaryOp, usize)> {
        let token = self.cursor.current();
        if !token.kind.is_punctuation() {
            return None;
        }
        if token.is_punct(">") && token.joined {
            return Some(if self.cursor.peek_nth(1).joined {
                (BinaryOp::ShiftRightUnsigned, 3)
            } else {
                (BinaryOp::ShiftRight, 2)
            });
        }
        BinaryOp::from_symbol(token.text).map(|op| (op, 1))
    }

    // ========================================================================
    // Unary, cast and postfix
    // ========================================================================

    fn parse_unary(&mut self) -> Result<Option<&'ast Expr<'ast>>, ParseError> {
        let token = self.cursor.current();

        if token.kind.is_punctuation() {
            if let Some(op) = UnaryOp::prefix_from_symbol(token.text) {
                self.cursor.advance();
                let operand = self.nested(|p| p.parse_unary())?;
                let operand = self.required(operand)?;
                return Ok(Some(self.alloc(Expr::Unary(self.arena.alloc(UnaryExpr {
                    op,
                    operand,
                    position: token.position,
                })))));
            }
            if token.text == "(" {
                if let Some(cast) = self.try_parse_cast()? {
                    return Ok(Some(cast));
                }
            }
        }

        self.parse_postfix()
    }

    /// Speculatively parse `(Type) operand`.
    fn try_parse_cast(&mut self) -> Result<Option<&'ast Expr<'ast>>, ParseError> {
        let start = self.position();
        let target_type = self.speculate("cast", |p| {
            p.cursor.expect_punct("(")?;
            let ty = p.parse_type()?;
            p.cursor.expect_punct(")")?;
            Ok(p.cast_operand_follows(&ty).then_some(ty))
        })?;
        let Some(target_type) = target_type else {
            return Ok(None);
        };

        let operand = self.nested(|p| p.parse_unary())?;
        let expr = self.required(operand)?;
        Ok(Some(self.alloc(Expr::Cast(self.arena.alloc(CastExpr {
            target_type,
            expr,
            position: start,
        })))))
    }

    /// Whether the token after `(Type)` can start the cast operand.
    ///
    /// After a reference type, `+ - ++ --` continue a parenthesized
    /// expression instead: `(a) - b` is a subtraction.
    fn cast_operand_follows(&self, ty: &TypeExpr<'ast>) -> bool {
        if self.at_arrow(0) {
            return false;
        }
        let next = self.cursor.current();
        match next.kind {
            TokenKind::Identifier => true,
            kind if kind.is_literal() => true,
            TokenKind::Keyword => {
                matches!(next.text, "new" | "this" | "super" | "true" | "false" | "null")
                    || PrimitiveType::from_keyword(next.text).is_some()
            }
            kind if kind.is_punctuation() => match next.text {
                "(" | "!" | "~" => true,
                "-" | "+" | "++" | "--" => ty.is_primitive(),
                _ => false,
            },
            _ => false,
        }
    }

    fn parse_postfix(&mut self) -> Result<Option<&'ast Expr<'ast>>, ParseError> {
        let Some(primary) = self.parse_primary()? else {
            return Ok(None);
        };
        let mut expr = self.parse_access_chain(primary)?;

        loop {
            let token = self.cursor.current();
            let op = if token.kind.is_punctuation() {
                UnaryOp::postfix_from_symbol(token.text)
            } else {
                None
            };
            let Some(op) = op else {
                break;
            };
            self.cursor.advance();
            expr = self.alloc(Expr::Unary(self.arena.alloc(UnaryExpr {
                op,
                operand: expr,
                position: expr.position(),
            })));
        }

        Ok(Some(expr))
    }

    // ========================================================================
    // Access chain
    // ========================================================================

    /// Apply `.name`, `(args)` and `[index]` suffixes left to right.
    fn parse_access_chain(&mut self, mut target: &'ast Expr<'ast>) -> Result<&'ast Expr<'ast>, ParseError> {
        loop {
            if self.cursor.eat_punct(".").is_some() {
                let name = self.cursor.current();
                if !(name.is_identifier() || name.is_keyword("class")) {
                    return Err(self.cursor.unexpected("identifier"));
                }
                self.cursor.advance();
                target = self.alloc(Expr::FieldAccess(self.arena.alloc(FieldAccessExpr {
                    target,
                    field: self.ident_from(name),
                    position: target.position(),
                })));
            } else if self.cursor.check_punct("(") {
                let open = self.position();
                let args = self.parse_arguments()?;
                target = self.call(target, args, open)?;
            } else if let Some(open) = self.cursor.eat_punct("[") {
                let index = self.parse_expression()?;
                self.expect_close("]", "array index", open.position)?;
                target = self.alloc(Expr::ArrayAccess(self.arena.alloc(ArrayAccessExpr {
                    array: target,
                    index,
                    position: target.position(),
                })));
            } else {
                return Ok(target);
            }
        }
    }

    /// Build a call on `callee`: `name(..)` or `receiver.name(..)`.
    fn call(
        &self,
        callee: &'ast Expr<'ast>,
        args: &'ast [&'ast Expr<'ast>],
        open: javaparse_core::Position,
    ) -> Result<&'ast Expr<'ast>, ParseError> {
        let call = match *callee {
            Expr::Ident(name) => MethodCallExpr {
                target: None,
                name,
                args,
                position: name.position,
            },
            Expr::FieldAccess(access) => MethodCallExpr {
                target: Some(access.target),
                name: access.field,
                args,
                position: callee.position(),
            },
            _ => return Err(ParseError::structural("expression is not callable", open)),
        };
        Ok(self.alloc(Expr::MethodCall(self.arena.alloc(call))))
    }

    /// Parse `(a, b, c)`.
    pub(super) fn parse_arguments(&mut self) -> Result<&'ast [&'ast Expr<'ast>], ParseError> {
        let open = self.cursor.expect_punct("(")?;
        let mut args = bumpalo::collections::Vec::new_in(self.arena);

        if !self.cursor.check_punct(")") {
            loop {
                args.push(self.parse_expression()?);
                if self.cursor.eat_punct(",").is_none() {
                    break;
                }
            }
        }

        self.expect_close(")", "argument list", open.position)?;
        Ok(args.into_bump_slice())
    }

    // ========================================================================
    // Primary expressions
    // ========================================================================

    fn parse_primary(&mut self) -> Result<Option<&'ast Expr<'ast>>, ParseError> {
        let token = self.cursor.current();

        match token.kind {
            kind if kind.is_literal() => {
                self.cursor.advance();
                self.literal(token).map(Some)
            }
            TokenKind::Identifier => {
                if self.at_arrow(1) {
                    return self.parse_lambda().map(Some);
                }
                self.cursor.advance();
                Ok(Some(self.alloc(Expr::Ident(self.ident_from(token)))))
            }
            TokenKind::Keyword => match token.text {
                "true" | "false" | "null" => {
                    self.cursor.advance();
                    self.literal(token).map(Some)
                }
                "this" => {
                    self.cursor.advance();
                    Ok(Some(self.alloc(Expr::This(token.position))))
                }
                "super" => {
                    self.cursor.advance();
                    Ok(Some(self.alloc(Expr::Super(token.position))))
                }
                "new" => self.parse_creation().map(Some),
                // `int.class`
                text if PrimitiveType::from_keyword(text).is_some() && self.cursor.peek_nth(1).is_punct(".") => {
                    self.cursor.advance();
                    Ok(Some(self.alloc(Expr::Ident(self.ident_from(token)))))
                }
                _ => Ok(None),
            },
            kind if kind.is_punctuation() => match token.text {
                "(" => {
                    if self.lambda_ahead() {
                        return self.parse_lambda().map(Some);
                    }
                    self.cursor.advance();
                    let inner = self.parse_expression()?;
                    self.expect_close(")", "parenthesized expression", token.position)?;
                    Ok(Some(inner))
                }
                "{" => {
                    let init = self.parse_array_initializer()?;
                    Ok(Some(self.alloc(Expr::ArrayInit(init))))
                }
                _ => Ok(None),
            },
            _ => Ok(None),
        }
    }

    /// Decode a literal token.
    fn literal(&self, token: Lexeme<'ast>) -> Result<&'ast Expr<'ast>, ParseError> {
        let invalid = |what: &str| ParseError::structural(format!("invalid {what} literal '{}'", token.text), token.position);

        let kind = match token.kind {
            TokenKind::IntLiteral => LiteralKind::Int(literal::int_value(token.text).ok_or_else(|| invalid("integer"))?),
            TokenKind::FloatLiteral => {
                let value = literal::float_value(token.text).ok_or_else(|| invalid("floating-point"))?;
                LiteralKind::Float(OrderedFloat(value))
            }
            TokenKind::StringLiteral => {
                let body = literal::strip_quotes(token.text, '"');
                let decoded = literal::unescape(body).map_err(|_| self.bad_escape(token))?;
                LiteralKind::String(match decoded {
                    std::borrow::Cow::Borrowed(text) => text,
                    std::borrow::Cow::Owned(text) => self.arena.alloc_str(&text),
                })
            }
            TokenKind::CharLiteral => {
                let body = literal::strip_quotes(token.text, '\'');
                let decoded = literal::unescape(body).map_err(|_| self.bad_escape(token))?;
                let mut chars = decoded.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => LiteralKind::Char(c),
                    _ => return Err(invalid("character")),
                }
            }
            TokenKind::NullLiteral => LiteralKind::Null,
            TokenKind::Keyword if token.text == "null" => LiteralKind::Null,
            _ => LiteralKind::Bool(token.text == "true"),
        };

        Ok(self.alloc(Expr::Literal(LiteralExpr {
            kind,
            text: token.text,
            position: token.position,
        })))
    }

    fn bad_escape(&self, token: Lexeme<'ast>) -> ParseError {
        ParseError::structural(format!("invalid escape sequence in {}", token.text), token.position)
    }

    // ========================================================================
    // Creation expressions
    // ========================================================================

    /// `new T(args) { body }?`, `new T[n][m][]` or `new T[] { .. }`.
    fn parse_creation(&mut self) -> Result<&'ast Expr<'ast>, ParseError> {
        let new_token = self.cursor.expect_keyword("new")?;
        let ty = self.parse_type_base()?;

        if self.cursor.check_punct("[") {
            let mut dimensions = bumpalo::collections::Vec::new_in(self.arena);
            while self.cursor.check_punct("[") && !self.cursor.peek_nth(1).is_punct("]") {
                let open = self.cursor.advance();
                dimensions.push(self.parse_expression()?);
                self.expect_close("]", "array dimension", open.position)?;
            }
            let has_empty_dims = self.eat_array_dims();

            let initializer = if dimensions.is_empty() {
                if !has_empty_dims || !self.cursor.check_punct("{") {
                    return Err(self.cursor.unexpected("array initializer"));
                }
                Some(self.parse_array_initializer()?)
            } else {
                None
            };

            return Ok(self.alloc(Expr::ArrayCreation(self.arena.alloc(ArrayCreationExpr {
                element_type: ty,
                dimensions: dimensions.into_bump_slice(),
                initializer,
                position: new_token.position,
            }))));
        }

        if self.cursor.check_punct("(") {
            let args = self.parse_arguments()?;
            let body = if self.cursor.check_punct("{") {
                let body = self.parse_class_body("", ClassKind::Class)?;
                Some(&*self.arena.alloc(body))
            } else {
                None
            };
            return Ok(self.alloc(Expr::ObjectCreation(self.arena.alloc(ObjectCreationExpr {
                class_type: ty,
                args,
                body,
                position: new_token.position,
            }))));
        }

        Err(self.cursor.unexpected("'(' or '['"))
    }

    /// `{a, b, c}` with an optional trailing comma.
    pub(super) fn parse_array_initializer(&mut self) -> Result<ArrayInitExpr<'ast>, ParseError> {
        let open = self.cursor.expect_punct("{")?;
        let mut elements = bumpalo::collections::Vec::new_in(self.arena);

        while !self.cursor.check_punct("}") {
            elements.push(self.parse_expression()?);
            if self.cursor.eat_punct(",").is_none() {
                break;
            }
        }

        self.expect_close("}", "array initializer", open.position)?;
        Ok(ArrayInitExpr {
            elements: elements.into_bump_slice(),
            position: open.position,
        })
    }

    // ========================================================================
    // Lambdas
    // ========================================================================

    /// With the cursor on `(`, whether the matching `)` is followed by an arrow.
    fn lambda_ahead(&self) -> bool {
        let mut depth = 0usize;
        let mut offset = 0;
        loop {
            let token = self.cursor.peek_nth(offset);
            if token.is_eof() {
                return false;
            }
            if token.is_punct("(") {
                depth += 1;
            } else if token.is_punct(")") {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return self.at_arrow(offset + 1);
                }
            }
            offset += 1;
        }
    }

    /// `x -> body`, `(a, b) -> body` or `(int a, String b) -> { .. }`.
    fn parse_lambda(&mut self) -> Result<&'ast Expr<'ast>, ParseError> {
        self.enter("lambda");
        let start = self.position();
        let mut params = bumpalo::collections::Vec::new_in(self.arena);

        if self.cursor.check_identifier() {
            let name = self.parse_ident()?;
            params.push(LambdaParam { ty: None, name });
        } else {
            let open = self.cursor.expect_punct("(")?;
            if !self.cursor.check_punct(")") {
                loop {
                    params.push(self.parse_lambda_param()?);
                    if self.cursor.eat_punct(",").is_none() {
                        break;
                    }
                }
            }
            self.expect_close(")", "lambda parameter list", open.position)?;
        }

        self.expect_arrow()?;

        let body = if self.cursor.check_punct("{") {
            LambdaBody::Block(self.parse_block()?)
        } else {
            LambdaBody::Expr(self.parse_expression()?)
        };

        Ok(self.alloc(Expr::Lambda(self.arena.alloc(LambdaExpr {
            params: params.into_bump_slice(),
            body,
            position: start,
        }))))
    }

    /// A bare name when followed by `,` or `)`, otherwise `final? Type name`.
    fn parse_lambda_param(&mut self) -> Result<LambdaParam<'ast>, ParseError> {
        let next = self.cursor.peek_nth(1);
        if self.cursor.check_identifier() && (next.is_punct(",") || next.is_punct(")")) {
            return Ok(LambdaParam {
                ty: None,
                name: self.parse_ident()?,
            });
        }

        self.cursor.eat_keyword("final");
        let ty = self.parse_type()?;
        let name = self.parse_ident()?;
        Ok(LambdaParam { ty: Some(ty), name })
    }
}
