//! Statement parsing.
//!
//! Keyword-led statements dispatch directly. Two forms need lookahead:
//! local variable declarations are told apart from expression statements by
//! a rewinding lookahead, and `for` tries the for-each header speculatively
//! before falling back to the three-clause form.

use bumpalo::collections::Vec as BVec;
use javaparse_core::ParseError;

use super::parser::Parser;
use super::recovery::SyncLevel;
use super::type_parser::starts_type;
use crate::ast::expr::Expr;
use crate::ast::stmt::*;
use crate::ast::Modifiers;
use crate::tokens::TokenKind;

impl<'ast> Parser<'ast> {
    /// Parse one statement.
    pub fn parse_statement(&mut self) -> Result<Stmt<'ast>, ParseError> {
        self.nested(|p| {
            p.enter("statement");
            p.parse_statement_inner()
        })
    }

    fn parse_statement_inner(&mut self) -> Result<Stmt<'ast>, ParseError> {
        let token = self.cursor.current();

        if token.kind == TokenKind::Keyword {
            match token.text {
                "if" => return self.parse_if(),
                "while" => return self.parse_while(),
                "do" => return self.parse_do_while(),
                "for" => return self.parse_for(),
                "switch" => return self.parse_switch(),
                "try" => return self.parse_try(),
                "throw" => return self.parse_throw(),
                "return" => return self.parse_return(),
                "break" | "continue" => return self.parse_jump(),
                "synchronized" => return self.parse_synchronized(),
                "final" => return self.parse_var_decl_stmt(),
                "this" | "super" if self.in_constructor && self.cursor.peek_nth(1).is_punct("(") => {
                    return self.parse_constructor_call();
                }
                _ => {}
            }
        }

        if token.is_punct("{") {
            return Ok(Stmt::Block(self.parse_block()?));
        }
        if token.is_punct(";") {
            self.cursor.advance();
            return Ok(Stmt::Empty(token.position));
        }
        if token.is_identifier() && self.cursor.peek_nth(1).is_punct(":") {
            return self.parse_labeled();
        }
        if self.at_local_var_decl()? {
            return self.parse_var_decl_stmt();
        }

        let expr = self.parse_expression()?;
        self.cursor.expect_punct(";")?;
        Ok(Stmt::Expr(ExprStmt {
            expr,
            position: expr.position(),
        }))
    }

    /// Parse a block.
    ///
    /// Grammar: `'{' STATEMENT* '}'`
    ///
    /// Each statement is a protected attempt: a malformed statement is
    /// recorded and skipped, and the block keeps the others.
    pub fn parse_block(&mut self) -> Result<Block<'ast>, ParseError> {
        self.nested(|p| {
            let open = p.cursor.expect_punct("{")?;
            let mut stmts = BVec::new_in(p.arena);

            loop {
                if p.cursor.eat_punct("}").is_some() {
                    break;
                }
                if p.cursor.is_eof() {
                    return Err(ParseError::unterminated("block", open.position));
                }
                if let Some(stmt) = p.protected(SyncLevel::Statement, |p| p.parse_statement())? {
                    stmts.push(stmt);
                }
            }

            Ok(Block {
                stmts: stmts.into_bump_slice(),
                position: open.position,
            })
        })
    }

    // ========================================================================
    // Declarations inside blocks
    // ========================================================================

    /// Whether a local variable declaration starts here: a type followed by
    /// an identifier and then `=`, `;` or `,`. Never consumes.
    fn at_local_var_decl(&mut self) -> Result<bool, ParseError> {
        if !starts_type(&self.cursor.current()) {
            return Ok(false);
        }
        self.lookahead("local variable", |p| {
            p.parse_type()?;
            let name = p.cursor.current();
            let next = p.cursor.peek_nth(1);
            Ok(name.is_identifier() && (next.is_punct("=") || next.is_punct(";") || next.is_punct(",")))
        })
    }

    fn parse_var_decl_stmt(&mut self) -> Result<Stmt<'ast>, ParseError> {
        let decl = self.parse_local_var_decl()?;
        self.cursor.expect_punct(";")?;
        Ok(Stmt::VarDecl(decl))
    }

    /// Grammar: `'final'? TYPE DECLARATOR (',' DECLARATOR)*` without the terminator.
    fn parse_local_var_decl(&mut self) -> Result<VarDeclStmt<'ast>, ParseError> {
        let position = self.position();
        let modifiers = self.parse_final_modifier();
        let ty = self.parse_type()?;
        let vars = self.parse_declarators()?;
        Ok(VarDeclStmt {
            modifiers,
            ty,
            vars,
            position,
        })
    }

    pub(super) fn parse_final_modifier(&mut self) -> Modifiers {
        if self.cursor.eat_keyword("final").is_some() {
            Modifiers::FINAL
        } else {
            Modifiers::empty()
        }
    }

    /// Grammar: `IDENTIFIER ('=' EXPR)? (',' IDENTIFIER ('=' EXPR)?)*`
    pub(super) fn parse_declarators(&mut self) -> Result<&'ast [VarDeclarator<'ast>], ParseError> {
        let mut vars = BVec::new_in(self.arena);
        loop {
            let name = self.parse_ident()?;
            let init = if self.cursor.eat_punct("=").is_some() {
                Some(self.parse_expression()?)
            } else {
                None
            };
            vars.push(VarDeclarator { name, init });
            if self.cursor.eat_punct(",").is_none() {
                break;
            }
        }
        Ok(vars.into_bump_slice())
    }

    // ========================================================================
    // Control flow
    // ========================================================================

    /// `'(' EXPR ')'`
    fn parse_condition(&mut self) -> Result<&'ast Expr<'ast>, ParseError> {
        let open = self.cursor.expect_punct("(")?;
        let condition = self.parse_expression()?;
        self.expect_close(")", "condition", open.position)?;
        Ok(condition)
    }

    /// Grammar: `'if' '(' EXPR ')' STATEMENT ('else' STATEMENT)?`
    fn parse_if(&mut self) -> Result<Stmt<'ast>, ParseError> {
        let start = self.cursor.expect_keyword("if")?.position;
        let condition = self.parse_condition()?;
        let then_stmt: &'ast Stmt<'ast> = self.arena.alloc(self.parse_statement()?);
        let else_stmt: Option<&'ast Stmt<'ast>> = if self.cursor.eat_keyword("else").is_some() {
            Some(self.arena.alloc(self.parse_statement()?))
        } else {
            None
        };

        Ok(Stmt::If(self.arena.alloc(IfStmt {
            condition,
            then_stmt,
            else_stmt,
            position: start,
        })))
    }

    /// Grammar: `'while' '(' EXPR ')' STATEMENT`
    fn parse_while(&mut self) -> Result<Stmt<'ast>, ParseError> {
        let start = self.cursor.expect_keyword("while")?.position;
        let condition = self.parse_condition()?;
        let body: &'ast Stmt<'ast> = self.arena.alloc(self.parse_statement()?);

        Ok(Stmt::While(self.arena.alloc(WhileStmt {
            condition,
            body,
            position: start,
        })))
    }

    /// Grammar: `'do' STATEMENT 'while' '(' EXPR ')' ';'`
    fn parse_do_while(&mut self) -> Result<Stmt<'ast>, ParseError> {
        let start = self.cursor.expect_keyword("do")?.position;
        let body: &'ast Stmt<'ast> = self.arena.alloc(self.parse_statement()?);
        self.cursor.expect_keyword("while")?;
        let condition = self.parse_condition()?;
        self.cursor.expect_punct(";")?;

        Ok(Stmt::DoWhile(self.arena.alloc(DoWhileStmt {
            body,
            condition,
            position: start,
        })))
    }

    /// Parse a `for` or for-each loop.
    ///
    /// Grammar:
    /// - `'for' '(' 'final'? TYPE IDENTIFIER ':' EXPR ')' STATEMENT`
    /// - `'for' '(' INIT? ';' EXPR? ';' EXPR? ')' STATEMENT`
    fn parse_for(&mut self) -> Result<Stmt<'ast>, ParseError> {
        let start = self.cursor.expect_keyword("for")?.position;
        let open = self.cursor.expect_punct("(")?;

        let header = self.speculate("for-each", |p| {
            let modifiers = p.parse_final_modifier();
            let var_type = p.parse_type()?;
            let var_name = p.parse_ident()?;
            Ok(p.cursor.eat_punct(":").map(|_| (modifiers, var_type, var_name)))
        })?;

        if let Some((modifiers, var_type, var_name)) = header {
            let iterable = self.parse_expression()?;
            self.expect_close(")", "for header", open.position)?;
            let body: &'ast Stmt<'ast> = self.arena.alloc(self.parse_statement()?);
            return Ok(Stmt::ForEach(self.arena.alloc(ForEachStmt {
                modifiers,
                var_type,
                var_name,
                iterable,
                body,
                position: start,
            })));
        }

        let init = if self.cursor.check_punct(";") {
            ForInit::Empty(self.position())
        } else if self.cursor.check_keyword("final") || self.at_local_var_decl()? {
            ForInit::VarDecl(self.parse_local_var_decl()?)
        } else {
            ForInit::Expr(self.parse_expression()?)
        };
        self.cursor.expect_punct(";")?;

        let condition = self.parse_for_clause()?;
        self.cursor.expect_punct(";")?;
        let update = self.parse_for_clause()?;
        self.expect_close(")", "for header", open.position)?;

        let body: &'ast Stmt<'ast> = self.arena.alloc(self.parse_statement()?);
        Ok(Stmt::For(self.arena.alloc(ForStmt {
            init,
            condition,
            update,
            body,
            position: start,
        })))
    }

    /// An optional `for` clause; omitted clauses become [`Expr::Empty`].
    fn parse_for_clause(&mut self) -> Result<&'ast Expr<'ast>, ParseError> {
        let position = self.position();
        Ok(match self.parse_optional_expression()? {
            Some(expr) => expr,
            None => self.arena.alloc(Expr::Empty(position)),
        })
    }

    /// Grammar: `'switch' '(' EXPR ')' '{' (('case' EXPR | 'default') ':' STATEMENT*)* '}'`
    fn parse_switch(&mut self) -> Result<Stmt<'ast>, ParseError> {
        let start = self.cursor.expect_keyword("switch")?.position;
        let expr = self.parse_condition()?;
        let open = self.cursor.expect_punct("{")?;
        let mut cases = BVec::new_in(self.arena);

        loop {
            if self.cursor.eat_punct("}").is_some() {
                break;
            }
            if self.cursor.is_eof() {
                return Err(ParseError::unterminated("switch body", open.position));
            }

            let case_start = self.position();
            let label = if self.cursor.eat_keyword("case").is_some() {
                Some(self.parse_expression()?)
            } else if self.cursor.eat_keyword("default").is_some() {
                None
            } else {
                return Err(self.cursor.unexpected("'case' or 'default'"));
            };
            self.cursor.expect_punct(":")?;

            let mut stmts = BVec::new_in(self.arena);
            while !self.at_case_end() {
                if let Some(stmt) = self.protected(SyncLevel::Statement, |p| p.parse_statement())? {
                    stmts.push(stmt);
                }
            }

            cases.push(SwitchCase {
                label,
                stmts: stmts.into_bump_slice(),
                position: case_start,
            });
        }

        Ok(Stmt::Switch(self.arena.alloc(SwitchStmt {
            expr,
            cases: cases.into_bump_slice(),
            position: start,
        })))
    }

    fn at_case_end(&self) -> bool {
        self.cursor.check_keyword("case")
            || self.cursor.check_keyword("default")
            || self.cursor.check_punct("}")
            || self.cursor.is_eof()
    }

    /// Grammar: `'try' STATEMENT CATCH* ('finally' BLOCK)?` with at least one
    /// handler, where `CATCH := 'catch' '(' 'final'? TYPE ('|' TYPE)* IDENTIFIER ')' BLOCK`
    fn parse_try(&mut self) -> Result<Stmt<'ast>, ParseError> {
        let try_token = self.cursor.expect_keyword("try")?;
        let body: &'ast Stmt<'ast> = self.arena.alloc(self.parse_statement()?);

        let mut catches = BVec::new_in(self.arena);
        while let Some(catch) = self.cursor.eat_keyword("catch") {
            let open = self.cursor.expect_punct("(")?;
            self.parse_final_modifier();

            let mut exception_types = BVec::new_in(self.arena);
            exception_types.push(self.parse_type()?);
            while self.cursor.eat_punct("|").is_some() {
                exception_types.push(self.parse_type()?);
            }
            let name = self.parse_ident()?;
            self.expect_close(")", "catch clause", open.position)?;
            let body = self.parse_block()?;

            catches.push(CatchClause {
                exception_types: exception_types.into_bump_slice(),
                name,
                body,
                position: catch.position,
            });
        }

        let finally = if self.cursor.eat_keyword("finally").is_some() {
            Some(self.parse_block()?)
        } else {
            None
        };

        if catches.is_empty() && finally.is_none() {
            return Err(ParseError::structural(
                "try statement requires at least one catch or finally clause",
                try_token.position,
            ));
        }

        Ok(Stmt::Try(self.arena.alloc(TryStmt {
            body,
            catches: catches.into_bump_slice(),
            finally,
            position: try_token.position,
        })))
    }

    fn parse_throw(&mut self) -> Result<Stmt<'ast>, ParseError> {
        let start = self.cursor.expect_keyword("throw")?.position;
        let expr = self.parse_expression()?;
        self.cursor.expect_punct(";")?;
        Ok(Stmt::Throw(ThrowStmt { expr, position: start }))
    }

    fn parse_return(&mut self) -> Result<Stmt<'ast>, ParseError> {
        let start = self.cursor.expect_keyword("return")?.position;
        let value = self.parse_optional_expression()?;
        self.cursor.expect_punct(";")?;
        Ok(Stmt::Return(ReturnStmt { value, position: start }))
    }

    /// `break label?;` or `continue label?;`
    fn parse_jump(&mut self) -> Result<Stmt<'ast>, ParseError> {
        let keyword = self.cursor.advance();
        let label = if self.cursor.check_identifier() {
            Some(self.parse_ident()?)
        } else {
            None
        };
        self.cursor.expect_punct(";")?;

        let jump = JumpStmt {
            label,
            position: keyword.position,
        };
        Ok(if keyword.text == "break" {
            Stmt::Break(jump)
        } else {
            Stmt::Continue(jump)
        })
    }

    fn parse_synchronized(&mut self) -> Result<Stmt<'ast>, ParseError> {
        let start = self.cursor.expect_keyword("synchronized")?.position;
        let lock = self.parse_condition()?;
        let body = self.parse_block()?;
        Ok(Stmt::Synchronized(self.arena.alloc(SynchronizedStmt {
            lock,
            body,
            position: start,
        })))
    }

    fn parse_labeled(&mut self) -> Result<Stmt<'ast>, ParseError> {
        let label = self.parse_ident()?;
        self.cursor.expect_punct(":")?;
        let body: &'ast Stmt<'ast> = self.arena.alloc(self.parse_statement()?);
        Ok(Stmt::Labeled(self.arena.alloc(LabeledStmt {
            label,
            body,
            position: label.position,
        })))
    }

    /// `this(args);` or `super(args);` inside a constructor body.
    fn parse_constructor_call(&mut self) -> Result<Stmt<'ast>, ParseError> {
        let keyword = self.cursor.advance();
        let args = self.parse_arguments()?;
        self.cursor.expect_punct(";")?;

        let call = ConstructorCall {
            args,
            position: keyword.position,
        };
        Ok(if keyword.text == "this" {
            Stmt::ThisCall(call)
        } else {
            Stmt::SuperCall(call)
        })
    }
}
