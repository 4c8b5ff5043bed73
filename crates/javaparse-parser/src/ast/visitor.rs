//! Visitor pattern for traversing the AST.
//!
//! Each `visit_*` method defaults to the matching `walk_*` function, which
//! visits the node's children in source order. Override a method to act on
//! a node kind; call the `walk_*` function from the override to keep
//! descending.
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use javaparse_parser::ast::visitor::Visitor;
//! use javaparse_parser::ast::{Ident, Parser};
//! use javaparse_parser::tokens::{Token, TokenKind};
//!
//! #[derive(Default)]
//! struct Names(Vec<String>);
//!
//! impl Visitor for Names {
//!     fn visit_ident(&mut self, ident: &Ident) {
//!         self.0.push(ident.name.to_string());
//!     }
//! }
//!
//! let tokens = vec![
//!     Token::new(TokenKind::Identifier, "a", 1, 1),
//!     Token::new(TokenKind::Operator, "+", 1, 3),
//!     Token::new(TokenKind::Identifier, "b", 1, 5),
//! ];
//! let arena = Bump::new();
//! let expr = Parser::expression(&tokens, &arena).unwrap();
//! let mut names = Names::default();
//! names.visit_expr(expr);
//! assert_eq!(names.0, ["a", "b"]);
//! ```

use crate::ast::decl::*;
use crate::ast::expr::*;
use crate::ast::stmt::*;
use crate::ast::types::TypeExpr;
use crate::ast::Ident;

/// Visitor trait for traversing AST nodes.
pub trait Visitor: Sized {
    // === Declarations ===

    fn visit_program(&mut self, program: &Program) {
        walk_program(self, program);
    }

    fn visit_import(&mut self, _import: &ImportDecl) {}

    fn visit_class(&mut self, class: &ClassDecl) {
        walk_class(self, class);
    }

    /// Visit a class body, including anonymous class bodies.
    fn visit_class_body(&mut self, body: &ClassBody) {
        walk_class_body(self, body);
    }

    fn visit_field(&mut self, field: &FieldDecl) {
        walk_field(self, field);
    }

    fn visit_method(&mut self, method: &MethodDecl) {
        walk_method(self, method);
    }

    fn visit_constructor(&mut self, constructor: &ConstructorDecl) {
        walk_constructor(self, constructor);
    }

    fn visit_initializer(&mut self, initializer: &Initializer) {
        self.visit_block(&initializer.body);
    }

    fn visit_param(&mut self, param: &Parameter) {
        self.visit_type(&param.ty);
    }

    // === Statements ===

    fn visit_block(&mut self, block: &Block) {
        walk_block(self, block);
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_var_decl(&mut self, decl: &VarDeclStmt) {
        walk_var_decl(self, decl);
    }

    fn visit_catch(&mut self, catch: &CatchClause) {
        walk_catch(self, catch);
    }

    // === Expressions ===

    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }

    fn visit_ident(&mut self, _ident: &Ident) {}

    fn visit_literal(&mut self, _literal: &LiteralExpr) {}

    fn visit_lambda(&mut self, lambda: &LambdaExpr) {
        walk_lambda(self, lambda);
    }

    // === Types ===

    fn visit_type(&mut self, ty: &TypeExpr) {
        walk_type(self, ty);
    }
}

pub fn walk_program<V: Visitor>(visitor: &mut V, program: &Program) {
    for import in program.imports {
        visitor.visit_import(import);
    }
    for class in program.classes {
        visitor.visit_class(class);
    }
}

pub fn walk_class<V: Visitor>(visitor: &mut V, class: &ClassDecl) {
    for ty in class.extends.iter().chain(class.implements) {
        visitor.visit_type(ty);
    }
    visitor.visit_class_body(&class.body);
}

pub fn walk_class_body<V: Visitor>(visitor: &mut V, body: &ClassBody) {
    for field in body.fields {
        visitor.visit_field(field);
    }
    for constructor in body.constructors {
        visitor.visit_constructor(constructor);
    }
    for method in body.methods {
        visitor.visit_method(method);
    }
    for initializer in body.initializers {
        visitor.visit_initializer(initializer);
    }
}

pub fn walk_field<V: Visitor>(visitor: &mut V, field: &FieldDecl) {
    visitor.visit_type(&field.ty);
    if let Some(init) = field.init {
        visitor.visit_expr(init);
    }
}

pub fn walk_method<V: Visitor>(visitor: &mut V, method: &MethodDecl) {
    visitor.visit_type(&method.return_type);
    for param in method.params {
        visitor.visit_param(param);
    }
    for ty in method.throws {
        visitor.visit_type(ty);
    }
    visitor.visit_block(&method.body);
}

pub fn walk_constructor<V: Visitor>(visitor: &mut V, constructor: &ConstructorDecl) {
    for param in constructor.params {
        visitor.visit_param(param);
    }
    for ty in constructor.throws {
        visitor.visit_type(ty);
    }
    visitor.visit_block(&constructor.body);
}

pub fn walk_block<V: Visitor>(visitor: &mut V, block: &Block) {
    for stmt in block.stmts {
        visitor.visit_stmt(stmt);
    }
}

pub fn walk_var_decl<V: Visitor>(visitor: &mut V, decl: &VarDeclStmt) {
    visitor.visit_type(&decl.ty);
    for var in decl.vars {
        if let Some(init) = var.init {
            visitor.visit_expr(init);
        }
    }
}

pub fn walk_catch<V: Visitor>(visitor: &mut V, catch: &CatchClause) {
    for ty in catch.exception_types {
        visitor.visit_type(ty);
    }
    visitor.visit_block(&catch.body);
}

pub fn walk_stmt<V: Visitor>(visitor: &mut V, stmt: &Stmt) {
    match stmt {
        Stmt::Expr(s) => visitor.visit_expr(s.expr),
        Stmt::VarDecl(s) => visitor.visit_var_decl(s),
        Stmt::Block(block) => visitor.visit_block(block),
        Stmt::If(s) => {
            visitor.visit_expr(s.condition);
            visitor.visit_stmt(s.then_stmt);
            if let Some(else_stmt) = s.else_stmt {
                visitor.visit_stmt(else_stmt);
            }
        }
        Stmt::While(s) => {
            visitor.visit_expr(s.condition);
            visitor.visit_stmt(s.body);
        }
        Stmt::DoWhile(s) => {
            visitor.visit_stmt(s.body);
            visitor.visit_expr(s.condition);
        }
        Stmt::For(s) => {
            match &s.init {
                ForInit::VarDecl(decl) => visitor.visit_var_decl(decl),
                ForInit::Expr(expr) => visitor.visit_expr(expr),
                ForInit::Empty(_) => {}
            }
            visitor.visit_expr(s.condition);
            visitor.visit_expr(s.update);
            visitor.visit_stmt(s.body);
        }
        Stmt::ForEach(s) => {
            visitor.visit_type(&s.var_type);
            visitor.visit_expr(s.iterable);
            visitor.visit_stmt(s.body);
        }
        Stmt::Switch(s) => {
            visitor.visit_expr(s.expr);
            for case in s.cases {
                if let Some(label) = case.label {
                    visitor.visit_expr(label);
                }
                for stmt in case.stmts {
                    visitor.visit_stmt(stmt);
                }
            }
        }
        Stmt::Try(s) => {
            visitor.visit_stmt(s.body);
            for catch in s.catches {
                visitor.visit_catch(catch);
            }
            if let Some(finally) = &s.finally {
                visitor.visit_block(finally);
            }
        }
        Stmt::Throw(s) => visitor.visit_expr(s.expr),
        Stmt::Return(s) => {
            if let Some(value) = s.value {
                visitor.visit_expr(value);
            }
        }
        Stmt::Synchronized(s) => {
            visitor.visit_expr(s.lock);
            visitor.visit_block(&s.body);
        }
        Stmt::Labeled(s) => visitor.visit_stmt(s.body),
        Stmt::ThisCall(call) | Stmt::SuperCall(call) => {
            for arg in call.args {
                visitor.visit_expr(arg);
            }
        }
        Stmt::Break(_) | Stmt::Continue(_) | Stmt::Empty(_) => {}
    }
}

pub fn walk_expr<V: Visitor>(visitor: &mut V, expr: &Expr) {
    match expr {
        Expr::Ident(ident) => visitor.visit_ident(ident),
        Expr::Literal(literal) => visitor.visit_literal(literal),
        Expr::Binary(e) => {
            visitor.visit_expr(e.left);
            visitor.visit_expr(e.right);
        }
        Expr::Unary(e) => visitor.visit_expr(e.operand),
        Expr::Ternary(e) => {
            visitor.visit_expr(e.condition);
            visitor.visit_expr(e.then_expr);
            visitor.visit_expr(e.else_expr);
        }
        Expr::Assign(e) => {
            visitor.visit_expr(e.target);
            visitor.visit_expr(e.value);
        }
        Expr::MethodCall(e) => {
            if let Some(target) = e.target {
                visitor.visit_expr(target);
            }
            for arg in e.args {
                visitor.visit_expr(arg);
            }
        }
        Expr::FieldAccess(e) => visitor.visit_expr(e.target),
        Expr::ArrayAccess(e) => {
            visitor.visit_expr(e.array);
            visitor.visit_expr(e.index);
        }
        Expr::ArrayCreation(e) => {
            visitor.visit_type(&e.element_type);
            for dimension in e.dimensions {
                visitor.visit_expr(dimension);
            }
            if let Some(init) = &e.initializer {
                walk_array_init(visitor, init);
            }
        }
        Expr::ObjectCreation(e) => {
            visitor.visit_type(&e.class_type);
            for arg in e.args {
                visitor.visit_expr(arg);
            }
            if let Some(body) = e.body {
                visitor.visit_class_body(body);
            }
        }
        Expr::ArrayInit(init) => walk_array_init(visitor, init),
        Expr::Cast(e) => {
            visitor.visit_type(&e.target_type);
            visitor.visit_expr(e.expr);
        }
        Expr::Instanceof(e) => {
            visitor.visit_expr(e.expr);
            visitor.visit_type(&e.check_type);
        }
        Expr::Lambda(e) => visitor.visit_lambda(e),
        Expr::This(_) | Expr::Super(_) | Expr::Empty(_) => {}
    }
}

fn walk_array_init<V: Visitor>(visitor: &mut V, init: &ArrayInitExpr) {
    for element in init.elements {
        visitor.visit_expr(element);
    }
}

pub fn walk_lambda<V: Visitor>(visitor: &mut V, lambda: &LambdaExpr) {
    for param in lambda.params {
        if let Some(ty) = &param.ty {
            visitor.visit_type(ty);
        }
    }
    match &lambda.body {
        LambdaBody::Expr(expr) => visitor.visit_expr(expr),
        LambdaBody::Block(block) => visitor.visit_block(block),
    }
}

pub fn walk_type<V: Visitor>(visitor: &mut V, ty: &TypeExpr) {
    for arg in ty.generic_args {
        visitor.visit_type(arg);
    }
}
