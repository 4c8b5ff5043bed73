//! Declaration parsing: the compilation unit, imports, type declarations
//! and class members.

use bumpalo::collections::Vec as BVec;
use javaparse_core::{ParseError, Position};

use super::parser::Parser;
use super::recovery::SyncLevel;
use crate::ast::decl::*;
use crate::ast::expr::{Expr, ObjectCreationExpr};
use crate::ast::stmt::Block;
use crate::ast::types::TypeExpr;
use crate::ast::{Ident, Modifiers, QualifiedName};
use crate::tokens::TokenKind;

/// A top-level item.
enum TopLevel<'ast> {
    Import(ImportDecl<'ast>),
    Class(ClassDecl<'ast>),
}

/// A parsed class member. A field declaration may declare several fields.
enum Member<'ast> {
    Fields(&'ast [FieldDecl<'ast>]),
    Method(MethodDecl<'ast>),
    Constructor(ConstructorDecl<'ast>),
    Initializer(Initializer<'ast>),
    Empty,
}

/// Member lists under construction.
struct Members<'ast> {
    fields: BVec<'ast, FieldDecl<'ast>>,
    methods: BVec<'ast, MethodDecl<'ast>>,
    constructors: BVec<'ast, ConstructorDecl<'ast>>,
    initializers: BVec<'ast, Initializer<'ast>>,
}

impl<'ast> Members<'ast> {
    fn new(arena: &'ast bumpalo::Bump) -> Self {
        Self {
            fields: BVec::new_in(arena),
            methods: BVec::new_in(arena),
            constructors: BVec::new_in(arena),
            initializers: BVec::new_in(arena),
        }
    }

    fn push(&mut self, member: Member<'ast>) {
        match member {
            Member::Fields(fields) => self.fields.extend_from_slice(fields),
            Member::Method(method) => self.methods.push(method),
            Member::Constructor(constructor) => self.constructors.push(constructor),
            Member::Initializer(initializer) => self.initializers.push(initializer),
            Member::Empty => {}
        }
    }

    fn finish(self, position: Position) -> ClassBody<'ast> {
        ClassBody {
            fields: self.fields.into_bump_slice(),
            methods: self.methods.into_bump_slice(),
            constructors: self.constructors.into_bump_slice(),
            initializers: self.initializers.into_bump_slice(),
            position,
        }
    }
}

impl<'ast> Parser<'ast> {
    /// Parse a complete compilation unit.
    ///
    /// Grammar: `('package' NAME ';')? (IMPORT | MODIFIERS CLASS_LIKE | ';')*`
    ///
    /// Each import and type declaration is a protected attempt; a failure is
    /// recorded and parsing resumes at the next declaration.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn parse_program(&mut self) -> Result<Program<'ast>, ParseError> {
        self.enter("program");
        let position = self.position();

        let package = if self.cursor.check_keyword("package") {
            self.protected(SyncLevel::Program, |p| p.parse_package())?
        } else {
            None
        };

        let mut imports = BVec::new_in(self.arena);
        let mut classes = BVec::new_in(self.arena);

        while !self.cursor.is_eof() {
            if self.cursor.eat_punct(";").is_some() {
                continue;
            }
            match self.protected(SyncLevel::Program, |p| p.parse_top_level())? {
                Some(TopLevel::Import(import)) => imports.push(import),
                Some(TopLevel::Class(class)) => classes.push(class),
                None => {}
            }
        }

        Ok(Program {
            package,
            imports: imports.into_bump_slice(),
            classes: classes.into_bump_slice(),
            position,
        })
    }

    fn parse_package(&mut self) -> Result<QualifiedName<'ast>, ParseError> {
        self.cursor.expect_keyword("package")?;
        let name = self.parse_qualified_name()?;
        self.cursor.expect_punct(";")?;
        Ok(name)
    }

    /// `IDENTIFIER ('.' IDENTIFIER)*`
    fn parse_qualified_name(&mut self) -> Result<QualifiedName<'ast>, ParseError> {
        let first = self.parse_ident()?;
        let mut segments = BVec::new_in(self.arena);
        segments.push(first);
        while self.cursor.eat_punct(".").is_some() {
            segments.push(self.parse_ident()?);
        }
        Ok(QualifiedName {
            segments: segments.into_bump_slice(),
            position: first.position,
        })
    }

    fn parse_top_level(&mut self) -> Result<TopLevel<'ast>, ParseError> {
        if self.cursor.check_keyword("import") {
            return self.parse_import().map(TopLevel::Import);
        }

        let start = self.position();
        let modifiers = self.parse_modifiers(false);
        if self.class_kind().is_none() {
            return Err(self.cursor.unexpected("class, interface, enum or import"));
        }
        self.parse_class_decl(modifiers, start).map(TopLevel::Class)
    }

    /// Grammar: `'import' 'static'? IDENTIFIER ('.' IDENTIFIER)* ('.' '*')? ';'`
    fn parse_import(&mut self) -> Result<ImportDecl<'ast>, ParseError> {
        let start = self.cursor.expect_keyword("import")?.position;
        let is_static = self.cursor.eat_keyword("static").is_some();

        let first = self.parse_ident()?;
        let mut segments = BVec::new_in(self.arena);
        segments.push(first);
        let mut is_wildcard = false;
        while self.cursor.eat_punct(".").is_some() {
            if self.cursor.eat_punct("*").is_some() {
                is_wildcard = true;
                break;
            }
            segments.push(self.parse_ident()?);
        }
        self.cursor.expect_punct(";")?;

        Ok(ImportDecl {
            path: QualifiedName {
                segments: segments.into_bump_slice(),
                position: first.position,
            },
            is_static,
            is_wildcard,
            position: start,
        })
    }

    /// Consume modifier keywords greedily. `default` is accepted only when
    /// `allow_default` is set (interface members).
    pub(super) fn parse_modifiers(&mut self, allow_default: bool) -> Modifiers {
        let mut modifiers = Modifiers::empty();
        loop {
            let token = self.cursor.current();
            if token.kind != TokenKind::Keyword {
                break;
            }
            let flag = if allow_default && token.text == "default" {
                Some(Modifiers::DEFAULT)
            } else {
                Modifiers::from_keyword(token.text)
            };
            let Some(flag) = flag else {
                break;
            };
            self.cursor.advance();
            modifiers |= flag;
        }
        modifiers
    }

    fn class_kind(&self) -> Option<ClassKind> {
        let token = self.cursor.current();
        if token.kind != TokenKind::Keyword {
            return None;
        }
        match token.text {
            "class" => Some(ClassKind::Class),
            "interface" => Some(ClassKind::Interface),
            "enum" => Some(ClassKind::Enum),
            _ => None,
        }
    }

    // ========================================================================
    // Type declarations
    // ========================================================================

    /// Parse a class, interface or enum after its modifiers.
    ///
    /// Grammar:
    /// - `'class' IDENT TYPE_PARAMS? ('extends' TYPE)? ('implements' TYPES)? BODY`
    /// - `'interface' IDENT TYPE_PARAMS? ('extends' TYPES)? BODY`
    /// - `'enum' IDENT ('implements' TYPES)? '{' CONSTANTS? (';' MEMBER*)? '}'`
    fn parse_class_decl(&mut self, modifiers: Modifiers, start: Position) -> Result<ClassDecl<'ast>, ParseError> {
        let Some(kind) = self.class_kind() else {
            return Err(self.cursor.unexpected("class, interface or enum"));
        };
        self.cursor.advance();
        self.enter(kind.keyword());

        let name = self.parse_ident()?;
        let type_params = if self.cursor.check_punct("<") {
            self.parse_type_params()?
        } else {
            &[]
        };

        let mut extends = BVec::new_in(self.arena);
        if self.cursor.eat_keyword("extends").is_some() {
            extends.push(self.parse_type()?);
            if kind == ClassKind::Interface {
                while self.cursor.eat_punct(",").is_some() {
                    extends.push(self.parse_type()?);
                }
            }
        }

        let implements = if kind != ClassKind::Interface && self.cursor.eat_keyword("implements").is_some() {
            self.parse_type_list()?
        } else {
            &[]
        };

        let body = self.parse_class_body(name.name, kind)?;

        Ok(ClassDecl {
            kind,
            modifiers,
            name,
            type_params,
            extends: extends.into_bump_slice(),
            implements,
            body,
            position: start,
        })
    }

    /// `'<' IDENT ('extends' TYPE ('&' TYPE)*)? (',' ...)* '>'`. Bounds are
    /// checked for syntax and discarded.
    fn parse_type_params(&mut self) -> Result<&'ast [Ident<'ast>], ParseError> {
        self.cursor.expect_punct("<")?;
        let mut params = BVec::new_in(self.arena);
        loop {
            params.push(self.parse_ident()?);
            if self.cursor.eat_keyword("extends").is_some() {
                self.parse_type()?;
                while self.cursor.eat_punct("&").is_some() {
                    self.parse_type()?;
                }
            }
            if self.cursor.eat_punct(",").is_none() {
                break;
            }
        }
        self.cursor.expect_punct(">")?;
        Ok(params.into_bump_slice())
    }

    /// `TYPE (',' TYPE)*`
    fn parse_type_list(&mut self) -> Result<&'ast [TypeExpr<'ast>], ParseError> {
        let mut types = BVec::new_in(self.arena);
        loop {
            types.push(self.parse_type()?);
            if self.cursor.eat_punct(",").is_none() {
                break;
            }
        }
        Ok(types.into_bump_slice())
    }

    /// Parse a `{`-delimited class body.
    ///
    /// `class_name` identifies constructors; anonymous bodies pass `""`.
    /// Enum bodies start with the constant list.
    pub(super) fn parse_class_body(&mut self, class_name: &'ast str, kind: ClassKind) -> Result<ClassBody<'ast>, ParseError> {
        self.nested(|p| {
            let open = p.cursor.expect_punct("{")?;
            let outer = std::mem::replace(&mut p.in_constructor, false);
            let body = p.parse_members(class_name, kind, open.position);
            p.in_constructor = outer;
            body
        })
    }

    fn parse_members(&mut self, class_name: &'ast str, kind: ClassKind, open: Position) -> Result<ClassBody<'ast>, ParseError> {
        let mut members = Members::new(self.arena);
        if kind == ClassKind::Enum {
            self.parse_enum_constants(class_name, &mut members.fields)?;
        }

        loop {
            if self.cursor.eat_punct("}").is_some() {
                break;
            }
            if self.cursor.is_eof() {
                return Err(ParseError::unterminated("class body", open));
            }
            if let Some(member) = self.protected(SyncLevel::Member, |p| p.parse_member(class_name, kind))? {
                members.push(member);
            }
        }

        Ok(members.finish(open))
    }

    /// `CONSTANT (',' CONSTANT)* ','? ';'?` where
    /// `CONSTANT := IDENT ARGS? CLASS_BODY?`.
    ///
    /// Each constant becomes a `public static final` field of the enum type;
    /// arguments or a body produce an object creation initializer.
    fn parse_enum_constants(
        &mut self,
        enum_name: &'ast str,
        fields: &mut BVec<'ast, FieldDecl<'ast>>,
    ) -> Result<(), ParseError> {
        while self.cursor.check_identifier() {
            let name = self.parse_ident()?;
            let ty = TypeExpr::named(enum_name, name.position);

            let args = if self.cursor.check_punct("(") {
                Some(self.parse_arguments()?)
            } else {
                None
            };
            let body = if self.cursor.check_punct("{") {
                let body = self.parse_class_body("", ClassKind::Class)?;
                Some(&*self.arena.alloc(body))
            } else {
                None
            };
            let init = (args.is_some() || body.is_some()).then(|| {
                &*self.arena.alloc(Expr::ObjectCreation(self.arena.alloc(ObjectCreationExpr {
                    class_type: ty,
                    args: args.unwrap_or(&[]),
                    body,
                    position: name.position,
                })))
            });

            fields.push(FieldDecl {
                modifiers: Modifiers::CONSTANT,
                ty,
                name,
                init,
                position: name.position,
            });

            if self.cursor.eat_punct(",").is_none() {
                break;
            }
        }
        self.cursor.eat_punct(";");
        Ok(())
    }

    // ========================================================================
    // Members
    // ========================================================================

    fn parse_member(&mut self, class_name: &'ast str, kind: ClassKind) -> Result<Member<'ast>, ParseError> {
        self.enter("member");
        let start = self.position();
        let mut modifiers = self.parse_modifiers(kind == ClassKind::Interface);

        if self.cursor.check_punct("{") {
            let body = self.parse_block()?;
            return Ok(Member::Initializer(Initializer {
                is_static: modifiers.contains(Modifiers::STATIC),
                body,
                position: start,
            }));
        }
        if self.cursor.eat_punct(";").is_some() {
            return Ok(Member::Empty);
        }

        let current = self.cursor.current();
        if current.is_identifier() && current.text == class_name && self.cursor.peek_nth(1).is_punct("(") {
            return self.parse_constructor(modifiers, start).map(Member::Constructor);
        }

        // generic method type parameters
        if self.cursor.check_punct("<") {
            self.parse_type_params()?;
        }

        let ty = self.parse_type()?;
        let name = self.parse_ident()?;
        if self.cursor.check_punct("(") {
            return self.parse_method(modifiers, ty, name, start).map(Member::Method);
        }

        if kind == ClassKind::Interface {
            modifiers |= Modifiers::CONSTANT;
        }

        let mut fields = BVec::new_in(self.arena);
        let mut name = name;
        loop {
            let init = if self.cursor.eat_punct("=").is_some() {
                Some(self.parse_expression()?)
            } else {
                None
            };
            let position = if fields.is_empty() { start } else { name.position };
            fields.push(FieldDecl {
                modifiers,
                ty,
                name,
                init,
                position,
            });
            if self.cursor.eat_punct(",").is_none() {
                break;
            }
            name = self.parse_ident()?;
        }
        self.cursor.expect_punct(";")?;

        Ok(Member::Fields(fields.into_bump_slice()))
    }

    /// Grammar: `PARAMS ('throws' TYPES)? (BLOCK | ';')`
    ///
    /// A bodiless method gets an empty placeholder block.
    fn parse_method(
        &mut self,
        modifiers: Modifiers,
        return_type: TypeExpr<'ast>,
        name: Ident<'ast>,
        start: Position,
    ) -> Result<MethodDecl<'ast>, ParseError> {
        let params = self.parse_params()?;
        let throws = self.parse_throws()?;

        let (body, has_body) = match self.cursor.eat_punct(";") {
            Some(semicolon) => (Block::empty(semicolon.position), false),
            None => (self.parse_block()?, true),
        };

        Ok(MethodDecl {
            modifiers,
            return_type,
            name,
            params,
            throws,
            body,
            has_body,
            position: start,
        })
    }

    /// Grammar: `IDENT PARAMS ('throws' TYPES)? BLOCK`
    fn parse_constructor(&mut self, modifiers: Modifiers, start: Position) -> Result<ConstructorDecl<'ast>, ParseError> {
        let name = self.parse_ident()?;
        let params = self.parse_params()?;
        let throws = self.parse_throws()?;

        let outer = std::mem::replace(&mut self.in_constructor, true);
        let body = self.parse_block();
        self.in_constructor = outer;

        Ok(ConstructorDecl {
            modifiers,
            name,
            params,
            throws,
            body: body?,
            position: start,
        })
    }

    /// `'(' ('final'? TYPE '...'? IDENT (',' ...)*)? ')'`
    fn parse_params(&mut self) -> Result<&'ast [Parameter<'ast>], ParseError> {
        let open = self.cursor.expect_punct("(")?;
        let mut params = BVec::new_in(self.arena);

        if !self.cursor.check_punct(")") {
            loop {
                let position = self.position();
                let is_final = self.cursor.eat_keyword("final").is_some();
                let ty = self.parse_type()?;
                let is_varargs = self.eat_ellipsis();
                let name = self.parse_ident()?;
                params.push(Parameter {
                    ty,
                    name,
                    is_final,
                    is_varargs,
                    position,
                });
                if self.cursor.eat_punct(",").is_none() {
                    break;
                }
            }
        }

        self.expect_close(")", "parameter list", open.position)?;
        Ok(params.into_bump_slice())
    }

    fn parse_throws(&mut self) -> Result<&'ast [TypeExpr<'ast>], ParseError> {
        if self.cursor.eat_keyword("throws").is_some() {
            self.parse_type_list()
        } else {
            Ok(&[])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::stmt::Stmt;
    use crate::tokens::testing::tokenize;
    use bumpalo::Bump;
    use javaparse_core::ParseErrorKind;

    fn parse<'a>(source: &str, arena: &'a Bump) -> Program<'a> {
        let mut parser = Parser::new(&tokenize(source), arena);
        let program = parser.parse_program().unwrap();
        assert!(parser.errors().is_empty(), "unexpected errors: {}", parser.errors());
        program
    }

    fn parse_with_errors<'a>(source: &str, arena: &'a Bump) -> (Program<'a>, Vec<ParseError>) {
        let mut parser = Parser::new(&tokenize(source), arena);
        let program = parser.parse_program().unwrap();
        (program, parser.take_errors().into_vec())
    }

    #[test]
    fn minimal_class() {
        let arena = Bump::new();
        let program = parse("class X {}", &arena);
        assert_eq!(program.classes.len(), 1);
        let class = &program.classes[0];
        assert_eq!(class.name.name, "X");
        assert_eq!(class.kind, ClassKind::Class);
        assert!(class.modifiers.is_empty());
        assert!(class.fields().is_empty());
        assert!(class.methods().is_empty());
        assert!(class.constructors().is_empty());
    }

    #[test]
    fn empty_input() {
        let arena = Bump::new();
        let program = parse("", &arena);
        assert!(program.classes.is_empty());
        assert!(program.imports.is_empty());
        assert!(program.package.is_none());
    }

    #[test]
    fn package_and_imports() {
        let arena = Bump::new();
        let program = parse(
            "package com.example; import java.util.List; import static java.lang.Math.*; class A {}",
            &arena,
        );
        assert_eq!(program.package.map(|p| p.to_string()), Some("com.example".to_string()));
        assert_eq!(program.imports.len(), 2);
        assert_eq!(program.imports[0].to_string(), "java.util.List");
        assert!(program.imports[1].is_static);
        assert!(program.imports[1].is_wildcard);
        assert_eq!(program.imports[1].path.last().map(|s| s.name), Some("Math"));
    }

    #[test]
    fn class_header() {
        let arena = Bump::new();
        let program = parse(
            "public abstract class Box<T, U extends Comparable<U>> extends Base implements A, B<T> {}",
            &arena,
        );
        let class = &program.classes[0];
        assert_eq!(class.modifiers, Modifiers::PUBLIC | Modifiers::ABSTRACT);
        assert_eq!(class.type_params.len(), 2);
        assert_eq!(class.extends.len(), 1);
        assert_eq!(class.implements.len(), 2);
        assert_eq!(class.implements[1].to_string(), "B<T>");
    }

    #[test]
    fn fields_methods_constructors() {
        let arena = Bump::new();
        let program = parse(
            r#"
            class Point {
                private int x = 0, y;
                static final String NAME = "p";

                Point(int x, int y) { this.x = x; }

                public int getX() { return x; }

                void log(String fmt, Object... args) throws IOException, Error {}
            }
            "#,
            &arena,
        );
        let class = program.class("Point").unwrap();
        assert_eq!(class.fields().len(), 3);
        assert_eq!(class.fields()[1].name.name, "y");
        assert_eq!(class.fields()[1].modifiers, Modifiers::PRIVATE);
        assert_eq!(class.constructors().len(), 1);
        assert_eq!(class.constructors()[0].params.len(), 2);
        assert_eq!(class.methods().len(), 2);

        let log = class.method("log").unwrap();
        assert!(log.params[1].is_varargs);
        assert_eq!(log.throws.len(), 2);
        assert!(log.return_type.is_void());
    }

    #[test]
    fn constructor_body_recognizes_explicit_calls() {
        let arena = Bump::new();
        let program = parse("class A { A() { this(1); } A(int x) { super(); } void f() {} }", &arena);
        let class = &program.classes[0];
        assert!(matches!(class.constructors()[0].body.stmts[0], Stmt::ThisCall(_)));
        assert!(matches!(class.constructors()[1].body.stmts[0], Stmt::SuperCall(_)));
    }

    #[test]
    fn interface_members() {
        let arena = Bump::new();
        let program = parse(
            "interface Shape extends A, B { int SIDES = 4; double area(); default String name() { return \"s\"; } }",
            &arena,
        );
        let shape = &program.classes[0];
        assert_eq!(shape.kind, ClassKind::Interface);
        assert_eq!(shape.extends.len(), 2);
        assert_eq!(shape.fields()[0].modifiers, Modifiers::CONSTANT);

        let area = shape.method("area").unwrap();
        assert!(!area.has_body);
        assert!(area.body.is_empty());

        let name = shape.method("name").unwrap();
        assert!(name.modifiers.contains(Modifiers::DEFAULT));
        assert!(name.has_body);
    }

    #[test]
    fn enum_constants() {
        let arena = Bump::new();
        let program = parse(
            "enum Planet implements Named { MERCURY(3.3e23), VENUS(4.8e24), ; private final double mass; Planet(double mass) { this.mass = mass; } }",
            &arena,
        );
        let planet = &program.classes[0];
        assert_eq!(planet.kind, ClassKind::Enum);
        assert_eq!(planet.fields().len(), 3);

        let mercury = planet.field("MERCURY").unwrap();
        assert_eq!(mercury.modifiers, Modifiers::CONSTANT);
        assert_eq!(mercury.ty.name, "Planet");
        assert!(matches!(mercury.init, Some(Expr::ObjectCreation(new)) if new.args.len() == 1));
        assert_eq!(planet.constructors().len(), 1);
    }

    #[test]
    fn enum_without_semicolon() {
        let arena = Bump::new();
        let program = parse("enum Color { RED, GREEN, BLUE }", &arena);
        let color = &program.classes[0];
        assert_eq!(color.fields().len(), 3);
        assert!(color.fields().iter().all(|f| f.init.is_none()));
    }

    #[test]
    fn initializers() {
        let arena = Bump::new();
        let program = parse("class A { static { init(); } { count++; } }", &arena);
        let inits = program.classes[0].initializers();
        assert_eq!(inits.len(), 2);
        assert!(inits[0].is_static);
        assert!(!inits[1].is_static);
    }

    #[test]
    fn malformed_member_between_fields() {
        let arena = Bump::new();
        let (program, errors) = parse_with_errors("class A { int a; int = 5; int b; }", &arena);
        let names: Vec<_> = program.classes[0].fields().iter().map(|f| f.name.name).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind(), ParseErrorKind::UnexpectedToken);
    }

    #[test]
    fn garbage_between_classes() {
        let arena = Bump::new();
        let (program, errors) = parse_with_errors("class A {} 42 foo class B {}", &arena);
        assert_eq!(program.classes.len(), 2);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].message(),
            "expected class, interface, enum or import, found integer literal '42'"
        );
    }

    #[test]
    fn unterminated_class_body() {
        let arena = Bump::new();
        let (program, errors) = parse_with_errors("class A { int x;", &arena);
        assert!(program.classes.is_empty());
        assert_eq!(
            errors,
            vec![ParseError::unterminated("class body", Position::new(1, 9))]
        );
    }

    #[test]
    fn anonymous_class_resets_constructor_context() {
        let arena = Bump::new();
        let program = parse(
            "class A { A() { Runnable r = new Runnable() { public void run() { this.go(); } }; } }",
            &arena,
        );
        assert_eq!(program.classes[0].constructors()[0].body.stmts.len(), 1);
    }
}
