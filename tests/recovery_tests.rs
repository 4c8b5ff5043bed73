// tests/recovery_tests.rs
//! Error recovery integration tests
//!
//! Malformed input must yield every well-formed construct plus one error
//! per malformed one, and terminal failures must stop the parse.


use javaparse::ast::*;
use javaparse::{ParseErrorKind, Parser, ParserConfig, Position, DEFAULT_MAX_DEPTH};
use test_harness::TestScript;

#[test]
fn test_malformed_file_recovers_everything_else() {
    let script = TestScript::load("malformed.java");
    let parsed = script.parse();

    assert_eq!(parsed.program.imports.len(), 1);
    let names: Vec<_> = parsed.program.classes.iter().map(|c| c.name.name).collect();
    assert_eq!(names, ["Broken", "Recovered"]);

    let broken = parsed.program.class("Broken").unwrap();
    let fields: Vec<_> = broken.fields().iter().map(|f| f.name.name).collect();
    assert_eq!(fields, ["ok", "alsoOk"]);
    assert_eq!(broken.methods().len(), 2);
    assert_eq!(broken.method("first").unwrap().body.stmts.len(), 2);
    assert!(broken.method("second").unwrap().body.stmts.is_empty());

    let recovered = parsed.program.class("Recovered").unwrap();
    assert_eq!(recovered.method("fine").unwrap().body.stmts.len(), 1);

    let positions: Vec<_> = parsed.errors.iter().map(|e| e.position()).collect();
    assert_eq!(
        positions,
        [
            Position::new(5, 15),
            Position::new(10, 17),
            Position::new(16, 5),
            Position::new(19, 1),
        ]
    );
    assert!(parsed.errors.iter().all(|e| e.kind() == ParseErrorKind::UnexpectedToken));
    assert_eq!(
        parsed.errors.iter().last().unwrap().message(),
        "expected class, interface, enum or import, found integer literal '42'"
    );
}

#[test]
fn test_strict_parse_reports_all_errors() {
    let script = TestScript::load("malformed.java");
    let errors = script.parse().into_result().unwrap_err();
    assert_eq!(errors.len(), 4);
    assert_eq!(errors.to_string().lines().count(), 4);
}

#[test]
fn test_error_budget_stops_parse() {
    let script = TestScript::load("malformed.java");
    let arena = bumpalo::Bump::new();
    let result = javaparse::parse_with(&script.tokens, &arena, ParserConfig::default().with_max_errors(2));
    let err = result.unwrap_err();
    assert!(err.is_client_error());
    assert_eq!(err.parse_errors()[0].position(), Position::new(16, 5));
}

#[test]
fn test_unterminated_class_body() {
    let script = TestScript::from_source("class A {\n  int x;\n");
    let parsed = script.parse();
    assert_eq!(parsed.errors.len(), 1);
    let err = parsed.errors.first().unwrap();
    assert_eq!(err.kind(), ParseErrorKind::Unterminated);
    assert_eq!(err.position(), Position::new(1, 9));
    assert!(parsed.program.classes.is_empty());
}

#[test]
fn test_unterminated_method_body() {
    let script = TestScript::from_source("class A { void f() { int x = 1;");
    let parsed = script.parse();
    assert!(parsed.has_errors());
    let first = parsed.errors.first().unwrap();
    assert_eq!(first.kind(), ParseErrorKind::Unterminated);
    assert_eq!(first.position(), Position::new(1, 20));
}

#[test]
fn test_stray_closing_brace_at_top_level() {
    let script = TestScript::from_source("} class A { }");
    let parsed = script.parse();
    assert_eq!(parsed.errors.len(), 1);
    assert_eq!(parsed.program.classes.len(), 1);
}

#[test]
fn test_bad_statement_keeps_block() {
    let script = TestScript::from_source(
        "class A { void f() { int a = 1; if (a { a = 2; } a = 3; } void g() { } }",
    );
    let parsed = script.parse();
    assert_eq!(parsed.errors.len(), 1);
    let class = parsed.program.class("A").unwrap();
    assert_eq!(class.methods().len(), 2);
    let stmts = class.method("f").unwrap().body.stmts;
    assert!(matches!(stmts.first(), Some(Stmt::VarDecl(_))));
    assert!(matches!(stmts.last(), Some(Stmt::Expr(_))));
}

#[test]
fn test_try_without_handlers() {
    let script = TestScript::from_source("class A { void f() { try { x(); } } }");
    let parsed = script.parse();
    let err = parsed.errors.first().unwrap();
    assert_eq!(err.kind(), ParseErrorKind::Structural);
    assert_eq!(err.position(), Position::new(1, 22));
}

#[test]
fn test_bad_array_initializer_field_keeps_class_body() {
    let script = TestScript::from_source("class A { int a; int[] bad = {1, 2 3}; int b; void f() {} }");
    let parsed = script.parse();
    assert_eq!(parsed.errors.len(), 1);
    assert_eq!(parsed.errors.first().unwrap().position(), Position::new(1, 36));

    let class = parsed.program.class("A").unwrap();
    let fields: Vec<_> = class.fields().iter().map(|f| f.name.name).collect();
    assert_eq!(fields, ["a", "b"]);
    assert_eq!(class.methods().len(), 1);
}

#[test]
fn test_bad_array_initializer_statement_keeps_method_body() {
    let script = TestScript::from_source("class A { void f() { int[] x = {1 2}; g(); } void h() {} int z; }");
    let parsed = script.parse();
    assert_eq!(parsed.errors.len(), 1);

    let class = parsed.program.class("A").unwrap();
    let stmts = class.method("f").unwrap().body.stmts;
    assert_eq!(stmts.len(), 1);
    assert!(matches!(stmts[0], Stmt::Expr(_)));
    assert!(class.method("h").is_some());
    let fields: Vec<_> = class.fields().iter().map(|f| f.name.name).collect();
    assert_eq!(fields, ["z"]);
}

#[test]
fn test_bad_enum_constant_discards_enum_only() {
    let script = TestScript::from_source("enum E { A(1 2), B; void m() {} } class C { }");
    let parsed = script.parse();
    assert_eq!(parsed.errors.len(), 1);
    let names: Vec<_> = parsed.program.classes.iter().map(|c| c.name.name).collect();
    assert_eq!(names, ["C"]);
}

#[test]
fn test_deep_nesting_is_terminal() {
    let nested = |depth: usize| {
        format!("class A {{ int x = {}1{}; }}", "(".repeat(depth), ")".repeat(depth))
    };

    let deep = TestScript::from_source(&nested(100));
    let arena = bumpalo::Bump::new();
    let err = javaparse::parse(&deep.tokens, &arena).unwrap_err();
    assert!(err.is_client_error());
    assert_eq!(err.parse_errors()[0].kind(), ParseErrorKind::DepthExceeded);

    let shallow = TestScript::from_source(&nested(10));
    assert!(!shallow.parse().has_errors());
}

/// Run `f` on a thread with a 2 MiB stack, the default for spawned threads.
fn on_small_stack<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
    std::thread::Builder::new()
        .stack_size(2 << 20)
        .spawn(f)
        .unwrap()
        .join()
        .unwrap()
}

fn parenthesized(depth: usize) -> Result<(), ParseErrorKind> {
    let source = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
    let script = TestScript::from_source(&source);
    let arena = bumpalo::Bump::new();
    Parser::expression(&script.tokens, &arena)
        .map(|_| ())
        .map_err(|e| e.first().unwrap().kind())
}

#[test]
fn test_default_depth_limit_fits_small_stack() {
    let at_limit = on_small_stack(|| parenthesized(DEFAULT_MAX_DEPTH - 1));
    assert_eq!(at_limit, Err(ParseErrorKind::DepthExceeded));

    let far_beyond = on_small_stack(|| parenthesized(10_000));
    assert_eq!(far_beyond, Err(ParseErrorKind::DepthExceeded));
}

#[test]
fn test_each_expression_costs_two_levels() {
    // the outer expression plus 31 parenthesized ones fill 64 levels
    assert_eq!(on_small_stack(|| parenthesized(31)), Ok(()));
    assert_eq!(
        on_small_stack(|| parenthesized(32)),
        Err(ParseErrorKind::DepthExceeded)
    );
}

#[test]
fn test_deep_blocks_fit_small_stack() {
    let outcome = on_small_stack(|| {
        let source = format!("class A {{ void f() {{ {}{} }} }}", "{".repeat(500), "}".repeat(500));
        let script = TestScript::from_source(&source);
        let arena = bumpalo::Bump::new();
        javaparse::parse(&script.tokens, &arena)
            .map(|_| ())
            .map_err(|e| e.parse_errors().first().map(|e| e.kind()))
    });
    assert_eq!(outcome, Err(Some(ParseErrorKind::DepthExceeded)));
}
