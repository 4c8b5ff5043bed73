//! Performance benchmarks for the Java parser.
//!
//! Tokenization happens outside the measured loop; only parsing is timed.
//! - Feature-specific: one file per area of the grammar
//! - Size-based: a synthesized class grown to thousands of members
//! - Parsing modes: strict vs lenient, and recovery-heavy input

use bumpalo::Bump;
use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use javaparse::{Parser, Token};
use javaparse_parser::tokens::testing::tokenize;
use std::hint::black_box;

fn bench_lenient(c: &mut Criterion, group_name: &str, cases: &[(&str, &str)]) {
    let mut group = c.benchmark_group(group_name);
    for (name, source) in cases {
        let tokens = tokenize(source);
        group.throughput(Throughput::Elements(tokens.len() as u64));
        group.bench_function(*name, |b| {
            b.iter(|| {
                let arena = Bump::new();
                let parsed = Parser::parse_lenient(black_box(&tokens), &arena);
                black_box(parsed.map(|p| p.program.classes.len()).ok())
            });
        });
    }
    group.finish();
}

/// Benchmark each area of the grammar
fn feature_specific_benchmarks(c: &mut Criterion) {
    bench_lenient(
        c,
        "parser/features",
        &[
            ("declarations", include_str!("../test_scripts/classes.java")),
            ("expressions", include_str!("../test_scripts/expressions.java")),
            ("control_flow", include_str!("../test_scripts/control_flow.java")),
            ("generics", include_str!("../test_scripts/generics.java")),
            ("lambdas", include_str!("../test_scripts/lambdas.java")),
        ],
    );
}

fn synthesized_class(methods: usize) -> String {
    let mut source = String::from("public class Generated {\n");
    for i in 0..methods {
        source.push_str(&format!(
            "    private int field{i} = {i} * 2 + 1;\n\
             \x20   public int method{i}(int a, java.util.List<String> items) {{\n\
             \x20       int total = 0;\n\
             \x20       for (int j = 0; j < a; j++) {{\n\
             \x20           if (j % 2 == 0 && items != null) total += items.get(j).length();\n\
             \x20       }}\n\
             \x20       return total > field{i} ? total : (int) Math.max(a, -1);\n\
             \x20   }}\n"
        ));
    }
    source.push_str("}\n");
    source
}

/// Benchmark parsing performance across input sizes
fn size_based_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser/sizes");
    for methods in [10, 100, 1000] {
        let tokens = tokenize(&synthesized_class(methods));
        group.throughput(Throughput::Elements(tokens.len() as u64));
        group.bench_function(format!("{methods}_methods"), |b| {
            b.iter(|| {
                let arena = Bump::new();
                let program = Parser::parse(black_box(&tokens), &arena);
                black_box(program.is_ok())
            });
        });
    }
    group.finish();
}

/// Strict vs lenient parsing, and the cost of recovery
fn mode_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser/modes");
    let valid: Vec<Token> = tokenize(&synthesized_class(100));
    let malformed: Vec<Token> = tokenize(&synthesized_class(100).replace("= 0;", "= ;"));

    group.bench_function("strict", |b| {
        b.iter(|| {
            let arena = Bump::new();
            black_box(Parser::parse(black_box(&valid), &arena).is_ok())
        });
    });
    group.bench_function("lenient", |b| {
        b.iter(|| {
            let arena = Bump::new();
            black_box(Parser::parse_lenient(black_box(&valid), &arena).is_ok())
        });
    });
    group.bench_function("recovering", |b| {
        b.iter(|| {
            let arena = Bump::new();
            let parsed = Parser::parse_lenient(black_box(&malformed), &arena);
            black_box(parsed.map(|p| p.errors.len()).ok())
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    feature_specific_benchmarks,
    size_based_benchmarks,
    mode_benchmarks
);
criterion_main!(benches);
