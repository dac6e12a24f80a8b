// SLang front end and tree algorithm benchmarks
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use slang_api::{find_duplicated_groups, AstConverter, CognitiveComplexity, Tree};
use slang_parser::SlangConverter;

fn generated_source(functions: usize) -> String {
    (0..functions)
        .map(|i| {
            format!(
                r#"
private fun f{i}(a, b) {{
    if (a && b || a) {{
        while (a) {{ a = a - 1; }};
    }} else if (b) {{
        match (a) {{ 1 -> b; else -> a; }};
    }};
    try {{ call(a, b); }} catch (e) {{ log(e); }};
    return a + {i};
}}
"#
            )
        })
        .collect()
}

fn bench_parse_functions(c: &mut Criterion) {
    let source = generated_source(50);
    let converter = SlangConverter::new();

    c.bench_function("parse_50_functions", |b| {
        b.iter(|| {
            converter.parse(black_box(&source)).unwrap();
        });
    });
}

fn bench_cognitive_complexity(c: &mut Criterion) {
    let tree = SlangConverter::new()
        .parse(&generated_source(50))
        .unwrap();

    c.bench_function("cognitive_complexity_50_functions", |b| {
        b.iter(|| CognitiveComplexity::new(black_box(&tree)).value());
    });
}

fn bench_duplicated_groups(c: &mut Criterion) {
    let tree = SlangConverter::new()
        .parse(&generated_source(50))
        .unwrap();
    let functions: Vec<&Tree> = tree
        .descendants()
        .filter(|t| matches!(t, Tree::Block(_)))
        .collect();

    c.bench_function("duplicated_groups_of_blocks", |b| {
        b.iter(|| find_duplicated_groups(black_box(&functions)).len());
    });
}

criterion_group!(
    benches,
    bench_parse_functions,
    bench_cognitive_complexity,
    bench_duplicated_groups
);
criterion_main!(benches);
