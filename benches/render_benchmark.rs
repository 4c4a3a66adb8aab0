//! Benchmarks for cvtex rendering performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks render synthetic resumes of growing size.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cvtex::{assemble_with_options, RenderOptions, ResumeDocument};
use serde_json::{json, Value};

/// Creates a synthetic resume with `n` entries in each list section.
fn create_test_resume(n: usize) -> ResumeDocument {
    let items: Vec<Value> = (0..n)
        .map(|i| {
            json!({
                "name": {"en": format!("Item {i}"), "es": format!("Elemento {i}")},
                "url": format!("https://example.com/items/{i}"),
                "value": "5 years & counting"
            })
        })
        .collect();
    let courses: Vec<Value> = (0..n)
        .map(|i| json!({"name": format!("Course_{i}"), "semester": format!("20{:02}-{}", 10 + i % 10, 1 + i % 2)}))
        .collect();
    let prose: String = (0..n)
        .map(|i| format!("Paper {i} at https://doi.org/10.1000/{i}_draft costs 100% effort. "))
        .collect();

    ResumeDocument::from_value(json!({
        "contact": {
            "name": {"first": "Ada", "last": "Lovelace"},
            "email": {"uc": "ada@uc.cl"},
            "github": "ada"
        },
        "awards": items,
        "dev-technologies": items,
        "coursework": courses,
        "publications": prose,
        "philosophy": {"en": prose, "es": prose},
        "sections": [{"id": "extra", "type": "items", "items": items}]
    }))
    .unwrap()
}

/// Benchmark escaping of free text.
fn bench_escape(c: &mut Criterion) {
    let text = "Costs $5 & 10% of {budget} for #1 a_b ~ ^ \\ \"quoted\" ".repeat(20);

    c.bench_function("escape", |b| {
        b.iter(|| cvtex::escape(black_box(&text)));
    });

    c.bench_function("rich_text", |b| {
        let prose = "See https://example.com/publications/2024/deep-learning-xyz, then read more. ".repeat(20);
        b.iter(|| cvtex::render::rich_text(black_box(&prose), 40));
    });
}

/// Benchmark full assembly at various sizes.
fn bench_assemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble");

    for size in [10, 100, 500].iter() {
        let doc = create_test_resume(*size);

        group.bench_function(format!("{}_items_sequential", size), |b| {
            let options = RenderOptions::new().with_locale("es");
            b.iter(|| assemble_with_options(black_box(&doc), &options).unwrap());
        });

        group.bench_function(format!("{}_items_parallel", size), |b| {
            let options = RenderOptions::new().with_locale("es").with_parallel(true);
            b.iter(|| assemble_with_options(black_box(&doc), &options).unwrap());
        });
    }

    group.finish();
}

/// Benchmark builder pattern overhead.
fn bench_builder_creation(c: &mut Criterion) {
    c.bench_function("builder_creation", |b| {
        b.iter(|| {
            let _builder = cvtex::CvTex::new()
                .locale("es")
                .contact_priority(["google", "uc"])
                .var("orcid", "0000-0001");
        });
    });
}

criterion_group!(benches, bench_escape, bench_assemble, bench_builder_creation);
criterion_main!(benches);
