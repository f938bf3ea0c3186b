// benches/benchmarks.rs — Performance benchmarks (criterion)
//
// Two hot paths on the completion post-processing side:
//   1. Fenced-JSON extraction — runs on every structured worker response
//   2. Document excerpting — runs once per worker per document

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use draftmill::extract::extract_json;
use draftmill::util::excerpt;

/// A model response with prose around a fenced JSON payload.
fn fenced_response(items: usize) -> String {
    let body = (0..items)
        .map(|i| format!("  \"finding number {i} with some surrounding detail\""))
        .collect::<Vec<_>>()
        .join(",\n");
    format!(
        "Here are the key findings from the paper:\n\n```json\n[\n{body}\n]\n```\n\n\
         Let me know if you need more detail."
    )
}

/// A response with no fence, exercising the brace-span fallback.
fn bare_response(pad: usize) -> String {
    format!(
        "{}{{\"title\": \"Advanced ML Techniques\", \"authors\": [\"John Doe\"]}}{}",
        "Sure! ".repeat(pad),
        " Hope that helps.".repeat(pad)
    )
}

fn document(paragraphs: usize) -> String {
    (0..paragraphs)
        .map(|i| format!("Paragraph {i}: results were consistent across all trials measured."))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn bench_extract_json(c: &mut Criterion) {
    let fenced_small = fenced_response(5);
    let fenced_large = fenced_response(200);
    let bare = bare_response(50);

    c.bench_function("extract_fenced_small", |b| {
        b.iter(|| extract_json(black_box(&fenced_small)).unwrap())
    });

    c.bench_function("extract_fenced_large", |b| {
        b.iter(|| extract_json(black_box(&fenced_large)).unwrap())
    });

    c.bench_function("extract_brace_fallback", |b| {
        b.iter(|| extract_json(black_box(&bare)).unwrap())
    });
}

fn bench_excerpt(c: &mut Criterion) {
    let short = document(5);
    let long = document(500);

    c.bench_function("excerpt_short_document", |b| {
        b.iter(|| excerpt(black_box(&short), 1000))
    });

    c.bench_function("excerpt_long_document", |b| {
        b.iter(|| excerpt(black_box(&long), 1000))
    });
}

criterion_group!(benches, bench_extract_json, bench_excerpt);
criterion_main!(benches);
