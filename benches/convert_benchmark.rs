//! Benchmarks for htmlpdf conversion performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic HTML of increasing size.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Creates synthetic HTML with the given number of sections.
fn create_test_html(sections: usize) -> String {
    let mut html = String::from("<html><head><title>Bench</title></head><body>");

    for i in 0..sections {
        html.push_str(&format!("<h2>Section {}</h2>", i + 1));
        html.push_str(
            "<p>Benchmark paragraph with enough words to wrap across more than one line \
             of the page frame, so that justification and line breaking both run.</p>",
        );
        html.push_str("<ul><li>First point</li><li>Second point</li></ul>");
        html.push_str("<table><tr><th>Key</th><th>Value</th></tr>");
        html.push_str(&format!("<tr><td>row</td><td>{}</td></tr></table>", i));
    }

    html.push_str("</body></html>");
    html
}

/// Benchmark structural extraction.
fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("extraction");

    for sections in [1, 10, 50].iter() {
        let html = create_test_html(*sections);

        group.bench_function(format!("{}_sections", sections), |b| {
            b.iter(|| htmlpdf::extract_blocks(black_box(&html)));
        });
    }

    group.finish();
}

/// Benchmark the full HTML to PDF pipeline.
fn bench_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversion");

    for sections in [1, 10, 50].iter() {
        let html = create_test_html(*sections);

        group.bench_function(format!("{}_sections", sections), |b| {
            b.iter(|| htmlpdf::convert(black_box(&html), Some("Bench")));
        });
    }

    group.finish();
}

/// Benchmark the fallback path on unstructured text.
fn bench_fallback(c: &mut Criterion) {
    let text = "plain words without any markup ".repeat(100);

    c.bench_function("fallback_conversion", |b| {
        b.iter(|| htmlpdf::convert(black_box(&text), None));
    });
}

/// Benchmark parallel batch conversion.
fn bench_batch(c: &mut Criterion) {
    let jobs: Vec<htmlpdf::ConversionJob> = (0..16)
        .map(|i| htmlpdf::ConversionJob::new(create_test_html(5), Some(format!("Doc {}", i))))
        .collect();
    let converter = htmlpdf::Converter::default();

    c.bench_function("batch_16_documents", |b| {
        b.iter(|| converter.convert_batch(black_box(&jobs)));
    });
}

criterion_group!(
    benches,
    bench_extraction,
    bench_conversion,
    bench_fallback,
    bench_batch,
);
criterion_main!(benches);
