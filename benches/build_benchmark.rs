//! Benchmarks for document building and serialization.
//!
//! Run with: cargo bench
//!
//! These benchmarks render synthetic content lists into documents.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use docxgen::convert::docx::to_bytes;
use docxgen::{ContentItem, DocumentBuilder, ResourceStore, Style, TableConfig, TextAlign};

/// Creates a content list with `count` styled items.
fn create_content(count: usize) -> Vec<Option<ContentItem>> {
    let style = Style::new("Arial", 11).align(TextAlign::Justify);
    (0..count)
        .map(|i| {
            Some(ContentItem::new(
                format!("Paragraph {} with some body text to render.", i),
                style.clone(),
            ))
        })
        .collect()
}

fn bench_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("rendering");
    let store = ResourceStore::new(std::env::temp_dir().join("docxgen-bench"));

    for count in [10, 100, 1000] {
        let content = create_content(count);
        group.bench_function(format!("{}_items", count), |b| {
            b.iter(|| {
                let mut builder =
                    DocumentBuilder::new(store.clone(), black_box(content.clone()), "bench.docx");
                builder.add_content();
                builder.into_document()
            })
        });
    }

    group.finish();
}

fn bench_table_rendering(c: &mut Criterion) {
    let store = ResourceStore::new(std::env::temp_dir().join("docxgen-bench"));
    let content = create_content(102);

    c.bench_function("table_100_cells", |b| {
        b.iter(|| {
            let mut builder = DocumentBuilder::new(store.clone(), content.clone(), "bench.docx")
                .with_table(TableConfig::new(4, 25, 1, 100));
            builder.add_content();
            builder.into_document()
        })
    });
}

fn bench_serialization(c: &mut Criterion) {
    let store = ResourceStore::new(std::env::temp_dir().join("docxgen-bench"));
    let mut builder = DocumentBuilder::new(store, create_content(100), "bench.docx");
    builder.add_content();
    let document = builder.into_document();

    c.bench_function("serialize_100_items", |b| {
        b.iter(|| to_bytes(black_box(&document)).unwrap())
    });
}

criterion_group!(
    benches,
    bench_rendering,
    bench_table_rendering,
    bench_serialization
);
criterion_main!(benches);
