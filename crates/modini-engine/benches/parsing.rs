use criterion::{Criterion, criterion_group, criterion_main};
use modini_engine::{Document, ParserOptions};
mod common;

fn bench_parse_and_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    group.sample_size(10);

    let content = common::generate_mod_ini(200);
    group.bench_function("parse", |b| {
        b.iter(|| {
            let doc = Document::parse(std::hint::black_box(&content), ParserOptions::default());
            std::hint::black_box(doc)
        });
    });

    let doc = Document::parse(&content, ParserOptions::default()).unwrap();
    group.bench_function("serialize", |b| {
        b.iter(|| std::hint::black_box(doc.serialize(std::hint::black_box(false))));
    });

    group.finish();
}

criterion_group!(benches, bench_parse_and_serialize);
criterion_main!(benches);
