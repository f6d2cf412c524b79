//! Performance benchmarks for candidate search and span resolution.
//!
//! # Usage
//!
//! ```bash
//! cargo bench --bench alignment
//! ```

use std::collections::BTreeMap;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tagalign::{Aligner, BatchAligner, Example, LabelPair, Tokenizer, UnicodeTokenizer};

const BENCH_TEXT: &str = "Arsenal beat Everton to win the First Division title in front of \
     a record crowd, and the New York Times reported the result the next morning.";

fn bench_terms() -> BTreeMap<String, LabelPair> {
    let mut terms = BTreeMap::new();
    terms.insert("Arsenal".to_string(), LabelPair::new(1, 2));
    terms.insert("Everton".to_string(), LabelPair::new(1, 2));
    terms.insert("First Division".to_string(), LabelPair::new(3, 4));
    terms.insert("New York Times".to_string(), LabelPair::new(5, 6));
    terms
}

fn bench_tokenize(c: &mut Criterion) {
    let tokenizer = UnicodeTokenizer::new();
    c.bench_function("tokenize_sentence", |b| {
        b.iter(|| tokenizer.tokenize(black_box(BENCH_TEXT)))
    });
}

fn bench_align(c: &mut Criterion) {
    let tokens = UnicodeTokenizer::new().tokenize(BENCH_TEXT).unwrap();
    let terms = bench_terms();
    let aligner = Aligner::new();

    c.bench_function("align_sentence", |b| {
        b.iter(|| aligner.align(black_box(&tokens), black_box(&terms)))
    });

    let ci = Aligner::new().with_case_insensitive(true);
    c.bench_function("align_sentence_case_insensitive", |b| {
        b.iter(|| ci.align(black_box(&tokens), black_box(&terms)))
    });
}

fn bench_batch_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_alignment");
    for &batch_size in &[1usize, 10, 50] {
        let examples: Vec<Example> = (0..batch_size)
            .map(|i| {
                Example::new(i, BENCH_TEXT)
                    .with_entity("Arsenal", "ORG")
                    .with_entity("Everton", "ORG")
                    .with_entity("First Division", "MISC")
                    .with_entity("New York Times", "ORG")
            })
            .collect();
        let batch = BatchAligner::new();
        group.bench_with_input(
            BenchmarkId::from_parameter(batch_size),
            &examples,
            |b, examples| b.iter(|| batch.align_batch(black_box(examples))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_tokenize, bench_align, bench_batch_scaling);
criterion_main!(benches);
