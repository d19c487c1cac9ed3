use criterion::*;
use multi_search_core::{Automaton, TrieBuilder};

const PATTERNS: &[&str] = &[
    "he", "she", "his", "hers", "her", "say", "said", "shall", "usher", "hash", "sash", "ash",
];

const TEXT: &str = "she said she shall usher his hash to the sash of hers and say so again";

fn build_automaton() -> Automaton<'static, u8, u32> {
    let mut builder = TrieBuilder::new();
    for (id, pattern) in PATTERNS.iter().enumerate() {
        builder.insert(pattern.as_bytes(), id as u32);
    }
    builder.compile()
}

fn cr_bench_build(c: &mut Criterion) {
    c.bench_function("build_automaton", |b| b.iter(|| build_automaton()));
}

fn cr_bench_scan(c: &mut Criterion) {
    let automaton = build_automaton();
    c.bench_function("scan_text", |b| {
        b.iter(|| automaton.scan(black_box(TEXT).bytes()).count())
    });
}

criterion_group!(benches, cr_bench_build, cr_bench_scan);
criterion_main!(benches);
