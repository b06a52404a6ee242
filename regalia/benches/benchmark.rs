use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lazy_static::lazy_static;
use proptest::prelude::*;
use proptest::strategy::ValueTree;
use proptest::test_runner::TestRunner;
use regalia::dfa::{Alphabet, Dfa};
use regalia::parser;
use regex::Regex as LibRegex;

const PATTERNS: [&str; 4] = ["(a|b)*abb", "(b*ab*ab*)*", "[a-e]{2,8}", "(ab|ba|bb)*a?"];

lazy_static! {
    static ref WORDS: Box<[String]> = {
        let mut runner = TestRunner::default();
        prop::collection::vec("[a-e]{0,12}", 100)
            .new_tree(&mut runner)
            .unwrap()
            .current()
            .into_boxed_slice()
    };
}

fn compile(pattern: &str) -> Dfa {
    let sigma: Alphabet = "abcde".chars().collect();
    parser::pattern(pattern).unwrap().to_dfa_over(&sigma)
}

pub fn set_operations(c: &mut Criterion) {
    let dfa1 = compile(PATTERNS[0]);
    let dfa2 = compile(PATTERNS[1]);
    c.bench_function("union", |b| b.iter(|| dfa1.union(black_box(&dfa2))));
    c.bench_function("intersection", |b| {
        b.iter(|| dfa1.intersection(black_box(&dfa2)))
    });
    c.bench_function("symmetric difference", |b| {
        b.iter(|| dfa1.symmetric_difference(black_box(&dfa2)))
    });
    c.bench_function("complement", |b| b.iter(|| black_box(&dfa1).complement()));
}

pub fn minimization(c: &mut Criterion) {
    let union = compile(PATTERNS[0]).union(&compile(PATTERNS[3])).unwrap();
    c.bench_function("minimize", |b| b.iter(|| black_box(&union).minimized()));
    c.bench_function("reverse", |b| b.iter(|| black_box(&union).reversed()));
}

pub fn equivalence_check(c: &mut Criterion) {
    let dfa1 = compile(PATTERNS[0]);
    let dfa2 = compile(PATTERNS[1]);
    c.bench_function("equivalence check", |b| {
        b.iter(|| dfa1.equivalent_to(black_box(&dfa2)))
    });
}

pub fn pattern_compile(c: &mut Criterion) {
    c.bench_function("regalia pattern compile", |b| {
        b.iter(|| parser::pattern(black_box(PATTERNS[1])).unwrap().to_dfa())
    });

    c.bench_function("library regex compile", |b| {
        b.iter(|| LibRegex::new(black_box(PATTERNS[1])).unwrap())
    });
}

pub fn word_check(c: &mut Criterion) {
    let dfa = compile(PATTERNS[1]);
    c.bench_function("accepts", |b| {
        b.iter(|| {
            WORDS
                .iter()
                .filter(|word| dfa.accepts_str(black_box(word)))
                .count()
        })
    });
}

criterion_group!(
    benches,
    set_operations,
    minimization,
    equivalence_check,
    pattern_compile,
    word_check
);
criterion_main!(benches);
