use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;

use worttest_core::generator::inflection_questions;
use worttest_core::model::WordGroup;
use worttest_core::umlaut::replace_umlauts;

fn bench_inflection_questions(c: &mut Criterion) {
    let mut group = c.benchmark_group("inflection_questions");

    let small: Vec<WordGroup> = (0..20)
        .map(|i| WordGroup::parse(&format!("Wort{i}-Wörter{i}")))
        .collect();
    let large: Vec<WordGroup> = (0..500)
        .map(|i| WordGroup::parse(&format!("Wort{i}-Wörter{i}")))
        .collect();
    let src = Path::new("nouns.txt");

    group.bench_function("20_groups", |b| {
        let mut rng = StdRng::seed_from_u64(42);
        b.iter(|| inflection_questions(black_box(&small), src, 0, 1, 5, &mut rng).unwrap())
    });

    group.bench_function("500_groups", |b| {
        let mut rng = StdRng::seed_from_u64(42);
        b.iter(|| inflection_questions(black_box(&large), src, 0, 1, 5, &mut rng).unwrap())
    });

    group.finish();
}

fn bench_umlaut_folding(c: &mut Criterion) {
    let line = "Häuser Bäume Größe Übermut weiß schön";
    let plain = "Haus Baum Hand Fuss Kopf Arm";

    c.bench_function("replace_umlauts", |b| {
        b.iter(|| replace_umlauts(black_box(line)))
    });
    c.bench_function("replace_umlauts_plain", |b| {
        b.iter(|| replace_umlauts(black_box(plain)))
    });
}

criterion_group!(benches, bench_inflection_questions, bench_umlaut_folding);
criterion_main!(benches);
