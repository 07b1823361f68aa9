use criterion::{criterion_group, criterion_main, Criterion};
use fastrand::Rng;
use keyanneal::config::{FingerCost, HandCosts, PenaltyWeights};
use keyanneal::corpus::{count_characters, CorpusAnalysis};
use keyanneal::geometry::{HomePosition, KeyboardDefinition, Layout, SideDefinition};
use keyanneal::locale::Locale;
use keyanneal::optimizer::{assign_characters, mutation};
use keyanneal::scorer::Scorer;
use std::hint::black_box;

const TEXT: &str = "the quick brown fox jumps over the lazy dog. \
Sphinx of black quartz, judge my vow! How vexingly quick daft zebras jump; \
pack my box with five dozen liquor jugs.\n";

fn side(rows: [[&str; 5]; 3], thumb: &str, pinkie_col: usize, index_col: usize) -> SideDefinition {
    let mut grid: Vec<Vec<String>> = rows
        .iter()
        .map(|r| r.iter().map(|t| t.to_string()).collect())
        .collect();
    grid.push(vec![thumb.to_string(), "\\ST".to_string()]);
    let ring_col = if pinkie_col < index_col { pinkie_col + 1 } else { pinkie_col - 1 };
    let middle_col = if pinkie_col < index_col { index_col - 1 } else { index_col + 1 };
    SideDefinition {
        rows: grid,
        thumb_home: HomePosition::new(3, 0),
        index_home: HomePosition::new(1, index_col),
        middle_home: HomePosition::new(1, middle_col),
        ring_home: HomePosition::new(1, ring_col),
        pinkie_home: HomePosition::new(1, pinkie_col),
    }
}

fn setup() -> (Scorer, Layout) {
    let left_row = ["*P", "*R", "*M", "*I", "*I"];
    let right_row = ["*I", "*I", "*M", "*R", "*P"];
    let def = KeyboardDefinition {
        name: "bench".to_string(),
        supports_overrides: false,
        left: side([left_row; 3], "\\sT", 0, 3),
        right: side([right_row; 3], "\\nT", 4, 1),
    };

    let hand = HandCosts {
        thumb: FingerCost::new(1.0, 1.0, 1.0, 1.0),
        index: FingerCost::new(1.0, 0.8, 1.0, 1.0),
        middle: FingerCost::new(1.0, 0.8, 1.2, 1.5),
        ring: FingerCost::new(1.3, 1.0, 1.4, 1.5),
        pinkie: FingerCost::new(1.6, 1.4, 1.6, 1.2),
    };
    let locale = Locale::from_pairs([(',', '<'), ('.', '>'), (';', ':'), ('1', '!')]);
    let mut layout =
        Layout::from_definition(&def, [hand, hand], &locale).expect("Failed to build layout");

    let text = TEXT.repeat(20);
    let freqs = count_characters(&text, layout.essential_chars().clone());
    assign_characters(&mut layout, &freqs, &locale);

    let corpus = CorpusAnalysis::new(&text, &layout);
    (Scorer::new(corpus.quartads, PenaltyWeights::default()), layout)
}

fn criterion_benchmark(c: &mut Criterion) {
    let (scorer, layout) = setup();
    let swappable = layout.swappable_keys();

    c.bench_function("score (all rules)", |b| {
        b.iter(|| scorer.score(black_box(&layout)))
    });

    c.bench_function("score_details (all rules)", |b| {
        b.iter(|| scorer.score_details(black_box(&layout)))
    });

    let mut rng = Rng::with_seed(7);
    c.bench_function("mutate + score", |b| {
        b.iter(|| {
            let mut candidate = layout.clone();
            mutation::mutate(&mut candidate, &swappable, &mut rng, 3);
            scorer.score(black_box(&candidate))
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
