mod common;

use common::*;
use fastrand::Rng;
use keyanneal::config::{FingerCost, HandCosts, PenaltyWeights};
use keyanneal::corpus::extract_quartads;
use keyanneal::geometry::Symbol;
use keyanneal::optimizer::mutation;
use keyanneal::optimizer::AnnealingSchedule;
use proptest::prelude::*;
use std::collections::BTreeSet;

// --- STRATEGIES ---

prop_compose! {
    fn arb_weights()(
        sfb in 0.0..50.0f64,
        roll in -5.0..5.0f64,
        scissor in 0.0..20.0f64,
        repetition in 0.0..10.0f64
    ) -> PenaltyWeights {
        PenaltyWeights {
            sfb,
            inward_roll: roll,
            scissor_motion: scissor,
            hand_repetition: repetition,
            ..Default::default()
        }
    }
}

prop_compose! {
    fn arb_finger_cost()(
        cost in 0.5..3.0f64,
        up in 0.0..2.0f64,
        down in 0.0..2.0f64,
        h in 0.0..2.0f64
    ) -> FingerCost {
        FingerCost::new(cost, up, down, h)
    }
}

fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z .,!\n]{0,200}"
}

proptest! {
    #[test]
    fn prop_mutation_is_a_permutation(seed in any::<u64>(), max_swaps in 1usize..6) {
        let (initial, _) = seeded_layout(&swappable_split(), realistic_costs(), PANGRAMS);
        let swappable = initial.swappable_keys();
        let mut layout = initial.clone();
        let mut rng = Rng::with_seed(seed);

        let swaps = mutation::mutate(&mut layout, &swappable, &mut rng, max_swaps);
        prop_assert!((1..=max_swaps).contains(&swaps));

        let before: BTreeSet<char> = initial.bound_chars();
        prop_assert_eq!(layout.bound_chars(), before);
        for (i, (a, b)) in initial.keys.iter().zip(&layout.keys).enumerate() {
            if !swappable.contains(&i) {
                prop_assert_eq!(a.key, b.key);
            }
        }
    }

    #[test]
    fn prop_scoring_is_deterministic(weights in arb_weights(), text in arb_text()) {
        let (layout, _) = seeded_layout(&swappable_split(), realistic_costs(), &text);
        let scorer = scorer_for(&layout, &text, weights);

        let first = scorer.score(&layout);
        prop_assert!(first.is_finite());
        prop_assert_eq!(first, scorer.score(&layout.clone()));
        prop_assert!((scorer.score_details(&layout).total - first).abs() < 1e-6);
    }

    #[test]
    fn prop_base_cost_never_below_finger_cost(cost in arb_finger_cost()) {
        let hand = HandCosts::uniform(cost);
        let layout = build_layout(&fixed_qwerty(), [hand, hand]);
        for key in &layout.keys {
            prop_assert!(key.cost >= cost.cost - 1e-12);
            if key.is_home() {
                prop_assert!((key.cost - cost.cost).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn prop_temperature_monotone(
        n in 1usize..5_000,
        t0 in 0.1..100.0f64,
        k in 0.1..20.0f64
    ) {
        let schedule = AnnealingSchedule::new(n, t0, k).unwrap();
        let mut last = schedule.temperature(0);
        for i in schedule.iterations() {
            let t = schedule.temperature(i);
            prop_assert!(t <= last);
            last = t;
        }
    }

    #[test]
    fn prop_quartads_only_use_placed_characters(text in arb_text()) {
        let placed: BTreeSet<char> = "abcdefghij ".chars().collect();
        let table = extract_quartads(&text, &placed, &BTreeSet::new());

        let singles: u64 = table.group(1).iter().map(|(_, n)| n).sum();
        let expected = text.chars().filter(|c| placed.contains(c)).count() as u64;
        prop_assert_eq!(singles, expected);

        for (q, n) in table.iter() {
            prop_assert!(*n > 0);
            prop_assert!(q.chars().iter().all(|c| placed.contains(c)));
        }
    }

    #[test]
    fn prop_seeding_binds_each_character_once(text in arb_text()) {
        let (layout, placement) = seeded_layout(&swappable_split(), realistic_costs(), &text);
        let mut seen = BTreeSet::new();
        for key in &layout.keys {
            for slot in [key.key.unshifted, key.key.shifted].into_iter().flatten() {
                if let Symbol::Char(c) = slot {
                    if key.key.unshifted != key.key.shifted {
                        prop_assert!(seen.insert(c), "'{}' bound twice", c);
                    }
                }
            }
        }
        for c in &placement.placed {
            prop_assert!(layout.is_bound(*c));
        }
    }
}
