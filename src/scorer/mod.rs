pub mod flow;
pub mod lookup;
pub mod physics;
pub mod rules;
pub mod types;

pub use self::lookup::KeyLookup;
pub use self::rules::{PenaltyRule, Window};
pub use self::types::{Hotspot, PenaltyResult, RuleTotal, Watermarks};

use crate::config::PenaltyWeights;
use crate::corpus::{Quartad, QuartadTable, MAX_QUARTAD_LEN};
use crate::geometry::Layout;
use std::cmp::Ordering;
use std::sync::Arc;
use strum::IntoEnumIterator;

/// Scores layouts against a fixed quartad table. Holds no mutable state.
#[derive(Debug, Clone)]
pub struct Scorer {
    pub quartads: Arc<QuartadTable>,
    pub weights: PenaltyWeights,
    /// Enabled rules grouped by arity (index = arity - 1).
    active: [Vec<(PenaltyRule, f64)>; MAX_QUARTAD_LEN],
}

impl Scorer {
    pub fn new(quartads: Arc<QuartadTable>, weights: PenaltyWeights) -> Self {
        let mut active: [Vec<(PenaltyRule, f64)>; MAX_QUARTAD_LEN] = Default::default();
        for rule in PenaltyRule::iter() {
            let weight = rule.weight(&weights);
            if weight != 0.0 {
                active[rule.arity() - 1].push((rule, weight));
            }
        }
        Self {
            quartads,
            weights,
            active,
        }
    }

    pub fn window<'a>(lookup: &KeyLookup, layout: &'a Layout, quartad: &Quartad) -> Window<'a> {
        let mut w = Window::default();
        let chars = quartad.chars();
        let mods = quartad.modifiers();
        for back in 0..chars.len() {
            let pos = chars.len() - 1 - back;
            let key = lookup.key(layout, chars[pos]);
            w.keys[back] = key;
            w.mods[back] = match (key, mods[pos]) {
                (Some(k), Some(m)) => lookup.modifier_key(layout, m, k.hand),
                _ => None,
            };
        }
        w
    }

    /// Visits every (quartad, rule) pair with a non-zero weighted cost.
    fn for_each_cost<F>(&self, layout: &Layout, mut visit: F)
    where
        F: FnMut(&Quartad, u64, PenaltyRule, f64),
    {
        let lookup = KeyLookup::new(layout);
        for (arity, rules) in self.active.iter().enumerate() {
            if rules.is_empty() {
                continue;
            }
            for (quartad, count) in self.quartads.group(arity + 1) {
                let window = Self::window(&lookup, layout, quartad);
                for &(rule, weight) in rules {
                    let value = rule.evaluate(&window);
                    if value != 0.0 {
                        visit(quartad, *count, rule, *count as f64 * weight * value);
                    }
                }
            }
        }
    }

    pub fn score(&self, layout: &Layout) -> f64 {
        let mut total = 0.0;
        self.for_each_cost(layout, |_, _, _, cost| total += cost);
        total
    }

    pub fn score_details(&self, layout: &Layout) -> PenaltyResult {
        let mut rules: Vec<RuleTotal> = PenaltyRule::iter()
            .map(|rule| RuleTotal {
                rule,
                weight: rule.weight(&self.weights),
                total: 0.0,
            })
            .collect();

        let mut total = 0.0;
        self.for_each_cost(layout, |_, _, rule, cost| {
            total += cost;
            rules[rule as usize].total += cost;
        });

        PenaltyResult { total, rules }
    }

    /// The `n` quartads contributing the most to `rule`.
    pub fn hotspots(&self, layout: &Layout, rule: PenaltyRule, n: usize) -> Vec<Hotspot> {
        let mut spots = Vec::new();
        self.for_each_cost(layout, |quartad, count, r, cost| {
            if r == rule {
                spots.push(Hotspot {
                    quartad: *quartad,
                    count,
                    cost,
                });
            }
        });
        spots.sort_by(|a, b| {
            b.cost
                .abs()
                .partial_cmp(&a.cost.abs())
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.quartad.cmp(&b.quartad))
        });
        spots.truncate(n);
        spots
    }
}
