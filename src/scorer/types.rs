use super::rules::PenaltyRule;
use crate::corpus::Quartad;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleTotal {
    pub rule: PenaltyRule,
    pub weight: f64,
    /// Weighted contribution to the layout score.
    pub total: f64,
}

/// Score of a layout with its per-rule breakdown. Lower is better.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PenaltyResult {
    pub total: f64,
    pub rules: Vec<RuleTotal>,
}

impl PenaltyResult {
    pub fn rule_total(&self, rule: PenaltyRule) -> f64 {
        self.rules
            .iter()
            .find(|r| r.rule == rule)
            .map(|r| r.total)
            .unwrap_or(0.0)
    }
}

/// A quartad's weighted contribution to one rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hotspot {
    pub quartad: Quartad,
    pub count: u64,
    pub cost: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mark {
    pub low: f64,
    pub high: f64,
}

impl Mark {
    fn new(value: f64) -> Self {
        Self {
            low: value,
            high: value,
        }
    }

    fn observe(&mut self, value: f64) {
        self.low = self.low.min(value);
        self.high = self.high.max(value);
    }

    /// Position of `value` between the marks, clamped to `0..=1`.
    pub fn fraction(&self, value: f64) -> f64 {
        let span = self.high - self.low;
        if span <= f64::EPSILON {
            return 1.0;
        }
        ((value - self.low) / span).clamp(0.0, 1.0)
    }
}

/// High/low-water marks of scores seen during a run, used to scale progress bars.
#[derive(Debug, Clone, Default)]
pub struct Watermarks {
    pub total: Option<Mark>,
    pub rules: BTreeMap<PenaltyRule, Mark>,
}

impl Watermarks {
    pub fn observe(&mut self, result: &PenaltyResult) {
        match &mut self.total {
            Some(mark) => mark.observe(result.total),
            None => self.total = Some(Mark::new(result.total)),
        }
        for r in &result.rules {
            self.rules
                .entry(r.rule)
                .and_modify(|m| m.observe(r.total))
                .or_insert_with(|| Mark::new(r.total));
        }
    }

    pub fn rule(&self, rule: PenaltyRule) -> Option<Mark> {
        self.rules.get(&rule).copied()
    }
}
