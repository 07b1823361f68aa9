use crate::error::{KaResult, KeyAnnealError};
use crate::geometry::{Finger, Hand};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[command(flatten)]
    pub search: SearchParams,
    #[command(flatten)]
    pub weights: PenaltyWeights,
}

impl Config {
    /// Overlays arguments the user typed explicitly onto `self`.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        self.search.merge_from_cli(&cli.search, matches);
        self.weights.merge_from_cli(&cli.weights, matches);
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Fixed iteration count. Derived from the number of swappable keys when absent.
    #[arg(long)]
    pub iterations: Option<usize>,
    #[arg(long, default_value_t = 250)]
    pub iterations_per_key: usize,
    #[arg(long, default_value_t = 3)]
    pub max_swaps: usize,
    #[arg(long, default_value_t = 15.0)]
    pub t0: f64,
    #[arg(long, default_value_t = 10.0)]
    pub cooling_rate: f64,
    /// Candidates scored concurrently per batch (1 = plain sequential chain).
    #[arg(long, default_value_t = 1)]
    pub parallelism: usize,
    #[arg(long, default_value_t = 5)]
    pub top_layouts: usize,
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            iterations: None,
            iterations_per_key: 250,
            max_swaps: 3,
            t0: 15.0,
            cooling_rate: 10.0,
            parallelism: 1,
            top_layouts: 5,
            seed: None,
        }
    }
}

impl SearchParams {
    pub fn resolve_iterations(&self, swappable_keys: usize) -> usize {
        self.iterations
            .unwrap_or(self.iterations_per_key * swappable_keys)
            .max(1)
    }

    pub fn merge_from_cli(&mut self, cli: &SearchParams, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(iterations);
        update_if_present!(iterations_per_key);
        update_if_present!(max_swaps);
        update_if_present!(t0);
        update_if_present!(cooling_rate);
        update_if_present!(parallelism);
        update_if_present!(top_layouts);
        update_if_present!(seed);
    }
}

/// Weight of every penalty rule. Zero disables a rule, negative turns it into a bonus.
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyWeights {
    // === KEYSTROKE ===
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub base: f64,
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub base_modifier: f64,

    // === SAME FINGER ===
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    pub sfb: f64,
    #[arg(long, default_value_t = 15.0, allow_negative_numbers = true)]
    pub long_sfb: f64,
    #[arg(long, default_value_t = 2.0, allow_negative_numbers = true)]
    pub vertical_finger_travel: f64,
    #[arg(long, default_value_t = 2.0, allow_negative_numbers = true)]
    pub double_tap_thumbs: f64,

    // === STRETCHES ===
    #[arg(long, default_value_t = 5.0, allow_negative_numbers = true)]
    pub lateral_stretch: f64,
    #[arg(long, default_value_t = 5.0, allow_negative_numbers = true)]
    pub pinky_ring_stretch: f64,
    #[arg(long, default_value_t = 5.0, allow_negative_numbers = true)]
    pub scissor_motion: f64,

    // === FLOW ===
    #[arg(long, default_value_t = -1.0, allow_negative_numbers = true)]
    pub inward_roll: f64,
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub outward_roll: f64,
    #[arg(long, default_value_t = 3.0, allow_negative_numbers = true)]
    pub roll_reversal: f64,
    #[arg(long, default_value_t = 2.0, allow_negative_numbers = true)]
    pub row_change_in_roll: f64,
    #[arg(long, default_value_t = 2.0, allow_negative_numbers = true)]
    pub hand_repetition: f64,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub hand_alternation: f64,

    // === MODIFIERS ===
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    pub same_finger_modifier: f64,
    #[arg(long, default_value_t = 3.0, allow_negative_numbers = true)]
    pub diagonal_modifier: f64,
    #[arg(long, default_value_t = 3.0, allow_negative_numbers = true)]
    pub modifier_stretch: f64,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            base: 1.0,
            base_modifier: 1.0,
            sfb: 10.0,
            long_sfb: 15.0,
            vertical_finger_travel: 2.0,
            double_tap_thumbs: 2.0,
            lateral_stretch: 5.0,
            pinky_ring_stretch: 5.0,
            scissor_motion: 5.0,
            inward_roll: -1.0,
            outward_roll: 1.0,
            roll_reversal: 3.0,
            row_change_in_roll: 2.0,
            hand_repetition: 2.0,
            hand_alternation: 0.0,
            same_finger_modifier: 10.0,
            diagonal_modifier: 3.0,
            modifier_stretch: 3.0,
        }
    }
}

impl PenaltyWeights {
    /// All weights zero except `base`.
    pub fn base_only() -> Self {
        Self {
            base: 1.0,
            ..Self::disabled()
        }
    }

    /// All weights zero.
    pub fn disabled() -> Self {
        Self {
            base: 0.0,
            base_modifier: 0.0,
            sfb: 0.0,
            long_sfb: 0.0,
            vertical_finger_travel: 0.0,
            double_tap_thumbs: 0.0,
            lateral_stretch: 0.0,
            pinky_ring_stretch: 0.0,
            scissor_motion: 0.0,
            inward_roll: 0.0,
            outward_roll: 0.0,
            roll_reversal: 0.0,
            row_change_in_roll: 0.0,
            hand_repetition: 0.0,
            hand_alternation: 0.0,
            same_finger_modifier: 0.0,
            diagonal_modifier: 0.0,
            modifier_stretch: 0.0,
        }
    }

    pub fn merge_from_cli(&mut self, cli: &PenaltyWeights, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field;
                }
            };
        }

        update_if_present!(base);
        update_if_present!(base_modifier);
        update_if_present!(sfb);
        update_if_present!(long_sfb);
        update_if_present!(vertical_finger_travel);
        update_if_present!(double_tap_thumbs);
        update_if_present!(lateral_stretch);
        update_if_present!(pinky_ring_stretch);
        update_if_present!(scissor_motion);
        update_if_present!(inward_roll);
        update_if_present!(outward_roll);
        update_if_present!(roll_reversal);
        update_if_present!(row_change_in_roll);
        update_if_present!(hand_repetition);
        update_if_present!(hand_alternation);
        update_if_present!(same_finger_modifier);
        update_if_present!(diagonal_modifier);
        update_if_present!(modifier_stretch);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct FingerCost {
    pub cost: f64,
    #[serde(default)]
    pub up_cost: f64,
    #[serde(default)]
    pub down_cost: f64,
    #[serde(default)]
    pub h_cost: f64,
}

impl FingerCost {
    pub fn new(cost: f64, up_cost: f64, down_cost: f64, h_cost: f64) -> Self {
        Self {
            cost,
            up_cost,
            down_cost,
            h_cost,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct HandCosts {
    pub thumb: FingerCost,
    pub index: FingerCost,
    pub middle: FingerCost,
    pub ring: FingerCost,
    pub pinkie: FingerCost,
}

impl HandCosts {
    /// Every finger shares the same cost factors.
    pub fn uniform(cost: FingerCost) -> Self {
        Self {
            thumb: cost,
            index: cost,
            middle: cost,
            ring: cost,
            pinkie: cost,
        }
    }

    pub fn finger(&self, finger: Finger) -> &FingerCost {
        match finger {
            Finger::Thumb => &self.thumb,
            Finger::Index => &self.index,
            Finger::Middle => &self.middle,
            Finger::Ring => &self.ring,
            Finger::Pinkie => &self.pinkie,
        }
    }
}

/// Per-hand finger cost table, indexed by `Hand::index()`.
pub type FingerCostTable = [HandCosts; 2];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub keyboard: String,
    pub locale: String,
    #[serde(default)]
    pub corpus: Vec<String>,
    /// Characters that must be placed even when the corpus never uses them.
    #[serde(default)]
    pub required: String,
    pub left: HandCosts,
    pub right: HandCosts,
    #[serde(default)]
    pub penalties: PenaltyWeights,
    #[serde(default)]
    pub search: SearchParams,
}

impl UserProfile {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KaResult<Self> {
        let path = path.as_ref();
        debug!("Loading user profile from {:?}", path);
        let content = fs::read_to_string(path).map_err(|e| KeyAnnealError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| KeyAnnealError::json(path, e))
    }

    pub fn costs(&self) -> FingerCostTable {
        [self.left, self.right]
    }

    pub fn hand_costs(&self, hand: Hand) -> &HandCosts {
        match hand {
            Hand::Left => &self.left,
            Hand::Right => &self.right,
        }
    }

    pub fn required_chars(&self) -> Vec<char> {
        self.required.chars().collect()
    }

    pub fn config(&self) -> Config {
        Config {
            search: self.search.clone(),
            weights: self.penalties.clone(),
        }
    }
}
