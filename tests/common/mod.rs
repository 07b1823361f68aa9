#![allow(dead_code)]

use keyanneal::config::{FingerCost, FingerCostTable, HandCosts, PenaltyWeights, UserProfile};
use keyanneal::corpus::{count_characters, CharFrequencies, CorpusAnalysis};
use keyanneal::geometry::{Finger, Hand, HomePosition, KeyboardDefinition, Layout, SideDefinition};
use keyanneal::locale::Locale;
use keyanneal::optimizer::{assign_characters, Placement};
use keyanneal::scorer::Scorer;

fn to_rows(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|r| r.iter().map(|t| t.to_string()).collect())
        .collect()
}

fn empty_side() -> SideDefinition {
    SideDefinition {
        rows: Vec::new(),
        thumb_home: HomePosition::default(),
        index_home: HomePosition::default(),
        middle_home: HomePosition::default(),
        ring_home: HomePosition::default(),
        pinkie_home: HomePosition::default(),
    }
}

/// Builder for KeyboardDefinition to keep test boards short
pub struct KeyboardBuilder {
    def: KeyboardDefinition,
}

impl KeyboardBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            def: KeyboardDefinition {
                name: name.to_string(),
                supports_overrides: false,
                left: empty_side(),
                right: empty_side(),
            },
        }
    }

    pub fn left(mut self, rows: &[&[&str]]) -> Self {
        self.def.left.rows = to_rows(rows);
        self
    }

    pub fn right(mut self, rows: &[&[&str]]) -> Self {
        self.def.right.rows = to_rows(rows);
        self
    }

    pub fn home(mut self, hand: Hand, finger: Finger, row: usize, col: usize) -> Self {
        let side = match hand {
            Hand::Left => &mut self.def.left,
            Hand::Right => &mut self.def.right,
        };
        let home = HomePosition::new(row, col);
        match finger {
            Finger::Thumb => side.thumb_home = home,
            Finger::Index => side.index_home = home,
            Finger::Middle => side.middle_home = home,
            Finger::Ring => side.ring_home = home,
            Finger::Pinkie => side.pinkie_home = home,
        }
        self
    }

    pub fn overrides(mut self, enabled: bool) -> Self {
        self.def.supports_overrides = enabled;
        self
    }

    pub fn build(self) -> KeyboardDefinition {
        self.def
    }
}

/// Same factors for every finger of both hands.
pub fn flat_costs(cost: f64, step: f64) -> FingerCostTable {
    let hand = HandCosts::uniform(FingerCost::new(cost, step, step, step));
    [hand, hand]
}

/// Base cost per finger, no movement cost.
pub fn finger_costs(thumb: f64, index: f64, middle: f64, ring: f64, pinkie: f64) -> FingerCostTable {
    let f = |c| FingerCost::new(c, 0.0, 0.0, 0.0);
    let hand = HandCosts {
        thumb: f(thumb),
        index: f(index),
        middle: f(middle),
        ring: f(ring),
        pinkie: f(pinkie),
    };
    [hand, hand]
}

pub fn test_locale() -> Locale {
    Locale::from_pairs([
        ('1', '!'),
        ('2', '@'),
        (';', ':'),
        (',', '<'),
        ('.', '>'),
        ('/', '?'),
        ('\'', '"'),
    ])
}

pub fn build_layout(def: &KeyboardDefinition, costs: FingerCostTable) -> Layout {
    Layout::from_definition(def, costs, &test_locale()).unwrap()
}

pub fn freqs_of(text: &str) -> CharFrequencies {
    count_characters(text, "".chars())
}

/// Greedy seeding of `def` from `text` alone.
pub fn seeded_layout(def: &KeyboardDefinition, costs: FingerCostTable, text: &str) -> (Layout, Placement) {
    let mut layout = build_layout(def, costs);
    let placement = assign_characters(&mut layout, &freqs_of(text), &test_locale());
    (layout, placement)
}

pub fn scorer_for(layout: &Layout, text: &str, weights: PenaltyWeights) -> Scorer {
    let corpus = CorpusAnalysis::new(text, layout);
    Scorer::new(corpus.quartads, weights)
}

/// Weights with only `set` enabled.
pub fn only(set: impl FnOnce(&mut PenaltyWeights)) -> PenaltyWeights {
    let mut weights = PenaltyWeights::disabled();
    set(&mut weights);
    weights
}

/// One row of swappable keys on the left hand, one finger per key, each at its own home.
/// Index (col 0) is the cheapest key, pinkie (col 3) the most expensive.
pub fn four_key_board() -> KeyboardDefinition {
    KeyboardBuilder::new("four_key")
        .left(&[&["*I", "*M", "*R", "*P"]])
        .home(Hand::Left, Finger::Index, 0, 0)
        .home(Hand::Left, Finger::Middle, 0, 1)
        .home(Hand::Left, Finger::Ring, 0, 2)
        .home(Hand::Left, Finger::Pinkie, 0, 3)
        .build()
}

pub fn four_key_costs() -> FingerCostTable {
    finger_costs(1.0, 1.0, 2.0, 3.0, 4.0)
}

/// Fixed QWERTY-style letters on three rows per hand plus a thumb row
/// carrying space, a Shift on each hand and Enter.
pub fn fixed_qwerty() -> KeyboardDefinition {
    KeyboardBuilder::new("fixed_qwerty")
        .left(&[
            &["qP", "wR", "eM", "rI", "tI"],
            &["aP", "sR", "dM", "fI", "gI"],
            &["zP", "xR", "cM", "vI", "bI"],
            &[" T", "\\ST"],
        ])
        .home(Hand::Left, Finger::Pinkie, 1, 0)
        .home(Hand::Left, Finger::Ring, 1, 1)
        .home(Hand::Left, Finger::Middle, 1, 2)
        .home(Hand::Left, Finger::Index, 1, 3)
        .home(Hand::Left, Finger::Thumb, 3, 0)
        .right(&[
            &["yI", "uI", "iM", "oR", "pP"],
            &["hI", "jI", "kM", "lR", ";P"],
            &["nI", "mI", ",M", ".R", "/P"],
            &["\\ST", "\\nT"],
        ])
        .home(Hand::Right, Finger::Index, 1, 1)
        .home(Hand::Right, Finger::Middle, 1, 2)
        .home(Hand::Right, Finger::Ring, 1, 3)
        .home(Hand::Right, Finger::Pinkie, 1, 4)
        .home(Hand::Right, Finger::Thumb, 3, 0)
        .build()
}

/// Three rows of five swappable keys per hand and a fixed space/Shift thumb row.
pub fn swappable_split() -> KeyboardDefinition {
    KeyboardBuilder::new("swappable_split")
        .left(&[
            &["*P", "*R", "*M", "*I", "*I"],
            &["*P", "*R", "*M", "*I", "*I"],
            &["*P", "*R", "*M", "*I", "*I"],
            &[" T", "\\ST"],
        ])
        .home(Hand::Left, Finger::Pinkie, 1, 0)
        .home(Hand::Left, Finger::Ring, 1, 1)
        .home(Hand::Left, Finger::Middle, 1, 2)
        .home(Hand::Left, Finger::Index, 1, 3)
        .home(Hand::Left, Finger::Thumb, 3, 0)
        .right(&[
            &["*I", "*I", "*M", "*R", "*P"],
            &["*I", "*I", "*M", "*R", "*P"],
            &["*I", "*I", "*M", "*R", "*P"],
            &["\\ST"],
        ])
        .home(Hand::Right, Finger::Index, 1, 1)
        .home(Hand::Right, Finger::Middle, 1, 2)
        .home(Hand::Right, Finger::Ring, 1, 3)
        .home(Hand::Right, Finger::Pinkie, 1, 4)
        .home(Hand::Right, Finger::Thumb, 3, 0)
        .build()
}

pub fn realistic_costs() -> FingerCostTable {
    let hand = HandCosts {
        thumb: FingerCost::new(1.0, 1.0, 1.0, 1.0),
        index: FingerCost::new(1.0, 0.8, 1.0, 1.0),
        middle: FingerCost::new(1.0, 0.8, 1.2, 1.5),
        ring: FingerCost::new(1.3, 1.0, 1.4, 1.5),
        pinkie: FingerCost::new(1.6, 1.4, 1.6, 1.2),
    };
    [hand, hand]
}

pub const PANGRAMS: &str = "The quick brown fox jumps over the lazy dog. \
Pack my box with five dozen liquor jugs. \
How vexingly quick daft zebras jump! \
Sphinx of black quartz, judge my vow.\n";

pub fn profile_json(keyboard: &str, locale: &str, corpus: &[&str]) -> String {
    let corpus: Vec<String> = corpus.iter().map(|c| format!("{:?}", c)).collect();
    format!(
        r#"{{
            "name": "tester",
            "keyboard": {:?},
            "locale": {:?},
            "corpus": [{}],
            "required": "abc",
            "left": {{
                "thumb": {{"cost": 1.0}}, "index": {{"cost": 1.0}}, "middle": {{"cost": 1.2}},
                "ring": {{"cost": 1.5}}, "pinkie": {{"cost": 2.0}}
            }},
            "right": {{
                "thumb": {{"cost": 1.0}}, "index": {{"cost": 1.0}}, "middle": {{"cost": 1.2}},
                "ring": {{"cost": 1.5}}, "pinkie": {{"cost": 2.0}}
            }}
        }}"#,
        keyboard,
        locale,
        corpus.join(", ")
    )
}

pub fn parse_profile(json: &str) -> UserProfile {
    serde_json::from_str(json).unwrap()
}
