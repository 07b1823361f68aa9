use crate::config::{FingerCost, FingerCostTable, HandCosts};
use crate::error::{KaResult, KeyAnnealError};
use crate::locale::Locale;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::debug;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn opposite(self) -> Self {
        match self {
            Hand::Left => Hand::Right,
            Hand::Right => Hand::Left,
        }
    }
}

/// Fingers ordered from the innermost (thumb, 0) to the outermost (pinkie, 4).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinkie,
}

impl Finger {
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'T' => Some(Finger::Thumb),
            'I' => Some(Finger::Index),
            'M' => Some(Finger::Middle),
            'R' => Some(Finger::Ring),
            'P' => Some(Finger::Pinkie),
            _ => None,
        }
    }

    pub fn code(self) -> char {
        match self {
            Finger::Thumb => 'T',
            Finger::Index => 'I',
            Finger::Middle => 'M',
            Finger::Ring => 'R',
            Finger::Pinkie => 'P',
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Shift,
    Ctrl,
    Alt,
}

impl Modifier {
    pub fn glyph(self) -> char {
        match self {
            Modifier::Shift => '⇧',
            Modifier::Ctrl => '^',
            Modifier::Alt => '⌥',
        }
    }
}

/// What a key slot can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Char(char),
    Modifier(Modifier),
}

impl Symbol {
    pub fn as_char(self) -> Option<char> {
        match self {
            Symbol::Char(c) => Some(c),
            Symbol::Modifier(_) => None,
        }
    }

    pub fn display_char(self) -> char {
        match self {
            Symbol::Char('\t') => '⇥',
            Symbol::Char('\u{8}') => '⌫',
            Symbol::Char('\n') => '↵',
            Symbol::Char(' ') => '␣',
            Symbol::Char(c) => c,
            Symbol::Modifier(m) => m.glyph(),
        }
    }
}

/// Glyph for a slot, `⋀` when nothing is bound.
pub fn slot_glyph(slot: Option<Symbol>) -> char {
    slot.map(Symbol::display_char).unwrap_or('⋀')
}

/// Bindings of one physical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Key {
    pub unshifted: Option<Symbol>,
    pub shifted: Option<Symbol>,
}

impl Key {
    pub fn is_free(&self) -> bool {
        self.unshifted.is_none() && self.shifted.is_none()
    }

    pub fn is_full(&self) -> bool {
        self.unshifted.is_some() && self.shifted.is_some()
    }

    pub fn holds(&self, symbol: Symbol) -> bool {
        self.unshifted == Some(symbol) || self.shifted == Some(symbol)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyInfo {
    pub hand: Hand,
    pub finger: Finger,
    pub row: usize,
    pub col: usize,
    pub cost: f64,
    /// Negative when the key sits above the finger's home row.
    pub row_offset: i32,
    pub col_offset: i32,
    pub swappable: bool,
    pub key: Key,
}

impl KeyInfo {
    fn recompute(&mut self, home: HomePosition, factors: &FingerCost) {
        self.row_offset = self.row as i32 - home.row as i32;
        self.col_offset = self.col as i32 - home.col as i32;

        let vertical = if self.row_offset < 0 {
            factors.up_cost
        } else {
            factors.down_cost
        };
        self.cost = factors.cost
            + self.col_offset.unsigned_abs() as f64 * factors.h_cost
            + self.row_offset.unsigned_abs() as f64 * vertical;
    }

    pub fn is_home(&self) -> bool {
        self.row_offset == 0 && self.col_offset == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HomePosition {
    pub row: usize,
    pub col: usize,
}

impl HomePosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SideDefinition {
    pub rows: Vec<Vec<String>>,
    pub thumb_home: HomePosition,
    pub index_home: HomePosition,
    pub middle_home: HomePosition,
    pub ring_home: HomePosition,
    pub pinkie_home: HomePosition,
}

impl SideDefinition {
    pub fn home(&self, finger: Finger) -> HomePosition {
        match finger {
            Finger::Thumb => self.thumb_home,
            Finger::Index => self.index_home,
            Finger::Middle => self.middle_home,
            Finger::Ring => self.ring_home,
            Finger::Pinkie => self.pinkie_home,
        }
    }
}

/// Physical keyboard as stored on disk: a token grid per hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyboardDefinition {
    pub name: String,
    #[serde(default)]
    pub supports_overrides: bool,
    pub left: SideDefinition,
    pub right: SideDefinition,
}

impl KeyboardDefinition {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KaResult<Self> {
        let path = path.as_ref();
        debug!("Loading keyboard definition from {:?}", path);
        let content = fs::read_to_string(path).map_err(|e| KeyAnnealError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| KeyAnnealError::json(path, e))
    }

    pub fn side(&self, hand: Hand) -> &SideDefinition {
        match hand {
            Hand::Left => &self.left,
            Hand::Right => &self.right,
        }
    }
}

struct ParsedToken {
    finger: Finger,
    swappable: bool,
    key: Key,
}

fn parse_token(token: &str, locale: &Locale, supports_overrides: bool) -> Result<ParsedToken, String> {
    let mut chars: Vec<char> = token.chars().collect();
    let code = chars.pop().ok_or_else(|| "empty token".to_string())?;
    let finger = Finger::from_code(code).ok_or_else(|| format!("unknown finger code '{}'", code))?;

    let fixed = |c: char| Some(Symbol::Char(c));
    let both = |s: Symbol| Key {
        unshifted: Some(s),
        shifted: Some(s),
    };
    let plain = |c: char| Key {
        unshifted: fixed(c),
        shifted: if supports_overrides {
            None
        } else {
            locale.shifted_of(c).map(Symbol::Char)
        },
    };

    let (swappable, key) = match chars.as_slice() {
        [] => return Err("empty key content".to_string()),
        ['*'] => (true, Key::default()),
        ['\\', 'n'] => (false, both(Symbol::Char('\n'))),
        ['\\', 't'] => (false, both(Symbol::Char('\t'))),
        ['\\', 'b'] => (false, both(Symbol::Char('\u{8}'))),
        ['\\', 's'] | [' '] => (false, both(Symbol::Char(' '))),
        ['\\', '\\'] => (false, plain('\\')),
        ['\\', 'S'] => (false, both(Symbol::Modifier(Modifier::Shift))),
        ['\\', 'C'] => (false, both(Symbol::Modifier(Modifier::Ctrl))),
        ['\\', 'A'] => (false, both(Symbol::Modifier(Modifier::Alt))),
        ['\\', other] => return Err(format!("unknown escape '\\{}'", other)),
        [c] if c.is_ascii_alphabetic() => (
            false,
            Key {
                unshifted: fixed(c.to_ascii_lowercase()),
                shifted: fixed(c.to_ascii_uppercase()),
            },
        ),
        [c] => (false, plain(*c)),
        _ => return Err("key content must be a single character".to_string()),
    };

    Ok(ParsedToken {
        finger,
        swappable,
        key,
    })
}

/// A physical keyboard together with its current character bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub name: String,
    pub supports_overrides: bool,
    pub keys: Vec<KeyInfo>,
    homes: [[HomePosition; 5]; 2],
    costs: FingerCostTable,
    /// Number of keys per row, per hand.
    shape: [Vec<usize>; 2],
    essential: BTreeSet<char>,
}

impl Layout {
    pub fn from_definition(
        def: &KeyboardDefinition,
        costs: FingerCostTable,
        locale: &Locale,
    ) -> KaResult<Self> {
        let mut keys = Vec::new();
        let mut homes = [[HomePosition::default(); 5]; 2];
        let mut shape: [Vec<usize>; 2] = [Vec::new(), Vec::new()];
        let mut essential = BTreeSet::new();
        let mut seen: BTreeSet<(bool, Symbol)> = BTreeSet::new();

        for hand in Hand::iter() {
            let side = def.side(hand);
            for finger in Finger::iter() {
                homes[hand.index()][finger as usize] = side.home(finger);
            }

            for (row, tokens) in side.rows.iter().enumerate() {
                shape[hand.index()].push(tokens.len());
                for (col, token) in tokens.iter().enumerate() {
                    let parsed = parse_token(token, locale, def.supports_overrides).map_err(
                        |reason| KeyAnnealError::KeyToken {
                            hand,
                            row,
                            col,
                            token: token.clone(),
                            reason,
                        },
                    )?;

                    let slots = [(false, parsed.key.unshifted), (true, parsed.key.shifted)];
                    for (is_shifted, slot) in slots {
                        let Some(symbol) = slot else { continue };
                        // Several keys may share a modifier (left and right Shift).
                        if matches!(symbol, Symbol::Char(_)) && !seen.insert((is_shifted, symbol)) {
                            return Err(KeyAnnealError::KeyToken {
                                hand,
                                row,
                                col,
                                token: token.clone(),
                                reason: "symbol is already bound on another key".to_string(),
                            });
                        }
                        if let Symbol::Char(c) = symbol {
                            essential.insert(c);
                        }
                    }

                    let mut info = KeyInfo {
                        hand,
                        finger: parsed.finger,
                        row,
                        col,
                        cost: 0.0,
                        row_offset: 0,
                        col_offset: 0,
                        swappable: parsed.swappable,
                        key: parsed.key,
                    };
                    info.recompute(
                        side.home(parsed.finger),
                        costs[hand.index()].finger(parsed.finger),
                    );
                    keys.push(info);
                }
            }
        }

        debug!(
            "Built layout '{}' with {} keys ({} essential characters)",
            def.name,
            keys.len(),
            essential.len()
        );

        Ok(Self {
            name: def.name.clone(),
            supports_overrides: def.supports_overrides,
            keys,
            homes,
            costs,
            shape,
            essential,
        })
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn swappable_keys(&self) -> Vec<usize> {
        self.keys
            .iter()
            .enumerate()
            .filter(|(_, k)| k.swappable)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn home(&self, hand: Hand, finger: Finger) -> HomePosition {
        self.homes[hand.index()][finger as usize]
    }

    pub fn costs(&self) -> &FingerCostTable {
        &self.costs
    }

    pub fn set_home(&mut self, hand: Hand, finger: Finger, home: HomePosition) {
        self.homes[hand.index()][finger as usize] = home;
        let factors = *self.costs[hand.index()].finger(finger);
        for key in self
            .keys
            .iter_mut()
            .filter(|k| k.hand == hand && k.finger == finger)
        {
            key.recompute(home, &factors);
        }
    }

    pub fn apply_costs(&mut self, costs: FingerCostTable) {
        self.costs = costs;
        for key in &mut self.keys {
            let hand_costs: &HandCosts = &costs[key.hand.index()];
            key.recompute(self.homes[key.hand.index()][key.finger as usize], hand_costs.finger(key.finger));
        }
    }

    /// Exchanges both bindings of two keys.
    pub fn swap_bindings(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let tmp = self.keys[a].key;
        self.keys[a].key = self.keys[b].key;
        self.keys[b].key = tmp;
    }

    pub fn essential_chars(&self) -> &BTreeSet<char> {
        &self.essential
    }

    pub fn bound_chars(&self) -> BTreeSet<char> {
        self.keys
            .iter()
            .flat_map(|k| [k.key.unshifted, k.key.shifted])
            .flatten()
            .filter_map(Symbol::as_char)
            .collect()
    }

    /// Characters only reachable through a shifted slot.
    pub fn shifted_chars(&self) -> BTreeSet<char> {
        let unshifted: BTreeSet<char> = self
            .keys
            .iter()
            .filter_map(|k| k.key.unshifted.and_then(Symbol::as_char))
            .collect();

        self.keys
            .iter()
            .filter_map(|k| k.key.shifted.and_then(Symbol::as_char))
            .filter(|c| !unshifted.contains(c))
            .collect()
    }

    pub fn is_bound(&self, c: char) -> bool {
        let symbol = Symbol::Char(c);
        self.keys.iter().any(|k| k.key.holds(symbol))
    }

    pub fn modifier_keys(&self, modifier: Modifier) -> Vec<usize> {
        let symbol = Symbol::Modifier(modifier);
        self.keys
            .iter()
            .enumerate()
            .filter(|(_, k)| k.key.holds(symbol))
            .map(|(i, _)| i)
            .collect()
    }

    /// Key rows of one hand, top row first.
    pub fn hand_rows(&self, hand: Hand) -> Vec<Vec<&KeyInfo>> {
        let mut rows: Vec<Vec<&KeyInfo>> =
            self.shape[hand.index()].iter().map(|n| Vec::with_capacity(*n)).collect();
        for key in self.keys.iter().filter(|k| k.hand == hand) {
            rows[key.row].push(key);
        }
        rows
    }

    /// True when both layouts bind the same symbols to the same keys.
    pub fn same_bindings(&self, other: &Layout) -> bool {
        self.keys.len() == other.keys.len()
            && self
                .keys
                .iter()
                .zip(&other.keys)
                .all(|(a, b)| a.key == b.key)
    }
}
