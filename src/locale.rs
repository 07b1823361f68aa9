use crate::error::{KaResult, KeyAnnealError};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use tracing::debug;

/// One-to-one mapping between unshifted and shifted characters (`1` <-> `!`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Locale {
    unshifted_to_shifted: HashMap<char, char>,
    shifted_to_unshifted: HashMap<char, char>,
}

impl Locale {
    pub fn from_pairs<I: IntoIterator<Item = (char, char)>>(pairs: I) -> Self {
        let mut locale = Self::default();
        for (unshifted, shifted) in pairs {
            locale.unshifted_to_shifted.insert(unshifted, shifted);
            locale.shifted_to_unshifted.insert(shifted, unshifted);
        }
        locale
    }

    /// Every character may appear once across both sides of the map.
    pub fn from_map(raw: &BTreeMap<String, String>) -> KaResult<Self> {
        let mut locale = Self::default();
        for (k, v) in raw {
            let bad = |reason| KeyAnnealError::LocalePair {
                key: k.clone(),
                value: v.clone(),
                reason,
            };
            let (Some(unshifted), Some(shifted)) = (single_char(k), single_char(v)) else {
                return Err(bad("both sides must be single characters"));
            };
            if locale.shifted_to_unshifted.contains_key(&shifted) {
                return Err(bad("shifted character is already paired"));
            }
            if unshifted == shifted
                || locale.shifted_to_unshifted.contains_key(&unshifted)
                || locale.unshifted_to_shifted.contains_key(&shifted)
            {
                return Err(bad("character appears on both sides"));
            }
            locale.unshifted_to_shifted.insert(unshifted, shifted);
            locale.shifted_to_unshifted.insert(shifted, unshifted);
        }
        Ok(locale)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KaResult<Self> {
        let path = path.as_ref();
        debug!("Loading locale from {:?}", path);
        let content = fs::read_to_string(path).map_err(|e| KeyAnnealError::io(path, e))?;
        let raw: BTreeMap<String, String> =
            serde_json::from_str(&content).map_err(|e| KeyAnnealError::json(path, e))?;
        Self::from_map(&raw)
    }

    pub fn shifted_of(&self, unshifted: char) -> Option<char> {
        self.unshifted_to_shifted.get(&unshifted).copied()
    }

    pub fn unshifted_of(&self, shifted: char) -> Option<char> {
        self.shifted_to_unshifted.get(&shifted).copied()
    }

    /// Returns `(unshifted, shifted)` for a character on either side of a pair.
    pub fn pair_for(&self, c: char) -> Option<(char, char)> {
        if let Some(shifted) = self.shifted_of(c) {
            Some((c, shifted))
        } else {
            self.unshifted_of(c).map(|unshifted| (unshifted, c))
        }
    }

    pub fn len(&self) -> usize {
        self.unshifted_to_shifted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unshifted_to_shifted.is_empty()
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
