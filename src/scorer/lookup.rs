use crate::geometry::{Hand, KeyInfo, Layout, Modifier, Symbol};
use strum::IntoEnumIterator;

pub const ASCII_RANGE: usize = 128;
pub const UNMAPPED: u16 = u16::MAX;

/// Character -> key index table, rebuilt for every candidate layout.
#[derive(Debug, Clone)]
pub struct KeyLookup {
    char_to_key: [u16; ASCII_RANGE],
    /// Modifier key to hold for a character typed with the given hand.
    modifier_for_hand: [[u16; 2]; 3],
}

impl KeyLookup {
    pub fn new(layout: &Layout) -> Self {
        let mut char_to_key = [UNMAPPED; ASCII_RANGE];

        // Shifted slots first so an unshifted binding wins when a character has both.
        for (i, info) in layout.keys.iter().enumerate() {
            if let Some(Symbol::Char(c)) = info.key.shifted {
                if (c as usize) < ASCII_RANGE {
                    char_to_key[c as usize] = i as u16;
                }
            }
        }
        for (i, info) in layout.keys.iter().enumerate() {
            if let Some(Symbol::Char(c)) = info.key.unshifted {
                if (c as usize) < ASCII_RANGE {
                    char_to_key[c as usize] = i as u16;
                }
            }
        }

        let mut modifier_for_hand = [[UNMAPPED; 2]; 3];
        for modifier in Modifier::iter() {
            let keys = layout.modifier_keys(modifier);
            for hand in Hand::iter() {
                let preferred = keys
                    .iter()
                    .find(|&&k| layout.keys[k].hand == hand.opposite())
                    .or_else(|| keys.first());
                if let Some(&k) = preferred {
                    modifier_for_hand[modifier as usize][hand.index()] = k as u16;
                }
            }
        }

        Self {
            char_to_key,
            modifier_for_hand,
        }
    }

    #[inline]
    pub fn key_index(&self, c: char) -> Option<usize> {
        let idx = *self.char_to_key.get(c as usize)?;
        (idx != UNMAPPED).then_some(idx as usize)
    }

    #[inline]
    pub fn key<'a>(&self, layout: &'a Layout, c: char) -> Option<&'a KeyInfo> {
        self.key_index(c).map(|i| &layout.keys[i])
    }

    /// The modifier key held while typing a character on `hand`.
    #[inline]
    pub fn modifier_key<'a>(
        &self,
        layout: &'a Layout,
        modifier: Modifier,
        hand: Hand,
    ) -> Option<&'a KeyInfo> {
        let idx = self.modifier_for_hand[modifier as usize][hand.index()];
        (idx != UNMAPPED).then(|| &layout.keys[idx as usize])
    }
}
