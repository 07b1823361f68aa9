use crate::corpus::CharFrequencies;
use crate::geometry::{Layout, Symbol};
use crate::locale::Locale;
use std::cmp::Ordering;
use tracing::{debug, warn};

/// Outcome of the greedy seeding pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Placement {
    /// Characters bound by this pass, in binding order.
    pub placed: Vec<char>,
    /// Characters that found no key.
    pub unplaced: Vec<char>,
}

/// Characters by descending frequency, ties broken by ascending character.
fn ranked_chars(freqs: &CharFrequencies) -> Vec<char> {
    let mut ranked: Vec<(char, u64)> = freqs.iter().map(|(c, n)| (*c, *n)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.into_iter().map(|(c, _)| c).collect()
}

/// Key indices by ascending cost, ties broken by index.
fn ranked_keys(layout: &Layout) -> Vec<usize> {
    let mut ranked: Vec<usize> = (0..layout.len()).collect();
    ranked.sort_by(|&a, &b| {
        layout.keys[a]
            .cost
            .partial_cmp(&layout.keys[b].cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.cmp(&b))
    });
    ranked
}

/// Greedily binds frequent characters to cheap keys.
///
/// Walks characters (most frequent first) and keys (cheapest first) in
/// lockstep. Letters take a whole key (lower/upper). Symbols with a locale
/// counterpart take a whole key as a pair. Anything else takes a single slot;
/// without override support only the unshifted slot is used.
pub fn assign_characters(layout: &mut Layout, freqs: &CharFrequencies, locale: &Locale) -> Placement {
    let chars = ranked_chars(freqs);
    let keys = ranked_keys(layout);
    let overrides = layout.supports_overrides;
    let mut placement = Placement::default();

    let (mut i, mut k) = (0, 0);
    while i < chars.len() && k < keys.len() {
        let c = chars[i];
        let idx = keys[k];

        if layout.is_bound(c) {
            i += 1;
            continue;
        }

        let key = layout.keys[idx].key;
        if key.is_full() {
            k += 1;
            continue;
        }

        if c.is_ascii_alphabetic() {
            if !key.is_free() {
                k += 1;
                continue;
            }
            let (lower, upper) = (c.to_ascii_lowercase(), c.to_ascii_uppercase());
            debug!("Binding letter '{}' / '{}' to key {}", lower, upper, idx);
            let slot = &mut layout.keys[idx].key;
            slot.unshifted = Some(Symbol::Char(lower));
            slot.shifted = Some(Symbol::Char(upper));
            placement.placed.extend([lower, upper]);
        } else {
            let pair = locale
                .pair_for(c)
                .filter(|(u, s)| key.is_free() && !layout.is_bound(*u) && !layout.is_bound(*s));

            if let Some((unshifted, shifted)) = pair {
                debug!("Binding pair '{:?}' / '{:?}' to key {}", unshifted, shifted, idx);
                let slot = &mut layout.keys[idx].key;
                slot.unshifted = Some(Symbol::Char(unshifted));
                slot.shifted = Some(Symbol::Char(shifted));
                placement.placed.extend([unshifted, shifted]);
            } else if overrides {
                let slot = &mut layout.keys[idx].key;
                if slot.unshifted.is_none() {
                    slot.unshifted = Some(Symbol::Char(c));
                } else {
                    slot.shifted = Some(Symbol::Char(c));
                }
                debug!("Binding '{:?}' to key {}", c, idx);
                placement.placed.push(c);
            } else {
                if key.unshifted.is_some() {
                    k += 1;
                    continue;
                }
                debug!("Binding '{:?}' to unshifted slot of key {}", c, idx);
                layout.keys[idx].key.unshifted = Some(Symbol::Char(c));
                placement.placed.push(c);
            }
        }

        i += 1;
        let bound = layout.keys[idx].key;
        if bound.is_full() || (!overrides && bound.unshifted.is_some()) {
            k += 1;
        }
    }

    placement.unplaced = chars
        .iter()
        .copied()
        .filter(|c| !layout.is_bound(*c))
        .collect();

    if !placement.unplaced.is_empty() {
        warn!(
            "Out of keys: {} characters left unplaced ({:?})",
            placement.unplaced.len(),
            placement.unplaced
        );
    }

    placement
}

#[cfg(test)]
mod tests {
    use super::*;

    fn freqs(pairs: &[(char, u64)]) -> CharFrequencies {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_ranking_breaks_ties_by_character() {
        let ranked = ranked_chars(&freqs(&[('b', 2), ('a', 2), ('z', 9)]));
        assert_eq!(ranked, vec!['z', 'a', 'b']);
    }
}
