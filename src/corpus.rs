use crate::error::{KaResult, KeyAnnealError};
use crate::geometry::{Layout, Modifier, Symbol};
use itertools::Itertools;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

pub const MAX_QUARTAD_LEN: usize = 4;

/// Character -> occurrence count. Ordered so iteration is deterministic.
pub type CharFrequencies = BTreeMap<char, u64>;

/// Printable ASCII, tab and newline.
pub fn is_typeable(c: char) -> bool {
    matches!(c, ' '..='~' | '\t' | '\n')
}

/// Counts typeable characters. Every seed is present (count 0 if absent from
/// `text`); alphabetic seeds are added in both cases.
pub fn count_characters<I>(text: &str, seeds: I) -> CharFrequencies
where
    I: IntoIterator<Item = char>,
{
    let mut freqs = CharFrequencies::new();
    for seed in seeds {
        if seed.is_ascii_alphabetic() {
            freqs.entry(seed.to_ascii_lowercase()).or_insert(0);
            freqs.entry(seed.to_ascii_uppercase()).or_insert(0);
        } else {
            freqs.entry(seed).or_insert(0);
        }
    }

    for c in text.chars().filter(|c| is_typeable(*c)) {
        let count = freqs.entry(c).or_insert_with(|| {
            debug!("Found character {:?}", c);
            0
        });
        *count += 1;
    }
    freqs
}

pub fn read_corpus<P: AsRef<Path>>(paths: &[P]) -> KaResult<String> {
    let mut text = String::new();
    for path in paths {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| KeyAnnealError::io(path, e))?;
        debug!("Read {} bytes of corpus from {:?}", content.len(), path);
        text.push_str(&content);
    }
    Ok(text)
}

/// Up to four consecutive characters, each tagged with the modifier held while typing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Quartad {
    len: u8,
    chars: [char; MAX_QUARTAD_LEN],
    modifiers: [Option<Modifier>; MAX_QUARTAD_LEN],
}

impl Quartad {
    /// Builds a quartad from the first `min(4, chars.len())` entries.
    pub fn new(chars: &[char], modifiers: &[Option<Modifier>]) -> Self {
        let len = chars.len().min(MAX_QUARTAD_LEN);
        let mut q = Self {
            len: len as u8,
            chars: ['\0'; MAX_QUARTAD_LEN],
            modifiers: [None; MAX_QUARTAD_LEN],
        };
        q.chars[..len].copy_from_slice(&chars[..len]);
        for (slot, m) in q.modifiers[..len].iter_mut().zip(modifiers) {
            *slot = *m;
        }
        q
    }

    /// Tags every character found in `shifted` with Shift.
    pub fn from_str_tagged(s: &str, shifted: &BTreeSet<char>) -> Self {
        let chars: Vec<char> = s.chars().take(MAX_QUARTAD_LEN).collect();
        let modifiers: Vec<Option<Modifier>> = chars
            .iter()
            .map(|c| shifted.contains(c).then_some(Modifier::Shift))
            .collect();
        Self::new(&chars, &modifiers)
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn chars(&self) -> &[char] {
        &self.chars[..self.len()]
    }

    pub fn modifiers(&self) -> &[Option<Modifier>] {
        &self.modifiers[..self.len()]
    }
}

impl fmt::Display for Quartad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.chars() {
            write!(f, "{}", Symbol::Char(*c).display_char())?;
        }
        Ok(())
    }
}

/// Quartad counts grouped by window length, most frequent first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuartadTable {
    groups: [Vec<(Quartad, u64)>; MAX_QUARTAD_LEN],
}

impl QuartadTable {
    pub fn from_counts(counts: HashMap<Quartad, u64>) -> Self {
        let mut groups: [Vec<(Quartad, u64)>; MAX_QUARTAD_LEN] = Default::default();
        for (q, count) in counts {
            if q.is_empty() || count == 0 {
                continue;
            }
            groups[q.len() - 1].push((q, count));
        }
        for group in &mut groups {
            group.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        }
        Self { groups }
    }

    /// Quartads of exactly `len` characters.
    pub fn group(&self, len: usize) -> &[(Quartad, u64)] {
        match len {
            1..=MAX_QUARTAD_LEN => &self.groups[len - 1],
            _ => &[],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Quartad, u64)> {
        self.groups.iter().flatten()
    }

    /// Number of distinct quartads.
    pub fn len(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn count(&self, quartad: &Quartad) -> u64 {
        self.group(quartad.len())
            .iter()
            .find(|(q, _)| q == quartad)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    /// The `n` most frequent quartads over all lengths.
    pub fn top(&self, n: usize) -> Vec<(Quartad, u64)> {
        self.iter()
            .copied()
            .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
            .take(n)
            .collect()
    }
}

/// Counts every window of 1..=4 placed characters. The first unplaced
/// character stops extension for the current start position only.
pub fn extract_quartads(
    text: &str,
    placed: &BTreeSet<char>,
    shifted: &BTreeSet<char>,
) -> QuartadTable {
    let chars: Vec<char> = text.chars().collect();
    let tags: Vec<Option<Modifier>> = chars
        .iter()
        .map(|c| shifted.contains(c).then_some(Modifier::Shift))
        .collect();

    let mut counts: HashMap<Quartad, u64> = HashMap::new();
    for start in 0..chars.len() {
        let end = (start + MAX_QUARTAD_LEN).min(chars.len());
        for stop in start + 1..=end {
            if !placed.contains(&chars[stop - 1]) {
                break;
            }
            let q = Quartad::new(&chars[start..stop], &tags[start..stop]);
            *counts.entry(q).or_insert(0) += 1;
        }
    }

    QuartadTable::from_counts(counts)
}

/// Corpus statistics bound to the characters a layout can produce.
#[derive(Debug, Clone)]
pub struct CorpusAnalysis {
    pub quartads: Arc<QuartadTable>,
    pub placed: BTreeSet<char>,
    pub shifted: BTreeSet<char>,
}

impl CorpusAnalysis {
    pub fn new(text: &str, layout: &Layout) -> Self {
        let placed = layout.bound_chars();
        let shifted = layout.shifted_chars();
        let quartads = extract_quartads(text, &placed, &shifted);
        info!(
            "Using {} unique characters, {} distinct quartads",
            placed.len(),
            quartads.len()
        );
        Self {
            quartads: Arc::new(quartads),
            placed,
            shifted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typeable_range() {
        assert!(is_typeable('a'));
        assert!(is_typeable('~'));
        assert!(is_typeable('\n'));
        assert!(!is_typeable('\r'));
        assert!(!is_typeable('é'));
    }

    #[test]
    fn test_seeds_present_with_zero_count() {
        let freqs = count_characters("aa\r", ['q', '1']);
        assert_eq!(freqs.get(&'a'), Some(&2));
        assert_eq!(freqs.get(&'q'), Some(&0));
        assert_eq!(freqs.get(&'Q'), Some(&0));
        assert_eq!(freqs.get(&'1'), Some(&0));
        assert!(!freqs.contains_key(&'\r'));
    }

    #[test]
    fn test_shift_tagging() {
        let shifted: BTreeSet<char> = ['A'].into_iter().collect();
        let q = Quartad::from_str_tagged("aA", &shifted);
        assert_eq!(q.modifiers(), &[None, Some(Modifier::Shift)]);
        assert_eq!(q.to_string(), "aA");
    }
}
