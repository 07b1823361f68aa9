mod common;

use common::*;
use keyanneal::corpus::{
    count_characters, extract_quartads, read_corpus, CorpusAnalysis, Quartad, MAX_QUARTAD_LEN,
};
use keyanneal::geometry::Modifier;
use keyanneal::KeyAnnealError;
use std::collections::BTreeSet;
use std::io::Write;

fn set(chars: &str) -> BTreeSet<char> {
    chars.chars().collect()
}

fn q(s: &str) -> Quartad {
    Quartad::from_str_tagged(s, &BTreeSet::new())
}

#[test]
fn test_unplaced_character_breaks_windows() {
    let table = extract_quartads("abcZde", &set("abcde"), &BTreeSet::new());

    let singles: Vec<String> = table.group(1).iter().map(|(q, _)| q.to_string()).collect();
    assert_eq!(singles, vec!["a", "b", "c", "d", "e"]);

    let mut pairs: Vec<String> = table.group(2).iter().map(|(q, _)| q.to_string()).collect();
    pairs.sort();
    assert_eq!(pairs, vec!["ab", "bc", "de"]);

    assert_eq!(table.group(3).len(), 1);
    assert_eq!(table.count(&q("abc")), 1);
    assert!(table.group(4).is_empty());
    assert_eq!(table.count(&q("cZ")), 0);
    assert_eq!(table.len(), 9);
}

#[test]
fn test_windows_never_exceed_four() {
    let table = extract_quartads("abcdefgh", &set("abcdefgh"), &BTreeSet::new());
    assert!(table.iter().all(|(q, _)| q.len() <= MAX_QUARTAD_LEN));
    assert_eq!(table.group(4).len(), 5);
    assert!(table.group(5).is_empty());
    assert!(table.group(0).is_empty());
}

#[test]
fn test_repeated_windows_accumulate() {
    let table = extract_quartads("ababab", &set("ab"), &BTreeSet::new());
    assert_eq!(table.count(&q("ab")), 3);
    assert_eq!(table.count(&q("ba")), 2);
    assert_eq!(table.count(&q("abab")), 2);
    assert_eq!(table.count(&q("a")), 3);

    // Most frequent first, ties by quartad
    let top = table.top(3);
    assert_eq!(top[0].1, 3);
    assert_eq!(top[0].0, q("a"));
    assert_eq!(top[1].0, q("b"));
    assert_eq!(top[2].0, q("ab"));
}

#[test]
fn test_shifted_characters_are_tagged() {
    let table = extract_quartads("aAb", &set("aAb"), &set("A"));
    let (pair, _) = table
        .group(2)
        .iter()
        .find(|(q, _)| q.chars() == ['a', 'A'])
        .copied()
        .unwrap();
    assert_eq!(pair.modifiers(), &[None, Some(Modifier::Shift)]);

    let untagged = Quartad::new(&['a', 'A'], &[None, None]);
    assert_eq!(table.count(&untagged), 0);
    assert_eq!(table.count(&pair), 1);
}

#[test]
fn test_counting_skips_untypeable_characters() {
    let freqs = count_characters("héllo\r\n\t", "z".chars());
    assert_eq!(freqs.get(&'l'), Some(&2));
    assert_eq!(freqs.get(&'\n'), Some(&1));
    assert_eq!(freqs.get(&'\t'), Some(&1));
    assert_eq!(freqs.get(&'Z'), Some(&0));
    assert!(!freqs.contains_key(&'é'));
    assert!(!freqs.contains_key(&'\r'));
}

#[test]
fn test_analysis_uses_layout_bindings() {
    let layout = build_layout(&fixed_qwerty(), flat_costs(1.0, 1.0));
    let analysis = CorpusAnalysis::new("Hi 7 there", &layout);

    assert!(analysis.placed.contains(&'H'));
    assert!(!analysis.placed.contains(&'7'));
    assert!(analysis.shifted.contains(&'H'));

    let hi = analysis
        .quartads
        .group(3)
        .iter()
        .find(|(q, _)| q.chars() == ['H', 'i', ' '])
        .map(|(q, _)| *q)
        .unwrap();
    assert_eq!(hi.modifiers()[0], Some(Modifier::Shift));
    // '7' is not on the keyboard, so no window crosses it
    assert!(analysis
        .quartads
        .iter()
        .all(|(q, _)| !q.chars().contains(&'7')));
}

#[test]
fn test_read_corpus_concatenates_files() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("one.txt");
    let second = dir.path().join("two.txt");
    write!(std::fs::File::create(&first).unwrap(), "abc").unwrap();
    write!(std::fs::File::create(&second).unwrap(), "def").unwrap();

    let text = read_corpus(&[&first, &second]).unwrap();
    assert_eq!(text, "abcdef");
}

#[test]
fn test_read_corpus_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.txt");
    match read_corpus(&[&missing]) {
        Err(KeyAnnealError::Io { path, .. }) => assert_eq!(path, missing),
        other => panic!("Expected Io error, got {:?}", other),
    }
}
