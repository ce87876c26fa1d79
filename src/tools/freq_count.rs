use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::huffman_coding::symbol::Symbol;

/// Count each character of `text` and return the symbols sorted by character. Uses parallelism
/// when the text is over 64k characters.
pub fn symbols_from_text(text: &str) -> Vec<Symbol> {
    let chars = text.chars().collect::<Vec<char>>();
    let counts = if chars.len() > 64_000 {
        chars
            .par_chunks(16_000)
            .fold(FxHashMap::default, |mut counts: FxHashMap<char, u64>, chunk| {
                chunk.iter().for_each(|&c| *counts.entry(c).or_insert(0) += 1);
                counts
            })
            .reduce(FxHashMap::default, |mut total, part| {
                part.into_iter()
                    .for_each(|(c, n)| *total.entry(c).or_insert(0) += n);
                total
            })
    } else {
        let mut counts: FxHashMap<char, u64> = FxHashMap::default();
        chars.iter().for_each(|&c| *counts.entry(c).or_insert(0) += 1);
        counts
    };

    let mut symbols = counts
        .into_iter()
        .map(|(c, n)| Symbol::new(c, n))
        .collect::<Vec<Symbol>>();
    symbols.sort_unstable_by_key(|s| s.ch());
    symbols
}

#[test]
fn small_text_count_test() {
    let symbols = symbols_from_text("abracadabra");
    let pairs = symbols
        .iter()
        .map(|s| (s.ch(), s.freq()))
        .collect::<Vec<_>>();
    assert_eq!(pairs, vec![('a', 5), ('b', 2), ('c', 1), ('d', 1), ('r', 2)]);
}

#[test]
fn large_text_count_test() {
    let text = "héllo wörld ".repeat(10_000);
    let symbols = symbols_from_text(&text);
    let total: u64 = symbols.iter().map(|s| s.freq()).sum();
    assert_eq!(total, 120_000);
    let l = symbols.iter().find(|s| s.ch() == 'l').unwrap();
    assert_eq!(l.freq(), 30_000);
    let e = symbols.iter().find(|s| s.ch() == 'é').unwrap();
    assert_eq!(e.freq(), 10_000);
}

#[test]
fn empty_text_count_test() {
    assert!(symbols_from_text("").is_empty());
}
