//! Text tokenization for indexing, explanation and heuristics
//!
//! Index terms are word tokens of at least two characters, where a word
//! character is alphanumeric or `_`. No stop-word list is applied; the catalog
//! is Turkish and common stop-lists do not cover it.

use std::collections::HashSet;

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Split text into lower-cased word tokens of two or more characters.
///
/// # Example
///
/// ```
/// use chemrank_core::tokenizer::tokenize;
///
/// let tokens = tokenize("MAKS-310 korozyon, a b");
/// assert_eq!(tokens, vec!["maks", "310", "korozyon"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !is_word_char(c))
        .filter(|s| s.chars().count() >= 2)
        .map(String::from)
        .collect()
}

/// Expand tokens into space-joined n-grams for every `n` in `min_n..=max_n`.
///
/// All n-grams of one size are emitted before the next size.
pub fn ngrams(tokens: &[String], min_n: usize, max_n: usize) -> Vec<String> {
    let mut terms = Vec::new();
    for n in min_n.max(1)..=max_n {
        if n > tokens.len() {
            break;
        }
        if n == 1 {
            terms.extend(tokens.iter().cloned());
        } else {
            terms.extend(tokens.windows(n).map(|w| w.join(" ")));
        }
    }
    terms
}

/// Keywords used to explain a match.
///
/// Lower-cases, treats `-` and `/` as separators, keeps tokens longer than
/// two characters, and removes duplicates while preserving first occurrence.
pub fn keywords(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    text.to_lowercase()
        .replace(['-', '/'], " ")
        .split_whitespace()
        .map(|s| s.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|s| s.chars().count() > 2)
        .filter(|s| seen.insert(s.to_string()))
        .map(String::from)
        .collect()
}

/// Case-fold for heuristic vocabulary matching.
///
/// Lower-cases and maps Turkish letters onto their ASCII base so that
/// `"HAKKIMIZDA"`, `"Hakkımızda"` and the URL slug `hakkimizda` compare equal.
pub fn fold(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|&c| c != '\u{0307}')
        .map(|c| match c {
            'ı' => 'i',
            'ç' => 'c',
            'ğ' => 'g',
            'ö' => 'o',
            'ş' => 's',
            'ü' => 'u',
            'â' => 'a',
            'î' => 'i',
            'û' => 'u',
            other => other,
        })
        .collect()
}
