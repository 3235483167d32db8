//! Lexical extraction over raw source content.
//!
//! Pure functions, no external calls: tokenize, drop stop words, rank by
//! frequency with ties broken by first occurrence. Feeds the shared context
//! builder; also reused by the validator's token scans.

use std::collections::HashMap;

/// Upper bound on extracted key terms.
const MAX_KEY_TERMS: usize = 10;

/// Upper bound on derived themes.
const MAX_THEMES: usize = 3;

/// Minimum token length considered a candidate term.
const MIN_TERM_LEN: usize = 3;

/// Function words and contraction fragments excluded from term ranking.
const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "any", "can", "had", "her", "was",
    "one", "our", "out", "day", "get", "has", "him", "his", "how", "man", "new", "now", "old",
    "see", "two", "way", "who", "did", "its", "let", "put", "say", "she", "too", "use", "that",
    "this", "with", "have", "from", "they", "been", "were", "said", "each", "which", "their",
    "will", "other", "about", "many", "then", "them", "these", "some", "would", "into", "more",
    "very", "what", "know", "just", "than", "only", "over", "also", "your", "when", "where",
    "there", "here", "because", "could", "should", "after", "before", "while", "being", "does",
    "don", "didn", "isn", "aren", "wasn", "weren", "won", "wouldn", "couldn", "shouldn", "hasn",
    "haven", "doesn", "most", "much", "such", "both", "between", "through", "during", "under",
    "again", "same", "still", "even", "make", "made", "like", "well", "back", "people", "things",
    "thing", "going", "think",
];

fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Lowercase alphabetic tokens of `content`, in order of appearance.
pub(crate) fn tokenize(content: &str) -> Vec<String> {
    content
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Extract the most salient terms from source content.
///
/// Deterministic and pure: terms are case-normalized, stop words removed,
/// ranked by frequency with ties broken by first-occurrence order, and
/// bounded to the top 10. Empty input yields an empty list; never fails.
#[must_use]
pub fn extract_key_terms(content: &str) -> Vec<String> {
    let mut stats: HashMap<String, (usize, usize)> = HashMap::new();

    for (idx, token) in tokenize(content).into_iter().enumerate() {
        if token.len() < MIN_TERM_LEN || is_stop_word(&token) {
            continue;
        }
        let entry = stats.entry(token).or_insert((0, idx));
        entry.0 += 1;
    }

    let mut ranked: Vec<(String, (usize, usize))> = stats.into_iter().collect();
    ranked.sort_by(|(_, (freq_a, first_a)), (_, (freq_b, first_b))| {
        freq_b.cmp(freq_a).then(first_a.cmp(first_b))
    });

    ranked
        .into_iter()
        .take(MAX_KEY_TERMS)
        .map(|(term, _)| term)
        .collect()
}

/// Derive coarse thematic groupings from source content.
///
/// Bounded heuristic over the same token frequencies as
/// [`extract_key_terms`]: the top-ranked terms, title-cased. A richer theme
/// detector can replace this without touching callers.
#[must_use]
pub fn derive_themes(content: &str) -> Vec<String> {
    extract_key_terms(content)
        .into_iter()
        .take(MAX_THEMES)
        .map(|term| title_case(&term))
        .collect()
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
