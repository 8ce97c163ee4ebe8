//! Keyword Relevance Scoring
//!
//! Bag-of-words overlap scoring used by the policy document search. Pure
//! functions over strings; no I/O. The scoring contract:
//!
//! - normalize: lowercase, non-alphanumeric to space, drop short tokens
//! - segment at sentence boundaries (`.` `!` `?` followed by whitespace)
//! - score = size of the token-set intersection with the query
//! - rank score > 0 descending, stable on ties, top 10 kept

use std::collections::HashSet;

use crate::constants::{MAX_EXCERPTS, MIN_TOKEN_LEN};

/// One candidate sentence with its overlap score. Transient: created while
/// scanning a document, discarded after ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredSentence {
    pub text: String,
    pub score: usize,
}

/// Lowercase, map every non-alphanumeric character to a space, split on
/// whitespace, and drop tokens shorter than `MIN_TOKEN_LEN`. Applied
/// identically to queries and candidate sentences.
pub fn normalize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .filter(|token| token.len() >= MIN_TOKEN_LEN)
        .map(str::to_string)
        .collect()
}

/// Split text at boundaries following `.`, `!`, or `?` plus whitespace.
///
/// Approximate by design: abbreviations and nested punctuation are not
/// handled. The whitespace run is consumed; the terminator stays with its
/// sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') && chars.peek().is_some_and(|n| n.is_whitespace()) {
            while chars.peek().is_some_and(|n| n.is_whitespace()) {
                chars.next();
            }
            sentences.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        sentences.push(current);
    }

    sentences
}

/// Size of the set intersection of the two token lists. Duplicate tokens and
/// token order do not affect the score.
pub fn overlap_score(query_tokens: &[String], sentence_tokens: &[String]) -> usize {
    let query: HashSet<&str> = query_tokens.iter().map(String::as_str).collect();
    let sentence: HashSet<&str> = sentence_tokens.iter().map(String::as_str).collect();
    query.intersection(&sentence).count()
}

/// Score every sentence against the query and return the ranked excerpts.
///
/// Sentences with zero overlap are excluded. Ties keep document order
/// (stable sort). At most `MAX_EXCERPTS` survive.
pub fn rank(query: &str, sentences: &[String]) -> Vec<ScoredSentence> {
    let query_tokens = normalize(query);
    if query_tokens.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<ScoredSentence> = sentences
        .iter()
        .filter_map(|sentence| {
            let tokens = normalize(sentence);
            let score = overlap_score(&query_tokens, &tokens);
            (score > 0).then(|| ScoredSentence {
                text: sentence.trim().to_string(),
                score,
            })
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(MAX_EXCERPTS);
    scored
}
