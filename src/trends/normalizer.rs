// Text normalization: raw posting HTML to a sequence of cleaned terms.
//
// Pipeline:
//   1. HTML tags are replaced with a space so adjacent words don't merge
//   2. whitespace split
//   3. per token: decode entities, drop punctuation/whitespace/non-ASCII,
//      lowercase
//   4. drop tokens shorter than two characters and stop words

use std::collections::HashSet;

use anyhow::{Context, Result};
use regex_lite::Regex;

/// Characters removed from every token.
const PUNCTUATION: &[char] = &['.', ',', '?', '!', ';', ':', '*', '&', '\'', '(', ')', '<', '>'];

/// Shortest term kept, in characters.
pub const MIN_TERM_LEN: usize = 2;

/// Stateless tokenizer. Safe to share across worker threads.
pub struct Normalizer {
    tag_pattern: Regex,
    stop_words: HashSet<String>,
}

impl Normalizer {
    /// Build a normalizer around a stop-word set. Stop words are matched
    /// after lowercasing, so the set is lowercased here.
    pub fn new(stop_words: HashSet<String>) -> Result<Self> {
        let tag_pattern = Regex::new("<[^>]*>").context("Failed to compile HTML tag pattern")?;
        let stop_words = stop_words
            .into_iter()
            .map(|w| w.trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();

        Ok(Self {
            tag_pattern,
            stop_words,
        })
    }

    pub fn stop_word_count(&self) -> usize {
        self.stop_words.len()
    }

    /// Turn raw posting text into terms, in document order.
    ///
    /// Empty or whitespace-only input yields an empty vec.
    pub fn normalize(&self, raw: &str) -> Vec<String> {
        let stripped = self.tag_pattern.replace_all(raw, " ");
        stripped
            .split_whitespace()
            .filter_map(|token| self.clean_token(token))
            .collect()
    }

    /// Clean a single whitespace-delimited token. `None` when nothing usable
    /// remains.
    pub fn clean_token(&self, token: &str) -> Option<String> {
        let decoded = html_escape::decode_html_entities(token);
        let term: String = decoded
            .chars()
            .filter(|c| c.is_ascii() && !c.is_ascii_whitespace() && !PUNCTUATION.contains(c))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        if term.len() < MIN_TERM_LEN || self.stop_words.contains(&term) {
            None
        } else {
            Some(term)
        }
    }
}
