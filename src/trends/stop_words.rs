// Stop-word loading.
//
// A custom list can be supplied as a plain text file (one word per line,
// `#` starts a comment line). Without one, the English list from the
// stop-words crate is used.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use stop_words::{get, LANGUAGE};
use tracing::debug;

/// Load the stop-word set from `path`, or the built-in English list.
pub fn load_stop_words(path: Option<&Path>) -> Result<HashSet<String>> {
    let words = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read stop words from {}", path.display()))?;
            parse_stop_words(&text)
        }
        None => default_stop_words(),
    };

    debug!(count = words.len(), "Loaded stop words");
    Ok(words)
}

/// The built-in English stop-word list, lowercased.
pub fn default_stop_words() -> HashSet<String> {
    let words: Vec<String> = get(LANGUAGE::English);
    words.into_iter().map(|w| w.to_lowercase()).collect()
}

/// Parse a one-word-per-line stop-word file.
pub fn parse_stop_words(text: &str) -> HashSet<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_lowercase)
        .collect()
}
