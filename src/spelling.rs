use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::Error;

/// Word-level suggestion source. Implementations own the lookup policy; the
/// pipeline only ever asks "is there a better spelling for this token?".
pub trait Dictionary {
    /// Best suggestion for a token, or None when the dictionary has nothing
    /// to offer (unknown word, number, symbol, or already correct).
    fn suggest(&self, token: &str) -> Option<String>;
}

/// Dictionary that never suggests anything; correction becomes the identity.
pub struct NoDictionary;

impl Dictionary for NoDictionary {
    fn suggest(&self, _token: &str) -> Option<String> {
        None
    }
}

/// Exact-match lookup table. Loadable from a plain text file with one
/// `misspelling correction` pair per line; blank lines and `#` comments are
/// skipped.
#[derive(Default)]
pub struct WordList {
    entries: HashMap<String, String>,
}

impl WordList {
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_lines(&content))
    }

    pub fn from_lines(content: &str) -> Self {
        let mut entries = HashMap::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((from, to)) = line.split_once(char::is_whitespace) {
                entries.insert(from.to_string(), to.trim().to_string());
            }
        }
        Self { entries }
    }

    pub fn insert(&mut self, from: &str, to: &str) {
        self.entries.insert(from.to_string(), to.to_string());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Dictionary for WordList {
    fn suggest(&self, token: &str) -> Option<String> {
        self.entries.get(token).cloned()
    }
}

/// Map every whitespace-split token through the dictionary, keeping tokens
/// the dictionary has no suggestion for. Tokens are rejoined with single
/// spaces — original inter-token spacing is deliberately not preserved, the
/// normalizer runs after this and restores punctuation spacing.
pub fn correct_text(dict: &dyn Dictionary, text: &str) -> String {
    text.split_whitespace()
        .map(|token| dict.suggest(token).unwrap_or_else(|| token.to_string()))
        .collect::<Vec<_>>()
        .join(" ")
}
