use std::sync::LazyLock;

use regex::Regex;

static NEWLINE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n+").unwrap());
static WHITESPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static SPACE_BEFORE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([,.!?;:])").unwrap());
static PUNCT_THEN_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([,.!?;:])(\w)").unwrap());

/// Collapse whitespace and fix punctuation spacing in extracted paragraph
/// text. Total and idempotent; paragraph structure is the caller's problem.
///
/// The substitutions run in a fixed order: newline runs first, then general
/// whitespace runs, then spacing around `, . ! ? ; :`.
pub fn normalize(text: &str) -> String {
    let text = NEWLINE_RUNS.replace_all(text, "\n");
    let text = WHITESPACE_RUNS.replace_all(&text, " ");
    let text = SPACE_BEFORE_PUNCT.replace_all(&text, "$1");
    let text = PUNCT_THEN_WORD.replace_all(&text, "$1 $2");
    text.into_owned()
}
