//! Library names derived from the user's request.

use convert_case::{Case, Casing};

/// Name used when a prompt has no usable words.
pub const FALLBACK_LIBRARY_NAME: &str = "Component Library";

const STOP_WORDS: &[&str] = &["create", "make", "with", "using"];

/// Title for the library a prompt produced.
///
/// Punctuation is dropped, words of three letters or fewer and filler verbs
/// are skipped, and the first three remaining words are capitalized.
pub fn library_name_from_prompt(prompt: &str) -> String {
    let cleaned: String = prompt
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();

    let words: Vec<&str> = cleaned
        .split_whitespace()
        .filter(|word| word.len() > 3 && !STOP_WORDS.contains(word))
        .take(3)
        .collect();

    if words.is_empty() {
        FALLBACK_LIBRARY_NAME.to_string()
    } else {
        words.join(" ").from_case(Case::Lower).to_case(Case::Title)
    }
}
