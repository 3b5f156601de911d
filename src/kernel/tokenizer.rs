//! Raw extracted text -> display tokens.

use compact_str::CompactString;

/// A single display word. Never empty, never contains whitespace.
pub type Token = CompactString;

/// Collapse every whitespace run into a single separator and return the words in order.
///
/// Whitespace-only input yields an empty sequence; deciding whether that is a failed load
/// is up to the caller.
pub fn tokenize(raw: &str) -> Vec<Token> {
    raw.split_whitespace().map(CompactString::from).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/tokenizer.rs"]
mod tests;
