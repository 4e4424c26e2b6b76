//! Preparing raw input text for the coder.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;
use crate::table::FrequencyTable;

/// Unicode punctuation, whitespace (no-break spaces included) and `|`.
static STRIPPED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{P}|\s]").expect("pattern is valid"));

/// Drops punctuation and whitespace and uppercases the rest.
pub fn normalize(line: &str) -> String {
    STRIPPED.replace_all(line, "").to_uppercase()
}

/// one message per line that still has content once normalized
pub fn clear_messages(text: &str) -> impl Iterator<Item = String> + '_ {
    text.lines().map(normalize).filter(|line| !line.is_empty())
}

/// table counting every symbol of the normalized sample
pub fn sample_table(sample: &str) -> Result<FrequencyTable> {
    FrequencyTable::from_text(&clear_messages(sample).collect::<String>())
}

/// one bitstring per non-blank line, surrounding whitespace trimmed
pub fn encoded_messages(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty())
}
