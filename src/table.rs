//! Frequency tables: the raw `(symbol, frequency)` input of tree construction.

use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;

use crate::error::{Error, IsAt, Result, TableEntryError};

/// associates a symbol and its frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolEntry {
    symbol: char,
    frequency: u64,
}

impl SymbolEntry {
    pub fn new(symbol: char, frequency: u64) -> Self {
        SymbolEntry { symbol, frequency }
    }

    pub fn symbol(&self) -> char {
        self.symbol
    }

    pub fn frequency(&self) -> u64 {
        self.frequency
    }
}

/// A non-empty list of entries with pairwise distinct symbols, kept in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<SymbolEntry>,
}

impl FrequencyTable {
    pub fn new(entries: Vec<SymbolEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::EmptyTable);
        }
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.symbol) {
                return Err(Error::DuplicateSymbol(entry.symbol));
            }
        }
        Ok(FrequencyTable { entries })
    }

    /// count occurrences of each character of `text`, entries sorted by symbol
    pub fn from_text(text: &str) -> Result<Self> {
        let entries = count_occurrences(text.chars())
            .into_iter()
            .map(|(symbol, frequency)| SymbolEntry::new(symbol, frequency))
            .collect();
        Self::new(entries)
    }

    pub fn entries(&self) -> &[SymbolEntry] {
        &self.entries
    }

    pub fn get(&self, symbol: char) -> Option<&SymbolEntry> {
        self.entries.iter().find(|entry| entry.symbol == symbol)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// always false, a table holds at least one entry
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SymbolEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a FrequencyTable {
    type Item = &'a SymbolEntry;
    type IntoIter = std::slice::Iter<'a, SymbolEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Parses one entry per line, e.g. `A - 19`, `B: 16` or `C 5`. Blank lines are skipped and
/// leading whitespace is ignored.
impl FromStr for FrequencyTable {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut entries = Vec::new();
        for (index, line) in s.lines().enumerate() {
            let entry_text = line.trim_start();
            if entry_text.trim_end().is_empty() {
                continue;
            }
            // locations stay relative to the untrimmed line
            let indent = line.chars().count() - entry_text.chars().count();
            let entry = parse_entry(entry_text).map_err(|(character, is)| {
                Error::InvalidTableEntry(IsAt {
                    line: index + 1,
                    character: indent + character,
                    is,
                })
            })?;
            entries.push(entry);
        }
        Self::new(entries)
    }
}

/// count occurrences of each item, ordered by item
pub fn count_occurrences<I, T>(items: I) -> BTreeMap<T, u64>
where
    I: IntoIterator<Item = T>,
    T: Ord,
{
    let mut occurrences = BTreeMap::new();
    for item in items {
        *occurrences.entry(item).or_insert(0) += 1;
    }
    occurrences
}

fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | ':' | '-')
}

/// on failure returns the character offset of the problem along with it
fn parse_entry(line: &str) -> std::result::Result<SymbolEntry, (usize, TableEntryError)> {
    let char_offset = |field: &str| {
        let byte = field.as_ptr() as usize - line.as_ptr() as usize;
        line[..byte].chars().count()
    };
    let mut fields = line.split(is_separator).filter(|field| !field.is_empty());

    let symbol = match fields.next() {
        Some(field) if char_offset(field) == 0 => match field.chars().next() {
            Some(symbol) => symbol,
            None => return Err((0, TableEntryError::Misformatted)),
        },
        _ => return Err((0, TableEntryError::Misformatted)),
    };

    for field in fields {
        // stray characters such as a trailing '\r' are not part of the number
        let digits: String = field.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            continue;
        }
        return digits
            .parse()
            .map(|frequency| SymbolEntry::new(symbol, frequency))
            .map_err(|err| (char_offset(field), TableEntryError::InvalidFrequency(err)));
    }
    Err((line.chars().count(), TableEntryError::MissingFrequency))
}
