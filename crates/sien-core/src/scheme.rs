//! The grapheme scheme: per-character encoding instructions for Sinhala
//! script.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

/// Embedded default scheme covering the Sinhala Unicode block.
const DEFAULT_SCHEME: &str = include_str!("data/scheme_enc.txt");

/// How a grapheme participates in encoding.
///
/// Consonants carry an inherent vowel; modifiers rewrite the pending
/// inherent vowel of the previous consonant; everything else is appended
/// as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Consonant,
    Modifier,
    Vowel,
}

impl Category {
    fn from_field(field: &str) -> Self {
        match field {
            "c" => Category::Consonant,
            "m" => Category::Modifier,
            _ => Category::Vowel,
        }
    }
}

/// One grapheme's encoding instruction.
///
/// The phoneme may be empty: a modifier with an empty phoneme deletes the
/// inherent vowel and appends nothing (the bare hal sign).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeEntry {
    pub phoneme: String,
    pub category: Category,
}

/// Errors loading a grapheme scheme.
#[derive(Debug, thiserror::Error)]
pub enum SchemeError {
    #[error("failed to read scheme table: {0}")]
    Io(#[from] std::io::Error),
    #[error("scheme table has no usable records")]
    Empty,
}

/// Immutable map from grapheme to encoding instruction.
///
/// Record format is one `grapheme<TAB>phoneme*category` per line with a
/// single-character grapheme field. Malformed records are skipped with a
/// warning; duplicates keep the last record.
#[derive(Debug, Clone, Default)]
pub struct GraphemeScheme {
    entries: HashMap<char, SchemeEntry>,
}

impl GraphemeScheme {
    /// Built from the embedded default scheme.
    pub fn from_embedded() -> Self {
        Self::from_text(DEFAULT_SCHEME).expect("embedded scheme must be valid")
    }

    pub fn from_path(path: &Path) -> Result<Self, SchemeError> {
        let text = fs::read_to_string(path)?;
        Self::from_text(&text)
    }

    pub fn from_text(text: &str) -> Result<Self, SchemeError> {
        let mut entries = HashMap::new();
        let mut skipped = 0usize;
        for (i, raw) in text.lines().enumerate() {
            let line = raw.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            match parse_record(line) {
                Some((grapheme, entry)) => {
                    entries.insert(grapheme, entry);
                }
                None => {
                    warn!(line = i + 1, "skipping malformed scheme record");
                    skipped += 1;
                }
            }
        }
        if entries.is_empty() {
            return Err(SchemeError::Empty);
        }
        debug!(entries = entries.len(), skipped, "loaded grapheme scheme");
        Ok(Self { entries })
    }

    pub fn get(&self, grapheme: char) -> Option<&SchemeEntry> {
        self.entries.get(&grapheme)
    }

    pub fn contains(&self, grapheme: char) -> bool {
        self.entries.contains_key(&grapheme)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parses `grapheme<TAB>phoneme*category`. Returns `None` when the grapheme
/// field is not exactly one character or a separator is missing.
fn parse_record(line: &str) -> Option<(char, SchemeEntry)> {
    let (grapheme_field, value) = line.split_once('\t')?;
    let mut chars = grapheme_field.chars();
    let grapheme = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    let (phoneme, category) = value.split_once('*')?;
    let entry = SchemeEntry {
        phoneme: phoneme.to_string(),
        category: Category::from_field(category),
    };
    Some((grapheme, entry))
}
