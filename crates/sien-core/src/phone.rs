//! Phone sequences and the phone category table consulted by the
//! realization rules.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

/// The inherent neutral vowel appended after bare consonants.
pub const SCHWA: &str = "@";

/// Separator used in rendered phone strings.
const SEPARATOR: char = '-';

/// Embedded default category table, covering the default scheme's phone
/// inventory plus the schwa.
const DEFAULT_CHAR_TYPE: &str = include_str!("data/char_type.txt");

/// An ordered sequence of phone tokens.
///
/// The hyphen-joined text form exists only at the boundary: [`render`] writes
/// it (with a trailing separator after the last token) and [`parse`] reads it
/// back. `parse(render(seq)) == seq` holds for every sequence.
///
/// [`render`]: PhoneSeq::render
/// [`parse`]: PhoneSeq::parse
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneSeq {
    pub(crate) phones: Vec<String>,
}

impl PhoneSeq {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_phones(phones: Vec<String>) -> Self {
        Self { phones }
    }

    /// Splits a rendered string on the separator, dropping empty fragments.
    pub fn parse(text: &str) -> Self {
        let phones = text
            .split(SEPARATOR)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect();
        Self { phones }
    }

    /// Joins the tokens with the separator, with one trailing separator after
    /// the final token. The empty sequence renders as the empty string.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.phones.iter().map(|p| p.len() + 1).sum());
        for phone in &self.phones {
            out.push_str(phone);
            out.push(SEPARATOR);
        }
        out
    }

    /// The rendered form with separators stripped, as written into prompts.
    pub fn spoken(&self) -> String {
        self.phones.concat()
    }

    pub fn len(&self) -> usize {
        self.phones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phones.is_empty()
    }

    pub fn phones(&self) -> &[String] {
        &self.phones
    }

    pub fn push(&mut self, phone: impl Into<String>) {
        self.phones.push(phone.into());
    }

    /// Removes and returns the most recently appended token.
    pub fn pop(&mut self) -> Option<String> {
        self.phones.pop()
    }

    /// Last character of the last token, if any.
    pub(crate) fn last_char(&self) -> Option<char> {
        self.phones.last().and_then(|p| p.chars().last())
    }

    /// Appends a copy of the last token. No-op on an empty sequence.
    pub(crate) fn duplicate_last(&mut self) {
        if let Some(last) = self.phones.last() {
            let copy = last.clone();
            self.phones.push(copy);
        }
    }

    /// Extends the last token in place (literal runs in the encoder).
    pub(crate) fn append_to_last(&mut self, ch: char) {
        if let Some(last) = self.phones.last_mut() {
            last.push(ch);
        }
    }
}

impl fmt::Display for PhoneSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Phonological class of a single phone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneCategory {
    Consonant,
    Vowel,
}

/// Errors loading a phone category table.
#[derive(Debug, thiserror::Error)]
pub enum CategoryError {
    #[error("failed to read category table: {0}")]
    Io(#[from] std::io::Error),
    #[error("category table has no usable records")]
    Empty,
}

/// Immutable map from phone to category.
///
/// Record format is one `phone<TAB>category` per line, where category `c`
/// means consonant and anything else means vowel. Lookups for phones absent
/// from the table are not errors: every rule condition treats them as false.
#[derive(Debug, Clone, Default)]
pub struct PhoneCategoryTable {
    entries: HashMap<String, PhoneCategory>,
}

impl PhoneCategoryTable {
    /// Built from the embedded default table.
    pub fn from_embedded() -> Self {
        Self::from_text(DEFAULT_CHAR_TYPE).expect("embedded category table must be valid")
    }

    pub fn from_path(path: &Path) -> Result<Self, CategoryError> {
        let text = fs::read_to_string(path)?;
        Self::from_text(&text)
    }

    /// Parses table text. Malformed records are skipped with a warning; an
    /// input yielding zero records is an error. Duplicate phones keep the
    /// last record.
    pub fn from_text(text: &str) -> Result<Self, CategoryError> {
        let mut entries = HashMap::new();
        let mut skipped = 0usize;
        for (i, raw) in text.lines().enumerate() {
            let line = raw.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            let (phone, category) = match line.split_once('\t') {
                Some(parts) => parts,
                None => {
                    warn!(line = i + 1, "category record is missing a tab separator");
                    skipped += 1;
                    continue;
                }
            };
            let category = if category == "c" {
                PhoneCategory::Consonant
            } else {
                PhoneCategory::Vowel
            };
            entries.insert(phone.to_string(), category);
        }
        if entries.is_empty() {
            return Err(CategoryError::Empty);
        }
        debug!(entries = entries.len(), skipped, "loaded phone category table");
        Ok(Self { entries })
    }

    pub fn get(&self, phone: &str) -> Option<PhoneCategory> {
        self.entries.get(phone).copied()
    }

    /// True only for phones the table classifies as consonants. Missing
    /// phones are false, never an error.
    pub fn is_consonant(&self, phone: &str) -> bool {
        matches!(self.entries.get(phone), Some(PhoneCategory::Consonant))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(phones: &[&str]) -> PhoneSeq {
        PhoneSeq::from_phones(phones.iter().map(|p| p.to_string()).collect())
    }

    #[test]
    fn render_appends_trailing_separator() {
        assert_eq!(seq(&["k", "@", "m", "a"]).render(), "k-@-m-a-");
        assert_eq!(seq(&["k"]).render(), "k-");
    }

    #[test]
    fn render_empty_is_empty_string() {
        assert_eq!(PhoneSeq::new().render(), "");
    }

    #[test]
    fn parse_drops_empty_fragments() {
        assert_eq!(PhoneSeq::parse("k-@-m-a-"), seq(&["k", "@", "m", "a"]));
        assert_eq!(PhoneSeq::parse("--k--@-"), seq(&["k", "@"]));
        assert_eq!(PhoneSeq::parse(""), PhoneSeq::new());
    }

    #[test]
    fn parse_render_round_trip() {
        let s = seq(&["k", "a:", "t^", "@"]);
        assert_eq!(PhoneSeq::parse(&s.render()), s);
    }

    #[test]
    fn spoken_strips_separators() {
        assert_eq!(seq(&["g", "a", "m", "@"]).spoken(), "gam@");
        assert_eq!(PhoneSeq::new().spoken(), "");
    }

    #[test]
    fn table_classifies_consonants() {
        let table = PhoneCategoryTable::from_text("k\tc\na\tv\n").unwrap();
        assert!(table.is_consonant("k"));
        assert!(!table.is_consonant("a"));
        assert_eq!(table.get("a"), Some(PhoneCategory::Vowel));
    }

    #[test]
    fn missing_phone_is_not_a_consonant() {
        let table = PhoneCategoryTable::from_text("k\tc\n").unwrap();
        assert!(!table.is_consonant("zz"));
        assert_eq!(table.get("zz"), None);
    }

    #[test]
    fn malformed_record_is_skipped() {
        let table = PhoneCategoryTable::from_text("k\tc\nbogus line\na\tv\n").unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn crlf_records_are_trimmed() {
        let table = PhoneCategoryTable::from_text("k\tc\r\na\tv\r\n").unwrap();
        assert!(table.is_consonant("k"));
        assert_eq!(table.get("a"), Some(PhoneCategory::Vowel));
    }

    #[test]
    fn last_duplicate_record_wins() {
        let table = PhoneCategoryTable::from_text("k\tc\nk\tv\n").unwrap();
        assert!(!table.is_consonant("k"));
    }

    #[test]
    fn empty_table_is_an_error() {
        assert!(matches!(
            PhoneCategoryTable::from_text("\n\n"),
            Err(CategoryError::Empty)
        ));
    }

    #[test]
    fn embedded_table_loads() {
        let table = PhoneCategoryTable::from_embedded();
        assert!(table.is_consonant("k"));
        assert!(table.is_consonant("mb"));
        assert_eq!(table.get(SCHWA), Some(PhoneCategory::Vowel));
    }
}
