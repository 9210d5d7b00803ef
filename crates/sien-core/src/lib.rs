//! Phonological core for Sinhala-to-Latin transliteration.
//!
//! Two table-driven stages: a grapheme-to-phoneme encoder ([`encoder::encode`])
//! that turns Sinhala script words into hyphen-separated phone sequences, and
//! a schwa realization engine ([`schwa::realize`]) that decides where the
//! neutral vowel `@` surfaces as `a`. Both tables are injected and immutable
//! after load; defaults ship embedded in the binary.
//!
//! [`Transliterator`] bundles the two stages behind one handle, and
//! [`corpus`] holds the surrounding tooling for whole-corpus runs.

pub mod corpus;
pub mod encoder;
pub mod phone;
pub mod scheme;
pub mod schwa;
pub mod translit;

pub use encoder::encode;
pub use phone::{PhoneCategory, PhoneCategoryTable, PhoneSeq, SCHWA};
pub use scheme::{Category, GraphemeScheme, SchemeEntry};
pub use schwa::realize;
pub use translit::Transliterator;
