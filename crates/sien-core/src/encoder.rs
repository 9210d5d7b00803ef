//! Grapheme-to-phoneme encoding of Sinhala script words.
//!
//! One pass over the word's characters. Scheme hits drive the output;
//! characters outside the scheme either break the word (specials), pass
//! through literally (ASCII alphanumerics), or lengthen and vanish against
//! the pending phone (stray combining marks past the word start).

use tracing::{debug, debug_span};

use crate::phone::{PhoneSeq, SCHWA};
use crate::scheme::{Category, GraphemeScheme};

/// Characters that break a word into prompt segments. Each becomes a single
/// space token in the output.
pub const SPECIALS: &[char] = &[
    '.', ',', ';', ':', '_', '+', '=', '!', '?', '~', '*', '&', '^', '%', '$', '#', '@', '|', '<',
    '>', '/', '\\', '(', ')', '{', '}', '[', ']', '\'', '\u{2018}', '\u{2019}', '\u{201A}',
    '\u{201B}', '"', '\u{201C}', '-', '\u{2012}', '\u{2013}', '\u{2014}', '\u{00AD}', '\u{00B4}',
    // Zero-width and stray codepoints seen in field corpora.
    '\u{FEFF}', '\u{0DFE}', '\u{0DFF}', '\u{F020}',
];

/// Pending-phone finals that swallow a following stray mark.
const OMIT_FINALS: &[char] = &['m', 'w'];

/// Phoneme value marking a modifier that leaves the sequence untouched.
const NOOP_MARKER: &str = "x";

/// Encodes one word into a phone sequence.
///
/// Consonants carry the inherent vowel [`SCHWA`]; modifier signs rewrite it.
/// The empty word encodes to the empty sequence.
pub fn encode(scheme: &GraphemeScheme, word: &str) -> PhoneSeq {
    let _span = debug_span!("encode", chars = word.chars().count()).entered();
    let mut seq = PhoneSeq::new();
    let mut in_literal = false;
    for (idx, ch) in word.chars().enumerate() {
        if ch == '?' {
            continue;
        }
        if let Some(entry) = scheme.get(ch) {
            in_literal = false;
            let noop = entry.phoneme == NOOP_MARKER;
            if entry.category == Category::Modifier && !noop {
                seq.pop();
            }
            if !entry.phoneme.is_empty() {
                seq.push(entry.phoneme.as_str());
            }
            if entry.category == Category::Consonant && !noop {
                seq.push(SCHWA);
            }
        } else if SPECIALS.contains(&ch) {
            in_literal = false;
            seq.push(" ");
        } else if ch.is_ascii_alphanumeric() {
            if in_literal {
                seq.append_to_last(ch);
            } else {
                seq.push(ch.to_string());
                in_literal = true;
            }
        } else if idx > 3 {
            // Marks in the first four character positions are dropped outright.
            in_literal = false;
            match seq.last_char() {
                Some(final_ch) if OMIT_FINALS.contains(&final_ch) => {}
                Some(_) => seq.duplicate_last(),
                None => {}
            }
        }
    }
    debug!(phones = seq.len(), "encoded word");
    seq
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheme() -> GraphemeScheme {
        GraphemeScheme::from_text(
            "ක\tk*c\nග\tg*c\nම\tm*c\nර\tr*c\nත\tt*c\nට\tt^*c\nඹ\tmb*c\n\
             අ\ta*v\nං\tng*v\nා\ta:*m\nි\ti*m\n්\t*m\n\u{200C}\tx*m\n",
        )
        .unwrap()
    }

    fn phones(seq: &PhoneSeq) -> Vec<&str> {
        seq.phones().iter().map(|p| p.as_str()).collect()
    }

    #[test]
    fn bare_consonants_take_inherent_vowel() {
        let seq = encode(&scheme(), "කම");
        assert_eq!(phones(&seq), ["k", "@", "m", "@"]);
        assert_eq!(seq.render(), "k-@-m-@-");
    }

    #[test]
    fn vowel_sign_replaces_inherent_vowel() {
        let seq = encode(&scheme(), "කා");
        assert_eq!(phones(&seq), ["k", "a:"]);
    }

    #[test]
    fn stacked_signs_replace_pending_vowel() {
        // A second sign on the same consonant pops the whole token the first
        // one left; only the last sign survives.
        let seq = encode(&scheme(), "කාි");
        assert_eq!(phones(&seq), ["k", "i"]);
    }

    #[test]
    fn hal_sign_strips_inherent_vowel() {
        let seq = encode(&scheme(), "කම්");
        assert_eq!(phones(&seq), ["k", "@", "m"]);
    }

    #[test]
    fn independent_vowel_appends_plain() {
        let seq = encode(&scheme(), "අම");
        assert_eq!(phones(&seq), ["a", "m", "@"]);
    }

    #[test]
    fn anusvara_keeps_preceding_inherent_vowel() {
        let seq = encode(&scheme(), "කං");
        assert_eq!(phones(&seq), ["k", "@", "ng"]);
    }

    #[test]
    fn question_mark_is_dropped() {
        let seq = encode(&scheme(), "ක?ම");
        assert_eq!(phones(&seq), ["k", "@", "m", "@"]);
    }

    #[test]
    fn specials_become_break_tokens() {
        let seq = encode(&scheme(), "කම.");
        assert_eq!(phones(&seq), ["k", "@", "m", "@", " "]);
    }

    #[test]
    fn ascii_literals_merge_into_runs() {
        assert_eq!(phones(&encode(&scheme(), "1974")), ["1974"]);
        assert_eq!(phones(&encode(&scheme(), "ක1974")), ["k", "@", "1974"]);
        assert_eq!(phones(&encode(&scheme(), "19ක74")), ["19", "k", "@", "74"]);
    }

    #[test]
    fn modifier_on_empty_sequence_is_noop() {
        let seq = encode(&scheme(), "ා");
        assert_eq!(phones(&seq), ["a:"]);
    }

    #[test]
    fn noop_modifier_keeps_pending_vowel() {
        let seq = encode(&scheme(), "ක\u{200C}");
        assert_eq!(phones(&seq), ["k", "@", "x"]);
    }

    #[test]
    fn late_marks_duplicate_the_pending_phone() {
        // The stray mark arrives at character index 4, after the hal sign
        // leaves "t^" pending; the whole token is duplicated.
        let seq = encode(&scheme(), "කමට්\u{0D81}");
        assert_eq!(phones(&seq), ["k", "@", "m", "@", "t^", "t^"]);
    }

    #[test]
    fn late_marks_duplicate_literal_runs() {
        let seq = encode(&scheme(), "1974\u{0D81}");
        assert_eq!(phones(&seq), ["1974", "1974"]);
    }

    #[test]
    fn late_marks_vanish_after_omit_finals() {
        let seq = encode(&scheme(), "අකම්\u{0D81}");
        assert_eq!(phones(&seq), ["a", "k", "@", "m"]);
    }

    #[test]
    fn early_marks_are_dropped() {
        let seq = encode(&scheme(), "ක\u{0D81}ම");
        assert_eq!(phones(&seq), ["k", "@", "m", "@"]);
    }

    #[test]
    fn token_count_tracks_scheme_hits() {
        // One token per scheme character plus one inherent vowel per bare
        // consonant.
        assert_eq!(encode(&scheme(), "කගම").len(), 6);
        assert_eq!(encode(&scheme(), "අකම").len(), 5);
        assert_eq!(encode(&scheme(), "අං").len(), 2);
    }

    #[test]
    fn empty_word_encodes_empty() {
        assert!(encode(&scheme(), "").is_empty());
    }
}
