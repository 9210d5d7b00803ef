//! The eight rewrite rules, in pipeline order.
//!
//! Index arithmetic mirrors the rule dataset exactly, strict and inclusive
//! bounds included; the bounds are load-bearing and must not be "fixed".

use crate::phone::{PhoneCategoryTable, PhoneSeq, SCHWA};

/// The surfaced form of the neutral vowel.
const REALIZED: &str = "a";

/// Phones that license realization of a schwa two positions later, across
/// an intervening "h".
const OPEN_BEFORE_H: &[&str] = &["a", "e", "ae", "o", "@"];

/// Final consonants that keep a preceding schwa central.
const FINAL_CODAS: &[&str] = &["r", "b", "t", "d"];

/// Two-phone word endings treated as glide finals.
const FINAL_GLIDES: &[&str] = &["yi", "wu"];

/// Rule 1: realize a word-initial consonant's schwa, except after "k" when
/// an "r" follows.
pub(super) fn rule_one(table: &PhoneCategoryTable, seq: &mut PhoneSeq) {
    let p = &mut seq.phones;
    if p.len() <= 2 || !table.is_consonant(&p[0]) {
        return;
    }
    if p[0] == "k" {
        if p[1] == SCHWA && p[2] != "r" {
            p[1] = REALIZED.to_string();
        }
    } else if p[1] == SCHWA {
        p[1] = REALIZED.to_string();
    }
}

/// Rule 2: after a post-consonantal "r", first surface a schwa that sits
/// before a consonant (pass A), then recentralize a surfaced vowel unless an
/// "h" follows it (pass B). Both passes run ascending over the same
/// sequence, so pass B sees pass A's edits.
pub(super) fn rule_two(table: &PhoneCategoryTable, seq: &mut PhoneSeq) {
    let p = &mut seq.phones;
    let n = p.len();
    if n <= 2 {
        return;
    }
    for i in 1..n {
        if p[i] == "r"
            && table.is_consonant(&p[i - 1])
            && i + 3 < n
            && p[i + 1] == SCHWA
            && table.is_consonant(&p[i + 2])
        {
            p[i + 1] = REALIZED.to_string();
        }
    }
    for i in 1..n {
        if p[i] == "r"
            && table.is_consonant(&p[i - 1])
            && i + 3 < n
            && p[i + 1] == REALIZED
            && p[i + 2] != "h"
        {
            p[i + 1] = SCHWA.to_string();
        }
    }
}

/// Rule 3: realize a schwa that follows "h" when an open vowel (or another
/// schwa) precedes the "h".
pub(super) fn rule_three(seq: &mut PhoneSeq) {
    let p = &mut seq.phones;
    let n = p.len();
    for i in 0..n {
        if OPEN_BEFORE_H.contains(&p[i].as_str())
            && i + 3 <= n
            && p[i + 1] == "h"
            && p[i + 2] == SCHWA
        {
            p[i + 2] = REALIZED.to_string();
        }
    }
}

/// Rule 4: realize a schwa directly before a two-consonant cluster.
pub(super) fn rule_four(table: &PhoneCategoryTable, seq: &mut PhoneSeq) {
    let p = &mut seq.phones;
    let n = p.len();
    for i in 0..n {
        if p[i] == SCHWA
            && i + 3 <= n
            && table.is_consonant(&p[i + 1])
            && table.is_consonant(&p[i + 2])
        {
            p[i] = REALIZED.to_string();
        }
    }
}

/// Rule 5: realize the penultimate schwa of a closed final syllable. Words
/// ending in a literal token (leading digit or uppercase letter) and codas
/// r/b/t/d are left alone.
pub(super) fn rule_five(table: &PhoneCategoryTable, seq: &mut PhoneSeq) {
    let p = &mut seq.phones;
    let n = p.len();
    if n <= 3 || p[n - 2] != SCHWA {
        return;
    }
    let literal_tail = p[n - 1]
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || c.is_ascii_uppercase());
    if literal_tail {
        return;
    }
    if !FINAL_CODAS.contains(&p[n - 1].as_str()) && table.is_consonant(&p[n - 1]) {
        p[n - 2] = REALIZED.to_string();
    }
}

/// Rule 6: realize the schwa before a final "y-i" or "w-u" glide pair.
pub(super) fn rule_six(seq: &mut PhoneSeq) {
    let p = &mut seq.phones;
    let n = p.len();
    if n < 4 {
        return;
    }
    let tail = format!("{}{}", p[n - 2], p[n - 1]);
    if FINAL_GLIDES.contains(&tail.as_str()) && p[n - 3] == SCHWA {
        p[n - 3] = REALIZED.to_string();
    }
}

/// Rule 7: realize the schwa in "k-@-r-u" / "k-@-l-u" openings, anywhere at
/// least five phones from the end.
pub(super) fn rule_seven(seq: &mut PhoneSeq) {
    let p = &mut seq.phones;
    let n = p.len();
    for i in 0..n {
        if n - i > 4
            && p[i] == "k"
            && p[i + 1] == SCHWA
            && (p[i + 2] == "r" || p[i + 2] == "l")
            && p[i + 3] == "u"
        {
            p[i + 1] = REALIZED.to_string();
        }
    }
}

/// Rule 8: recentralize the second phone of "kal-" stems whose continuations
/// name times and persons, undoing rule 1 for exactly those words.
pub(super) fn rule_eight(seq: &mut PhoneSeq) {
    let p = &mut seq.phones;
    let n = p.len();
    if n >= 5
        && p[..3].concat() == "kal"
        && ["a:", "e:", "o:"].contains(&p[3].as_str())
        && p[4] == "y"
    {
        p[1] = SCHWA.to_string();
    }
    if n >= 6 {
        if p[..4].concat() == "kale"
            && ["m", "h"].contains(&p[4].as_str())
            && ["u", "i"].contains(&p[5].as_str())
        {
            p[1] = SCHWA.to_string();
        }
        if p[..5].concat() == "kal@h" && ["u", "i"].contains(&p[5].as_str()) {
            p[1] = SCHWA.to_string();
        }
    }
    if n == 4 && p[..4].concat() == "kal@" {
        p[1] = SCHWA.to_string();
    }
}
