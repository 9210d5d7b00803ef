//! Schwa realization: eight ordered rewrite rules deciding where the
//! neutral vowel `@` surfaces as `a`.
//!
//! Each rule edits the sequence in place (single owner, ascending index) and
//! consumes the previous rule's output. Category lookups that miss the table
//! make the enclosing condition false; the rules never fail, and a sequence
//! too short for a rule passes through untouched.

mod rules;


use tracing::{debug, debug_span};

use crate::phone::{PhoneCategoryTable, PhoneSeq};

/// Number of rules in the pipeline.
pub const RULE_COUNT: usize = 8;

/// Diagnostic names, indexed by 0-based rule number.
pub const RULE_NAMES: [&str; RULE_COUNT] = [
    "word-initial",
    "post-consonantal-r",
    "pre-h",
    "pre-cluster",
    "final-closed-syllable",
    "final-glide",
    "k-ru-lu",
    "kal-stem",
];

/// Applies all eight rules in order.
pub fn realize(table: &PhoneCategoryTable, seq: &mut PhoneSeq) {
    let _span = debug_span!("realize", phones = seq.len()).entered();
    for rule in 0..RULE_COUNT {
        apply_rule(table, seq, rule);
    }
    debug!(result = %seq.render(), "realized");
}

/// Applies a single rule by 0-based index. Drives the step-by-step explain
/// trace; `realize` runs all of them.
pub(crate) fn apply_rule(table: &PhoneCategoryTable, seq: &mut PhoneSeq, rule: usize) {
    match rule {
        0 => rules::rule_one(table, seq),
        1 => rules::rule_two(table, seq),
        2 => rules::rule_three(seq),
        3 => rules::rule_four(table, seq),
        4 => rules::rule_five(table, seq),
        5 => rules::rule_six(seq),
        6 => rules::rule_seven(seq),
        7 => rules::rule_eight(seq),
        _ => debug_assert!(false, "rule index out of range"),
    }
}
