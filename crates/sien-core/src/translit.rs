//! High-level transliteration facade bundling both tables, with batch
//! fan-out and a step-by-step diagnostic trace.

use std::path::Path;
use std::sync::mpsc;
use std::thread;

use serde::Serialize;
use tracing::{debug, debug_span};

use crate::encoder::encode;
use crate::phone::{CategoryError, PhoneCategoryTable, PhoneSeq};
use crate::scheme::{GraphemeScheme, SchemeError};
use crate::schwa::{self, RULE_NAMES};

/// Errors constructing a transliterator from external table files.
#[derive(Debug, thiserror::Error)]
pub enum TranslitError {
    #[error("scheme table: {0}")]
    Scheme(#[from] SchemeError),
    #[error("category table: {0}")]
    Category(#[from] CategoryError),
}

/// Word-to-phone transliterator with injected, immutable tables.
#[derive(Debug, Clone)]
pub struct Transliterator {
    scheme: GraphemeScheme,
    categories: PhoneCategoryTable,
}

impl Transliterator {
    /// Built from the embedded default tables.
    pub fn from_embedded() -> Self {
        Self {
            scheme: GraphemeScheme::from_embedded(),
            categories: PhoneCategoryTable::from_embedded(),
        }
    }

    pub fn from_paths(scheme: &Path, categories: &Path) -> Result<Self, TranslitError> {
        Ok(Self {
            scheme: GraphemeScheme::from_path(scheme)?,
            categories: PhoneCategoryTable::from_path(categories)?,
        })
    }

    pub fn from_parts(scheme: GraphemeScheme, categories: PhoneCategoryTable) -> Self {
        Self { scheme, categories }
    }

    pub fn scheme(&self) -> &GraphemeScheme {
        &self.scheme
    }

    pub fn categories(&self) -> &PhoneCategoryTable {
        &self.categories
    }

    /// Encodes a word and realizes its schwas.
    pub fn transliterate(&self, word: &str) -> PhoneSeq {
        let mut seq = encode(&self.scheme, word);
        schwa::realize(&self.categories, &mut seq);
        seq
    }

    /// The separator-free form written into prompt text.
    pub fn spoken(&self, word: &str) -> String {
        self.transliterate(word).spoken()
    }

    /// Transliterates a word list on a fixed pool of worker threads,
    /// returning results in input order.
    pub fn transliterate_batch(&self, words: &[String], workers: usize) -> Vec<PhoneSeq> {
        if words.is_empty() {
            return Vec::new();
        }
        let workers = workers.clamp(1, words.len());
        let _span = debug_span!("batch", words = words.len(), workers).entered();
        let (tx, rx) = mpsc::channel::<(usize, PhoneSeq)>();
        thread::scope(|scope| {
            for offset in 0..workers {
                let tx = tx.clone();
                scope.spawn(move || {
                    for i in (offset..words.len()).step_by(workers) {
                        let seq = self.transliterate(&words[i]);
                        if tx.send((i, seq)).is_err() {
                            return;
                        }
                    }
                });
            }
            drop(tx);
            let mut out = vec![PhoneSeq::new(); words.len()];
            for (i, seq) in rx {
                out[i] = seq;
            }
            out
        })
    }

    /// Runs the full pipeline for one word, recording the sequence after
    /// every rule.
    pub fn explain(&self, word: &str) -> ExplainResult {
        let _span = debug_span!("explain", word).entered();
        let mut seq = encode(&self.scheme, word);
        let encoded = seq.render();
        let mut steps = Vec::with_capacity(RULE_NAMES.len());
        for (idx, name) in RULE_NAMES.into_iter().enumerate() {
            let before = seq.clone();
            schwa::apply_rule(&self.categories, &mut seq, idx);
            let changed = seq != before;
            if changed {
                debug!(rule = name, after = %seq.render(), "rule rewrote sequence");
            }
            steps.push(ExplainStep {
                rule: idx + 1,
                name,
                after: seq.render(),
                changed,
            });
        }
        ExplainResult {
            word: word.to_string(),
            encoded,
            steps,
            realized: seq.render(),
            spoken: seq.spoken(),
        }
    }
}

/// Full diagnostic trace for a single word.
#[derive(Debug, Serialize)]
pub struct ExplainResult {
    pub word: String,
    pub encoded: String,
    pub steps: Vec<ExplainStep>,
    pub realized: String,
    pub spoken: String,
}

/// One rule application within an explain trace.
#[derive(Debug, Serialize)]
pub struct ExplainStep {
    /// 1-based rule number, matching the pipeline order.
    pub rule: usize,
    pub name: &'static str,
    pub after: String,
    pub changed: bool,
}

/// Format an ExplainResult as human-readable text.
pub fn format_text(result: &ExplainResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== \"{}\" ===\n", result.word));
    out.push_str(&format!("  encoded:  {}\n", result.encoded));
    for step in &result.steps {
        let marker = if step.changed { "*" } else { " " };
        out.push_str(&format!(
            "  rule {} {:<24}{} {}\n",
            step.rule, step.name, marker, step.after,
        ));
    }
    out.push_str(&format!("  realized: {}\n", result.realized));
    out.push_str(&format!("  spoken:   {}\n", result.spoken));
    out
}
