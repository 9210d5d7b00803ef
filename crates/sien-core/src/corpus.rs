//! Corpus tooling: unique-word extraction, the word-to-transliteration map,
//! and sentence reconstruction for prompt text.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, debug_span, warn};

use crate::encoder::encode;
use crate::phone::PhoneSeq;
use crate::translit::Transliterator;

/// Placeholder written for words missing from the map.
pub const MISSING_WORD: &str = "null";

/// Word delimiters in raw corpus text, besides whitespace.
const DELIMITERS: &[char] = &['-', '!', '~'];

/// Errors from corpus runs.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("corpus io: {0}")]
    Io(#[from] std::io::Error),
}

/// Splits corpus text into words, deduplicated in first-seen order. Empty
/// fragments from adjacent delimiters are dropped.
pub fn unique_words(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut words = Vec::new();
    for word in text.split(word_boundary) {
        if word.is_empty() || !seen.insert(word) {
            continue;
        }
        words.push(word.to_string());
    }
    words
}

fn word_boundary(c: char) -> bool {
    c.is_whitespace() || DELIMITERS.contains(&c)
}

/// Word-to-spoken-form map in first-inserted order.
#[derive(Debug, Clone, Default)]
pub struct TranslitMap {
    words: Vec<String>,
    spoken: HashMap<String, String>,
}

impl TranslitMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the map by transliterating each word on `workers` threads.
    pub fn build(translit: &Transliterator, words: &[String], workers: usize) -> Self {
        let seqs = translit.transliterate_batch(words, workers);
        let mut map = Self::default();
        for (word, seq) in words.iter().zip(&seqs) {
            map.insert(word.clone(), seq.spoken());
        }
        map
    }

    /// Inserts a pair. Re-inserting a word overwrites its spoken form and
    /// keeps its original position.
    pub fn insert(&mut self, word: String, spoken: String) {
        if !self.spoken.contains_key(&word) {
            self.words.push(word.clone());
        }
        self.spoken.insert(word, spoken);
    }

    pub fn get(&self, word: &str) -> Option<&str> {
        self.spoken.get(word).map(String::as_str)
    }

    /// Words in first-inserted order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// One `word<TAB>spoken` record per line, in map order.
    pub fn to_tsv(&self) -> String {
        let mut out = String::new();
        for word in &self.words {
            out.push_str(word);
            out.push('\t');
            if let Some(spoken) = self.get(word) {
                out.push_str(spoken);
            }
            out.push('\n');
        }
        out
    }

    /// Parses TSV text. Malformed records are skipped with a warning.
    pub fn from_tsv(text: &str) -> Self {
        let mut map = Self::default();
        let mut skipped = 0usize;
        for (i, raw) in text.lines().enumerate() {
            let line = raw.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            match line.split_once('\t') {
                Some((word, spoken)) => map.insert(word.to_string(), spoken.to_string()),
                None => {
                    warn!(line = i + 1, "translit map record is missing a tab");
                    skipped += 1;
                }
            }
        }
        debug!(entries = map.len(), skipped, "loaded translit map");
        map
    }

    pub fn save(&self, path: &Path) -> Result<(), CorpusError> {
        fs::write(path, self.to_tsv())?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, CorpusError> {
        Ok(Self::from_tsv(&fs::read_to_string(path)?))
    }
}

/// Rebuilds corpus lines with each word replaced by its spoken form. Words
/// absent from the map become the literal [`MISSING_WORD`] placeholder.
pub fn render_sentences(map: &TranslitMap, text: &str) -> String {
    let mut out = String::new();
    for line in text.lines() {
        let mut first = true;
        for word in line.split(' ').filter(|w| !w.is_empty()) {
            if !first {
                out.push(' ');
            }
            out.push_str(map.get(word).unwrap_or(MISSING_WORD));
            first = false;
        }
        out.push('\n');
    }
    out
}

/// Derived artifact paths for one corpus input.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineArtifacts {
    pub unique_words: PathBuf,
    pub encoded_words: PathBuf,
    pub translit_words: PathBuf,
    pub translit_map: PathBuf,
    pub translit_sents: PathBuf,
}

impl PipelineArtifacts {
    /// Artifact names derive from the corpus file stem inside `out_dir`.
    pub fn for_corpus(corpus: &Path, out_dir: &Path) -> Self {
        let stem = corpus
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("corpus");
        let name = |suffix: &str| out_dir.join(format!("{}_{}.txt", stem, suffix));
        Self {
            unique_words: name("UniqueWords"),
            encoded_words: name("EncodedWords"),
            translit_words: name("TranslitWords"),
            translit_map: name("TranslitMap"),
            translit_sents: name("TranslitSents"),
        }
    }
}

/// Counts and artifact paths from a pipeline run.
#[derive(Debug, Serialize)]
pub struct PipelineReport {
    pub lines: usize,
    pub words: usize,
    pub artifacts: PipelineArtifacts,
}

/// Runs the whole corpus pipeline: unique words, encoded and realized
/// sequences, the map, and reconstructed sentences, each written as a text
/// artifact with one entry per line.
pub fn run_pipeline(
    translit: &Transliterator,
    corpus: &Path,
    out_dir: &Path,
    workers: usize,
) -> Result<PipelineReport, CorpusError> {
    let _span = debug_span!("pipeline", corpus = %corpus.display()).entered();
    let text = fs::read_to_string(corpus)?;
    let words = unique_words(&text);

    let encoded: Vec<PhoneSeq> = words
        .iter()
        .map(|word| encode(translit.scheme(), word))
        .collect();
    let realized = translit.transliterate_batch(&words, workers);
    let mut map = TranslitMap::new();
    for (word, seq) in words.iter().zip(&realized) {
        map.insert(word.clone(), seq.spoken());
    }

    let artifacts = PipelineArtifacts::for_corpus(corpus, out_dir);
    fs::create_dir_all(out_dir)?;
    fs::write(&artifacts.unique_words, join_lines(words.iter()))?;
    fs::write(
        &artifacts.encoded_words,
        join_lines(encoded.iter().map(PhoneSeq::render)),
    )?;
    fs::write(
        &artifacts.translit_words,
        join_lines(realized.iter().map(PhoneSeq::render)),
    )?;
    map.save(&artifacts.translit_map)?;
    fs::write(&artifacts.translit_sents, render_sentences(&map, &text))?;

    let report = PipelineReport {
        lines: text.lines().count(),
        words: words.len(),
        artifacts,
    };
    debug!(words = report.words, lines = report.lines, "pipeline complete");
    Ok(report)
}

fn join_lines<I, S>(items: I) -> String
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for item in items {
        out.push_str(item.as_ref());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_words_keep_first_seen_order() {
        let words = unique_words("බත කර බත-කර!ගම~කර\nබත");
        assert_eq!(words, ["බත", "කර", "ගම"]);
    }

    #[test]
    fn unique_words_drop_empty_fragments() {
        assert_eq!(unique_words("-කර--ගම-"), ["කර", "ගම"]);
        assert!(unique_words("  \n~!").is_empty());
    }

    #[test]
    fn map_keeps_insertion_order_on_overwrite() {
        let mut map = TranslitMap::new();
        map.insert("a".into(), "one".into());
        map.insert("b".into(), "two".into());
        map.insert("a".into(), "three".into());
        assert_eq!(map.words(), ["a", "b"]);
        assert_eq!(map.get("a"), Some("three"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn map_tsv_round_trip() {
        let mut map = TranslitMap::new();
        map.insert("ගම".into(), "gam@".into());
        map.insert("කර".into(), "k@r@".into());
        let parsed = TranslitMap::from_tsv(&map.to_tsv());
        assert_eq!(parsed.words(), map.words());
        assert_eq!(parsed.get("කර"), Some("k@r@"));
    }

    #[test]
    fn from_tsv_skips_malformed_lines() {
        let map = TranslitMap::from_tsv("ගම\tgam@\nbroken record\nකර\tk@r@\n");
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn build_transliterates_each_word() {
        let translit = Transliterator::from_embedded();
        let words: Vec<String> = vec!["ගම".into(), "කර".into()];
        let map = TranslitMap::build(&translit, &words, 2);
        assert_eq!(map.get("ගම"), Some("gam@"));
        assert_eq!(map.get("කර"), Some("k@r@"));
    }

    #[test]
    fn sentences_fall_back_to_placeholder() {
        let mut map = TranslitMap::new();
        map.insert("ගම".into(), "gam@".into());
        let out = render_sentences(&map, "ගම කර\nගම  ගම\n");
        assert_eq!(out, "gam@ null\ngam@ gam@\n");
    }

    #[test]
    fn artifact_names_derive_from_corpus_stem() {
        let artifacts =
            PipelineArtifacts::for_corpus(Path::new("data/F002.txt"), Path::new("out"));
        assert_eq!(
            artifacts.unique_words,
            Path::new("out").join("F002_UniqueWords.txt")
        );
        assert_eq!(
            artifacts.translit_sents,
            Path::new("out").join("F002_TranslitSents.txt")
        );
    }

    #[test]
    fn pipeline_writes_all_artifacts() {
        let translit = Transliterator::from_embedded();
        let dir = tempfile::tempdir().unwrap();
        let corpus = dir.path().join("sample.txt");
        fs::write(&corpus, "ගම කර\nගම\n").unwrap();

        let out_dir = dir.path().join("out");
        let report = run_pipeline(&translit, &corpus, &out_dir, 2).unwrap();
        assert_eq!(report.words, 2);
        assert_eq!(report.lines, 2);

        let words = fs::read_to_string(&report.artifacts.unique_words).unwrap();
        assert_eq!(words, "ගම\nකර\n");
        let realized = fs::read_to_string(&report.artifacts.translit_words).unwrap();
        assert_eq!(realized, "g-a-m-@-\nk-@-r-@-\n");
        let sents = fs::read_to_string(&report.artifacts.translit_sents).unwrap();
        assert_eq!(sents, "gam@ k@r@\ngam@\n");
        let map = TranslitMap::load(&report.artifacts.translit_map).unwrap();
        assert_eq!(map.get("ගම"), Some("gam@"));
    }
}
