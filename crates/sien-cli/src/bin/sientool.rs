use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

use sien_core::corpus::{run_pipeline, unique_words};
use sien_core::translit::format_text;
use sien_core::Transliterator;

#[derive(Parser)]
#[command(name = "sientool", about = "Sinhala transliteration diagnostics")]
struct Cli {
    /// Path to a grapheme scheme table (default: embedded table)
    #[arg(long, requires = "categories")]
    scheme: Option<PathBuf>,
    /// Path to a phone category table (default: embedded table)
    #[arg(long, requires = "scheme")]
    categories: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Transliterate words to phone sequences
    Translit {
        /// Sinhala words
        #[arg(required = true)]
        words: Vec<String>,
        /// Print compact spoken forms instead of phone sequences
        #[arg(long)]
        spoken: bool,
        /// Worker threads for the batch
        #[arg(long, default_value = "1")]
        workers: usize,
    },

    /// Explain the realization pipeline for one word
    Explain {
        /// Sinhala word to explain
        word: String,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List unique corpus words in first-seen order
    Words {
        /// Path to the corpus text file
        corpus: PathBuf,
    },

    /// Run the corpus pipeline and write its artifacts
    Pipeline {
        /// Path to the corpus text file
        corpus: PathBuf,
        /// Directory for the output artifacts
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        /// Worker threads for the batch
        #[arg(long, default_value = "1")]
        workers: usize,
        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run transliteration accuracy tests from a structured TOML corpus
    Accuracy {
        /// Path to the accuracy corpus TOML file
        corpus_file: PathBuf,
        /// Show passing cases too (default: only failures and skips)
        #[arg(long)]
        verbose: bool,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

// --- Accuracy types ---

#[derive(Debug, Deserialize)]
struct AccuracyCorpus {
    cases: Vec<AccuracyCase>,
}

#[derive(Debug, Deserialize)]
struct AccuracyCase {
    word: String,
    expect: String,
    #[serde(default)]
    skip: bool,
    #[serde(default)]
    note: Option<String>,
}

#[derive(Debug, Serialize)]
struct AccuracyResult {
    word: String,
    expect: String,
    actual: String,
    status: AccuracyStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum AccuracyStatus {
    Pass,
    Fail,
    Skip,
}

#[derive(Debug, Serialize)]
struct AccuracySummary {
    total: usize,
    pass: usize,
    fail: usize,
    skip: usize,
    pass_rate: String,
}

#[derive(Debug, Serialize)]
struct AccuracyReport {
    results: Vec<AccuracyResult>,
    summary: AccuracySummary,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
}

fn load_transliterator(scheme: &Option<PathBuf>, categories: &Option<PathBuf>) -> Transliterator {
    match (scheme, categories) {
        (Some(s), Some(c)) => Transliterator::from_paths(s, c).unwrap_or_else(|e| {
            eprintln!("Failed to load tables: {}", e);
            process::exit(1);
        }),
        _ => Transliterator::from_embedded(),
    }
}

fn read_corpus(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Failed to read corpus file {}: {}", path.display(), e);
        process::exit(1);
    })
}

fn main() {
    init_tracing();
    let Cli {
        scheme,
        categories,
        command,
    } = Cli::parse();

    match command {
        Command::Translit {
            words,
            spoken,
            workers,
        } => {
            let translit = load_transliterator(&scheme, &categories);
            let seqs = translit.transliterate_batch(&words, workers);
            for (word, seq) in words.iter().zip(&seqs) {
                if spoken {
                    println!("{}\t{}", word, seq.spoken());
                } else {
                    println!("{}\t{}", word, seq.render());
                }
            }
        }

        Command::Explain { word, json } => {
            let translit = load_transliterator(&scheme, &categories);
            let result = translit.explain(&word);
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&result).expect("JSON serialization failed")
                );
            } else {
                print!("{}", format_text(&result));
            }
        }

        Command::Words { corpus } => {
            let text = read_corpus(&corpus);
            for word in unique_words(&text) {
                println!("{}", word);
            }
        }

        Command::Pipeline {
            corpus,
            out_dir,
            workers,
            json,
        } => {
            let translit = load_transliterator(&scheme, &categories);
            let report = run_pipeline(&translit, &corpus, &out_dir, workers).unwrap_or_else(|e| {
                eprintln!("Pipeline failed for {}: {}", corpus.display(), e);
                process::exit(1);
            });

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report).expect("JSON serialization failed")
                );
            } else {
                println!("Words: {}", report.words);
                println!("Lines: {}", report.lines);
                println!("Artifacts:");
                let a = &report.artifacts;
                for path in [
                    &a.unique_words,
                    &a.encoded_words,
                    &a.translit_words,
                    &a.translit_map,
                    &a.translit_sents,
                ] {
                    println!("  {}", path.display());
                }
            }
        }

        Command::Accuracy {
            corpus_file,
            verbose,
            json,
        } => {
            let translit = load_transliterator(&scheme, &categories);

            let corpus_content = fs::read_to_string(&corpus_file).unwrap_or_else(|e| {
                eprintln!("Failed to read corpus file {}: {}", corpus_file.display(), e);
                process::exit(1);
            });
            let corpus: AccuracyCorpus = toml::from_str(&corpus_content).unwrap_or_else(|e| {
                eprintln!("Failed to parse corpus TOML: {}", e);
                process::exit(1);
            });

            if corpus.cases.is_empty() {
                eprintln!("No cases in corpus");
                process::exit(1);
            }

            let mut results: Vec<AccuracyResult> = Vec::new();
            for case in &corpus.cases {
                if case.skip {
                    results.push(AccuracyResult {
                        word: case.word.clone(),
                        expect: case.expect.clone(),
                        actual: String::new(),
                        status: AccuracyStatus::Skip,
                        note: case.note.clone(),
                    });
                    continue;
                }

                let actual = translit.spoken(&case.word);
                let status = if actual == case.expect {
                    AccuracyStatus::Pass
                } else {
                    AccuracyStatus::Fail
                };
                results.push(AccuracyResult {
                    word: case.word.clone(),
                    expect: case.expect.clone(),
                    actual,
                    status,
                    note: case.note.clone(),
                });
            }

            let total = results.len();
            let pass = results
                .iter()
                .filter(|r| matches!(r.status, AccuracyStatus::Pass))
                .count();
            let fail = results
                .iter()
                .filter(|r| matches!(r.status, AccuracyStatus::Fail))
                .count();
            let skip = results
                .iter()
                .filter(|r| matches!(r.status, AccuracyStatus::Skip))
                .count();
            let tested = total - skip;
            let rate = if tested > 0 {
                pass as f64 / tested as f64 * 100.0
            } else {
                0.0
            };
            let summary = AccuracySummary {
                total,
                pass,
                fail,
                skip,
                pass_rate: format!("{:.1}%", rate),
            };

            if json {
                let report = AccuracyReport { results, summary };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report).expect("JSON serialization failed")
                );
            } else {
                let col = results.iter().map(|r| r.word.width()).max().unwrap_or(0);
                for r in &results {
                    let pad = " ".repeat(col - r.word.width());
                    match r.status {
                        AccuracyStatus::Pass => {
                            if verbose {
                                println!("  \u{2713} {}{}  {}", r.word, pad, r.actual);
                            }
                        }
                        AccuracyStatus::Fail => {
                            println!(
                                "  \u{2717} {}{}  expected {} (got: {})",
                                r.word, pad, r.expect, r.actual
                            );
                        }
                        AccuracyStatus::Skip => {
                            let reason = r.note.as_deref().unwrap_or("known failure");
                            println!("  - {}{}  [skip: {}]", r.word, pad, reason);
                        }
                    }
                }

                println!();
                println!("=== Summary ===");
                println!("  Total:     {}", summary.total);
                println!("  Pass:      {:>3}", summary.pass);
                println!("  Fail:      {:>3}", summary.fail);
                println!("  Skip:      {:>3}", summary.skip);
                println!(
                    "  Pass rate: {} ({}/{})",
                    summary.pass_rate, summary.pass, tested
                );
            }

            if fail > 0 {
                process::exit(1);
            }
        }
    }
}
