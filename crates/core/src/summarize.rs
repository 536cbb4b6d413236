//! Extractive summarization.
//!
//! The summarizer splits a document into candidate sentences, scores each one
//! with a handful of additive heuristics, keeps the best few and emits them in
//! their original document order.
//!
//! # Scoring
//!
//! | term     | value                                                          |
//! |----------|----------------------------------------------------------------|
//! | length   | `+2` when the sentence has 10 to 30 words                      |
//! | position | `+1` for the first and the last candidate                      |
//! | keyword  | `+2` per word containing a salience marker as a substring      |
//! | noise    | `-1` when more than 5 characters are digits or `@#$%^&*()`     |
//!
//! # Example
//!
//! ```rust
//! use tersa_core::summarize;
//!
//! let short = "Only one sentence here, which is long enough to count.";
//! assert_eq!(summarize(short), short);
//! assert_eq!(summarize("   "), "");
//! ```

use std::collections::HashMap;
use std::ops::RangeInclusive;

use serde::Serialize;

use crate::segment::{Sentence, split_sentences};

/// Words whose presence (as a substring of any token) marks a sentence as
/// informative.
pub const SALIENCE_MARKERS: &[&str] = &[
    "important",
    "significant",
    "key",
    "main",
    "primary",
    "essential",
    "conclusion",
    "result",
    "finding",
    "discovery",
    "research",
    "study",
    "analysis",
    "data",
    "evidence",
    "shows",
    "indicates",
    "suggests",
    "therefore",
    "however",
    "moreover",
    "furthermore",
    "additionally",
];

/// Characters counted by the noise penalty besides ASCII digits.
const NOISE_SYMBOLS: &str = "@#$%^&*()";

/// Configuration for the summarizer.
///
/// The defaults reproduce the reference heuristics exactly; change them only
/// when tuning for a different kind of source text.
#[derive(Debug, Clone)]
pub struct SummarizerConfig {
    /// Pieces of this many characters or fewer are not candidates (default: 20).
    pub min_sentence_chars: usize,
    /// Documents with at most this many candidates are returned unchanged (default: 3).
    pub short_circuit_max: usize,
    /// Upper bound on selected sentences (default: 5).
    pub max_sentences: usize,
    /// Fraction of candidates to keep, rounded up (default: 0.3).
    pub ratio: f64,
    /// Word counts that earn the length bonus (default: 10..=30).
    pub medium_length: RangeInclusive<usize>,
    /// Bonus for medium-length sentences (default: 2).
    pub length_bonus: i32,
    /// Bonus for the first and last candidates (default: 1).
    pub position_bonus: i32,
    /// Bonus per word matching a salience marker (default: 2).
    pub keyword_bonus: i32,
    /// Noise characters tolerated before the penalty applies (default: 5).
    pub noise_threshold: usize,
    /// Penalty for noisy sentences (default: 1).
    pub noise_penalty: i32,
    /// Lowercase salience markers.
    pub salience_markers: Vec<String>,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            min_sentence_chars: 20,
            short_circuit_max: 3,
            max_sentences: 5,
            ratio: 0.3,
            medium_length: 10..=30,
            length_bonus: 2,
            position_bonus: 1,
            keyword_bonus: 2,
            noise_threshold: 5,
            noise_penalty: 1,
            salience_markers: SALIENCE_MARKERS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

impl SummarizerConfig {
    /// Creates a new builder for SummarizerConfig.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tersa_core::SummarizerConfig;
    ///
    /// let config = SummarizerConfig::builder().max_sentences(3).ratio(0.5).build();
    /// assert_eq!(config.max_sentences, 3);
    /// ```
    pub fn builder() -> SummarizerConfigBuilder {
        SummarizerConfigBuilder::new()
    }

    /// Number of sentences kept out of `candidates`.
    pub fn selection_size(&self, candidates: usize) -> usize {
        let proportional = (self.ratio * candidates as f64).ceil().max(0.0) as usize;
        self.max_sentences.min(proportional)
    }
}

/// Builder for SummarizerConfig.
pub struct SummarizerConfigBuilder {
    config: SummarizerConfig,
}

impl SummarizerConfigBuilder {
    pub fn new() -> Self {
        Self { config: SummarizerConfig::default() }
    }

    /// Sets the minimum candidate length in characters (exclusive).
    pub fn min_sentence_chars(mut self, value: usize) -> Self {
        self.config.min_sentence_chars = value;
        self
    }

    /// Sets the short-document threshold.
    pub fn short_circuit_max(mut self, value: usize) -> Self {
        self.config.short_circuit_max = value;
        self
    }

    /// Sets the maximum number of selected sentences.
    pub fn max_sentences(mut self, value: usize) -> Self {
        self.config.max_sentences = value;
        self
    }

    /// Sets the proportion of candidates to keep.
    pub fn ratio(mut self, value: f64) -> Self {
        self.config.ratio = value;
        self
    }

    /// Replaces the salience markers. Markers are lowercased.
    pub fn salience_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.config.salience_markers = markers.into_iter().map(|m| m.as_ref().to_lowercase()).collect();
        self
    }

    /// Adds one salience marker.
    pub fn marker(mut self, marker: &str) -> Self {
        self.config.salience_markers.push(marker.to_lowercase());
        self
    }

    pub fn build(self) -> SummarizerConfig {
        self.config
    }
}

impl Default for SummarizerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A candidate sentence with its score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredSentence {
    pub sentence: Sentence,
    pub score: i32,
}

/// Outcome of sentence selection for one document.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Chosen sentences in document order.
    pub sentences: Vec<ScoredSentence>,
    /// Number of candidate sentences found in the document.
    pub candidate_count: usize,
    /// True when the document was too short to summarize.
    pub short_circuited: bool,
}

impl Selection {
    /// Joins the chosen sentences with `". "` and a final period. A
    /// short-circuited selection renders `text` unchanged.
    pub fn render(&self, text: &str) -> String {
        if self.short_circuited {
            return text.to_string();
        }

        let summary = self.sentences.iter().map(|s| s.sentence.text.as_str()).collect::<Vec<_>>().join(". ");

        if summary.ends_with('.') { summary } else { summary + "." }
    }
}

/// Extractive summarizer.
///
/// # Example
///
/// ```rust
/// use tersa_core::{Summarizer, SummarizerConfig};
///
/// let summarizer = Summarizer::with_config(SummarizerConfig::builder().max_sentences(2).build());
/// let summary = summarizer.summarize("Too short.");
/// assert_eq!(summary, "Too short.");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Summarizer {
    config: SummarizerConfig,
}

impl Summarizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SummarizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    /// Scores every candidate sentence, in document order.
    pub fn score(&self, text: &str) -> Vec<ScoredSentence> {
        let sentences = split_sentences(text, self.config.min_sentence_chars);
        let total = sentences.len();

        sentences
            .into_iter()
            .map(|sentence| {
                let score = score_sentence(&sentence, total, &self.config);
                ScoredSentence { sentence, score }
            })
            .collect()
    }

    /// Picks the summary sentences.
    ///
    /// Candidates are ranked by score with a stable sort, so the earlier of two
    /// equally scored sentences wins. The winners are then put back into
    /// document order.
    pub fn select(&self, text: &str) -> Selection {
        let mut scored = self.score(text);
        let candidate_count = scored.len();

        if candidate_count <= self.config.short_circuit_max {
            return Selection { sentences: Vec::new(), candidate_count, short_circuited: true };
        }

        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(self.config.selection_size(candidate_count));
        scored.sort_by_key(|s| s.sentence.index);

        tracing::debug!(candidates = candidate_count, selected = scored.len(), "selected summary sentences");

        Selection { sentences: scored, candidate_count, short_circuited: false }
    }

    /// Summarizes `text`.
    ///
    /// Empty input yields an empty string and short documents are returned
    /// verbatim. Never fails.
    pub fn summarize(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return String::new();
        }

        self.select(text).render(text)
    }
}

/// Scores one sentence. `total` is the number of candidates in the document.
pub fn score_sentence(sentence: &Sentence, total: usize, config: &SummarizerConfig) -> i32 {
    let lowered = sentence.text.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    let mut score = 0;

    if config.medium_length.contains(&words.len()) {
        score += config.length_bonus;
    }

    if sentence.index == 0 || sentence.index + 1 == total {
        score += config.position_bonus;
    }

    let salient = words.iter().filter(|word| contains_marker(word, &config.salience_markers)).count();
    score += salient as i32 * config.keyword_bonus;

    if noise_count(&sentence.text) > config.noise_threshold {
        score -= config.noise_penalty;
    }

    score
}

/// Substring match: "researchers" contains "research", "keyboard" contains "key".
fn contains_marker(word: &str, markers: &[String]) -> bool {
    markers.iter().any(|marker| word.contains(marker.as_str()))
}

/// Counts digits and `@#$%^&*()` characters.
fn noise_count(text: &str) -> usize {
    text.chars().filter(|c| c.is_ascii_digit() || NOISE_SYMBOLS.contains(*c)).count()
}

/// Summarizes with the default configuration.
pub fn summarize(text: &str) -> String {
    Summarizer::new().summarize(text)
}

/// Returns the `limit` most frequent words longer than four letters.
///
/// Words are lowercased and reduced to their `a-z` letters. Ties keep the order
/// in which the words first appear.
///
/// ```rust
/// use tersa_core::key_topics;
///
/// let topics = key_topics("Rust rocks. Rust compilers check borrows; compilers help.", 2);
/// assert_eq!(topics, vec!["compilers".to_string(), "rocks".to_string()]);
/// ```
pub fn key_topics(text: &str, limit: usize) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for word in lowered.split_whitespace().filter(|w| w.chars().count() > 4) {
        let clean: String = word.chars().filter(|c| c.is_ascii_lowercase()).collect();
        if clean.len() <= 4 {
            continue;
        }
        match positions.get(&clean) {
            Some(&pos) => counts[pos].1 += 1,
            None => {
                positions.insert(clean.clone(), counts.len());
                counts.push((clean, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().take(limit).map(|(word, _)| word).collect()
}
