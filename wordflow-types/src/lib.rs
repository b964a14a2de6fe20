//! Core types for the wordflow document statistics engine.
//!
//! This crate holds the value types that cross crate boundaries:
//!
//! - **Records**: [`StatisticsRecord`], the lexical/sentiment summary of one document
//! - **Graphs**: [`FlowGraph`] and [`FlowEdge`], the document → word structure
//!   handed to Sankey-style renderers
//! - **Policies**: [`CleaningPolicy`], [`WordSelection`] and [`CorpusConfig`]
//! - **Errors**: [`LoadError`], [`GraphError`] and [`RegistryError`]
//!
//! Nothing here performs I/O. Every type is `serde`-serializable so that a
//! renderer living in another process can consume it as JSON.

#![warn(missing_docs)]

use core::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of words taken from each document by [`WordSelection::TopK`].
pub const DEFAULT_TOP_K: usize = 5;

/// Per-document word statistics.
///
/// Built once per loaded document and never mutated afterwards; reloading a
/// label replaces the whole record.
///
/// Invariants (checked by [`StatisticsRecord::check_invariants`]):
/// - `unique_words == word_count.len()`
/// - `total_words == word_count.values().sum()`
/// - `sentiment_score` lies in `[-1.0, 1.0]`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatisticsRecord {
    /// Occurrences of every distinct token.
    pub word_count: FxHashMap<String, u32>,
    /// Number of tokens in the document.
    pub total_words: u32,
    /// Number of distinct tokens.
    pub unique_words: u32,
    /// Mean token length in characters (0.0 for an empty document).
    pub avg_word_length: f64,
    /// Tokens found in the positive lexicon.
    pub positive_count: u32,
    /// Tokens found in the negative lexicon.
    pub negative_count: u32,
    /// `(positive - negative) / total`, or 0.0 for an empty document.
    pub sentiment_score: f64,
}

impl StatisticsRecord {
    /// The record of a document without tokens. All metrics are zero.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Derives every metric from raw tallies.
    ///
    /// `total_chars` is the summed character length of all tokens.
    pub fn from_counts(
        word_count: FxHashMap<String, u32>,
        total_chars: u64,
        positive_count: u32,
        negative_count: u32,
    ) -> Self {
        let total_words: u32 = word_count.values().sum();
        let unique_words = word_count.len() as u32;

        if total_words == 0 {
            return Self::empty();
        }

        let total = f64::from(total_words);
        let score = (f64::from(positive_count) - f64::from(negative_count)) / total;

        Self {
            word_count,
            total_words,
            unique_words,
            avg_word_length: total_chars as f64 / total,
            positive_count,
            negative_count,
            sentiment_score: score.clamp(-1.0, 1.0),
        }
    }

    /// Occurrences of `word`, zero when absent.
    #[inline]
    pub fn count(&self, word: &str) -> u32 {
        self.word_count.get(word).copied().unwrap_or(0)
    }

    /// Returns `true` if the document produced no tokens.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total_words == 0
    }

    /// Positive tokens as a percentage of all tokens.
    pub fn positive_ratio(&self) -> f64 {
        percentage(self.positive_count, self.total_words)
    }

    /// Negative tokens as a percentage of all tokens.
    pub fn negative_ratio(&self) -> f64 {
        percentage(self.negative_count, self.total_words)
    }

    /// Verifies the structural invariants of the record.
    pub fn check_invariants(&self) -> bool {
        let sum: u64 = self.word_count.values().map(|&c| u64::from(c)).sum();
        self.unique_words as usize == self.word_count.len()
            && sum == u64::from(self.total_words)
            && (-1.0..=1.0).contains(&self.sentiment_score)
            && self.positive_count <= self.total_words
            && self.negative_count <= self.total_words
    }
}

#[inline]
fn percentage(part: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        f64::from(part) / f64::from(total) * 100.0
    }
}

/// Text cleaning policy applied before counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CleaningPolicy {
    /// Lowercase, split on whitespace, drop stop words.
    Basic,
    /// Strip markup, entities, URLs, digits and punctuation; drop stop
    /// words, short tokens and formatting artifacts.
    #[default]
    Aggressive,
}

impl fmt::Display for CleaningPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CleaningPolicy::Basic => f.write_str("basic"),
            CleaningPolicy::Aggressive => f.write_str("aggressive"),
        }
    }
}

/// Which words become word nodes of a flow graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordSelection {
    /// Caller-supplied words, used in the given order after stop-word and
    /// duplicate removal.
    Explicit(Vec<String>),
    /// Union of each document's `k` most frequent words, sorted
    /// lexicographically.
    TopK(usize),
}

impl Default for WordSelection {
    fn default() -> Self {
        WordSelection::TopK(DEFAULT_TOP_K)
    }
}

impl WordSelection {
    /// Builds an explicit selection from anything yielding strings.
    pub fn explicit<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        WordSelection::Explicit(words.into_iter().map(Into::into).collect())
    }
}

/// Run-level configuration of a corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Cleaning policy applied to every loaded document.
    pub policy: CleaningPolicy,
    /// `k` used when a flow graph is requested without an explicit selection.
    pub top_k: usize,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            policy: CleaningPolicy::Aggressive,
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl CorpusConfig {
    /// Whitespace splitting only; useful for pre-cleaned text.
    pub const fn basic() -> Self {
        Self {
            policy: CleaningPolicy::Basic,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Full markup and punctuation stripping.
    pub const fn aggressive() -> Self {
        Self {
            policy: CleaningPolicy::Aggressive,
            top_k: DEFAULT_TOP_K,
        }
    }
}

/// One weighted document → word link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    /// Index of the document node.
    pub source: u32,
    /// Index of the word node.
    pub target: u32,
    /// Occurrences of the word in the document (always > 0).
    pub weight: u32,
}

impl FlowEdge {
    /// Creates a new edge.
    #[inline(always)]
    pub const fn new(source: u32, target: u32, weight: u32) -> Self {
        Self {
            source,
            target,
            weight,
        }
    }
}

impl fmt::Display for FlowEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({})", self.source, self.target, self.weight)
    }
}

/// Weighted bipartite document → word graph.
///
/// `nodes[..document_count]` are document labels, the rest are words. The
/// graph is a detached snapshot: it owns its labels and is rebuilt on every
/// request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlowGraph {
    /// Document labels followed by word labels.
    pub nodes: Vec<String>,
    /// Number of leading document nodes.
    pub document_count: usize,
    /// Edges ordered by document, then by word node.
    pub edges: Vec<FlowEdge>,
}

impl FlowGraph {
    /// Document node labels.
    #[inline]
    pub fn documents(&self) -> &[String] {
        &self.nodes[..self.document_count]
    }

    /// Word node labels.
    #[inline]
    pub fn words(&self) -> &[String] {
        &self.nodes[self.document_count..]
    }

    /// Label of the node at `index`.
    #[inline]
    pub fn label(&self, index: u32) -> Option<&str> {
        self.nodes.get(index as usize).map(String::as_str)
    }

    /// Edges leaving the document node at `doc_index`.
    pub fn edges_from(&self, doc_index: u32) -> impl Iterator<Item = &FlowEdge> + '_ {
        self.edges.iter().filter(move |e| e.source == doc_index)
    }

    /// Sum of all edge weights.
    pub fn total_weight(&self) -> u64 {
        self.edges.iter().map(|e| u64::from(e.weight)).sum()
    }
}

impl fmt::Display for FlowGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} documents, {} words, {} edges (weight {})",
            self.document_count,
            self.nodes.len() - self.document_count,
            self.edges.len(),
            self.total_weight()
        )
    }
}

/// Failure to turn a source into raw text.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source could not be read.
    #[error("failed to read {source_id}: {error}")]
    Io {
        /// Identifier of the source (usually a path).
        source_id: String,
        /// Underlying I/O error.
        #[source]
        error: std::io::Error,
    },
    /// The source is not valid UTF-8.
    #[error("{source_id} is not valid UTF-8")]
    InvalidUtf8 {
        /// Identifier of the source.
        source_id: String,
    },
    /// The source is not well-formed JSON.
    #[error("{source_id} is not valid JSON: {reason}")]
    Json {
        /// Identifier of the source.
        source_id: String,
        /// Parser diagnostic.
        reason: String,
    },
    /// A JSON source lacks the string field that holds the text.
    #[error("{source_id} has no string field \"{field}\"")]
    MissingField {
        /// Identifier of the source.
        source_id: String,
        /// Name of the expected field.
        field: String,
    },
}

impl LoadError {
    /// Identifier of the source that failed.
    pub fn source_id(&self) -> &str {
        match self {
            LoadError::Io { source_id, .. }
            | LoadError::InvalidUtf8 { source_id }
            | LoadError::Json { source_id, .. }
            | LoadError::MissingField { source_id, .. } => source_id,
        }
    }
}

/// Unmet precondition of a flow-graph build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    /// No document is registered.
    #[error("no data: register at least one document before building a flow graph")]
    NoData,
    /// The word selection resolved to nothing.
    #[error("no selection: every candidate word was filtered out; use a larger k or another word list")]
    NoSelection,
    /// No document contains any selected word.
    #[error("no edges: no document contains any of the selected words")]
    NoEdges,
}

/// Registry lookup failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The label was never registered.
    #[error("unknown document label: {0}")]
    UnknownLabel(String),
}
