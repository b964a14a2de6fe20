//! Corpus facade.
//!
//! [`Corpus`] owns the state of one analysis run and exposes the whole
//! pipeline: load documents through a parser, clean and count them, keep the
//! records in registration order and build flow graphs on request.

use core::fmt;
use std::path::Path;

use rustc_hash::FxHashSet;
use tracing::{debug, warn};
use wordflow_types::{
    CorpusConfig, FlowGraph, GraphError, LoadError, RegistryError, StatisticsRecord, WordSelection,
};

use crate::analyzer::{Analyzer, SentimentLexicon, StopWordSet};
use crate::extractor::StatisticsExtractor;
use crate::flow::FlowGraphBuilder;
use crate::parser::{PlainTextParser, SourceParser};
use crate::registry::DocumentRegistry;

/// One analysis run: stop words, policy, lexicon and the registered records.
///
/// Changing the stop words or the lexicon affects later loads only; records
/// already registered are never recomputed.
#[derive(Debug)]
pub struct Corpus {
    config: CorpusConfig,
    stop_words: StopWordSet,
    lexicon: SentimentLexicon,
    analyzer: Analyzer,
    registry: DocumentRegistry,
    metrics: CorpusMetrics,
}

impl Default for Corpus {
    fn default() -> Self {
        Self::new()
    }
}

impl Corpus {
    /// Creates an empty corpus with the default configuration.
    pub fn new() -> Self {
        Self::with_config(CorpusConfig::default())
    }

    /// Creates an empty corpus with a custom configuration.
    pub fn with_config(config: CorpusConfig) -> Self {
        Self {
            config,
            stop_words: StopWordSet::new(),
            lexicon: SentimentLexicon::default(),
            analyzer: Analyzer::new(config.policy),
            registry: DocumentRegistry::new(),
            metrics: CorpusMetrics::default(),
        }
    }

    /// Replaces the stop-word set, builder style.
    pub fn with_stop_words(mut self, stop_words: StopWordSet) -> Self {
        self.stop_words = stop_words;
        self
    }

    /// Replaces the sentiment lexicon, builder style.
    pub fn with_lexicon(mut self, lexicon: SentimentLexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    /// Replaces the stop-word set.
    pub fn set_stop_words(&mut self, stop_words: StopWordSet) {
        self.stop_words = stop_words;
    }

    /// Loads a newline-delimited stop-word file and makes it current.
    ///
    /// # Errors
    ///
    /// See [`StopWordSet::load`]. The previous set stays in place on failure.
    pub fn load_stop_words(&mut self, path: impl AsRef<Path>) -> Result<usize, LoadError> {
        self.stop_words = StopWordSet::load(path)?;
        Ok(self.stop_words.len())
    }

    /// The configuration in effect.
    #[inline]
    pub fn config(&self) -> &CorpusConfig {
        &self.config
    }

    /// The current stop-word set.
    #[inline]
    pub fn stop_words(&self) -> &StopWordSet {
        &self.stop_words
    }

    /// Reads `source` with `parser` (plain text by default) and registers the
    /// resulting record under `label` (the path by default).
    ///
    /// # Errors
    ///
    /// Returns the parser's [`LoadError`]. Nothing is registered on failure.
    pub fn load_text(
        &mut self,
        source: impl AsRef<Path>,
        label: Option<&str>,
        parser: Option<&dyn SourceParser>,
    ) -> Result<&StatisticsRecord, LoadError> {
        let source = source.as_ref();
        let raw = match parser.unwrap_or(&PlainTextParser).parse(source) {
            Ok(raw) => raw,
            Err(e) => {
                self.metrics.load_failures += 1;
                return Err(e);
            }
        };

        let label = match label {
            Some(label) => label.to_owned(),
            None => source.display().to_string(),
        };
        Ok(self.load_str(label, &raw))
    }

    /// Cleans, counts and registers in-memory text.
    pub fn load_str(&mut self, label: impl Into<String>, raw_text: &str) -> &StatisticsRecord {
        let extractor = StatisticsExtractor::new(&self.lexicon);
        let mut acc = extractor.accumulator();
        self.analyzer
            .for_each_token(raw_text, &self.stop_words, |token| acc.push(token));
        let record = acc.finish();

        let label = label.into();
        debug!(
            label = %label,
            total_words = record.total_words,
            unique_words = record.unique_words,
            "registered document"
        );

        self.metrics.documents_loaded += 1;
        let (record, replaced) = self.registry.register_full(label, record);
        if replaced {
            self.metrics.documents_overwritten += 1;
        }
        record
    }

    /// Loads several sources in order.
    ///
    /// A failing source is logged and collected; it never undoes the sources
    /// loaded before it, nor stops the ones after it.
    pub fn load_batch(&mut self, sources: &[DocumentSource<'_>]) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        for source in sources {
            match self.load_text(source.path, source.label, source.parser) {
                Ok(_) => outcome.loaded += 1,
                Err(e) => {
                    warn!(source = %e.source_id(), error = %e, "failed to load document");
                    outcome.failures.push(e);
                }
            }
        }
        outcome
    }

    /// Record registered under `label`.
    pub fn record(&self, label: &str) -> Result<&StatisticsRecord, RegistryError> {
        self.registry.get(label)
    }

    /// The underlying registry.
    #[inline]
    pub fn registry(&self) -> &DocumentRegistry {
        &self.registry
    }

    /// Number of registered documents.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Returns `true` if no document is registered.
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Builds a flow graph over the registered documents.
    ///
    /// # Errors
    ///
    /// See [`FlowGraphBuilder::build`].
    pub fn flow_graph(&mut self, selection: &WordSelection) -> Result<FlowGraph, GraphError> {
        let graph = FlowGraphBuilder::new(&self.stop_words).build(&self.registry, selection)?;
        self.metrics.graphs_built += 1;
        Ok(graph)
    }

    /// Builds a flow graph from each document's top `config.top_k` words.
    pub fn default_flow_graph(&mut self) -> Result<FlowGraph, GraphError> {
        self.flow_graph(&WordSelection::TopK(self.config.top_k))
    }

    /// Returns operation counters.
    #[inline(always)]
    #[must_use]
    pub fn metrics(&self) -> CorpusMetrics {
        self.metrics
    }

    /// Returns aggregate statistics over the registered records.
    pub fn stats(&self) -> CorpusStats {
        let mut vocabulary: FxHashSet<&str> = FxHashSet::default();
        let mut total_tokens = 0u64;
        let mut empty_documents = 0;

        for (_, record) in self.registry.iter() {
            total_tokens += u64::from(record.total_words);
            if record.is_empty() {
                empty_documents += 1;
            }
            vocabulary.extend(record.word_count.keys().map(String::as_str));
        }

        CorpusStats {
            num_documents: self.registry.len(),
            total_tokens,
            vocabulary_size: vocabulary.len(),
            empty_documents,
        }
    }

    /// Removes every record and resets the counters.
    pub fn clear(&mut self) {
        self.registry.clear();
        self.metrics = CorpusMetrics::default();
    }
}

/// One entry of a [`Corpus::load_batch`] call.
#[derive(Clone, Copy)]
pub struct DocumentSource<'p> {
    path: &'p Path,
    label: Option<&'p str>,
    parser: Option<&'p dyn SourceParser>,
}

impl fmt::Debug for DocumentSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentSource")
            .field("path", &self.path)
            .field("label", &self.label)
            .field("custom_parser", &self.parser.is_some())
            .finish()
    }
}

impl<'p> DocumentSource<'p> {
    /// A source read as plain text and labelled by its path.
    pub fn new(path: &'p Path) -> Self {
        Self {
            path,
            label: None,
            parser: None,
        }
    }

    /// Sets the registry label.
    pub fn label(mut self, label: &'p str) -> Self {
        self.label = Some(label);
        self
    }

    /// Sets the parser.
    pub fn parser(mut self, parser: &'p dyn SourceParser) -> Self {
        self.parser = Some(parser);
        self
    }

    /// Path of the source.
    pub fn path(&self) -> &'p Path {
        self.path
    }
}

/// Result of [`Corpus::load_batch`].
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Sources registered successfully.
    pub loaded: usize,
    /// Errors of the sources that failed, in input order.
    pub failures: Vec<LoadError>,
}

impl BatchOutcome {
    /// Returns `true` if every source loaded.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Operation counters of a corpus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorpusMetrics {
    /// Documents cleaned and registered, overwrites included.
    pub documents_loaded: u64,
    /// Loads that replaced an existing label.
    pub documents_overwritten: u64,
    /// Loads rejected by their parser.
    pub load_failures: u64,
    /// Flow graphs built successfully.
    pub graphs_built: u64,
}

/// A snapshot of corpus statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorpusStats {
    /// Number of registered documents.
    pub num_documents: usize,
    /// Tokens across all documents.
    pub total_tokens: u64,
    /// Distinct tokens across all documents.
    pub vocabulary_size: usize,
    /// Documents that produced no token.
    pub empty_documents: usize,
}

impl fmt::Display for CorpusStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} documents, {} tokens, {} distinct words",
            self.num_documents, self.total_tokens, self.vocabulary_size
        )?;
        if self.empty_documents > 0 {
            write!(f, " ({} empty)", self.empty_documents)?;
        }
        Ok(())
    }
}
