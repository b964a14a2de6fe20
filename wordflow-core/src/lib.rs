//! Document statistics and word-flow graphs.
//!
//! Loads labelled text documents, cleans and tokenizes them under a
//! [`CleaningPolicy`], computes per-document word and sentiment statistics,
//! keeps them in an ordered registry and builds document → word flow graphs
//! for Sankey-style rendering.
//!
//! ```
//! use wordflow_core::{Corpus, WordSelection};
//!
//! let mut corpus = Corpus::new();
//! corpus.load_str("tech", "<p>Cloud revenue grew. Cloud margins too.</p>");
//! corpus.load_str("bank", "Loan demand fell; loan losses rose.");
//!
//! let graph = corpus.flow_graph(&WordSelection::TopK(1)).unwrap();
//! assert_eq!(graph.words(), ["cloud", "loan"]);
//! ```

#![warn(missing_docs)]

pub mod analyzer;
pub mod corpus;
pub mod extractor;
pub mod flow;
pub mod parser;
pub mod registry;
pub mod report;

pub use analyzer::{normalize, Analyzer, SentimentLexicon, StopWordSet};
pub use corpus::{BatchOutcome, Corpus, CorpusMetrics, CorpusStats, DocumentSource};
pub use extractor::{extract, StatisticsExtractor};
pub use flow::{build_flow_graph, FlowGraphBuilder};
pub use parser::{JsonTextParser, MarkupParser, PlainTextParser, SourceParser};
pub use registry::{DocumentRegistry, SharedRegistry};
pub use report::{Metric, OverlaySeries, SankeyData, SentimentGrid, SummaryTable};

pub use wordflow_types::{
    CleaningPolicy, CorpusConfig, FlowEdge, FlowGraph, GraphError, LoadError, RegistryError,
    StatisticsRecord, WordSelection,
};
