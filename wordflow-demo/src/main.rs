//! Batch driver for the wordflow engine.
//!
//! Loads a stop-word list and a set of labelled documents, prints ranked
//! summary statistics, builds the document → word flow graph and exports
//! renderer-ready JSON.
//!
//! ## Usage
//!
//! ```bash
//! wordflow --stopwords data/stopwords.txt \
//!     "Apple 10-K=data/apple_10k_2024.htm" \
//!     "NVIDIA Earnings=data/nvidia_earnings.json" \
//!     data/google_esg_2024.txt
//!
//! # Curated words instead of each document's top five
//! wordflow --words ai,cloud,revenue,growth --out charts data/*.txt
//! ```
//!
//! Output files in `--out`: `sankey.json`, `sentiment.json`, `overlay.json`
//! and `summary.json`.
//!
//! Set `RUST_LOG=wordflow_core=debug` to trace every registered document.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wordflow_core::{
    Corpus, DocumentSource, JsonTextParser, MarkupParser, Metric, OverlaySeries, PlainTextParser,
    SankeyData, SentimentGrid, SourceParser, SummaryTable,
};
use wordflow_types::{CleaningPolicy, CorpusConfig, GraphError, WordSelection};

/// Document statistics and word-flow export
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Documents to load, as `PATH` or `LABEL=PATH`
    #[arg(required = true, value_name = "[LABEL=]PATH")]
    documents: Vec<DocArg>,

    /// Newline-delimited stop-word file
    #[arg(short, long)]
    stopwords: Option<PathBuf>,

    /// JSON file holding a corpus config (`policy`, `top_k`)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Cleaning policy (overrides the config file)
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// Words taken from each document for the flow graph (overrides the config file)
    #[arg(short = 'k', long)]
    top_k: Option<usize>,

    /// Explicit flow-graph words, comma separated
    #[arg(short, long, value_delimiter = ',')]
    words: Vec<String>,

    /// Parser for every document (default: chosen by file extension)
    #[arg(long, value_enum, default_value_t = ParserArg::Auto)]
    parser: ParserArg,

    /// Field holding the text in JSON documents
    #[arg(long, default_value = "text")]
    json_field: String,

    /// Output directory for generated files
    #[arg(short, long, default_value = "out")]
    out: PathBuf,
}

#[derive(Debug, Clone)]
struct DocArg {
    label: Option<String>,
    path: PathBuf,
}

impl FromStr for DocArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (label, path) = match s.split_once('=') {
            Some((label, path)) => (Some(label.trim().to_owned()), path),
            None => (None, s),
        };
        if path.is_empty() {
            return Err(format!("missing path in `{s}`"));
        }
        if label.as_deref() == Some("") {
            return Err(format!("empty label in `{s}`"));
        }
        Ok(Self {
            label,
            path: PathBuf::from(path),
        })
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    Basic,
    Aggressive,
}

impl From<PolicyArg> for CleaningPolicy {
    fn from(p: PolicyArg) -> Self {
        match p {
            PolicyArg::Basic => CleaningPolicy::Basic,
            PolicyArg::Aggressive => CleaningPolicy::Aggressive,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ParserArg {
    Auto,
    Plain,
    Json,
    Markup,
}

impl ParserArg {
    fn for_path(self, path: &Path) -> ParserArg {
        if self != ParserArg::Auto {
            return self;
        }
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => ParserArg::Json,
            Some("htm" | "html" | "xml") => ParserArg::Markup,
            _ => ParserArg::Plain,
        }
    }
}

fn load_config(args: &Args) -> Result<CorpusConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => CorpusConfig::default(),
    };
    if let Some(policy) = args.policy {
        config.policy = policy.into();
    }
    if let Some(k) = args.top_k {
        config.top_k = k;
    }
    Ok(config)
}

fn write_json<P: AsRef<Path>, T: ?Sized + Serialize>(path: P, value: &T) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}

fn graph_error_name(e: GraphError) -> &'static str {
    match e {
        GraphError::NoData => "NoData",
        GraphError::NoSelection => "NoSelection",
        GraphError::NoEdges => "NoEdges",
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    info!(policy = %config.policy, top_k = config.top_k, "starting run");

    let mut corpus = Corpus::with_config(config);
    if let Some(path) = &args.stopwords {
        corpus
            .load_stop_words(path)
            .with_context(|| format!("loading stop words from {}", path.display()))?;
    }

    // -- load documents --
    let plain = PlainTextParser;
    let json = JsonTextParser::new(args.json_field.as_str());
    let markup = MarkupParser;

    let sources: Vec<DocumentSource<'_>> = args
        .documents
        .iter()
        .map(|doc| {
            let parser: &dyn SourceParser = match args.parser.for_path(&doc.path) {
                ParserArg::Json => &json,
                ParserArg::Markup => &markup,
                ParserArg::Plain | ParserArg::Auto => &plain,
            };
            let source = DocumentSource::new(&doc.path).parser(parser);
            match &doc.label {
                Some(label) => source.label(label),
                None => source,
            }
        })
        .collect();

    let outcome = corpus.load_batch(&sources);
    for e in &outcome.failures {
        eprintln!("skipped {}: {e}", e.source_id());
    }
    if outcome.loaded == 0 {
        bail!("none of the {} documents could be loaded", sources.len());
    }
    println!("Loaded {} of {} documents ({})", outcome.loaded, sources.len(), corpus.stats());

    // -- summary statistics --
    let tables: Vec<SummaryTable> = Metric::ALL
        .iter()
        .map(|&m| SummaryTable::ranked(corpus.registry(), m))
        .collect();
    for table in &tables {
        println!("\n{table}");
    }

    // -- visualization data --
    fs::create_dir_all(&args.out)
        .with_context(|| format!("creating output directory {}", args.out.display()))?;

    let selection = if args.words.is_empty() {
        WordSelection::TopK(corpus.config().top_k)
    } else {
        WordSelection::Explicit(args.words.clone())
    };

    match corpus.flow_graph(&selection) {
        Ok(graph) => {
            println!("Flow graph: {graph}");
            write_json(args.out.join("sankey.json"), &SankeyData::from(&graph))?;
        }
        Err(e) => {
            warn!(error = graph_error_name(e), "flow graph not exported");
            eprintln!("flow graph skipped ({}): {e}", graph_error_name(e));
        }
    }

    write_json(args.out.join("sentiment.json"), &SentimentGrid::from_registry(corpus.registry()))?;
    write_json(args.out.join("overlay.json"), &OverlaySeries::from_registry(corpus.registry()))?;
    write_json(args.out.join("summary.json"), &tables)?;

    let metrics = corpus.metrics();
    info!(
        loaded = metrics.documents_loaded,
        overwritten = metrics.documents_overwritten,
        failed = metrics.load_failures,
        graphs = metrics.graphs_built,
        out = %args.out.display(),
        "done"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doc_arg_with_and_without_label() {
        let doc: DocArg = "Apple 10-K=data/apple.htm".parse().unwrap();
        assert_eq!(doc.label.as_deref(), Some("Apple 10-K"));
        assert_eq!(doc.path, PathBuf::from("data/apple.htm"));

        let doc: DocArg = "data/google.txt".parse().unwrap();
        assert!(doc.label.is_none());

        assert!("label=".parse::<DocArg>().is_err());
        assert!("=path.txt".parse::<DocArg>().is_err());
    }

    #[test]
    fn parser_follows_extension() {
        assert_eq!(ParserArg::Auto.for_path(Path::new("a.JSON")), ParserArg::Json);
        assert_eq!(ParserArg::Auto.for_path(Path::new("a.htm")), ParserArg::Markup);
        assert_eq!(ParserArg::Auto.for_path(Path::new("a.txt")), ParserArg::Plain);
        assert_eq!(ParserArg::Plain.for_path(Path::new("a.json")), ParserArg::Plain);
    }

    #[test]
    fn flags_override_config() {
        let args = Args::parse_from(["wordflow", "--policy", "basic", "-k", "3", "doc.txt"]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.policy, CleaningPolicy::Basic);
        assert_eq!(config.top_k, 3);
    }

    #[test]
    fn words_split_on_commas() {
        let args = Args::parse_from(["wordflow", "--words", "ai,cloud", "doc.txt"]);
        assert_eq!(args.words, ["ai", "cloud"]);
    }
}
