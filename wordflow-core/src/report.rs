//! Renderer-ready report data.
//!
//! Plain serializable values derived from a [`FlowGraph`] or a
//! [`DocumentRegistry`]: a Sankey trace, a grid of per-document sentiment
//! panels, an overlay of word statistics and ranked summary tables. Drawing
//! is left to whatever consumes the JSON.

use core::fmt;

use serde::Serialize;
use wordflow_types::{FlowGraph, StatisticsRecord};

use crate::registry::DocumentRegistry;

/// Default Sankey title.
pub const SANKEY_TITLE: &str = "Text-to-Word Sankey Diagram";
/// Default sentiment grid title.
pub const SENTIMENT_TITLE: &str = "Sentiment Analysis: Positive vs Negative Words by Document";
/// Default overlay title.
pub const OVERLAY_TITLE: &str = "Document Comparison: Word Statistics Overlay";

/// Sankey trace as parallel arrays: node labels, then one
/// `(source, target, value)` triple per link.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SankeyData {
    /// Chart title.
    pub title: String,
    /// Node labels: documents, then words.
    pub label: Vec<String>,
    /// Document node of each link.
    pub source: Vec<u32>,
    /// Word node of each link.
    pub target: Vec<u32>,
    /// Occurrences carried by each link.
    pub value: Vec<u32>,
}

impl SankeyData {
    /// Converts a flow graph under a custom title.
    pub fn with_title(graph: &FlowGraph, title: impl Into<String>) -> Self {
        let n = graph.edges.len();
        let mut source = Vec::with_capacity(n);
        let mut target = Vec::with_capacity(n);
        let mut value = Vec::with_capacity(n);
        for e in &graph.edges {
            source.push(e.source);
            target.push(e.target);
            value.push(e.weight);
        }
        Self {
            title: title.into(),
            label: graph.nodes.clone(),
            source,
            target,
            value,
        }
    }
}

impl From<&FlowGraph> for SankeyData {
    fn from(graph: &FlowGraph) -> Self {
        Self::with_title(graph, SANKEY_TITLE)
    }
}

/// Positive vs negative counts of one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentPanel {
    /// Document label.
    pub label: String,
    /// Tokens in the positive lexicon.
    pub positive: u32,
    /// Tokens in the negative lexicon.
    pub negative: u32,
    /// All tokens of the document.
    pub total_words: u32,
    /// Share of positive tokens, in percent.
    pub positive_pct: f64,
    /// Share of negative tokens, in percent.
    pub negative_pct: f64,
}

impl SentimentPanel {
    fn new(label: &str, record: &StatisticsRecord) -> Self {
        Self {
            label: label.to_owned(),
            positive: record.positive_count,
            negative: record.negative_count,
            total_words: record.total_words,
            positive_pct: record.positive_ratio(),
            negative_pct: record.negative_ratio(),
        }
    }
}

/// One sentiment panel per document, laid out row-major in a near-square grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentGrid {
    /// Figure title.
    pub title: String,
    /// Number of grid rows.
    pub rows: usize,
    /// Number of grid columns, `ceil(sqrt(panels))`.
    pub columns: usize,
    /// Panels in registration order, filled row by row.
    pub panels: Vec<SentimentPanel>,
}

impl SentimentGrid {
    /// Builds the grid in registration order.
    pub fn from_registry(registry: &DocumentRegistry) -> Self {
        let panels: Vec<SentimentPanel> = registry
            .iter()
            .map(|(label, record)| SentimentPanel::new(label, record))
            .collect();
        let (rows, columns) = grid_shape(panels.len());
        Self {
            title: SENTIMENT_TITLE.to_owned(),
            rows,
            columns,
            panels,
        }
    }

    /// Grid cell of the panel at `index`, as `(row, column)`.
    pub fn cell(&self, index: usize) -> Option<(usize, usize)> {
        (index < self.panels.len()).then(|| (index / self.columns, index % self.columns))
    }
}

/// `ceil(sqrt(n))` columns and as many rows as needed.
fn grid_shape(n: usize) -> (usize, usize) {
    if n == 0 {
        return (0, 0);
    }
    let mut columns = 1;
    while columns * columns < n {
        columns += 1;
    }
    (n.div_ceil(columns), columns)
}

/// Word statistics of every document, as series sharing one x axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlaySeries {
    /// Figure title.
    pub title: String,
    /// Document labels (the shared x axis).
    pub labels: Vec<String>,
    /// Total words per document.
    pub total_words: Vec<u32>,
    /// Unique words per document.
    pub unique_words: Vec<u32>,
    /// Mean word length per document, in characters.
    pub avg_word_length: Vec<f64>,
}

impl OverlaySeries {
    /// Collects the series in registration order.
    pub fn from_registry(registry: &DocumentRegistry) -> Self {
        let n = registry.len();
        let mut out = Self {
            title: OVERLAY_TITLE.to_owned(),
            labels: Vec::with_capacity(n),
            total_words: Vec::with_capacity(n),
            unique_words: Vec::with_capacity(n),
            avg_word_length: Vec::with_capacity(n),
        };
        for (label, record) in registry.iter() {
            out.labels.push(label.to_owned());
            out.total_words.push(record.total_words);
            out.unique_words.push(record.unique_words);
            out.avg_word_length.push(record.avg_word_length);
        }
        out
    }
}

/// Per-document metric a summary table ranks by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// [`StatisticsRecord::total_words`].
    TotalWords,
    /// [`StatisticsRecord::unique_words`].
    UniqueWords,
    /// [`StatisticsRecord::avg_word_length`].
    AvgWordLength,
    /// [`StatisticsRecord::sentiment_score`].
    SentimentScore,
}

impl Metric {
    /// Every metric, in display order.
    pub const ALL: [Metric; 4] = [
        Metric::TotalWords,
        Metric::UniqueWords,
        Metric::AvgWordLength,
        Metric::SentimentScore,
    ];

    /// Reads the metric from a record.
    #[inline]
    pub fn value(self, record: &StatisticsRecord) -> f64 {
        match self {
            Metric::TotalWords => f64::from(record.total_words),
            Metric::UniqueWords => f64::from(record.unique_words),
            Metric::AvgWordLength => record.avg_word_length,
            Metric::SentimentScore => record.sentiment_score,
        }
    }

    /// Heading used when printing a table.
    pub fn heading(self) -> &'static str {
        match self {
            Metric::TotalWords => "Total words per document",
            Metric::UniqueWords => "Unique words per document",
            Metric::AvgWordLength => "Average word length per document",
            Metric::SentimentScore => "Sentiment score per document",
        }
    }
}

/// One row of a [`SummaryTable`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    /// Document label.
    pub label: String,
    /// Metric value of the document.
    pub value: f64,
}

/// Documents ranked by one metric, highest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTable {
    /// Metric the table is ranked by.
    pub metric: Metric,
    /// Rows, highest value first.
    pub entries: Vec<RankedEntry>,
}

impl SummaryTable {
    /// Ranks every registered document by `metric`.
    ///
    /// The sort is stable: equal values keep registration order.
    pub fn ranked(registry: &DocumentRegistry, metric: Metric) -> Self {
        let mut entries: Vec<RankedEntry> = registry
            .iter()
            .map(|(label, record)| RankedEntry {
                label: label.to_owned(),
                value: metric.value(record),
            })
            .collect();
        entries.sort_by(|a, b| b.value.total_cmp(&a.value));
        Self { metric, entries }
    }
}

impl fmt::Display for SummaryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.metric.heading())?;
        for e in &self.entries {
            match self.metric {
                Metric::TotalWords => writeln!(f, "{:<25}: {:>8} words", e.label, e.value)?,
                Metric::UniqueWords => writeln!(f, "{:<25}: {:>8} unique words", e.label, e.value)?,
                Metric::AvgWordLength => writeln!(f, "{:<25}: {:>8.2} characters", e.label, e.value)?,
                Metric::SentimentScore => writeln!(f, "{:<25}: {:>+8.3}", e.label, e.value)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::StopWordSet;
    use crate::extractor::extract;
    use crate::flow::build_flow_graph;
    use wordflow_types::WordSelection;

    fn registry() -> DocumentRegistry {
        let mut reg = DocumentRegistry::new();
        reg.register("Apple 10-K", extract(&["growth", "growth", "risk", "cloud"]));
        reg.register("AMD 10-K", extract(&["chip", "chip", "chip", "growth", "loss", "risk"]));
        reg.register("Intel CSR", extract(&["water", "carbon"]));
        reg
    }

    #[test]
    fn sankey_mirrors_graph() {
        let reg = registry();
        let graph =
            build_flow_graph(&reg, &WordSelection::explicit(["growth", "chip"]), &StopWordSet::new())
                .unwrap();
        let sankey = SankeyData::from(&graph);

        assert_eq!(sankey.title, SANKEY_TITLE);
        assert_eq!(sankey.label, ["Apple 10-K", "AMD 10-K", "Intel CSR", "growth", "chip"]);
        assert_eq!(sankey.source, [0, 1, 1]);
        assert_eq!(sankey.target, [3, 3, 4]);
        assert_eq!(sankey.value, [2, 1, 3]);
    }

    #[test]
    fn sankey_serializes_parallel_arrays() {
        let graph = FlowGraph {
            nodes: vec!["d".into(), "w".into()],
            document_count: 1,
            edges: vec![wordflow_types::FlowEdge::new(0, 1, 4)],
        };
        let json = serde_json::to_value(SankeyData::with_title(&graph, "t")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "t",
                "label": ["d", "w"],
                "source": [0],
                "target": [1],
                "value": [4]
            })
        );
    }

    #[test]
    fn grid_shape_is_near_square() {
        assert_eq!(grid_shape(0), (0, 0));
        assert_eq!(grid_shape(1), (1, 1));
        assert_eq!(grid_shape(2), (1, 2));
        assert_eq!(grid_shape(4), (2, 2));
        assert_eq!(grid_shape(5), (2, 3));
        assert_eq!(grid_shape(8), (3, 3));
        assert_eq!(grid_shape(10), (3, 4));
    }

    #[test]
    fn sentiment_grid_panels() {
        let grid = SentimentGrid::from_registry(&registry());
        assert_eq!((grid.rows, grid.columns), (2, 2));
        assert_eq!(grid.panels.len(), 3);

        let amd = &grid.panels[1];
        assert_eq!(amd.label, "AMD 10-K");
        assert_eq!(amd.positive, 1);
        assert_eq!(amd.negative, 2);
        assert_eq!(amd.total_words, 6);
        assert!((amd.negative_pct - 100.0 / 3.0).abs() < 1e-9);

        assert_eq!(grid.cell(2), Some((1, 0)));
        assert_eq!(grid.cell(3), None);
    }

    #[test]
    fn overlay_follows_registration_order() {
        let overlay = OverlaySeries::from_registry(&registry());
        assert_eq!(overlay.labels, ["Apple 10-K", "AMD 10-K", "Intel CSR"]);
        assert_eq!(overlay.total_words, [4, 6, 2]);
        assert_eq!(overlay.unique_words, [3, 4, 2]);
        assert_eq!(overlay.avg_word_length[2], 5.5);
    }

    #[test]
    fn ranking_is_descending_and_stable() {
        let mut reg = registry();
        reg.register("Tie", extract(&["one", "two", "three", "four"]));

        let table = SummaryTable::ranked(&reg, Metric::TotalWords);
        let labels: Vec<&str> = table.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["AMD 10-K", "Apple 10-K", "Tie", "Intel CSR"]);
        assert_eq!(table.entries[0].value, 6.0);
    }

    #[test]
    fn ranking_by_sentiment() {
        let table = SummaryTable::ranked(&registry(), Metric::SentimentScore);
        let labels: Vec<&str> = table.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["Apple 10-K", "Intel CSR", "AMD 10-K"]);
    }

    #[test]
    fn table_display() {
        let table = SummaryTable::ranked(&registry(), Metric::AvgWordLength);
        let text = table.to_string();
        assert!(text.starts_with("Average word length per document:\n"));
        assert!(text.contains("Intel CSR                :     5.50 characters"));
    }
}
