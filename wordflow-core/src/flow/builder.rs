//! Flow graph construction.

use tracing::{debug, info};
use wordflow_types::{FlowEdge, FlowGraph, GraphError, WordSelection};

use crate::analyzer::StopWordSet;
use crate::flow::selection;
use crate::registry::DocumentRegistry;

/// Builds document → word flow graphs against a fixed stop-word set.
#[derive(Debug, Clone, Copy)]
pub struct FlowGraphBuilder<'s> {
    stop_words: &'s StopWordSet,
}

impl<'s> FlowGraphBuilder<'s> {
    /// Creates a builder that never selects a word in `stop_words`.
    pub const fn new(stop_words: &'s StopWordSet) -> Self {
        Self { stop_words }
    }

    /// Builds the graph for the registry's current contents.
    ///
    /// Nodes are the document labels in registration order followed by the
    /// selected words. One edge is emitted per (document, word) pair with a
    /// non-zero count.
    ///
    /// # Errors
    ///
    /// Checked in this order:
    /// - [`GraphError::NoData`] if the registry is empty.
    /// - [`GraphError::NoSelection`] if no word survives selection.
    /// - [`GraphError::NoEdges`] if no document contains a selected word.
    pub fn build(
        &self,
        registry: &DocumentRegistry,
        selection: &WordSelection,
    ) -> Result<FlowGraph, GraphError> {
        if registry.is_empty() {
            return Err(GraphError::NoData);
        }

        let words = selection::resolve(registry, selection, self.stop_words)?;
        debug!(words = words.len(), "resolved word selection");

        let document_count = registry.len();
        let word_base = document_count as u32;

        let mut edges = Vec::new();
        for (d, (_, record)) in registry.iter().enumerate() {
            for (w, word) in words.iter().enumerate() {
                let count = record.count(word);
                if count > 0 {
                    edges.push(FlowEdge::new(d as u32, word_base + w as u32, count));
                }
            }
        }

        if edges.is_empty() {
            return Err(GraphError::NoEdges);
        }

        let mut nodes = Vec::with_capacity(document_count + words.len());
        nodes.extend(registry.labels().map(str::to_owned));
        nodes.extend(words);

        let graph = FlowGraph {
            nodes,
            document_count,
            edges,
        };
        info!(
            documents = graph.document_count,
            words = graph.words().len(),
            edges = graph.edges.len(),
            "built flow graph"
        );
        Ok(graph)
    }
}

/// Builds a flow graph in one call.
///
/// See [`FlowGraphBuilder::build`].
pub fn build_flow_graph(
    registry: &DocumentRegistry,
    selection: &WordSelection,
    stop_words: &StopWordSet,
) -> Result<FlowGraph, GraphError> {
    FlowGraphBuilder::new(stop_words).build(registry, selection)
}
