//! Document → word flow graphs.
//!
//! A flow graph links every registered document to the words selected for
//! display, weighted by how often the document uses each word. It is the
//! input of Sankey-style renderers.
//!
//! Node layout:
//!
//! ```text
//! 0 .. D          document labels, in registration order
//! D .. D + W      selected words, in selection order
//! ```
//!
//! Selection:
//! - [`WordSelection::Explicit`](wordflow_types::WordSelection::Explicit)
//!   keeps caller order after dropping stop words and repeats.
//! - [`WordSelection::TopK`](wordflow_types::WordSelection::TopK) takes each
//!   document's `k` most frequent non-stop words (ties broken by word) and
//!   sorts their union lexicographically, so the result is deterministic.
//!
//! Graphs are snapshots. Registering more documents afterwards does not
//! touch a graph that was already built.

mod builder;
pub mod selection;

pub use builder::{build_flow_graph, FlowGraphBuilder};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::StopWordSet;
    use crate::extractor::extract;
    use crate::registry::DocumentRegistry;
    use wordflow_types::{FlowEdge, GraphError, WordSelection};

    fn registry(docs: &[(&str, &[&str])]) -> DocumentRegistry {
        let mut reg = DocumentRegistry::new();
        for (label, tokens) in docs {
            reg.register(*label, extract(*tokens));
        }
        reg
    }

    #[test]
    fn explicit_words_produce_weighted_edges() {
        let reg = registry(&[
            ("A", &["cloud", "cloud", "chip"]),
            ("B", &["chip", "risk"]),
        ]);
        let sel = WordSelection::explicit(["cloud", "chip"]);
        let graph = build_flow_graph(&reg, &sel, &StopWordSet::new()).unwrap();

        assert_eq!(graph.nodes, ["A", "B", "cloud", "chip"]);
        assert_eq!(graph.document_count, 2);
        assert_eq!(
            graph.edges,
            [
                FlowEdge::new(0, 2, 2),
                FlowEdge::new(0, 3, 1),
                FlowEdge::new(1, 3, 1),
            ]
        );
    }

    #[test]
    fn edge_weights_match_word_counts() {
        let reg = registry(&[
            ("one", &["alpha", "beta", "beta", "gamma", "gamma", "gamma"]),
            ("two", &["beta", "delta", "delta"]),
            ("three", &["gamma", "alpha"]),
        ]);
        let graph = build_flow_graph(&reg, &WordSelection::TopK(2), &StopWordSet::new()).unwrap();

        for edge in &graph.edges {
            assert!(edge.weight > 0);
            let doc = graph.label(edge.source).unwrap();
            let word = graph.label(edge.target).unwrap();
            assert!((edge.source as usize) < graph.document_count);
            assert!((edge.target as usize) >= graph.document_count);
            assert_eq!(reg.get(doc).unwrap().count(word), edge.weight);
        }
    }

    #[test]
    fn top_one_of_disjoint_documents() {
        let reg = registry(&[
            ("tech", &["cloud", "cloud", "chip"]),
            ("bank", &["loan", "loan", "loan", "rate"]),
        ]);
        let graph = build_flow_graph(&reg, &WordSelection::TopK(1), &StopWordSet::new()).unwrap();

        assert_eq!(graph.words(), ["cloud", "loan"]);
        assert_eq!(graph.edges, [FlowEdge::new(0, 2, 2), FlowEdge::new(1, 3, 3)]);
        assert_eq!(graph.total_weight(), 5);
    }

    #[test]
    fn empty_registry_is_no_data() {
        let reg = DocumentRegistry::new();
        let err = build_flow_graph(&reg, &WordSelection::default(), &StopWordSet::new());
        assert_eq!(err, Err(GraphError::NoData));

        // NoData wins over an empty selection.
        let err = build_flow_graph(&reg, &WordSelection::Explicit(Vec::new()), &StopWordSet::new());
        assert_eq!(err, Err(GraphError::NoData));
    }

    #[test]
    fn all_stop_words_is_no_selection() {
        let reg = registry(&[("doc", &["the", "and"])]);
        let stop = StopWordSet::from_words(["the", "and"]);

        let err = build_flow_graph(&reg, &WordSelection::explicit(["the", "and"]), &stop);
        assert_eq!(err, Err(GraphError::NoSelection));

        let err = build_flow_graph(&reg, &WordSelection::TopK(3), &stop);
        assert_eq!(err, Err(GraphError::NoSelection));
    }

    #[test]
    fn absent_words_are_no_edges() {
        let reg = registry(&[("doc", &["cloud", "chip"])]);
        let err = build_flow_graph(&reg, &WordSelection::explicit(["quantum"]), &StopWordSet::new());
        assert_eq!(err, Err(GraphError::NoEdges));
    }

    #[test]
    fn unused_nodes_are_kept() {
        let reg = registry(&[("A", &["cloud"]), ("B", &[])]);
        let sel = WordSelection::explicit(["cloud", "quantum"]);
        let graph = build_flow_graph(&reg, &sel, &StopWordSet::new()).unwrap();

        assert_eq!(graph.nodes, ["A", "B", "cloud", "quantum"]);
        assert_eq!(graph.edges, [FlowEdge::new(0, 2, 1)]);
        assert_eq!(graph.edges_from(1).count(), 0);
    }

    #[test]
    fn overwrite_keeps_document_node_index() {
        let mut reg = registry(&[("A", &["cloud"]), ("B", &["cloud", "cloud"])]);
        reg.register("A", extract(&["cloud", "cloud", "cloud"]));

        let graph = FlowGraphBuilder::new(&StopWordSet::new())
            .build(&reg, &WordSelection::explicit(["cloud"]))
            .unwrap();
        assert_eq!(graph.documents(), ["A", "B"]);
        assert_eq!(graph.edges, [FlowEdge::new(0, 2, 3), FlowEdge::new(1, 2, 2)]);
    }

    #[test]
    fn label_equal_to_word_gets_two_nodes() {
        let reg = registry(&[("cloud", &["cloud", "cloud"])]);
        let graph = build_flow_graph(&reg, &WordSelection::TopK(1), &StopWordSet::new()).unwrap();
        assert_eq!(graph.nodes, ["cloud", "cloud"]);
        assert_eq!(graph.edges, [FlowEdge::new(0, 1, 2)]);
    }
}
