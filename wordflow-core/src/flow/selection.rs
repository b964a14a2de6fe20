//! Word selection for flow graphs.

use std::collections::BTreeSet;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use wordflow_types::{GraphError, StatisticsRecord, WordSelection};

use crate::analyzer::StopWordSet;
use crate::registry::DocumentRegistry;

/// Top words of one document, most frequent first.
pub type TopWords<'r> = SmallVec<[(&'r str, u32); 8]>;

/// Ranking used by top-k selection: descending count, then ascending word.
///
/// Words are unique within a record, so this is a total order and the
/// selection does not depend on hash-map iteration order.
#[inline(always)]
fn by_rank(a: &(&str, u32), b: &(&str, u32)) -> std::cmp::Ordering {
    b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0))
}

/// Returns the `k` most frequent non-stop words of `record`.
pub fn top_words<'r>(record: &'r StatisticsRecord, k: usize, stop_words: &StopWordSet) -> TopWords<'r> {
    if k == 0 {
        return TopWords::new();
    }

    let mut ranked: Vec<(&str, u32)> = record
        .word_count
        .iter()
        .filter(|(w, _)| !stop_words.contains(w.as_str()))
        .map(|(w, &c)| (w.as_str(), c))
        .collect();

    if ranked.len() > k {
        ranked.select_nth_unstable_by(k - 1, by_rank);
        ranked.truncate(k);
    }
    ranked.sort_unstable_by(by_rank);

    ranked.into_iter().collect()
}

/// Resolves a selection policy into the ordered word-node labels.
///
/// # Errors
///
/// Returns [`GraphError::NoSelection`] if nothing survives filtering.
pub fn resolve(
    registry: &DocumentRegistry,
    selection: &WordSelection,
    stop_words: &StopWordSet,
) -> Result<Vec<String>, GraphError> {
    let words = match selection {
        WordSelection::Explicit(words) => explicit_words(words, stop_words),
        WordSelection::TopK(k) => union_of_top_words(registry, *k, stop_words),
    };

    if words.is_empty() {
        return Err(GraphError::NoSelection);
    }
    Ok(words)
}

/// Caller order, stop words and repeats removed.
fn explicit_words(words: &[String], stop_words: &StopWordSet) -> Vec<String> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    words
        .iter()
        .filter(|w| !stop_words.contains(w.as_str()) && seen.insert(w.as_str()))
        .cloned()
        .collect()
}

/// Union of every document's top `k`, in lexicographic order.
fn union_of_top_words(registry: &DocumentRegistry, k: usize, stop_words: &StopWordSet) -> Vec<String> {
    let mut union: BTreeSet<&str> = BTreeSet::new();
    for (_, record) in registry.iter() {
        union.extend(top_words(record, k, stop_words).iter().map(|&(w, _)| w));
    }
    union.into_iter().map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::extract;

    fn registry(docs: &[(&str, &[&str])]) -> DocumentRegistry {
        let mut reg = DocumentRegistry::new();
        for (label, tokens) in docs {
            reg.register(*label, extract(*tokens));
        }
        reg
    }

    #[test]
    fn top_words_rank_by_count() {
        let r = extract(&["b", "a", "b", "c", "b", "a"]);
        let top = top_words(&r, 2, &StopWordSet::new());
        assert_eq!(top.as_slice(), [("b", 3), ("a", 2)]);
    }

    #[test]
    fn ties_break_lexicographically() {
        let r = extract(&["delta", "alpha", "charlie", "bravo"]);
        let top = top_words(&r, 2, &StopWordSet::new());
        assert_eq!(top.as_slice(), [("alpha", 1), ("bravo", 1)]);
    }

    #[test]
    fn top_words_skip_stop_words_before_cutting() {
        let r = extract(&["the", "the", "the", "cloud", "cloud", "chip"]);
        let stop = StopWordSet::from_words(["the"]);
        let top = top_words(&r, 2, &stop);
        assert_eq!(top.as_slice(), [("cloud", 2), ("chip", 1)]);
    }

    #[test]
    fn k_larger_than_vocabulary_returns_everything() {
        let r = extract(&["x", "y"]);
        assert_eq!(top_words(&r, 10, &StopWordSet::new()).len(), 2);
        assert!(top_words(&r, 0, &StopWordSet::new()).is_empty());
    }

    #[test]
    fn explicit_keeps_order_and_drops_repeats_and_stop_words() {
        let reg = registry(&[("d", &["x"])]);
        let stop = StopWordSet::from_words(["the"]);
        let sel = WordSelection::explicit(["zeta", "the", "alpha", "zeta"]);
        assert_eq!(resolve(&reg, &sel, &stop).unwrap(), ["zeta", "alpha"]);
    }

    #[test]
    fn explicit_all_stop_words_is_no_selection() {
        let reg = registry(&[("d", &["x"])]);
        let stop = StopWordSet::from_words(["the", "and"]);
        let sel = WordSelection::explicit(["the", "and"]);
        assert_eq!(resolve(&reg, &sel, &stop), Err(GraphError::NoSelection));
    }

    #[test]
    fn generated_union_is_sorted() {
        let reg = registry(&[
            ("one", &["pear", "pear", "apple"]),
            ("two", &["fig", "fig", "fig", "apple"]),
        ]);
        let words = resolve(&reg, &WordSelection::TopK(1), &StopWordSet::new()).unwrap();
        assert_eq!(words, ["fig", "pear"]);
    }

    #[test]
    fn generated_union_dedups_shared_words() {
        let reg = registry(&[("one", &["cloud", "cloud"]), ("two", &["cloud"])]);
        let words = resolve(&reg, &WordSelection::TopK(1), &StopWordSet::new()).unwrap();
        assert_eq!(words, ["cloud"]);
    }

    #[test]
    fn top_zero_is_no_selection() {
        let reg = registry(&[("one", &["cloud"])]);
        assert_eq!(
            resolve(&reg, &WordSelection::TopK(0), &StopWordSet::new()),
            Err(GraphError::NoSelection)
        );
    }
}
