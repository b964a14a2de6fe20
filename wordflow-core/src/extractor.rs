//! Per-document statistics.
//!
//! Turns a token sequence into a [`StatisticsRecord`]. Extraction is a pure
//! function of the tokens and the sentiment lexicon: it never fails, and an
//! empty sequence yields the all-zero record.

use rustc_hash::FxHashMap;
use wordflow_types::StatisticsRecord;

use crate::analyzer::{Polarity, SentimentLexicon};

/// Extracts a record using the built-in sentiment lexicon.
///
/// # Example
///
/// ```
/// use wordflow_core::extractor::extract;
///
/// let record = extract(&["good", "good", "bad"]);
/// assert_eq!(record.total_words, 3);
/// assert_eq!(record.positive_count, 2);
/// assert_eq!(record.negative_count, 1);
/// ```
pub fn extract<S: AsRef<str>>(tokens: &[S]) -> StatisticsRecord {
    StatisticsExtractor::default().extract(tokens)
}

/// Stateless extractor bound to a sentiment lexicon.
#[derive(Debug, Clone, Copy)]
pub struct StatisticsExtractor<'l> {
    lexicon: &'l SentimentLexicon,
}

impl Default for StatisticsExtractor<'static> {
    fn default() -> Self {
        Self::new(SentimentLexicon::builtin())
    }
}

impl<'l> StatisticsExtractor<'l> {
    /// Creates an extractor over `lexicon`.
    pub const fn new(lexicon: &'l SentimentLexicon) -> Self {
        Self { lexicon }
    }

    /// Starts an incremental accumulation.
    pub fn accumulator(&self) -> StatsAccumulator<'l> {
        StatsAccumulator::new(self.lexicon)
    }

    /// Computes the record of a complete token sequence.
    pub fn extract<S: AsRef<str>>(&self, tokens: &[S]) -> StatisticsRecord {
        let mut acc = self.accumulator();
        for t in tokens {
            acc.push(t.as_ref());
        }
        acc.finish()
    }
}

/// Running tallies for one document.
///
/// Lets the corpus feed tokens straight from the tokenizer callback, so the
/// token sequence is never materialized.
#[derive(Debug)]
pub struct StatsAccumulator<'l> {
    lexicon: &'l SentimentLexicon,
    word_count: FxHashMap<String, u32>,
    total_chars: u64,
    positive: u32,
    negative: u32,
}

impl<'l> StatsAccumulator<'l> {
    /// Creates an empty accumulator.
    pub fn new(lexicon: &'l SentimentLexicon) -> Self {
        Self {
            lexicon,
            word_count: FxHashMap::default(),
            total_chars: 0,
            positive: 0,
            negative: 0,
        }
    }

    /// Counts one token.
    #[inline]
    pub fn push(&mut self, token: &str) {
        // Avoid allocating a key for words already seen.
        match self.word_count.get_mut(token) {
            Some(count) => *count = count.saturating_add(1),
            None => {
                self.word_count.insert(token.to_owned(), 1);
            }
        }

        self.total_chars += if token.is_ascii() {
            token.len() as u64
        } else {
            token.chars().count() as u64
        };

        match self.lexicon.polarity(token) {
            Polarity::Positive => self.positive += 1,
            Polarity::Negative => self.negative += 1,
            Polarity::Neutral => {}
        }
    }

    /// Number of tokens pushed so far.
    pub fn len(&self) -> u64 {
        self.word_count.values().map(|&c| u64::from(c)).sum()
    }

    /// Returns `true` if no token was pushed.
    pub fn is_empty(&self) -> bool {
        self.word_count.is_empty()
    }

    /// Finalizes the record.
    pub fn finish(self) -> StatisticsRecord {
        StatisticsRecord::from_counts(self.word_count, self.total_chars, self.positive, self.negative)
    }
}
