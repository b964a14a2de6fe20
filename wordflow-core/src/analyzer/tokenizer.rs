//! Streaming Tokenizer Module
//!
//! Splits normalized text into tokens and decides which of them are counted.
//! It is the stage between the normalizer and the statistics extractor.
//!
//! ## What It Does
//!
//! Given normalized input like `"net sales grew"`, it emits `"net"`,
//! `"sales"` and `"grew"` in document order.
//!
//! Tokens are slices of the input, never copies. The [`TokenFilter`] then
//! applies the cleaning policy's token-level rules (stop words, minimum
//! length, formatting artifacts).
//!
//! ## The Input Contract
//!
//! The tokenizer expects **pre-normalized** input:
//! - tokens separated by exactly one ASCII space
//! - no leading or trailing space
//!
//! [`TextNormalizer`](super::TextNormalizer) always produces such text. A
//! violation panics in debug builds.

use memchr::memchr_iter;
use wordflow_types::CleaningPolicy;

use super::lexicon::is_formatting_artifact;
use super::stopwords::StopWordSet;

/// Tokens shorter than this are dropped under the aggressive policy.
pub const MIN_TOKEN_LENGTH: usize = 3;

/// Zero-allocation splitter over normalized text.
///
/// ## Example
///
/// ```
/// use wordflow_core::analyzer::Tokenizer;
///
/// let mut count = 0;
/// Tokenizer::tokenize("hello world foo", |_| count += 1);
/// assert_eq!(count, 3);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer;

impl Tokenizer {
    /// Emits every token, left to right.
    #[inline(always)]
    pub fn tokenize<'n, F>(normalized: &'n str, mut emit: F)
    where
        F: FnMut(&'n str),
    {
        let bytes = normalized.as_bytes();

        debug_assert!(
            bytes.first().is_none_or(|&b| b != b' '),
            "tokenizer: leading whitespace; normalizer contract violated"
        );
        debug_assert!(
            bytes.last().is_none_or(|&b| b != b' '),
            "tokenizer: trailing whitespace; normalizer contract violated"
        );
        debug_assert!(
            !normalized.contains("  "),
            "tokenizer: consecutive spaces; normalizer contract violated"
        );

        if bytes.is_empty() {
            return;
        }

        let mut start = 0usize;

        // Splitting on the ASCII space byte always lands on a char boundary.
        for i in memchr_iter(b' ', bytes) {
            if start < i {
                emit(&normalized[start..i]);
            }
            start = i + 1;
        }

        if start < bytes.len() {
            emit(&normalized[start..]);
        }
    }
}

/// Token-level admission rules of a cleaning policy.
#[derive(Debug, Clone, Copy)]
pub struct TokenFilter<'s> {
    stop_words: &'s StopWordSet,
    policy: CleaningPolicy,
}

impl<'s> TokenFilter<'s> {
    /// Creates a filter over the given stop words.
    pub const fn new(stop_words: &'s StopWordSet, policy: CleaningPolicy) -> Self {
        Self { stop_words, policy }
    }

    /// Returns `true` if `token` should be counted.
    #[inline]
    pub fn admits(&self, token: &str) -> bool {
        if self.stop_words.contains(token) {
            return false;
        }

        match self.policy {
            CleaningPolicy::Basic => true,
            CleaningPolicy::Aggressive => {
                token.chars().count() >= MIN_TOKEN_LENGTH && !is_formatting_artifact(token)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &str) -> Vec<&str> {
        let mut out = Vec::new();
        Tokenizer::tokenize(input, |text| out.push(text));
        out
    }

    #[test]
    fn single_word() {
        assert_eq!(collect("hello"), ["hello"]);
    }

    #[test]
    fn tokens_come_in_document_order() {
        assert_eq!(collect("the quick brown fox"), ["the", "quick", "brown", "fox"]);
    }

    #[test]
    fn empty_emits_nothing() {
        assert!(collect("").is_empty());
    }

    #[test]
    fn multibyte_tokens_split_cleanly() {
        assert_eq!(collect("über café"), ["über", "café"]);
    }

    #[test]
    fn tokens_are_slices_of_input() {
        let input = String::from("hello world");
        let base = input.as_ptr() as usize;
        let end = base + input.len();

        Tokenizer::tokenize(&input, |text| {
            let ptr = text.as_ptr() as usize;
            assert!(ptr >= base && ptr < end);
        });
    }

    #[test]
    fn basic_filter_only_checks_stop_words() {
        let stop = StopWordSet::from_words(["the"]);
        let filter = TokenFilter::new(&stop, CleaningPolicy::Basic);
        assert!(!filter.admits("the"));
        assert!(filter.admits("a"));
        assert!(filter.admits("div"));
    }

    #[test]
    fn aggressive_filter_rules() {
        let stop = StopWordSet::from_words(["revenue"]);
        let filter = TokenFilter::new(&stop, CleaningPolicy::Aggressive);
        assert!(!filter.admits("revenue"));
        assert!(!filter.admits("ab"));
        assert!(!filter.admits("div"));
        assert!(!filter.admits("padding"));
        assert!(filter.admits("abc"));
        assert!(filter.admits("growth"));
    }
}
