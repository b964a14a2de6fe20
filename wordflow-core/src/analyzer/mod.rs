//! Text analysis pipeline.
//!
//! Raw text flows through these stages:
//! - **Cleaner**: strips markup tags, entities and URLs (aggressive policy only)
//! - **Normalizer**: lowercases and collapses separators into single spaces
//! - **Tokenizer**: splits normalized text into tokens
//! - **Filter**: drops stop words, short tokens and formatting artifacts
//!
//! [`Analyzer`] chains the stages and keeps one reusable buffer, so loading a
//! batch of documents allocates the normalized text only once.

pub mod cleaner;
pub mod lexicon;
pub mod normalizer;
pub mod stopwords;
pub mod tokenizer;

pub use lexicon::{is_formatting_artifact, Polarity, SentimentLexicon};
pub use normalizer::TextNormalizer;
pub use stopwords::StopWordSet;
pub use tokenizer::{TokenFilter, Tokenizer};

use wordflow_types::CleaningPolicy;

/// Normalizes raw text into owned tokens.
///
/// Empty or fully filtered input yields an empty vector. An empty
/// `stop_words` set filters nothing.
///
/// # Example
///
/// ```
/// use wordflow_core::analyzer::{normalize, StopWordSet};
/// use wordflow_types::CleaningPolicy;
///
/// let tokens = normalize(
///     "<div>Hello, World! 123 http://x.com</div>",
///     &StopWordSet::new(),
///     CleaningPolicy::Aggressive,
/// );
/// assert_eq!(tokens, ["hello", "world"]);
/// ```
pub fn normalize(raw_text: &str, stop_words: &StopWordSet, policy: CleaningPolicy) -> Vec<String> {
    Analyzer::new(policy).tokens(raw_text, stop_words)
}

/// Streams the admitted tokens of `raw_text` without collecting them.
///
/// Allocates one normalization buffer per call; use [`Analyzer`] to reuse it
/// across documents.
pub fn for_each_token<F>(raw_text: &str, stop_words: &StopWordSet, policy: CleaningPolicy, emit: F)
where
    F: FnMut(&str),
{
    Analyzer::new(policy).for_each_token(raw_text, stop_words, emit);
}

/// Reusable normalize → tokenize → filter chain.
#[derive(Debug)]
pub struct Analyzer {
    normalizer: TextNormalizer,
    buf: String,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(CleaningPolicy::default())
    }
}

impl Analyzer {
    /// Creates an analyzer for the given policy.
    pub fn new(policy: CleaningPolicy) -> Self {
        Self {
            normalizer: TextNormalizer::new(policy),
            buf: String::with_capacity(4096),
        }
    }

    /// The cleaning policy in effect.
    #[inline]
    pub fn policy(&self) -> CleaningPolicy {
        self.normalizer.policy()
    }

    /// Streams every admitted token of `raw_text` to `emit`, in document order.
    ///
    /// Tokens borrow the internal buffer and are only valid inside the callback.
    pub fn for_each_token<F>(&mut self, raw_text: &str, stop_words: &StopWordSet, mut emit: F)
    where
        F: FnMut(&str),
    {
        self.normalizer.normalize_into(raw_text, &mut self.buf);
        let filter = TokenFilter::new(stop_words, self.normalizer.policy());

        Tokenizer::tokenize(&self.buf, |token| {
            if filter.admits(token) {
                emit(token);
            }
        });
    }

    /// Collects the admitted tokens of `raw_text`.
    pub fn tokens(&mut self, raw_text: &str, stop_words: &StopWordSet) -> Vec<String> {
        let mut out = Vec::new();
        self.for_each_token(raw_text, stop_words, |t| out.push(t.to_owned()));
        out
    }
}
