//! Built-in word lists.
//!
//! Two fixed vocabularies live here: the formatting artifacts dropped by the
//! aggressive cleaning policy, and the sentiment lexicon used by the
//! statistics extractor. Both are compiled into the binary and not
//! configurable at the token-filter level.

use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;

/// Markup and formatting vocabulary that survives tag stripping in filings:
/// structural tags, attribute and CSS names, units, entity names and file or
/// encoding names.
#[rustfmt::skip]
pub const FORMATTING_ARTIFACTS: &[&str] = &[
    // structure
    "div", "span", "table", "tbody", "thead", "tfoot", "tr", "td", "th",
    "ul", "ol", "li", "br", "hr", "img", "href", "src", "alt",
    "html", "head", "body", "title", "meta", "link", "script", "style",
    "form", "input", "button", "select", "option", "textarea",
    // attributes
    "class", "name", "type", "value", "width", "height", "border",
    "colspan", "rowspan", "align", "valign", "bgcolor", "color",
    "cellpadding", "cellspacing", "background", "margin", "padding",
    // typography and layout
    "font", "size", "weight", "family", "bold", "italic", "underline",
    "text", "left", "right", "center", "top", "bottom", "middle",
    "vertical", "horizontal", "position", "display", "float", "clear",
    // units
    "px", "pt", "em", "rem", "vh", "vw", "pct", "percent",
    // entity names
    "nbsp", "amp", "lt", "gt", "quot", "apos",
    // file formats and encodings
    "pdf", "xml", "xbrl", "htm", "json", "csv", "txt",
    "iso", "utf", "ascii", "unicode",
    // css values
    "rgb", "rgba", "hex", "url", "none", "auto", "inherit",
    "hidden", "visible", "inline", "block", "flex", "grid",
];

static ARTIFACT_SET: Lazy<FxHashSet<&'static str>> =
    Lazy::new(|| FORMATTING_ARTIFACTS.iter().copied().collect());

/// Returns `true` if `word` is a known formatting artifact.
#[inline]
pub fn is_formatting_artifact(word: &str) -> bool {
    ARTIFACT_SET.contains(word)
}

#[rustfmt::skip]
const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "outstanding", "strong", "stronger", "strongest",
    "growth", "grow", "grew", "growing", "gain", "gains", "improve", "improved",
    "improvement", "improving", "increase", "increased", "profit", "profitable",
    "profitability", "success", "successful", "successfully", "benefit", "benefits",
    "positive", "opportunity", "opportunities", "innovation", "innovative",
    "efficient", "efficiency", "robust", "achieve", "achieved", "achievement",
    "advantage", "advantages", "leading", "leader", "exceed", "exceeded",
    "favorable", "confident", "confidence", "momentum", "progress", "resilient",
    "resilience", "sustainable", "best", "better", "win", "winning", "record",
    "expand", "expanded", "expansion", "reward", "rewarding", "happy", "pleased",
    "excited", "exciting", "delighted", "enhance", "enhanced", "superior", "solid",
];

#[rustfmt::skip]
const NEGATIVE_WORDS: &[&str] = &[
    "bad", "poor", "weak", "weaker", "weakness", "decline", "declined", "declining",
    "decrease", "decreased", "loss", "losses", "lose", "lost", "risk", "risks",
    "risky", "adverse", "adversely", "litigation", "lawsuit", "impairment",
    "uncertain", "uncertainty", "uncertainties", "volatile", "volatility",
    "challenge", "challenges", "challenging", "difficult", "difficulty", "failure",
    "fail", "failed", "negative", "negatively", "downturn", "deficit", "penalty",
    "penalties", "fraud", "breach", "breaches", "delay", "delays", "delayed",
    "disruption", "disruptions", "threat", "threats", "worse", "worst", "concern",
    "concerns", "restructuring", "shortfall", "unfavorable", "recession",
    "inflation", "layoffs", "default", "harm", "harmful", "damage", "damages",
    "problem", "problems", "crisis", "sad", "terrible", "disappointing",
];

/// Sentiment class of a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Listed in the positive lexicon.
    Positive,
    /// Listed in the negative lexicon.
    Negative,
    /// Listed in neither.
    Neutral,
}

/// Positive and negative word lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentimentLexicon {
    positive: FxHashSet<String>,
    negative: FxHashSet<String>,
}

static BUILTIN: Lazy<SentimentLexicon> =
    Lazy::new(|| SentimentLexicon::new(POSITIVE_WORDS.iter().copied(), NEGATIVE_WORDS.iter().copied()));

impl Default for SentimentLexicon {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

impl SentimentLexicon {
    /// Builds a lexicon from two word lists.
    ///
    /// Words are lowercased. A word present in both lists is neutral.
    pub fn new<P, N, S, T>(positive: P, negative: N) -> Self
    where
        P: IntoIterator<Item = S>,
        N: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let mut positive: FxHashSet<String> = positive
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        let mut negative: FxHashSet<String> = negative
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();

        let shared: Vec<String> = positive.intersection(&negative).cloned().collect();
        for w in &shared {
            positive.remove(w);
            negative.remove(w);
        }

        Self { positive, negative }
    }

    /// The compiled-in lexicon.
    pub fn builtin() -> &'static SentimentLexicon {
        &BUILTIN
    }

    /// Classifies one lowercase token.
    #[inline]
    pub fn polarity(&self, word: &str) -> Polarity {
        if self.positive.contains(word) {
            Polarity::Positive
        } else if self.negative.contains(word) {
            Polarity::Negative
        } else {
            Polarity::Neutral
        }
    }

    /// Number of positive and negative entries.
    pub fn sizes(&self) -> (usize, usize) {
        (self.positive.len(), self.negative.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifacts_cover_structural_tags() {
        for w in ["div", "span", "td", "nbsp", "xbrl", "padding"] {
            assert!(is_formatting_artifact(w), "{w}");
        }
        assert!(!is_formatting_artifact("revenue"));
    }

    #[test]
    fn builtin_lists_are_disjoint() {
        let pos: FxHashSet<&str> = POSITIVE_WORDS.iter().copied().collect();
        for w in NEGATIVE_WORDS {
            assert!(!pos.contains(w), "{w} is in both lists");
        }
        let (p, n) = SentimentLexicon::builtin().sizes();
        assert_eq!(p, pos.len());
        assert_eq!(n, NEGATIVE_WORDS.iter().collect::<FxHashSet<_>>().len());
    }

    #[test]
    fn builtin_knows_good_and_bad() {
        let lex = SentimentLexicon::builtin();
        assert_eq!(lex.polarity("good"), Polarity::Positive);
        assert_eq!(lex.polarity("bad"), Polarity::Negative);
        assert_eq!(lex.polarity("table"), Polarity::Neutral);
    }

    #[test]
    fn custom_lexicon_lowercases_and_neutralizes_overlap() {
        let lex = SentimentLexicon::new(["Up", "mixed"], ["DOWN", "mixed"]);
        assert_eq!(lex.polarity("up"), Polarity::Positive);
        assert_eq!(lex.polarity("down"), Polarity::Negative);
        assert_eq!(lex.polarity("mixed"), Polarity::Neutral);
        assert_eq!(lex.sizes(), (1, 1));
    }
}
