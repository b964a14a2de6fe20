//! Markup, entity and URL stripping.
//!
//! First stage of the aggressive policy. Each pattern is replaced by a single
//! space so that neighbouring words never fuse. The stages run in a fixed
//! order (tags, entities, URLs) and all of them run before punctuation is
//! folded away by the normalizer; folding first would leave fragments such as
//! `amp` or `http` behind.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid tag pattern"));

static ENTITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(?:[A-Za-z][A-Za-z0-9]*|#[0-9]+|#[xX][0-9A-Fa-f]+);").expect("valid entity pattern")
});

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"http\S+|www\.\S+").expect("valid url pattern"));

/// Replaces markup tags, HTML entities and URLs with spaces.
///
/// Returns the input unchanged (borrowed) when none of them occur.
pub fn strip_markup(text: &str) -> Cow<'_, str> {
    let mut out = Cow::Borrowed(text);

    for re in [&*TAG_RE, &*ENTITY_RE, &*URL_RE] {
        if let Cow::Owned(replaced) = re.replace_all(&out, " ") {
            out = Cow::Owned(replaced);
        }
    }

    out
}

/// Replaces markup tags with spaces.
pub fn strip_tags(text: &str) -> Cow<'_, str> {
    TAG_RE.replace_all(text, " ")
}
