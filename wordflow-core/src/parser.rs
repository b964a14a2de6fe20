//! Source parsers.
//!
//! A parser turns a source path into the raw text handed to the analyzer.
//! Anything implementing [`SourceParser`] can be passed to
//! [`Corpus::load_text`](crate::corpus::Corpus::load_text), including plain
//! closures of type `Fn(&Path) -> Result<String, LoadError>`.

use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use wordflow_types::LoadError;

use crate::analyzer::cleaner::strip_tags;

/// Turns a source into raw text.
pub trait SourceParser {
    /// Reads `source` and returns its text content.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] naming `source` when it cannot be read or
    /// does not have the expected shape.
    fn parse(&self, source: &Path) -> Result<String, LoadError>;
}

impl<F> SourceParser for F
where
    F: Fn(&Path) -> Result<String, LoadError>,
{
    #[inline]
    fn parse(&self, source: &Path) -> Result<String, LoadError> {
        self(source)
    }
}

/// Reads a whole file as UTF-8.
///
/// # Errors
///
/// [`LoadError::InvalidUtf8`] if the bytes are not UTF-8, [`LoadError::Io`]
/// for every other read failure.
pub fn read_utf8(source: &Path) -> Result<String, LoadError> {
    fs::read_to_string(source).map_err(|error| {
        let source_id = source.display().to_string();
        if error.kind() == io::ErrorKind::InvalidData {
            LoadError::InvalidUtf8 { source_id }
        } else {
            LoadError::Io { source_id, error }
        }
    })
}

/// Returns the file contents unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextParser;

impl SourceParser for PlainTextParser {
    fn parse(&self, source: &Path) -> Result<String, LoadError> {
        read_utf8(source)
    }
}

/// Reads a JSON object and returns one of its string fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonTextParser {
    field: String,
}

impl Default for JsonTextParser {
    fn default() -> Self {
        Self::new("text")
    }
}

impl JsonTextParser {
    /// Creates a parser returning the field named `field`.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Name of the extracted field.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Extracts the field from an in-memory JSON document.
    pub fn parse_str(&self, source_id: &str, json: &str) -> Result<String, LoadError> {
        let value: Value = serde_json::from_str(json).map_err(|e| LoadError::Json {
            source_id: source_id.to_owned(),
            reason: e.to_string(),
        })?;

        match value.get(&self.field) {
            Some(Value::String(text)) => Ok(text.clone()),
            _ => Err(LoadError::MissingField {
                source_id: source_id.to_owned(),
                field: self.field.clone(),
            }),
        }
    }
}

impl SourceParser for JsonTextParser {
    fn parse(&self, source: &Path) -> Result<String, LoadError> {
        let raw = read_utf8(source)?;
        self.parse_str(&source.display().to_string(), &raw)
    }
}

static HIDDEN_BLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>|<!--.*?-->")
        .expect("valid markup pattern")
});
static NAMED_ENTITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(?:amp|lt|gt|quot|apos|nbsp|#39|#160);").expect("valid markup pattern")
});

/// Escaped angle brackets map to a separator, never back to `<` / `>`.
fn decode_entity(entity: &str) -> &'static str {
    match entity {
        "&amp;" => "&",
        "&quot;" => "\"",
        "&apos;" | "&#39;" => "'",
        _ => " ",
    }
}

/// Strips filing markup so the analyzer sees running text.
///
/// Drops `<script>`/`<style>` blocks and comments with their contents,
/// replaces every other tag with a space and decodes the common named
/// entities. `&lt;`, `&gt;` and `&nbsp;` turn into spaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupParser;

impl MarkupParser {
    /// Cleans an in-memory document.
    pub fn clean<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        if !raw.contains(['<', '&']) {
            return Cow::Borrowed(raw);
        }
        let visible = HIDDEN_BLOCK_RE.replace_all(raw, " ");
        let text = strip_tags(&visible);
        let decoded = NAMED_ENTITY_RE.replace_all(&text, |caps: &regex::Captures<'_>| {
            decode_entity(&caps[0])
        });
        Cow::Owned(decoded.into_owned())
    }
}

impl SourceParser for MarkupParser {
    fn parse(&self, source: &Path) -> Result<String, LoadError> {
        let raw = read_utf8(source)?;
        Ok(self.clean(&raw).into_owned())
    }
}
