//! Stop-word sets.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use rustc_hash::FxHashSet;
use tracing::info;
use wordflow_types::LoadError;

/// Words excluded from counting and from flow-graph selection.
///
/// Entries are stored trimmed and lowercased. The default set is empty and
/// filters nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWordSet {
    words: FxHashSet<String>,
}

impl StopWordSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from words; blank entries are ignored.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for w in words {
            set.insert(w.as_ref());
        }
        set
    }

    /// Reads a newline-delimited list, one word per line.
    pub fn from_reader<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut set = Self::new();
        for line in reader.lines() {
            set.insert(&line?);
        }
        Ok(set)
    }

    /// Loads a newline-delimited stop-word file.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] if the file cannot be opened or read, and
    /// [`LoadError::InvalidUtf8`] if a line is not UTF-8.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let source_id = path.display().to_string();

        let file = File::open(path).map_err(|error| LoadError::Io {
            source_id: source_id.clone(),
            error,
        })?;

        let set = Self::from_reader(BufReader::new(file)).map_err(|error| {
            if error.kind() == io::ErrorKind::InvalidData {
                LoadError::InvalidUtf8 {
                    source_id: source_id.clone(),
                }
            } else {
                LoadError::Io {
                    source_id: source_id.clone(),
                    error,
                }
            }
        })?;

        info!(path = %source_id, words = set.len(), "loaded stop words");
        Ok(set)
    }

    /// Adds one word. Returns `false` for blank input or a word already present.
    pub fn insert(&mut self, word: &str) -> bool {
        let word = word.trim();
        if word.is_empty() {
            return false;
        }
        self.words.insert(word.to_lowercase())
    }

    /// Returns `true` if `word` is a stop word. `word` must already be lowercase.
    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        !self.words.is_empty() && self.words.contains(word)
    }

    /// Number of stop words.
    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the set filters nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterates over the stored words in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}
