//! In-memory word storage.
//!
//! A [`WordSequence`] is the ordered list of words the server hands out in
//! pages. It is loaded once at startup from a comma-separated source file
//! and never mutated afterwards, which is what lets connection handlers
//! share it behind an `Arc` without any locking.
use std::{fs, io, path::Path};

use thiserror::Error;

/// Errors raised while building a [`WordSequence`].
#[derive(Debug, Error)]
pub enum WordsError {
    #[error("cannot read word source '{path}': {source}")]
    Source { path: String, source: io::Error },
}

/// Result of one range query against a [`WordSequence`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordSlice {
    /// The words in range, in sequence order.
    pub words: Vec<String>,
    /// True when no words exist beyond the ones returned.
    pub exhausted: bool,
}

/// An ordered, immutable sequence of words.
///
/// Words are opaque non-empty strings; order matches the source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordSequence {
    words: Vec<String>,
}

impl WordSequence {
    /// Load a sequence from a text file of comma-separated words.
    ///
    /// The file may span multiple physical lines; the whole contents are
    /// split on commas, each field is trimmed, and empty fields are
    /// dropped. An unreadable source is fatal to the server, so the error
    /// is returned rather than retried.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WordsError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| WordsError::Source {
            path: path.display().to_string(),
            source,
        })?;
        Ok(raw.split(',').collect())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Return up to `count` words starting at `offset`.
    ///
    /// The slice is exhausted when no words exist beyond the ones
    /// returned: either `offset` is already at or past the end (zero
    /// words) or the returned words reach the end of the sequence.
    pub fn slice(&self, offset: usize, count: usize) -> WordSlice {
        if offset >= self.words.len() {
            return WordSlice {
                words: Vec::new(),
                exhausted: true,
            };
        }

        let end = offset.saturating_add(count).min(self.words.len());
        WordSlice {
            words: self.words[offset..end].to_vec(),
            exhausted: end >= self.words.len(),
        }
    }
}

impl<'a> FromIterator<&'a str> for WordSequence {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let words = iter
            .into_iter()
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect();
        Self { words }
    }
}
