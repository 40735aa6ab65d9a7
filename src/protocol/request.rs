use std::fmt;

use thiserror::Error;

/// A request line that could not be decoded into a [`PageRequest`].
///
/// Malformed input is an expected outcome, not a fault: the server answers
/// it with a terminal empty page and closes the connection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedRequest {
    #[error("request '{0}' is not of the form 'offset,count'")]
    Shape(String),

    #[error("'{0}' is not a non-negative integer offset")]
    Offset(String),

    #[error("'{0}' is not a positive integer count")]
    Count(String),
}

/// One client request: a page of up to `count` words starting at `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: usize,
    pub count: usize,
}

impl PageRequest {
    /// Decode a raw request line.
    ///
    /// The line is split on the first comma; both sides must parse as
    /// base-10 integers, the offset non-negative and the count strictly
    /// positive. Anything else is a [`MalformedRequest`] in full, never a
    /// partially decoded request.
    pub fn decode(line: &str) -> Result<Self, MalformedRequest> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (offset, count) = line
            .split_once(',')
            .ok_or_else(|| MalformedRequest::Shape(line.to_string()))?;

        let offset = offset
            .trim()
            .parse::<usize>()
            .map_err(|_| MalformedRequest::Offset(offset.trim().to_string()))?;
        let count = count
            .trim()
            .parse::<usize>()
            .map_err(|_| MalformedRequest::Count(count.trim().to_string()))?;
        if count == 0 {
            return Err(MalformedRequest::Count(count.to_string()));
        }

        Ok(Self { offset, count })
    }
}

impl fmt::Display for PageRequest {
    /// Wire form: `offset,count` followed by a newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{},{}", self.offset, self.count)
    }
}
