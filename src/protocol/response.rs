use std::fmt;

use crate::words::WordSlice;

/// Field literal marking the end of the word sequence.
///
/// A field equal to this string is a sentinel, never a word.
pub const EOF_SENTINEL: &str = "EOF";

/// One server response: a bounded batch of words, plus whether the batch
/// reaches the end of the sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub tokens: Vec<String>,
    pub terminal: bool,
}

impl Page {
    /// The empty terminal page, wire form `EOF\n`.
    ///
    /// Sent when the requested offset is already past the end, and as the
    /// recovery answer to a malformed request.
    pub fn end_of_data() -> Self {
        Self {
            tokens: Vec::new(),
            terminal: true,
        }
    }

    /// Decode a received response line.
    ///
    /// Trailing CR/LF is stripped, the line is split on commas, each field
    /// is trimmed and empty fields are dropped. A field exactly equal to
    /// [`EOF_SENTINEL`] marks the page terminal and ends accumulation;
    /// nothing after it is treated as a word.
    pub fn decode(line: &str) -> Self {
        let mut page = Page::default();

        for field in line.trim_end_matches(['\r', '\n']).split(',') {
            let field = field.trim();
            if field.is_empty() {
                continue;
            }
            if field == EOF_SENTINEL {
                page.terminal = true;
                break;
            }
            page.tokens.push(field.to_string());
        }

        page
    }
}

impl From<WordSlice> for Page {
    /// A slice that exhausts the sequence becomes a terminal page.
    fn from(slice: WordSlice) -> Self {
        Self {
            tokens: slice.words,
            terminal: slice.exhausted,
        }
    }
}

impl fmt::Display for Page {
    /// Wire form: comma-separated words, a trailing `EOF` field when the
    /// page is terminal, and a single newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for token in &self.tokens {
            if !first {
                f.write_str(",")?;
            }
            f.write_str(token)?;
            first = false;
        }
        if self.terminal {
            if !first {
                f.write_str(",")?;
            }
            f.write_str(EOF_SENTINEL)?;
        }
        f.write_str("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(tokens: &[&str], terminal: bool) -> Page {
        Page {
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
            terminal,
        }
    }

    #[test]
    fn encode_non_terminal() {
        assert_eq!(page(&["a", "b"], false).to_string(), "a,b\n");
    }

    #[test]
    fn encode_terminal_with_tokens() {
        assert_eq!(page(&["e"], true).to_string(), "e,EOF\n");
    }

    #[test]
    fn encode_empty_terminal() {
        assert_eq!(Page::end_of_data().to_string(), "EOF\n");
    }

    #[test]
    fn decode_plain_page() {
        assert_eq!(Page::decode("a,b\n"), page(&["a", "b"], false));
    }

    #[test]
    fn decode_terminal_page() {
        assert_eq!(Page::decode("e,EOF\n"), page(&["e"], true));
    }

    #[test]
    fn decode_bare_sentinel() {
        assert_eq!(Page::decode("EOF\n"), Page::end_of_data());
    }

    #[test]
    fn decode_ignores_fields_after_sentinel() {
        assert_eq!(Page::decode("a,EOF,b\n"), page(&["a"], true));
    }

    #[test]
    fn decode_trims_fields_and_drops_empties() {
        assert_eq!(Page::decode(" a ,, b \r\n"), page(&["a", "b"], false));
    }

    #[test]
    fn page_from_word_slice() {
        let slice = WordSlice {
            words: vec!["a".to_string(), "b".to_string()],
            exhausted: true,
        };
        assert_eq!(Page::from(slice), page(&["a", "b"], true));

        let slice = WordSlice {
            words: vec!["a".to_string()],
            exhausted: false,
        };
        assert_eq!(Page::from(slice), page(&["a"], false));
    }

    #[test]
    fn round_trip_preserves_tokens_and_terminal() {
        for page in [
            page(&["a", "b", "c"], false),
            page(&["x", "x", "x"], true),
            Page::end_of_data(),
        ] {
            assert_eq!(Page::decode(&page.to_string()), page);
        }
    }
}
