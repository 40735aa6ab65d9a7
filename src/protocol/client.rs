use std::{
    collections::BTreeMap,
    fmt,
    io::{Read, Write},
    net::{SocketAddr, TcpStream},
};

use log::{debug, warn};

use super::{LineTransport, PageRequest, transport::TransportError};

/// Per-session word frequency counts.
///
/// Keys are unique words; iteration order is lexicographic, which is also
/// the order the final report is printed in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<String, u64>,
}

impl FrequencyTable {
    pub fn add(&mut self, word: &str) {
        *self.counts.entry(word.to_string()).or_insert(0) += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn into_counts(self) -> BTreeMap<String, u64> {
        self.counts
    }
}

impl fmt::Display for FrequencyTable {
    /// One `word, count` line per distinct word.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (word, count) in &self.counts {
            writeln!(f, "{word}, {count}")?;
        }
        Ok(())
    }
}

/// Client-side session loop.
///
/// Walks the server's word sequence with fixed-size page requests,
/// advancing the offset by the page size after each non-terminal page, and
/// accumulates a [`FrequencyTable`] until the server signals end of data or
/// the connection is lost.
pub struct ClientDriver<T: Read + Write> {
    transport: LineTransport<T>,
    offset: usize,
    page_size: usize,
}

impl ClientDriver<TcpStream> {
    /// Connect to a server and prepare a session starting at `offset`.
    ///
    /// A connect failure is fatal at startup, unlike failures mid-session.
    pub fn connect(
        address: SocketAddr,
        offset: usize,
        page_size: usize,
    ) -> Result<Self, TransportError> {
        let stream = TcpStream::connect(address)?;
        Ok(Self::new(stream, offset, page_size))
    }
}

impl<T: Read + Write> ClientDriver<T> {
    pub fn new(stream: T, offset: usize, page_size: usize) -> Self {
        assert!(page_size > 0);
        Self {
            transport: LineTransport::new(stream),
            offset,
            page_size,
        }
    }

    /// Run the session to completion and return the accumulated counts.
    ///
    /// A lost connection ends the session at whatever state was reached;
    /// the partial counts are valid output, not an error.
    pub fn run(mut self) -> FrequencyTable {
        let mut freq = FrequencyTable::default();

        loop {
            let req = PageRequest {
                offset: self.offset,
                count: self.page_size,
            };
            if let Err(e) = self.transport.write_request(req) {
                warn!("session ended while sending request: {e}");
                break;
            }

            let page = match self.transport.read_page() {
                Ok(page) => page,
                Err(TransportError::ConnectionClosed) => {
                    debug!("server closed the connection");
                    break;
                }
                Err(e) => {
                    warn!("session ended while reading page: {e}");
                    break;
                }
            };

            for token in &page.tokens {
                freq.add(token);
            }
            if page.terminal {
                break;
            }
            self.offset += self.page_size;
        }

        freq
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::RefCell,
        io::{self, Cursor},
        rc::Rc,
    };

    use super::*;

    /// In-memory stream: reads come from a script, writes are captured and
    /// stay observable after the driver consumes the stream.
    struct Duplex {
        input: Cursor<Vec<u8>>,
        output: Rc<RefCell<Vec<u8>>>,
    }

    impl Duplex {
        fn new(input: &[u8]) -> Self {
            Self {
                input: Cursor::new(input.to_vec()),
                output: Rc::new(RefCell::new(Vec::new())),
            }
        }

        fn output(&self) -> Rc<RefCell<Vec<u8>>> {
            Rc::clone(&self.output)
        }
    }

    impl Read for Duplex {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.input.read(buf)
        }
    }

    impl Write for Duplex {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.output.borrow_mut().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn accumulates_until_sentinel() {
        let stream = Duplex::new(b"a,b\nc,d\ne,EOF\n");
        let freq = ClientDriver::new(stream, 0, 2).run();

        let counts = freq.into_counts();
        assert_eq!(counts.len(), 5);
        assert!(counts.values().all(|&c| c == 1));
    }

    #[test]
    fn counts_duplicates() {
        let stream = Duplex::new(b"x,x,x,EOF\n");
        let freq = ClientDriver::new(stream, 0, 5).run();

        assert_eq!(freq.into_counts().get("x"), Some(&3));
    }

    #[test]
    fn sentinel_contributes_nothing() {
        let stream = Duplex::new(b"EOF\n");
        let freq = ClientDriver::new(stream, 0, 5).run();

        assert!(freq.is_empty());
    }

    #[test]
    fn peer_close_keeps_partial_counts() {
        // Two pages, then the stream ends without a sentinel.
        let stream = Duplex::new(b"a,b\nc,d\n");
        let freq = ClientDriver::new(stream, 0, 2).run();

        assert_eq!(freq.into_counts().len(), 4);
    }

    #[test]
    fn immediate_close_yields_empty_counts() {
        let stream = Duplex::new(b"");
        let freq = ClientDriver::new(stream, 0, 2).run();

        assert!(freq.is_empty());
    }

    #[test]
    fn requests_advance_by_page_size() {
        let stream = Duplex::new(b"a,b\nc,d\ne,EOF\n");
        let output = stream.output();

        ClientDriver::new(stream, 0, 2).run();

        let sent = String::from_utf8(output.borrow().clone()).unwrap();
        assert_eq!(sent, "0,2\n2,2\n4,2\n");
    }

    #[test]
    fn initial_offset_comes_from_construction() {
        let stream = Duplex::new(b"e,EOF\n");
        let output = stream.output();

        let freq = ClientDriver::new(stream, 4, 2).run();

        let sent = String::from_utf8(output.borrow().clone()).unwrap();
        assert_eq!(sent, "4,2\n");
        assert_eq!(freq.into_counts().get("e"), Some(&1));
    }

    #[test]
    fn report_is_sorted_word_comma_count() {
        let mut freq = FrequencyTable::default();
        freq.add("beta");
        freq.add("alpha");
        freq.add("beta");

        assert_eq!(freq.to_string(), "alpha, 1\nbeta, 2\n");
    }
}
