use std::io::{self, BufRead, BufReader, Read, Write};

use thiserror::Error;

use super::{MalformedRequest, Page, PageRequest};

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Transport IO Error: {0}")]
    Io(#[from] io::Error),

    #[error("peer closed the connection")]
    ConnectionClosed,

    #[error(transparent)]
    Malformed(#[from] MalformedRequest),
}

/// Line-oriented message transport over a bidirectional stream.
///
/// The protocol is strictly one message per line and never pipelined, so
/// each read blocks until a full newline-terminated line arrives. A peer
/// close before the newline surfaces as [`TransportError::ConnectionClosed`]
/// rather than a truncated message.
pub struct LineTransport<T: Read + Write> {
    stream: BufReader<T>,
}

impl<T: Read + Write> LineTransport<T> {
    pub fn new(stream: T) -> Self {
        Self {
            stream: BufReader::new(stream),
        }
    }

    /// Direct access to the underlying stream.
    pub fn stream_mut(&mut self) -> &mut T {
        self.stream.get_mut()
    }

    pub fn write_request(&mut self, req: PageRequest) -> Result<(), TransportError> {
        self.write_line(&req.to_string())
    }

    pub fn write_page(&mut self, page: &Page) -> Result<(), TransportError> {
        self.write_line(&page.to_string())
    }

    pub fn read_request(&mut self) -> Result<PageRequest, TransportError> {
        let line = self.read_line()?;
        Ok(PageRequest::decode(&line)?)
    }

    pub fn read_page(&mut self) -> Result<Page, TransportError> {
        let line = self.read_line()?;
        Ok(Page::decode(&line))
    }

    fn write_line(&mut self, line: &str) -> Result<(), TransportError> {
        let stream = self.stream.get_mut();
        stream.write_all(line.as_bytes())?;
        stream.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<String, TransportError> {
        let mut line = String::new();
        let n = self.stream.read_line(&mut line)?;
        // n == 0 is a clean close; data without a newline means the peer
        // went away mid-message. Both end the session.
        if n == 0 || !line.ends_with('\n') {
            return Err(TransportError::ConnectionClosed);
        }
        Ok(line)
    }
}
