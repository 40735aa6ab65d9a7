use std::{
    io::{Read, Write},
    net::{SocketAddr, TcpListener},
    sync::Arc,
};

use log::{info, warn};

use crate::{
    WordSequence,
    protocol::{LineTransport, Page},
};

use super::{ThreadPool, transport::TransportError};

/// Number of connections served concurrently.
const POOL_SIZE: usize = 15;

/// TCP server handing out pages of a fixed word sequence.
///
/// The sequence is loaded before the server is constructed and shared
/// read-only with every connection handler; each connection carries its own
/// cursor (the client resends the offset with every request), so handlers
/// are fully independent.
pub struct WordServer {
    address: SocketAddr,
    words: Arc<WordSequence>,
    pool: ThreadPool,
}

impl WordServer {
    pub fn new(address: SocketAddr, words: WordSequence) -> Self {
        Self {
            address,
            words: Arc::new(words),
            pool: ThreadPool::new(POOL_SIZE),
        }
    }

    /// Bind and serve connections until the process is terminated.
    ///
    /// Per-connection failures are logged and contained; only a failure to
    /// bind the listener is returned.
    pub fn listen(self) -> Result<(), TransportError> {
        let listener = TcpListener::bind(self.address)?;
        info!("listening at {}", self.address);
        self.serve(listener)
    }

    /// Serve connections from an already-bound listener, dispatching each
    /// one to the worker pool.
    pub fn serve(self, listener: TcpListener) -> Result<(), TransportError> {
        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    let words = Arc::clone(&self.words);
                    self.pool.execute(move || {
                        if let Err(e) = handle_connection(stream, &words) {
                            warn!("connection ended with error: {e}");
                        }
                    });
                }
                Err(e) => warn!("broken connection: {e:?}"),
            }
        }
        Ok(())
    }
}

/// Serve one connection to completion.
///
/// Repeats read-request/send-page exchanges until a terminal page has been
/// sent, the request is malformed (answered with `EOF\n`), or the peer
/// closes the connection. All three paths release the connection; only
/// transport-level I/O failures are returned to the caller.
pub(crate) fn handle_connection<T: Read + Write>(
    stream: T,
    words: &WordSequence,
) -> Result<(), TransportError> {
    let mut transport = LineTransport::new(stream);

    loop {
        let req = match transport.read_request() {
            Ok(req) => req,
            Err(TransportError::ConnectionClosed) => return Ok(()),
            Err(TransportError::Malformed(e)) => {
                warn!("malformed request: {e}");
                transport.write_page(&Page::end_of_data())?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        info!("received request: {req:?}");

        let page: Page = words.slice(req.offset, req.count).into();
        let terminal = page.terminal;
        transport.write_page(&page)?;

        if terminal {
            return Ok(());
        }
    }
}
