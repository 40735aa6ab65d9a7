//! Client-server communication protocol.
//!
//! This module defines the communication protocol used between word clients
//! and servers, including the wire format, transport abstraction, and the
//! session loops on both ends. It provides everything required to encode,
//! decode, and exchange page requests and pages over the network.
//!
//! # Overview
//!
//! A server holds an immutable [`WordSequence`](crate::WordSequence) and
//! serves it in fixed-size pages. A client walks the sequence by sending
//! successive offset/count requests and accumulating word frequency counts
//! until the server signals end of data.
//!
//! Messages are plain text, one per line:
//!
//! - Client to server: `<offset>,<count>\n`, both decimal integers.
//! - Server to client: `<word1>,<word2>,...[,EOF]\n`, where a final `EOF`
//!   field marks the page that reaches the end of the sequence. The
//!   minimum valid response is `EOF\n`.
//!
//! The protocol is not pipelined: within one connection, a new request is
//! sent only after the previous response has been fully received, so
//! responses are strictly ordered 1:1 with requests.
//!
//! # Key Components
//!
//! - [`PageRequest`] / [`Page`]: the two message types and their wire
//!   encodings.
//! - [`LineTransport`]: line-oriented message exchange over a
//!   bidirectional stream (e.g., TCP).
//! - [`WordServer`]: accept loop dispatching each connection to a worker.
//! - [`ClientDriver`]: the client session loop and its
//!   [`FrequencyTable`].
//!
//! # Error Containment
//!
//! Per-connection failures never escape their connection: a malformed
//! request is answered with the terminal empty page and the connection is
//! closed; a peer disconnect mid-session ends that session with whatever
//! state was already accumulated. Only startup failures (bind, connect)
//! propagate to the process.
//!
//! # See Also
//!
//! - [`words`](crate::words): the storage layer the server pages out of.
mod client;
mod request;
mod response;
mod server;
mod thread;
mod transport;

use thread::ThreadPool;

pub use client::{ClientDriver, FrequencyTable};
pub use request::{MalformedRequest, PageRequest};
pub use response::{EOF_SENTINEL, Page};
pub use server::WordServer;
pub use transport::{LineTransport, TransportError};
