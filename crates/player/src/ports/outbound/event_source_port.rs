//! Event Source Port - the persistent push connection
//!
//! An event source yields one raw JSON payload per pushed message, in the
//! order the transport delivered them. Decoding and reduction happen above
//! this port.

use futures_util::stream::BoxStream;
use thiserror::Error;

/// Raw message payloads from one open connection.
pub type EventStream = BoxStream<'static, Result<String, StreamError>>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    #[error("failed to connect to event stream: {0}")]
    Connect(String),
    #[error("event stream rejected the session")]
    Unauthorized,
    #[error("event stream answered with status {0}")]
    Status(u16),
    #[error("event stream transport error: {0}")]
    Transport(String),
    #[error("event stream closed by server")]
    Closed,
}

#[async_trait::async_trait]
pub trait EventSourcePort: Send + Sync {
    /// Where the stream is opened, for logging.
    fn describe(&self) -> String;

    /// Open a new connection. Each call opens an independent connection.
    async fn open(&self) -> Result<EventStream, StreamError>;
}
