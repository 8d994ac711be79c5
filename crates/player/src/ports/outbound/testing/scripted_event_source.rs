use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use futures_util::stream::{self, StreamExt};

use crate::ports::outbound::{EventSourcePort, EventStream, StreamError};

/// Event source that replays a fixed script.
///
/// After the scripted items the stream either ends (which a session treats as
/// the server closing the connection) or stays open forever.
pub struct ScriptedEventSource {
    script: Mutex<Option<Result<Vec<Result<String, StreamError>>, StreamError>>>,
    hold_open: bool,
    opens: AtomicUsize,
}

impl ScriptedEventSource {
    /// Yields `messages` and then stays open until cancelled.
    pub fn open_with(messages: Vec<String>) -> Self {
        Self::new(Ok(messages.into_iter().map(Ok).collect()), true)
    }

    /// Yields `items` and then ends the stream.
    pub fn then_close(items: Vec<Result<String, StreamError>>) -> Self {
        Self::new(Ok(items), false)
    }

    /// Fails to open.
    pub fn failing(error: StreamError) -> Self {
        Self::new(Err(error), false)
    }

    fn new(script: Result<Vec<Result<String, StreamError>>, StreamError>, hold_open: bool) -> Self {
        Self {
            script: Mutex::new(Some(script)),
            hold_open,
            opens: AtomicUsize::new(0),
        }
    }

    pub fn open_count(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl EventSourcePort for ScriptedEventSource {
    fn describe(&self) -> String {
        "scripted".to_string()
    }

    async fn open(&self) -> Result<EventStream, StreamError> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        let script = self
            .script
            .lock()
            .map_err(|_| StreamError::Connect("script lock poisoned".to_string()))?
            .take()
            .unwrap_or(Err(StreamError::Connect("script already consumed".to_string())))?;

        let items = stream::iter(script);
        if self.hold_open {
            Ok(items.chain(stream::pending()).boxed())
        } else {
            Ok(items.boxed())
        }
    }
}
