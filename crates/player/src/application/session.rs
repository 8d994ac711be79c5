//! Stream session: one live event-stream connection feeding the store.
//!
//! `start()` spawns a task that opens the connection, decodes each payload,
//! translates it and applies it to the [`EntityStore`]. Bad payloads are
//! logged and dropped. A transport failure ends the session and resets the
//! store's session status to unauthenticated; retrying is up to the caller.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use futures_util::StreamExt;
use npc_surprise_shared::decode_server_message;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::infrastructure::message_translator::translate;
use crate::ports::outbound::{EventSourcePort, StreamError};
use crate::state::{EntityStore, StoreEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Connected,
    /// Ended by the handle.
    Closed,
    /// Ended by the transport.
    Failed,
}

impl ConnectionState {
    fn to_u8(self) -> u8 {
        match self {
            ConnectionState::Connecting => 0,
            ConnectionState::Connected => 1,
            ConnectionState::Closed => 2,
            ConnectionState::Failed => 3,
        }
    }

    fn from_u8(v: u8) -> Self {
        match v {
            1 => ConnectionState::Connected,
            2 => ConnectionState::Closed,
            3 => ConnectionState::Failed,
            _ => ConnectionState::Connecting,
        }
    }
}

/// How a session task ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    Cancelled,
    TransportError(StreamError),
}

pub struct StreamSession {
    store: EntityStore,
    source: Arc<dyn EventSourcePort>,
}

impl StreamSession {
    pub fn new(store: EntityStore, source: Arc<dyn EventSourcePort>) -> Self {
        Self { store, source }
    }

    /// Opens the connection in a background task. Must be called inside a
    /// tokio runtime.
    ///
    /// Starting a second session against the same store without cancelling
    /// the first leaves both connections feeding it.
    pub fn start(self) -> SessionHandle {
        let cancel = CancellationToken::new();
        let state = Arc::new(AtomicU8::new(ConnectionState::Connecting.to_u8()));

        let task = tokio::spawn(run_session(
            self.store,
            self.source,
            cancel.clone(),
            state.clone(),
        ));

        SessionHandle {
            cancel,
            state,
            task: Some(task),
        }
    }
}

async fn run_session(
    store: EntityStore,
    source: Arc<dyn EventSourcePort>,
    cancel: CancellationToken,
    state: Arc<AtomicU8>,
) -> SessionEnd {
    let target = source.describe();
    tracing::info!(source = %target, "Opening event stream");

    let opened = tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        opened = source.open() => Some(opened),
    };

    let mut stream = match opened {
        None => return finish(&state, SessionEnd::Cancelled),
        Some(Ok(stream)) => stream,
        Some(Err(e)) => return fail(&store, &state, e),
    };

    state.store(ConnectionState::Connected.to_u8(), Ordering::SeqCst);
    tracing::info!(source = %target, "Event stream connected");

    loop {
        let next = tokio::select! {
            biased;
            _ = cancel.cancelled() => return finish(&state, SessionEnd::Cancelled),
            next = stream.next() => next,
        };

        match next {
            Some(Ok(payload)) => match decode_server_message(&payload) {
                Ok(message) => {
                    store.apply(translate(message));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Dropping undecodable stream message");
                }
            },
            Some(Err(e)) => return fail(&store, &state, e),
            None => return fail(&store, &state, StreamError::Closed),
        }
    }
}

fn finish(state: &AtomicU8, end: SessionEnd) -> SessionEnd {
    state.store(ConnectionState::Closed.to_u8(), Ordering::SeqCst);
    tracing::info!("Event stream closed");
    end
}

fn fail(store: &EntityStore, state: &AtomicU8, error: StreamError) -> SessionEnd {
    state.store(ConnectionState::Failed.to_u8(), Ordering::SeqCst);
    tracing::error!(error = %error, "Event stream failed");
    store.apply(StoreEvent::StatusChanged(None));
    SessionEnd::TransportError(error)
}

/// Owns a running session. Dropping the handle cancels the session.
pub struct SessionHandle {
    cancel: CancellationToken,
    state: Arc<AtomicU8>,
    task: Option<JoinHandle<SessionEnd>>,
}

impl SessionHandle {
    /// Closes the connection. Safe to call any number of times.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn state(&self) -> ConnectionState {
        ConnectionState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Waits for the session task to end. Returns `None` once the outcome
    /// has already been taken, or if the task panicked.
    pub async fn finished(&mut self) -> Option<SessionEnd> {
        let task = self.task.as_mut()?;
        let result = task.await;
        self.task = None;
        match result {
            Ok(end) => Some(end),
            Err(e) => {
                tracing::error!(error = %e, "Stream session task failed");
                None
            }
        }
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
