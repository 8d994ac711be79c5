//! The entity store: one published [`Snapshot`], replaced per event.
//!
//! Readers hold `Arc<Snapshot>` values and never observe a half-applied
//! event. Subscribers are woken once per event that changed something.

use std::sync::Arc;

use npc_surprise_shared::{Character, Player, SessionStatus};
use tokio::sync::watch;

use super::events::StoreEvent;
use super::reducer::{Ignored, Reducer, Reduction};
use super::snapshot::Snapshot;

struct StoreInner {
    tx: watch::Sender<Arc<Snapshot>>,
    reducer: Reducer,
}

/// Cheap-to-clone handle on the shared store.
#[derive(Clone)]
pub struct EntityStore {
    inner: Arc<StoreInner>,
}

impl EntityStore {
    pub fn new(reducer: Reducer) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(Snapshot::default()));
        Self {
            inner: Arc::new(StoreInner { tx, reducer }),
        }
    }

    /// Applies one event. Returns whether the snapshot changed.
    ///
    /// The reducer runs while the channel's write lock is held, so concurrent
    /// callers are serialized and each event is applied whole.
    pub fn apply(&self, event: StoreEvent) -> bool {
        let name = event.name();
        let reducer = self.inner.reducer;
        let mut ignored: Option<Ignored> = None;

        let changed = self.inner.tx.send_if_modified(|current| {
            match reducer.reduce(current, event) {
                Reduction::Applied(next) => {
                    *current = Arc::new(next);
                    true
                }
                Reduction::Ignored(reason) => {
                    ignored = Some(reason);
                    false
                }
            }
        });

        match ignored {
            Some(Ignored::Unchanged) => {
                tracing::trace!(event = name, "Event produced no change");
            }
            Some(reason) => {
                tracing::warn!(event = name, %reason, "Event ignored");
            }
            None => {
                tracing::debug!(
                    event = name,
                    revision = self.inner.tx.borrow().revision(),
                    "Event applied"
                );
            }
        }
        changed
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.inner.tx.borrow().clone()
    }

    pub fn players(&self) -> Vec<Player> {
        self.snapshot().players().to_vec()
    }

    pub fn characters(&self) -> Vec<Character> {
        self.snapshot().characters().to_vec()
    }

    pub fn status(&self) -> Option<SessionStatus> {
        self.snapshot().status().cloned()
    }

    pub fn reducer(&self) -> Reducer {
        self.inner.reducer
    }

    /// Receiver that is marked changed on every applied event.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.inner.tx.subscribe()
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new(Reducer::default())
    }
}
