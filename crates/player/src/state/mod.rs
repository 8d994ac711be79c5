//! Client-side entity store.
//!
//! - `events`: what the store can be told
//! - `reducer`: pure `(snapshot, event) -> snapshot'`
//! - `store`: publishes snapshots to readers and subscribers
//! - `projection`: role-aware views for rendering

mod events;
mod projection;
mod reducer;
mod snapshot;
mod store;

pub use events::StoreEvent;
pub use projection::{
    ActionView, Affordances, CharacterView, FieldView, OwnerView, Projection, ProjectionCache,
    Viewer,
};
pub use reducer::{Ignored, Reducer, Reduction, UnassignPolicy};
pub use snapshot::Snapshot;
pub use store::EntityStore;
