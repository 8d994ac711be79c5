//! NPC Surprise player client.
//!
//! Keeps a local copy of the game table in sync with the server's event
//! stream and renders role-aware views of it:
//! - `state`: entity store, reducer and projections
//! - `application`: typed command API and the stream session
//! - `ports`: outbound boundaries (HTTP commands, event source)
//! - `infrastructure`: reqwest/SSE adapters and wire-to-store translation
//! - `runner`: configuration and the command-line run loop

pub mod application;
pub mod infrastructure;
pub mod ports;
pub mod runner;
pub mod state;
