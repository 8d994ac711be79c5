//! Player port definitions.
//!
//! Ports are the seams between the state-sync core and the two external
//! collaborators: the command API and the push event source.

pub mod outbound;
