//! Application layer: the command surface and the stream session.

pub mod api;
pub mod session;

pub use api::Api;
pub use session::{ConnectionState, SessionEnd, SessionHandle, StreamSession};
