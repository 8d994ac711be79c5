//! Outbound ports - Interfaces for external services
//!
//! These ports define the contracts that infrastructure adapters must implement,
//! allowing the store, session and API wrapper to talk to the server without
//! depending on concrete HTTP implementations.

pub mod api_error;
pub mod event_source_port;
pub mod raw_api_port;
pub mod testing;

pub use api_error::ApiError;
pub use event_source_port::{EventSourcePort, EventStream, StreamError};
pub use raw_api_port::RawApiPort;

#[cfg(any(test, feature = "testing"))]
pub use raw_api_port::MockRawApiPort;
#[cfg(any(test, feature = "testing"))]
pub use testing::ScriptedEventSource;
