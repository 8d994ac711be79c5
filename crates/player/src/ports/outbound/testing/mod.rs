//! Test utilities for outbound ports
//!
//! `MockRawApiPort` is generated by mockall next to the trait. This module adds
//! a scripted event source for driving stream sessions without a network.
//! Both are available under `cfg(test)` or with the `testing` feature.

#[cfg(any(test, feature = "testing"))]
mod scripted_event_source;

#[cfg(any(test, feature = "testing"))]
pub use scripted_event_source::ScriptedEventSource;
