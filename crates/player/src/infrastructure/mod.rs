pub mod http_client;
pub mod message_translator;
pub mod stream;

pub mod testing;

pub use http_client::{create_transport, ApiAdapter, Transport};
pub use stream::SseEventSource;
