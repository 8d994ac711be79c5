//! Raw API Port - Object-safe HTTP boundary
//!
//! The typed command surface (`application::api::Api`) is generic over
//! request/response types, which is not object-safe. `RawApiPort` is the
//! object-safe boundary implemented by adapters; it speaks `serde_json::Value`
//! and paths relative to the API base URL.

use serde_json::Value;

use super::ApiError;

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait::async_trait]
pub trait RawApiPort: Send + Sync {
    async fn get_json(&self, path: &str) -> Result<Value, ApiError>;

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ApiError>;

    async fn put_json(&self, path: &str, body: &Value) -> Result<Value, ApiError>;

    /// PUT without a body; any response body is discarded.
    async fn put_empty(&self, path: &str) -> Result<(), ApiError>;

    async fn delete(&self, path: &str) -> Result<(), ApiError>;
}
