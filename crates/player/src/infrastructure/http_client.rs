//! reqwest-backed adapters for the command API and the event stream.
//!
//! Both share one cookie jar: the session cookie set by `POST login` is what
//! authenticates the stream.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use npc_surprise_shared::ErrorResponse;
use reqwest::cookie::Jar;
use reqwest::{Client, Method, Response, StatusCode};
use serde_json::Value;
use url::Url;

use crate::infrastructure::stream::SseEventSource;
use crate::ports::outbound::{ApiError, RawApiPort};
use crate::runner::config::ClientConfig;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Command API client rooted at the API base URL.
#[derive(Clone)]
pub struct ApiAdapter {
    client: Client,
    base_url: Url,
}

impl ApiAdapter {
    pub fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::RequestFailed(format!("invalid path {path}: {e}")))
    }

    async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Response, ApiError> {
        let url = self.url(path)?;
        tracing::debug!(%method, %url, "API request");

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
        let error = ErrorResponse::from_body(status.as_u16(), &text);
        tracing::warn!(status = status.as_u16(), message = %error.message, "API request rejected");

        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ApiError::Unauthorized(error.message)
            }
            _ => ApiError::Server {
                status: status.as_u16(),
                message: error.message,
            },
        })
    }

    /// Empty bodies decode as JSON `null`.
    async fn json_body(response: Response) -> Result<Value, ApiError> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|e| ApiError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl RawApiPort for ApiAdapter {
    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        let response = self.send(Method::GET, path, None).await?;
        Self::json_body(response).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let response = self.send(Method::POST, path, Some(body)).await?;
        Self::json_body(response).await
    }

    async fn put_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let response = self.send(Method::PUT, path, Some(body)).await?;
        Self::json_body(response).await
    }

    async fn put_empty(&self, path: &str) -> Result<(), ApiError> {
        self.send(Method::PUT, path, None).await.map(|_| ())
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(Method::DELETE, path, None).await.map(|_| ())
    }
}

/// The two adapters a client session needs.
pub struct Transport {
    pub api: ApiAdapter,
    pub events: SseEventSource,
}

/// Builds both adapters over a shared cookie jar.
///
/// The stream client has no overall timeout; it only bounds connecting.
pub fn create_transport(config: &ClientConfig) -> Result<Transport, ApiError> {
    let jar = Arc::new(Jar::default());

    let api_client = Client::builder()
        .cookie_provider(jar.clone())
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(config.request_timeout)
        .build()
        .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

    let stream_client = Client::builder()
        .cookie_provider(jar)
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
        .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

    let stream_url = config
        .stream_url()
        .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

    Ok(Transport {
        api: ApiAdapter::new(api_client, config.api_base_url.clone()),
        events: SseEventSource::new(stream_client, stream_url),
    })
}
