//! Server-sent event stream adapter.

mod sse;

pub use sse::SseDecoder;

use std::collections::VecDeque;

use async_trait::async_trait;
use futures_util::stream::{self, BoxStream, StreamExt};
use reqwest::header::{ACCEPT, CACHE_CONTROL};
use reqwest::{Client, StatusCode};
use url::Url;

use crate::ports::outbound::{EventSourcePort, EventStream, StreamError};

/// Opens `GET {base}/stream` and decodes the SSE body into raw payloads.
#[derive(Clone)]
pub struct SseEventSource {
    client: Client,
    url: Url,
}

impl SseEventSource {
    pub fn new(client: Client, url: Url) -> Self {
        Self { client, url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

fn status_error(status: StatusCode) -> Option<StreamError> {
    match status {
        status if status.is_success() => None,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Some(StreamError::Unauthorized),
        status => Some(StreamError::Status(status.as_u16())),
    }
}

struct ReadState {
    body: BoxStream<'static, reqwest::Result<Vec<u8>>>,
    decoder: SseDecoder,
    pending: VecDeque<String>,
    done: bool,
}

#[async_trait]
impl EventSourcePort for SseEventSource {
    fn describe(&self) -> String {
        self.url.to_string()
    }

    async fn open(&self) -> Result<EventStream, StreamError> {
        let response = self
            .client
            .get(self.url.clone())
            .header(ACCEPT, "text/event-stream")
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|e| StreamError::Connect(e.to_string()))?;

        if let Some(err) = status_error(response.status()) {
            return Err(err);
        }

        let state = ReadState {
            body: response
                .bytes_stream()
                .map(|chunk| chunk.map(|bytes| bytes.to_vec()))
                .boxed(),
            decoder: SseDecoder::new(),
            pending: VecDeque::new(),
            done: false,
        };

        let payloads = stream::unfold(state, |mut state| async move {
            loop {
                if let Some(payload) = state.pending.pop_front() {
                    return Some((Ok(payload), state));
                }
                if state.done {
                    return None;
                }
                match state.body.next().await {
                    Some(Ok(chunk)) => {
                        let decoded = state.decoder.feed(&chunk);
                        state.pending.extend(decoded);
                    }
                    Some(Err(e)) => {
                        state.done = true;
                        return Some((Err(StreamError::Transport(e.to_string())), state));
                    }
                    None => return None,
                }
            }
        });

        Ok(payloads.boxed())
    }
}
