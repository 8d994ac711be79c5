//! Incremental `text/event-stream` decoder.
//!
//! Feed it raw body chunks in arrival order; it yields the `data` payload of
//! every complete `message` event. Lines end with `\n`, `\r\n` or a lone `\r`.
//! Chunk boundaries may fall anywhere, including inside a UTF-8 sequence or
//! between `\r` and `\n`.

#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    data: Vec<String>,
    event: Option<String>,
    /// The last line ended with `\r`; a leading `\n` belongs to it.
    after_cr: bool,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes one chunk, returning payloads completed by it (in order).
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut out = Vec::new();
        loop {
            if self.after_cr && !self.buffer.is_empty() {
                if self.buffer.first() == Some(&b'\n') {
                    self.buffer.remove(0);
                }
                self.after_cr = false;
            }
            let Some(pos) = self
                .buffer
                .iter()
                .position(|b| *b == b'\n' || *b == b'\r')
            else {
                break;
            };
            let raw: Vec<u8> = self.buffer.drain(..=pos).collect();
            self.after_cr = raw[pos] == b'\r';
            let line = String::from_utf8_lossy(&raw[..pos]).into_owned();
            if let Some(payload) = self.line(&line) {
                out.push(payload);
            }
        }
        out
    }

    fn line(&mut self, line: &str) -> Option<String> {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "data" => self.data.push(value.to_string()),
            "event" => self.event = Some(value.to_string()),
            // id / retry: reconnection is not automatic here
            _ => {}
        }
        None
    }

    fn dispatch(&mut self) -> Option<String> {
        let event = self.event.take();
        if self.data.is_empty() {
            return None;
        }
        let payload = self.data.join("\n");
        self.data.clear();

        match event.as_deref() {
            None | Some("") | Some("message") => Some(payload),
            Some(other) => {
                tracing::trace!(event = other, "Skipping non-message SSE event");
                None
            }
        }
    }
}
