//! Incremental decoder for `text/event-stream` bodies.
//!
//! Network chunks do not line up with SSE events (or even with UTF-8
//! character boundaries), so bytes are buffered until a blank line closes
//! an event. Only `data:` fields are kept; `event:`, `id:`, `retry:` and
//! comment lines are ignored.

/// Buffers raw bytes and yields the `data` payload of each complete event.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a network chunk; returns the payloads of all events it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        // CR only ever appears as part of a line terminator in the framing
        self.buffer.extend(chunk.iter().copied().filter(|b| *b != b'\r'));

        let mut payloads = Vec::new();
        while let Some(end) = find_event_end(&self.buffer) {
            let event: Vec<u8> = self.buffer.drain(..end + 2).collect();
            if let Some(data) = parse_event(&event[..end]) {
                payloads.push(data);
            }
        }
        payloads
    }

    /// Flush a trailing event that was not followed by a blank line.
    pub fn finish(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.buffer);
        parse_event(&rest)
    }
}

fn find_event_end(buffer: &[u8]) -> Option<usize> {
    buffer.windows(2).position(|w| w == b"\n\n")
}

fn parse_event(raw: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(raw);
    let mut data_lines = Vec::new();

    for line in text.lines() {
        if let Some(value) = line.strip_prefix("data:") {
            data_lines.push(value.strip_prefix(' ').unwrap_or(value));
        }
    }

    if data_lines.is_empty() {
        None
    } else {
        Some(data_lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_complete_events() {
        let mut decoder = SseDecoder::new();
        let payloads = decoder.push(b"data: {\"a\":1}\n\ndata: {\"b\":2}\n\n");
        assert_eq!(payloads, vec!["{\"a\":1}", "{\"b\":2}"]);
    }

    #[test]
    fn buffers_events_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(b"data: {\"te").is_empty());
        assert!(decoder.push(b"xt\":\"hi\"}\n").is_empty());
        assert_eq!(decoder.push(b"\n"), vec!["{\"text\":\"hi\"}"]);
    }

    #[test]
    fn handles_crlf_framing() {
        let mut decoder = SseDecoder::new();
        let payloads = decoder.push(b"data: one\r\n\r\ndata: two\r\n\r\n");
        assert_eq!(payloads, vec!["one", "two"]);
    }

    #[test]
    fn keeps_multibyte_characters_split_across_chunks() {
        let bytes = "data: こんにちは\n\n".as_bytes();
        let mut decoder = SseDecoder::new();
        // Split inside the first multi-byte character
        assert!(decoder.push(&bytes[..7]).is_empty());
        assert_eq!(decoder.push(&bytes[7..]), vec!["こんにちは"]);
    }

    #[test]
    fn joins_multi_line_data_and_ignores_other_fields() {
        let mut decoder = SseDecoder::new();
        let payloads = decoder.push(b": keep-alive\nevent: message\nid: 7\ndata: a\ndata: b\n\n");
        assert_eq!(payloads, vec!["a\nb"]);
    }

    #[test]
    fn events_without_data_are_dropped() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(b": ping\n\n").is_empty());
    }

    #[test]
    fn finish_flushes_unterminated_event() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(b"data: last").is_empty());
        assert_eq!(decoder.finish(), Some("last".to_string()));
        assert_eq!(decoder.finish(), None);
    }
}
