//! Incremental decoder for the server-sent-events wire format.
//!
//! The subscription body arrives as arbitrary byte chunks; records are
//! `field: value` lines terminated by a blank line.  The decoder buffers
//! partial lines across chunks, so a record split anywhere decodes the
//! same as one delivered whole.

/// One decoded event: its type plus the joined `data` payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    pub event: String,
    pub data: String,
}

#[derive(Debug, Default)]
pub struct SseDecoder {
    buf: Vec<u8>,
    event: Option<String>,
    data: Vec<String>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk of body bytes; returns every event the chunk completed.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        self.buf.extend_from_slice(chunk);
        let mut out = Vec::new();

        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let raw: Vec<u8> = self.buf.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&raw);
            let line = line.trim_end_matches(['\n', '\r']);

            if line.is_empty() {
                // Blank line ends the record
                if let Some(ev) = self.take_pending() {
                    out.push(ev);
                }
            } else {
                self.field(line);
            }
        }
        out
    }

    fn field(&mut self, line: &str) {
        // Lines starting with ':' are comments (keep-alives); drop them
        if line.starts_with(':') {
            return;
        }
        let (name, value) = match line.split_once(':') {
            Some((n, v)) => (n, v.strip_prefix(' ').unwrap_or(v)),
            None => (line, ""),
        };
        match name {
            "event" => self.event = Some(value.to_string()),
            "data" => self.data.push(value.to_string()),
            // id / retry are irrelevant to this consumer
            _ => {}
        }
    }

    fn take_pending(&mut self) -> Option<SseEvent> {
        let event = self
            .event
            .take()
            .unwrap_or_else(|| "message".to_string());
        if self.data.is_empty() {
            return None;
        }
        let data = std::mem::take(&mut self.data).join("\n");
        Some(SseEvent { event, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_record() {
        let mut dec = SseDecoder::new();
        let events = dec.feed(b"event: message\ndata: {\"streamTitle\":\"x\"}\n\n");
        assert_eq!(
            events,
            vec![SseEvent {
                event: "message".to_string(),
                data: "{\"streamTitle\":\"x\"}".to_string(),
            }]
        );
    }

    #[test]
    fn test_event_type_defaults_to_message() {
        let mut dec = SseDecoder::new();
        let events = dec.feed(b"data: hello\n\n");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event, "message");
        assert_eq!(events[0].data, "hello");
    }

    #[test]
    fn test_multi_line_data_joined_with_newline() {
        let mut dec = SseDecoder::new();
        let events = dec.feed(b"data: first\ndata: second\n\n");
        assert_eq!(events[0].data, "first\nsecond");
    }

    #[test]
    fn test_comment_lines_ignored() {
        let mut dec = SseDecoder::new();
        let events = dec.feed(b": keep-alive\n\ndata: real\n\n");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].data, "real");
    }

    #[test]
    fn test_record_split_across_chunks() {
        let mut dec = SseDecoder::new();
        assert!(dec.feed(b"event: mes").is_empty());
        assert!(dec.feed(b"sage\ndata: ti").is_empty());
        let events = dec.feed(b"tle\n\n");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event, "message");
        assert_eq!(events[0].data, "title");
    }

    #[test]
    fn test_crlf_line_endings() {
        let mut dec = SseDecoder::new();
        let events = dec.feed(b"event: message\r\ndata: x\r\n\r\n");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].data, "x");
    }

    #[test]
    fn test_blank_lines_without_data_yield_nothing() {
        let mut dec = SseDecoder::new();
        assert!(dec.feed(b"\n\n\n").is_empty());
        assert!(dec.feed(b"event: message\n\n").is_empty());
    }

    #[test]
    fn test_two_records_in_one_chunk() {
        let mut dec = SseDecoder::new();
        let events = dec.feed(b"data: a\n\ndata: b\n\n");
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].data, "a");
        assert_eq!(events[1].data, "b");
    }

    #[test]
    fn test_unknown_fields_dropped() {
        let mut dec = SseDecoder::new();
        let events = dec.feed(b"id: 42\nretry: 1000\ndata: payload\n\n");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].data, "payload");
    }
}
