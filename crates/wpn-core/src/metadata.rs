//! Track-title extraction from Zeno metadata payloads.

/// Marks the start of the title field inside a metadata payload.
const TITLE_MARKER: &str = "\"streamTitle\":\"";

/// Scan a raw event payload for the stream title.
///
/// This is a best-effort substring scan, not a JSON parse: the payload is
/// only ever read between the marker and the next `"`.  Anything without
/// the marker (unrelated event kinds, malformed blobs, empty titles)
/// yields `None` and the caller moves on.
pub fn extract_stream_title(payload: &str) -> Option<String> {
    let start = payload.find(TITLE_MARKER)? + TITLE_MARKER.len();
    let rest = &payload[start..];
    let end = rest.find('"')?;
    let title = &rest[..end];
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_title_from_zeno_payload() {
        let payload = serde_json::json!({
            "streamTitle": "The Beatles - Hey Jude",
            "duration": 180000,
        })
        .to_string();
        assert_eq!(
            extract_stream_title(&payload).as_deref(),
            Some("The Beatles - Hey Jude")
        );
    }

    #[test]
    fn test_marker_absent_is_none() {
        assert_eq!(extract_stream_title("{\"listeners\": 12}"), None);
        assert_eq!(extract_stream_title(""), None);
    }

    #[test]
    fn test_unterminated_value_is_none() {
        assert_eq!(extract_stream_title("{\"streamTitle\":\"cut off"), None);
    }

    #[test]
    fn test_empty_title_is_none() {
        assert_eq!(extract_stream_title("{\"streamTitle\":\"\"}"), None);
    }

    #[test]
    fn test_marker_position_does_not_matter() {
        let payload = "junk before {\"x\":1,\"streamTitle\":\"Song\"} junk after";
        assert_eq!(extract_stream_title(payload).as_deref(), Some("Song"));
    }

    #[test]
    fn test_unicode_title() {
        let payload = "{\"streamTitle\":\"Sigur R\u{f3}s \u{2013} Hopp\u{ed}polla\"}";
        assert_eq!(
            extract_stream_title(payload).as_deref(),
            Some("Sigur R\u{f3}s \u{2013} Hopp\u{ed}polla")
        );
    }
}
