use serde_json::Value;

use crate::error::FetchError;
use crate::models::PageEnvelope;

/// Longest raw body excerpt carried by an error
pub const SNIPPET_MAX_CHARS: usize = 1000;

/// Interpret a search response.
///
/// The body must already be read in full as text; the declared content type
/// is only reported, never trusted.
pub fn decode_search_response(
    status: u16,
    content_type: Option<&str>,
    body: &str,
) -> Result<PageEnvelope, FetchError> {
    if !(200..=299).contains(&status) {
        let message = match serde_json::from_str::<Value>(body) {
            Ok(parsed) => parsed.to_string(),
            Err(_) => snippet(body),
        };
        return Err(FetchError::RequestFailed { status, message });
    }

    if body.trim().is_empty() {
        return Ok(PageEnvelope::empty());
    }

    match serde_json::from_str::<Value>(body) {
        Ok(parsed) => Ok(PageEnvelope::from_value(parsed)),
        Err(_) => Err(FetchError::InvalidResponse {
            snippet: snippet(body),
            content_type: content_type.unwrap_or_default().to_ascii_lowercase(),
        }),
    }
}

/// First [`SNIPPET_MAX_CHARS`] characters with whitespace runs collapsed to one space
pub fn snippet(body: &str) -> String {
    let mut out = String::new();
    let mut in_whitespace = false;

    for c in body.chars().take(SNIPPET_MAX_CHARS) {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push(' ');
            }
            in_whitespace = true;
        } else {
            out.push(c);
            in_whitespace = false;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_error_status_with_json_body() {
        let err = decode_search_response(400, Some("application/json"), r#"{"error":"bad filter"}"#)
            .unwrap_err();

        assert_eq!(
            err,
            FetchError::RequestFailed {
                status: 400,
                message: r#"{"error":"bad filter"}"#.to_string()
            }
        );
        let text = err.to_string();
        assert!(text.contains("400"));
        assert!(text.contains(r#"{"error":"bad filter"}"#));
    }

    #[test]
    fn test_error_status_with_text_body_is_truncated() {
        let body = format!("<html>\n\n  <body>{}</body></html>", "x".repeat(2000));
        let err = decode_search_response(502, Some("text/html"), &body).unwrap_err();

        match err {
            FetchError::RequestFailed { status, message } => {
                assert_eq!(status, 502);
                assert!(message.starts_with("<html> <body>"));
                assert!(message.chars().count() <= SNIPPET_MAX_CHARS);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_success_body_is_empty_envelope() {
        assert_eq!(
            decode_search_response(200, None, "").unwrap(),
            PageEnvelope::empty()
        );
        assert_eq!(
            decode_search_response(204, Some("application/json"), "  \n\t ").unwrap(),
            PageEnvelope::empty()
        );
    }

    #[test]
    fn test_mislabelled_json_is_accepted() {
        let envelope = decode_search_response(
            200,
            Some("text/plain"),
            r#"{"content":[{"id":1,"title":"Soup"}],"totalElements":1}"#,
        )
        .unwrap();

        assert_eq!(envelope.total_elements, 1);
        assert_eq!(envelope.content[0].title, "Soup");
    }

    #[test]
    fn test_non_json_success_is_invalid_response() {
        let err = decode_search_response(200, Some("Text/HTML; charset=utf-8"), "<p>oops</p>")
            .unwrap_err();

        assert_eq!(
            err,
            FetchError::InvalidResponse {
                snippet: "<p>oops</p>".to_string(),
                content_type: "text/html; charset=utf-8".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_content_type_reports_empty() {
        let err = decode_search_response(200, None, "nope").unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Expected JSON but got content-type=. Body (truncated): nope"));
    }

    #[test]
    fn test_structurally_odd_envelope_is_not_an_error() {
        let envelope = decode_search_response(200, None, r#"{"items": []}"#).unwrap();
        assert!(envelope.content.is_empty());
        assert_eq!(envelope.total_elements, 0);
    }

    #[test]
    fn test_oddly_typed_fields_keep_every_row() {
        let body = r#"{"content":[{"id":1,"serves":4},{"id":2,"totalTime":12.5},{"id":3,"rating":"4.5"},{"id":4,"title":"D"}],"totalElements":4}"#;
        let envelope = decode_search_response(200, Some("application/json"), body).unwrap();

        let ids: Vec<i64> = envelope.content.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(envelope.total_elements, 4);
    }

    #[test]
    fn test_snippet_collapses_whitespace() {
        assert_eq!(snippet("a \n\n b\t\tc"), "a b c");
        assert_eq!(snippet(&"é".repeat(1500)).chars().count(), 1000);
    }
}
