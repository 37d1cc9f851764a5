//! Ready-made message lookup backed by canonical HTTP reason phrases.

use axum::http::StatusCode;

use responder_core::{truncate_code, MessageLookup};

/// Resolves empty messages to the canonical reason phrase of the code
/// (`200` → `"OK"`, `404` → `"Not Found"`).
///
/// Application codes above 999 are truncated to their HTTP prefix first,
/// so `4001` resolves like `400`. Swap in your own [`MessageLookup`] for
/// localized or application-specific texts.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusMessages;

impl MessageLookup for StatusMessages {
    fn message(&self, code: u32) -> Option<String> {
        StatusCode::from_u16(truncate_code(code))
            .ok()
            .and_then(|status| status.canonical_reason())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_canonical_reason_phrases() {
        assert_eq!(StatusMessages.message(200).as_deref(), Some("OK"));
        assert_eq!(StatusMessages.message(404).as_deref(), Some("Not Found"));
        assert_eq!(
            StatusMessages.message(500).as_deref(),
            Some("Internal Server Error")
        );
    }

    #[test]
    fn long_codes_resolve_through_their_http_prefix() {
        assert_eq!(StatusMessages.message(4040).as_deref(), Some("Not Found"));
    }

    #[test]
    fn unknown_codes_resolve_to_nothing() {
        assert_eq!(StatusMessages.message(99), None);
        assert_eq!(StatusMessages.message(299), None);
    }
}
