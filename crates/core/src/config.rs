//! Immutable formatting configuration.
//!
//! Built once at startup and passed by reference (or `Arc`) into the
//! formatter and error mapper. There is no ambient global lookup: every
//! call reads the same frozen [`ResponseConfig`].

use std::collections::HashMap;
use std::fmt;
use std::ops::BitOr;
use std::sync::Arc;

/// Resolves a human-readable message from a numeric response code.
///
/// Consulted only when a caller passes an empty message. The code handed in
/// is the *original* (untruncated) one, so application-level codes above 999
/// can map to their own texts.
pub trait MessageLookup: Send + Sync {
    fn message(&self, code: u32) -> Option<String>;
}

/// Bitmask controlling JSON serialization style, passed through verbatim to
/// the serializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JsonOptions(u32);

impl JsonOptions {
    /// Serialize with indentation.
    pub const PRETTY: JsonOptions = JsonOptions(1);

    /// Accepted for configuration parity; serde_json never escapes slashes,
    /// so this bit changes nothing.
    pub const UNESCAPED_SLASHES: JsonOptions = JsonOptions(1 << 1);

    /// Whether all bits of `other` are set in `self`.
    pub fn contains(self, other: JsonOptions) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for JsonOptions {
    type Output = JsonOptions;

    fn bitor(self, rhs: JsonOptions) -> JsonOptions {
        JsonOptions(self.0 | rhs.0)
    }
}

/// Stable error-kind enumeration keying the override table.
///
/// Replaces the original design's exception-class keys so override
/// resolution never depends on runtime type identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Request validation failed; carries per-field messages.
    Validation,
    /// The caller is not authenticated.
    Authentication,
    /// HTTP-carrying 400.
    BadRequest,
    /// HTTP-carrying 403.
    Forbidden,
    /// HTTP-carrying 404.
    NotFound,
    /// HTTP-carrying 405.
    MethodNotAllowed,
    /// Any other error that carries its own HTTP status and headers.
    Http,
    /// Opaque internal error; collapses to 500 with a generic message.
    Internal,
}

impl ErrorKind {
    /// Stable string identifier, used in debug payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Authentication => "authentication",
            Self::BadRequest => "bad_request",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::MethodNotAllowed => "method_not_allowed",
            Self::Http => "http",
            Self::Internal => "internal",
        }
    }
}

/// Per-kind attribute overrides.
///
/// Each field independently falls back to the error's natural attribute
/// when absent.
#[derive(Debug, Clone, Default)]
pub struct ErrorOverride {
    pub message: Option<String>,
    pub code: Option<u32>,
    pub headers: Option<Vec<(String, String)>>,
    pub options: Option<JsonOptions>,
}

/// Read-only configuration shared by the formatter and the error mapper.
#[derive(Clone, Default)]
pub struct ResponseConfig {
    /// When set, every *failing* response is sent with this HTTP status,
    /// decoupling the wire status from the application-level `code` in the
    /// body. Successful responses are unaffected.
    pub error_code: Option<u16>,

    /// Message source for calls that pass an empty message.
    pub messages: Option<Arc<dyn MessageLookup>>,

    /// Attribute overrides keyed by error kind.
    pub overrides: HashMap<ErrorKind, ErrorOverride>,

    /// When enabled, error responses carry kind, message, and cause-chain
    /// detail instead of a sanitized message.
    pub debug: bool,
}

impl ResponseConfig {
    /// Look up the override entry for an error kind, if configured.
    pub fn override_for(&self, kind: ErrorKind) -> Option<&ErrorOverride> {
        self.overrides.get(&kind)
    }

    /// Resolve a message for `code` through the configured lookup.
    pub fn lookup_message(&self, code: u32) -> Option<String> {
        self.messages.as_ref().and_then(|m| m.message(code))
    }
}

impl fmt::Debug for ResponseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseConfig")
            .field("error_code", &self.error_code)
            .field("messages", &self.messages.as_ref().map(|_| "<lookup>"))
            .field("overrides", &self.overrides)
            .field("debug", &self.debug)
            .finish()
    }
}
