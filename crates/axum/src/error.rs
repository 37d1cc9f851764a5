//! Error taxonomy and its mapping onto failure envelopes.
//!
//! [`ApiError`] covers the four kinds a service produces: validation
//! failures, authentication failures, HTTP-carrying errors with their own
//! status and headers, and opaque internal errors. Mapping resolves, in
//! order: the configured per-kind override, the error's natural HTTP
//! attributes, and finally the 500 fallback. Internal detail never reaches
//! the wire unless debug mode is on.

use axum::http::header::{HeaderName, HeaderValue};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use indexmap::IndexMap;
use serde_json::{json, Value};

use responder_core::{ErrorKind, JsonOptions};

use crate::respond::{EnvelopeResponse, Failure, Respond};

/// Default validation failure code when no override is configured.
const VALIDATION_CODE: u32 = 422;

/// Fallback message for errors that carry no HTTP status of their own.
const SERVER_ERROR: &str = "Server Error";

/// Application-level error for HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request validation failed; per-field messages in insertion order.
    #[error("The given data was invalid")]
    Validation {
        fields: IndexMap<String, Vec<String>>,
    },

    /// The caller is not authenticated.
    #[error("{message}")]
    Authentication { message: String },

    /// A well-known HTTP-carrying error with its own status and headers.
    #[error("{message}")]
    Http {
        status: StatusCode,
        message: String,
        headers: HeaderMap,
    },

    /// An opaque internal error; collapses to a sanitized 500.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// Shorthand for an HTTP-carrying error without extra headers.
    pub fn http(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError::Http {
            status,
            message: message.into(),
            headers: HeaderMap::new(),
        }
    }

    /// The stable kind keying the override table.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Validation { .. } => ErrorKind::Validation,
            ApiError::Authentication { .. } => ErrorKind::Authentication,
            ApiError::Http { status, .. } => match status.as_u16() {
                400 => ErrorKind::BadRequest,
                403 => ErrorKind::Forbidden,
                404 => ErrorKind::NotFound,
                405 => ErrorKind::MethodNotAllowed,
                _ => ErrorKind::Http,
            },
            ApiError::Internal(_) => ErrorKind::Internal,
        }
    }

    fn is_http_carrying(&self) -> bool {
        matches!(self, ApiError::Http { .. })
    }
}

/// Resolved failure attributes: override fields first, natural attributes
/// second, 500 fallback last.
#[derive(Debug)]
pub struct MappedError {
    pub message: String,
    pub code: u32,
    pub headers: HeaderMap,
    pub options: JsonOptions,
}

/// Outcome of an authentication failure: a JSON 401 envelope for API
/// clients, a redirect to the login location for browser traffic.
#[derive(Debug)]
pub enum AuthRejection {
    Json(Failure),
    Redirect(Redirect),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Json(failure) => failure.into_response(),
            AuthRejection::Redirect(redirect) => redirect.into_response(),
        }
    }
}

impl Respond {
    /// Resolve `(message, code, headers, options)` for an error.
    pub fn map_error(&self, err: &ApiError) -> MappedError {
        let (natural_message, natural_code, natural_headers) = match err {
            ApiError::Http {
                status,
                message,
                headers,
            } => (message.clone(), u32::from(status.as_u16()), headers.clone()),
            _ => (SERVER_ERROR.to_string(), 500, HeaderMap::new()),
        };

        let entry = self.config().override_for(err.kind());

        MappedError {
            message: entry
                .and_then(|o| o.message.clone())
                .unwrap_or(natural_message),
            code: entry.and_then(|o| o.code).unwrap_or(natural_code),
            headers: entry
                .and_then(|o| o.headers.as_deref())
                .map(header_map)
                .unwrap_or(natural_headers),
            options: entry
                .and_then(|o| o.options)
                .unwrap_or(JsonOptions::PRETTY | JsonOptions::UNESCAPED_SLASHES),
        }
    }

    /// Build the failure envelope for an error, with the (debug-gated)
    /// error detail merged into `data`.
    pub fn error_response(&self, err: &ApiError) -> EnvelopeResponse {
        if err.kind() == ErrorKind::Internal {
            tracing::error!(error = %err, "Internal error");
        }

        let mapped = self.map_error(err);
        let errors = self.debug_payload(err);

        match self.fail(
            &mapped.message,
            mapped.code,
            Some(errors),
            mapped.headers,
            mapped.options,
        ) {
            Ok(response) => response,
            // Not reached: errors are always attached above.
            Err(failure) => failure.0,
        }
    }

    /// Map field validation errors onto a failure envelope.
    ///
    /// The top-level message is the first message of the first field; the
    /// complete field map lands under `data.fields`. Code 422 unless the
    /// `Validation` kind is overridden.
    pub fn validation_failure(&self, fields: &IndexMap<String, Vec<String>>) -> EnvelopeResponse {
        let message = fields
            .values()
            .flat_map(|messages| messages.first())
            .next()
            .cloned()
            .unwrap_or_default();

        let code = self
            .config()
            .override_for(ErrorKind::Validation)
            .and_then(|o| o.code)
            .unwrap_or(VALIDATION_CODE);

        match self.fail(
            &message,
            code,
            Some(json!({ "fields": fields })),
            HeaderMap::new(),
            JsonOptions::default(),
        ) {
            Ok(response) => response,
            Err(failure) => failure.0,
        }
    }

    /// Handle an authentication failure.
    ///
    /// JSON clients get a 401 envelope (message overridable via the
    /// `Authentication` kind); everyone else is redirected to the
    /// caller-supplied login location.
    pub fn unauthenticated(
        &self,
        err: &ApiError,
        wants_json: bool,
        redirect_to: &str,
    ) -> AuthRejection {
        if wants_json {
            let message = self
                .config()
                .override_for(ErrorKind::Authentication)
                .and_then(|o| o.message.clone())
                .unwrap_or_else(|| err.to_string());
            AuthRejection::Json(self.error_unauthorized(&message))
        } else {
            AuthRejection::Redirect(Redirect::to(redirect_to))
        }
    }

    /// Structured error detail merged into a failure envelope's `data`.
    ///
    /// With debug enabled: message, kind identifier, and the cause chain
    /// (messages only, no argument values). Otherwise just a message,
    /// sanitized to `"Server Error"` unless the error carries its own
    /// HTTP status.
    pub fn debug_payload(&self, err: &ApiError) -> Value {
        if !self.config().debug {
            let message = match err {
                ApiError::Http { message, .. } => message.clone(),
                _ => SERVER_ERROR.to_string(),
            };
            return json!({ "message": message });
        }

        let trace: Vec<String> = match err {
            ApiError::Internal(source) => source.chain().map(|cause| cause.to_string()).collect(),
            _ => Vec::new(),
        };

        json!({
            "message": err.to_string(),
            "exception": err.kind().as_str(),
            "trace": trace,
        })
    }
}

/// `IntoResponse` so `Result<_, ApiError>` handlers degrade to well-formed
/// envelopes automatically.
///
/// Uses the default (empty) configuration: natural attributes, no
/// overrides, debug off. Services that configure overrides, `error_code`,
/// or debug mode should map through [`Respond::error_response`] instead.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let respond = Respond::new(Default::default());
        match &self {
            ApiError::Validation { fields } => respond.validation_failure(fields).into_response(),
            ApiError::Authentication { .. } => {
                respond.unauthenticated(&self, true, "/login").into_response()
            }
            _ => respond.error_response(&self).into_response(),
        }
    }
}

fn header_map(pairs: &[(String, String)]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in pairs {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            map.insert(name, value);
        }
    }
    map
}
