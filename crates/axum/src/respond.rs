//! Entry points handlers call to produce envelope responses.
//!
//! [`Respond`] holds the shared read-only [`ResponseConfig`] (keep it in
//! your router state). Success builders return [`EnvelopeResponse`];
//! failures short-circuit via [`Failure`], a distinguished error value that
//! renders as the final HTTP response when returned from a handler.

use std::sync::Arc;

use axum::http::header::{CONTENT_TYPE, LOCATION};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use responder_core::{Envelope, Formatter, JsonOptions, Payload, ResponseConfig};

/// An envelope plus everything needed to send it: wire status, extra
/// headers, and the serialization style.
#[derive(Debug, Clone)]
pub struct EnvelopeResponse {
    pub envelope: Envelope,
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub options: JsonOptions,
}

impl IntoResponse for EnvelopeResponse {
    fn into_response(self) -> Response {
        let body = if self.options.contains(JsonOptions::PRETTY) {
            serde_json::to_vec_pretty(&self.envelope)
        } else {
            serde_json::to_vec(&self.envelope)
        };

        match body {
            Ok(bytes) => {
                let mut response = (self.status, bytes).into_response();
                response
                    .headers_mut()
                    .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                response.headers_mut().extend(self.headers);
                response
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to serialize response envelope");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// A failure envelope used as control flow.
///
/// Returning `Err(Failure)` from a handler (or propagating it with `?` from
/// deep inside business logic) terminates the request with this envelope,
/// without threading error returns through every intermediate layer.
#[derive(Debug)]
pub struct Failure(pub EnvelopeResponse);

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        self.0.into_response()
    }
}

/// The public response surface.
#[derive(Debug, Clone)]
pub struct Respond {
    config: Arc<ResponseConfig>,
}

impl Respond {
    pub fn new(config: Arc<ResponseConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResponseConfig {
        &self.config
    }

    /// Format a success payload of any supported shape.
    pub fn success(
        &self,
        payload: impl Into<Payload>,
        message: &str,
        code: u32,
        headers: HeaderMap,
        options: JsonOptions,
    ) -> EnvelopeResponse {
        let formatter = Formatter::new(&self.config);
        let envelope = formatter.success(payload.into(), message, code);
        let status = http_status(formatter.wire_status(code, false), StatusCode::OK);

        EnvelopeResponse {
            envelope,
            status,
            headers,
            options,
        }
    }

    /// Data-less 200.
    pub fn ok(&self, message: &str) -> EnvelopeResponse {
        self.ok_with(message, 200, HeaderMap::new(), JsonOptions::default())
    }

    /// Data-less success with explicit code, headers, and options.
    pub fn ok_with(
        &self,
        message: &str,
        code: u32,
        headers: HeaderMap,
        options: JsonOptions,
    ) -> EnvelopeResponse {
        self.success(Payload::Empty, message, code, headers, options)
    }

    /// Data-less success whose message comes from the configured lookup.
    pub fn localize(&self, code: u32) -> EnvelopeResponse {
        self.ok_with("", code, HeaderMap::new(), JsonOptions::default())
    }

    /// 201 with an optional `Location` header.
    pub fn created(
        &self,
        payload: impl Into<Payload>,
        message: &str,
        location: Option<&str>,
    ) -> EnvelopeResponse {
        self.with_location(payload, message, 201, location)
    }

    /// 202 with an optional `Location` header.
    pub fn accepted(
        &self,
        payload: impl Into<Payload>,
        message: &str,
        location: Option<&str>,
    ) -> EnvelopeResponse {
        self.with_location(payload, message, 202, location)
    }

    /// 204 with null data.
    pub fn no_content(&self, message: &str) -> EnvelopeResponse {
        self.success(
            Payload::Empty,
            message,
            204,
            HeaderMap::new(),
            JsonOptions::default(),
        )
    }

    /// Build a failure envelope.
    ///
    /// With `errors: None` this is a pure error: the result is
    /// `Err(Failure)`, so `respond.fail(..)?` terminates the handler with
    /// the envelope. With structured errors attached the response is
    /// returned as `Ok` for the caller to use or augment.
    ///
    /// The wire status honors the configured `error_code`; the body `code`
    /// always reflects the (truncated) application code. An empty message
    /// resolves through the configured lookup.
    pub fn fail(
        &self,
        message: &str,
        code: u32,
        errors: Option<Value>,
        headers: HeaderMap,
        options: JsonOptions,
    ) -> Result<EnvelopeResponse, Failure> {
        let formatter = Formatter::new(&self.config);
        let short_circuit = errors.is_none();

        let envelope = formatter.failure(message, code, errors);
        let status = http_status(
            formatter.wire_status(code, true),
            StatusCode::INTERNAL_SERVER_ERROR,
        );

        let response = EnvelopeResponse {
            envelope,
            status,
            headers,
            options,
        };

        if short_circuit {
            Err(Failure(response))
        } else {
            Ok(response)
        }
    }

    /// 400 Bad Request.
    pub fn error_bad_request(&self, message: &str) -> Failure {
        self.terminate(message, 400)
    }

    /// 401 Unauthorized.
    pub fn error_unauthorized(&self, message: &str) -> Failure {
        self.terminate(message, 401)
    }

    /// 403 Forbidden.
    pub fn error_forbidden(&self, message: &str) -> Failure {
        self.terminate(message, 403)
    }

    /// 404 Not Found.
    pub fn error_not_found(&self, message: &str) -> Failure {
        self.terminate(message, 404)
    }

    /// 405 Method Not Allowed.
    pub fn error_method_not_allowed(&self, message: &str) -> Failure {
        self.terminate(message, 405)
    }

    /// 500 Internal Server Error.
    pub fn error_internal(&self, message: &str) -> Failure {
        self.terminate(message, 500)
    }

    fn terminate(&self, message: &str, code: u32) -> Failure {
        match self.fail(message, code, None, HeaderMap::new(), JsonOptions::default()) {
            Err(failure) => failure,
            // fail() with no errors always short-circuits.
            Ok(response) => Failure(response),
        }
    }

    fn with_location(
        &self,
        payload: impl Into<Payload>,
        message: &str,
        code: u32,
        location: Option<&str>,
    ) -> EnvelopeResponse {
        let mut headers = HeaderMap::new();
        if let Some(location) = location {
            if let Ok(value) = HeaderValue::from_str(location) {
                headers.insert(LOCATION, value);
            }
        }
        self.success(payload, message, code, headers, JsonOptions::default())
    }
}

fn http_status(code: u16, fallback: StatusCode) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(fallback)
}
