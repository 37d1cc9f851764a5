//! The canonical response envelope and its formatter.
//!
//! Every success and failure path converges on [`Formatter::build`], which
//! enforces the envelope invariants: 3-digit code, `status` derived from
//! the code range, message resolution for empty messages, and recursive
//! union merge of structured errors into `data`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::ResponseConfig;
use crate::merge::merge_recursive;
use crate::payload::Payload;

/// The canonical JSON body: `{status, code, message, data, ...additional}`.
///
/// `additional` holds top-level extensions such as the `meta` pagination
/// block and is flattened beside the fixed fields on serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub status: bool,
    pub code: u16,
    pub message: String,
    pub data: Value,
    #[serde(flatten)]
    pub additional: Map<String, Value>,
}

/// Truncate a response code to its first three decimal digits.
///
/// `4040` becomes `404`, `200` stays `200`. Lossy for application codes
/// above 999: distinct codes can collapse onto the same 3-digit value, so
/// callers needing round-trip-safe custom codes should keep them <= 999.
pub fn truncate_code(code: u32) -> u16 {
    let mut code = code;
    while code > 999 {
        code /= 10;
    }
    code as u16
}

/// Builds [`Envelope`] values from payloads and metadata.
///
/// Stateless apart from the borrowed read-only configuration; safe to
/// construct per call.
pub struct Formatter<'a> {
    config: &'a ResponseConfig,
}

impl<'a> Formatter<'a> {
    pub fn new(config: &'a ResponseConfig) -> Self {
        Self { config }
    }

    /// Format a success payload, dispatching on its shape.
    pub fn success(&self, payload: Payload, message: &str, code: u32) -> Envelope {
        match payload {
            Payload::Empty => self.build(Value::Null, message, code, None, None),
            Payload::Value(value) => self.build(value, message, code, None, None),
            Payload::Resource(resource) => {
                // Side-channels merge into the resource's own data.
                let data = merge_recursive(
                    merge_recursive(
                        Value::Object(resource.resolve()),
                        Value::Object(resource.with()),
                    ),
                    Value::Object(resource.additional()),
                );
                self.build(data, message, code, None, None)
            }
            Payload::Collection(collection) => {
                let data = Value::Array(
                    collection
                        .items
                        .iter()
                        .map(|item| Value::Object(item.resolve()))
                        .collect(),
                );

                // Collection-level side-channels land beside status/code/
                // message/data, not inside data.
                let mut additional = merge_recursive(
                    Value::Object(collection.with),
                    Value::Object(collection.additional),
                );
                if let Some(info) = &collection.pagination {
                    additional = merge_recursive(additional, Value::Object(info.meta()));
                }

                self.build(data, message, code, None, into_map(additional))
            }
            Payload::Page(page) => self.build(
                Value::Array(page.items),
                message,
                code,
                None,
                Some(page.info.meta()),
            ),
        }
    }

    /// Format a failure envelope. `errors`, when present, merges into
    /// `data`; otherwise `data` stays null.
    pub fn failure(&self, message: &str, code: u32, errors: Option<Value>) -> Envelope {
        self.build(Value::Null, message, code, errors, None)
    }

    /// The shared build step all paths converge on.
    pub fn build(
        &self,
        data: Value,
        message: &str,
        code: u32,
        errors: Option<Value>,
        additional: Option<Map<String, Value>>,
    ) -> Envelope {
        let truncated = truncate_code(code);
        let status = !(400..=599).contains(&truncated);

        // The lookup sees the original code, not the truncated one.
        let message = if message.is_empty() {
            self.config.lookup_message(code).unwrap_or_default()
        } else {
            message.to_string()
        };

        let data = match errors {
            Some(errors) => merge_recursive(data, errors),
            None => data,
        };

        Envelope {
            status,
            code: truncated,
            message,
            data,
            additional: additional.unwrap_or_default(),
        }
    }

    /// The HTTP status to send an envelope with.
    ///
    /// The truncated code, except that a configured `error_code` forces all
    /// failing wire statuses to that fixed value.
    pub fn wire_status(&self, code: u32, failing: bool) -> u16 {
        let truncated = truncate_code(code);
        if failing {
            self.config.error_code.unwrap_or(truncated)
        } else {
            truncated
        }
    }
}

fn into_map(value: Value) -> Option<Map<String, Value>> {
    match value {
        Value::Object(map) if !map.is_empty() => Some(map),
        _ => None,
    }
}
