//! Framework-free JSON response envelope formatting.
//!
//! Normalizes heterogeneous payload shapes (plain JSON values, single
//! resources, resource collections, paginated sets) plus a
//! message/code pair into one canonical envelope:
//!
//! ```json
//! { "status": true, "code": 200, "message": "OK", "data": { ... } }
//! ```
//!
//! This crate knows nothing about HTTP transports. The axum glue lives in
//! `responder-axum`, which turns [`Envelope`] values into responses and maps
//! errors onto them.

pub mod config;
pub mod envelope;
pub mod merge;
pub mod pagination;
pub mod payload;

pub use config::{ErrorKind, ErrorOverride, JsonOptions, MessageLookup, ResponseConfig};
pub use envelope::{truncate_code, Envelope, Formatter};
pub use pagination::{PageInfo, Paginated};
pub use payload::{Payload, Resource, ResourceCollection};
