//! Axum glue for the `responder` envelope format.
//!
//! Exposes [`Respond`], the entry-point surface handlers call
//! (`success`/`ok`/`created`/`fail`/...), plus [`ApiError`] and its mapping
//! onto failure envelopes. Handlers return `Result<_, Failure>` or
//! `Result<_, ApiError>`; either error side renders as a well-formed JSON
//! envelope, never a raw error.

pub mod error;
pub mod messages;
pub mod respond;

pub use error::{ApiError, AuthRejection, MappedError};
pub use messages::StatusMessages;
pub use respond::{EnvelopeResponse, Failure, Respond};

pub use responder_core::{
    Envelope, ErrorKind, ErrorOverride, JsonOptions, MessageLookup, PageInfo, Paginated, Payload,
    Resource, ResourceCollection, ResponseConfig,
};
