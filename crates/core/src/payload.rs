//! The payload shapes accepted by the formatter.
//!
//! An explicit tagged union replaces runtime type inspection: callers name
//! the shape once at the boundary and the formatter dispatches on the
//! variant.

use serde_json::{Map, Value};

use crate::pagination::{PageInfo, Paginated};

/// Capability set a single resource must provide.
///
/// `resolve` produces the resource's own mapping; `with` and `additional`
/// are optional side-channels merged into the output (into `data` for a
/// single resource, into the envelope top level for a collection).
pub trait Resource {
    fn resolve(&self) -> Map<String, Value>;

    fn with(&self) -> Map<String, Value> {
        Map::new()
    }

    fn additional(&self) -> Map<String, Value> {
        Map::new()
    }
}

/// A collection of resources with collection-level side-channels.
///
/// `pagination` is set when the collection is backed by a paginator; the
/// formatter then adds a `meta.pagination` block to the envelope.
#[derive(Default)]
pub struct ResourceCollection {
    pub items: Vec<Box<dyn Resource>>,
    pub with: Map<String, Value>,
    pub additional: Map<String, Value>,
    pub pagination: Option<PageInfo>,
}

impl ResourceCollection {
    pub fn new(items: Vec<Box<dyn Resource>>) -> Self {
        Self {
            items,
            ..Default::default()
        }
    }

    pub fn paginated(items: Vec<Box<dyn Resource>>, info: PageInfo) -> Self {
        Self {
            items,
            pagination: Some(info),
            ..Default::default()
        }
    }
}

/// Everything the success path accepts.
pub enum Payload {
    /// No data; the envelope carries `data: null`.
    Empty,
    /// A plain JSON value (mapping, array, scalar) wrapped directly.
    Value(Value),
    /// A single resource, resolved to a mapping.
    Resource(Box<dyn Resource>),
    /// A resource collection, optionally paginated underneath.
    Collection(ResourceCollection),
    /// A paginated set of plain items.
    Page(Paginated),
}

impl Payload {
    pub fn resource(resource: impl Resource + 'static) -> Self {
        Payload::Resource(Box::new(resource))
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Payload::Empty,
            other => Payload::Value(other),
        }
    }
}

impl From<Paginated> for Payload {
    fn from(page: Paginated) -> Self {
        Payload::Page(page)
    }
}

impl From<ResourceCollection> for Payload {
    fn from(collection: ResourceCollection) -> Self {
        Payload::Collection(collection)
    }
}
