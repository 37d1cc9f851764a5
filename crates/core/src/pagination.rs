//! Paginated result sets and the derived `meta.pagination` block.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Raw metadata exposed by a paginated collection collaborator.
///
/// Field names follow the paginator contract: `to` is the index of the last
/// item on the current page, `last_page` the total number of pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    pub total: u64,
    pub to: u64,
    pub per_page: u64,
    pub current_page: u64,
    pub last_page: u64,
    pub prev_page_url: Option<String>,
    pub next_page_url: Option<String>,
}

impl PageInfo {
    /// Derive the envelope-level `meta.pagination` block.
    ///
    /// Never stored; computed fresh per response. Absent page links render
    /// as empty strings.
    pub fn meta(&self) -> Map<String, Value> {
        let pagination = json!({
            "total": self.total,
            "count": self.to,
            "per_page": self.per_page,
            "current_page": self.current_page,
            "total_pages": self.last_page,
            "links": {
                "previous": self.prev_page_url.as_deref().unwrap_or(""),
                "next": self.next_page_url.as_deref().unwrap_or(""),
            },
        });

        let mut meta = Map::new();
        meta.insert("meta".to_string(), json!({ "pagination": pagination }));
        meta
    }
}

/// A paginated set of plain (non-resource) items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paginated {
    pub items: Vec<Value>,
    pub info: PageInfo,
}

impl Paginated {
    pub fn new(items: Vec<Value>, info: PageInfo) -> Self {
        Self { items, info }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_maps_paginator_fields_onto_envelope_names() {
        let info = PageInfo {
            total: 15,
            to: 10,
            per_page: 10,
            current_page: 1,
            last_page: 2,
            prev_page_url: None,
            next_page_url: Some("http://example.com/users?page=2".into()),
        };

        let meta = Value::Object(info.meta());
        let pagination = &meta["meta"]["pagination"];

        assert_eq!(pagination["total"], 15);
        assert_eq!(pagination["count"], 10);
        assert_eq!(pagination["per_page"], 10);
        assert_eq!(pagination["current_page"], 1);
        assert_eq!(pagination["total_pages"], 2);
        assert_eq!(pagination["links"]["previous"], "");
        assert_eq!(
            pagination["links"]["next"],
            "http://example.com/users?page=2"
        );
    }
}
