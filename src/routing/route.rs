//! Route descriptors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Arbitrary metadata attached to a route and copied into its locations.
pub type RouteMeta = BTreeMap<String, serde_json::Value>;

/// A named mapping from a path template to application meaning.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Route {
    /// Route identifier, unique within a table.
    pub name: String,

    /// Path template, e.g. `/projects/:projectId`.
    pub path: String,

    #[serde(default)]
    pub meta: RouteMeta,
}

impl Route {
    /// Create a route with empty metadata.
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            meta: RouteMeta::new(),
        }
    }

    /// Attach a metadata entry.
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }
}
