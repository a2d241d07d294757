//! Resolved locations and navigation refs.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::routing::query::{QueryValue, RouteQuery};
use crate::routing::route::RouteMeta;

/// Name of the synthetic location returned when no route matches.
pub const NOT_FOUND_NAME: &str = "404";

/// Path parameter values keyed by parameter name.
pub type RouteParams = BTreeMap<String, String>;

/// The not-found location, usable as initial state before the first resolution.
pub static NOT_FOUND_LOCATION: LazyLock<Location> = LazyLock::new(Location::not_found);

/// How a location was arrived at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LandingProps {
    pub redirected: bool,
    pub unloading: bool,
    pub replaced: bool,
}

/// The resolved navigation state.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Location {
    /// Name of the matched route, or [`NOT_FOUND_NAME`].
    pub name: String,

    /// Path parameters; `None` when the route declares none.
    pub params: Option<RouteParams>,

    pub query: RouteQuery,

    /// Fragment without the leading `#`.
    pub hash: String,

    /// Metadata of the matched route.
    pub meta: RouteMeta,

    #[serde(default)]
    pub landing: LandingProps,
}

impl Location {
    /// The not-found location with empty query and hash.
    pub fn not_found() -> Self {
        Self::not_found_with(RouteQuery::new(), String::new())
    }

    /// The not-found location carrying the query and hash of the unmatched URL.
    pub fn not_found_with(query: RouteQuery, hash: String) -> Self {
        Self {
            name: NOT_FOUND_NAME.to_string(),
            params: None,
            query,
            hash,
            meta: RouteMeta::new(),
            landing: LandingProps::default(),
        }
    }

    /// Returns true if this is the not-found location.
    pub fn is_not_found(&self) -> bool {
        self.name == NOT_FOUND_NAME
    }

    /// Look up a single path parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.as_ref()?.get(name).map(String::as_str)
    }
}

/// Caller intent to navigate to a named route.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RouteRef {
    pub name: String,

    /// Required when the route template declares parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<RouteParams>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<RouteQuery>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

impl RouteRef {
    /// Create a ref with no params, query or hash.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set a path parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params
            .get_or_insert_with(RouteParams::new)
            .insert(name.into(), value.into());
        self
    }

    /// Set a query value.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query
            .get_or_insert_with(RouteQuery::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }
}
