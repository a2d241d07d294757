//! Configuration schema definitions.
//!
//! This module defines the route-table configuration file.
//! All types derive Serde traits for deserialization from config files.
//!
//! ```toml
//! [observability]
//! log_level = "debug"
//!
//! [[routes]]
//! name = "home"
//! path = "/"
//!
//! [[routes]]
//! name = "project"
//! path = "/projects/:projectId"
//! meta = { title = "Project" }
//! ```

use serde::{Deserialize, Serialize};

use crate::routing::{Route, RouteMeta, RouteResult, RouterCore};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Route definitions, in matching order.
    pub routes: Vec<RouteConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl RouterConfig {
    /// Compile the configured routes into a router.
    pub fn into_router(self) -> RouteResult<RouterCore> {
        RouterCore::new(self.routes.into_iter().map(Route::from))
    }
}

/// A single route entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route identifier.
    pub name: String,

    /// Path template, e.g. `/projects/:projectId`.
    pub path: String,

    /// Arbitrary metadata copied into resolved locations.
    #[serde(default)]
    pub meta: RouteMeta,
}

impl From<RouteConfig> for Route {
    fn from(config: RouteConfig) -> Self {
        Route {
            name: config.name,
            path: config.path,
            meta: config.meta,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
