//! Route resolution core for client-side navigation.
//!
//! Converts between three representations of a navigation target:
//! absolute URLs, structured [`Location`]s and [`RouteRef`]s.
//!
//! ```text
//!            resolve_location                   build_href
//!   URL ───────────────────────▶ Location   RouteRef ──────────▶ "/path?query#hash"
//!                                    ▲          │
//!                                    └──────────┘
//!                                  ref_to_location
//! ```
//!
//! # Example
//!
//! ```
//! use route_core::{Route, RouteRef, RouterCore};
//!
//! let router = RouterCore::new(vec![
//!     Route::new("home", "/"),
//!     Route::new("project", "/projects/:projectId"),
//! ])?;
//!
//! let location = router.resolve_location("http://localhost/projects/qwe?tab=files#top");
//! assert_eq!(location.name, "project");
//! assert_eq!(location.param("projectId"), Some("qwe"));
//!
//! let href = router.build_href(&RouteRef::new("project").param("projectId", "qwe"))?;
//! assert_eq!(href, "/projects/qwe");
//! # Ok::<(), route_core::RouteError>(())
//! ```

// Core subsystem
pub mod routing;

// Cross-cutting concerns
pub mod config;
pub mod observability;

pub use config::RouterConfig;
pub use routing::{
    LandingProps, Location, QueryValue, Route, RouteError, RouteMeta, RouteParams, RouteQuery,
    RouteRef, RouterCore, SharedRouter, NOT_FOUND_LOCATION,
};
