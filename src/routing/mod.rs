//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route table compilation (at startup or reload):
//!     Route[] (name, path template, meta)
//!     → pattern.rs (template → anchored matcher + parameter names)
//!     → Freeze as immutable RouterCore
//!
//! URL resolution:
//!     absolute URL
//!     → router.rs (ordered scan, first match wins)
//!     → query.rs (typed query values)
//!     → Location, or the not-found Location
//!
//! Ref resolution / href construction:
//!     RouteRef
//!     → router.rs (name lookup)
//!     → Location, or href "/path?query#hash"
//! ```
//!
//! # Design Decisions
//! - Routes compiled once, immutable at runtime
//! - Deterministic: same input always resolves to the same location
//! - First match wins (declaration order)
//! - Navigation input degrades to not-found; programmer errors are signalled

pub mod error;
pub mod location;
pub mod pattern;
pub mod query;
pub mod route;
pub mod router;
pub mod shared;

pub use error::{RouteError, RouteResult};
pub use location::{LandingProps, Location, RouteParams, RouteRef, NOT_FOUND_LOCATION, NOT_FOUND_NAME};
pub use pattern::PathPattern;
pub use query::{QueryValue, RouteQuery};
pub use route::{Route, RouteMeta};
pub use router::RouterCore;
pub use shared::SharedRouter;
