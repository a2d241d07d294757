//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → RouterCore (compiled route table)
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads, validates and compiles the new table
//!     → compiled RouterCore sent to the owner (rejected tables are not sent)
//!     → owner swaps it into its SharedRouter
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - An invalid reload keeps the current routes

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, load_router, parse_config, ConfigError};
pub use schema::{ObservabilityConfig, RouteConfig, RouterConfig};
pub use validation::ValidationError;
pub use watcher::{ReloadOutcome, RouteTableWatcher};
