//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing, config
//!     → tracing events (route compiled, no match, reload)
//!     → logging.rs subscriber (stderr)
//! ```

pub mod logging;

pub use logging::init_logging;
