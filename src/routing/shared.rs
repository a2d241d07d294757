//! Hot-swappable router handle.
//!
//! # Responsibilities
//! - Share one compiled route table between many readers
//! - Replace the whole table atomically when the configuration reloads
//!
//! # Design Decisions
//! - A reload never mutates a table in place; a new `RouterCore` replaces the old one
//! - Readers take a snapshot, so a single navigation never mixes two tables

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::routing::router::RouterCore;

/// Cloneable handle to the current route table.
#[derive(Debug, Clone)]
pub struct SharedRouter {
    current: Arc<ArcSwap<RouterCore>>,
}

impl SharedRouter {
    pub fn new(router: RouterCore) -> Self {
        Self {
            current: Arc::new(ArcSwap::from_pointee(router)),
        }
    }

    /// Snapshot of the current table.
    pub fn load(&self) -> Arc<RouterCore> {
        self.current.load_full()
    }

    /// Replace the current table.
    pub fn replace(&self, router: RouterCore) {
        tracing::info!(routes = router.len(), "Route table replaced");
        self.current.store(Arc::new(router));
    }
}
