//! Route table hot reload.
//!
//! # Responsibilities
//! - Watch the route configuration file
//! - Load, validate and compile the new table where the change is detected
//! - Hand only compiled tables to the owner
//!
//! # Design Decisions
//! - A table that fails to load, validate or compile is rejected here; the
//!   owner keeps serving its current table
//! - A closed receiver is reported, the reloaded table is dropped

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_router;
use crate::routing::RouterCore;

/// Result of a single reload attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// A compiled table with this many routes was handed to the receiver.
    Applied { routes: usize },
    /// The file could not be turned into a table; nothing was sent.
    Rejected,
    /// The table compiled but nobody is listening any more.
    ReceiverClosed,
}

/// Watches a route configuration file and emits freshly compiled tables.
pub struct RouteTableWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<RouterCore>,
}

impl RouteTableWatcher {
    /// Returns the watcher and the receiving end for compiled tables.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<RouterCore>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Reload the file once and send the compiled table.
    pub fn reload(&self) -> ReloadOutcome {
        let router = match load_router(&self.path) {
            Ok(router) => router,
            Err(e) => {
                tracing::error!(path = ?self.path, error = %e, "Rejected route table reload, keeping current routes");
                return ReloadOutcome::Rejected;
            }
        };

        let routes = router.len();
        if self.update_tx.send(router).is_err() {
            tracing::warn!(path = ?self.path, "Route table receiver closed, dropping reloaded table");
            return ReloadOutcome::ReceiverClosed;
        }

        tracing::info!(path = ?self.path, routes, "Route table reloaded");
        ReloadOutcome::Applied { routes }
    }

    /// Start watching the file in a background thread.
    ///
    /// The returned handle must be kept alive for reloads to keep flowing.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    self.reload();
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = %e, "Route config watch failed"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?path, "Route table watcher started");
        Ok(watcher)
    }
}
