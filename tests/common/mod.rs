//! Shared fixtures for integration tests.
#![allow(dead_code)]

use route_core::{Route, RouterCore};

/// Origin prepended to hrefs when resolving them back.
pub const ORIGIN: &str = "http://localhost:3000";

/// A small application route table.
pub fn app_router() -> RouterCore {
    RouterCore::new(vec![
        Route::new("home", "/").with_meta("title", "Home"),
        Route::new("projects", "/projects"),
        Route::new("new-project", "/projects/new"),
        Route::new("project", "/projects/:projectId").with_meta("title", "Project"),
        Route::new("task", "/projects/:projectId/tasks/:taskId"),
    ])
    .expect("fixture routes compile")
}

/// Write a route configuration to a temporary file.
pub fn write_config(content: &str) -> tempfile::NamedTempFile {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().expect("create temp config");
    file.write_all(content.as_bytes()).expect("write temp config");
    file
}
