//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject routes that can never be addressed (empty name, relative path)
//! - Reject templates with unnamed or repeated parameters
//! - Warn about ambiguous tables (duplicate names, a route named like the not-found location)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Duplicate names are an ambiguity, not an error: the first route wins

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::routing::{PathPattern, NOT_FOUND_NAME};

/// A semantic problem in the route configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route #{index} has an empty name")]
    EmptyName { index: usize },

    #[error("route {name}: path {path:?} must start with '/'")]
    RelativePath { name: String, path: String },

    #[error("route {name}: path {path:?} contains a parameter without a name")]
    UnnamedParam { name: String, path: String },

    #[error("route {name}: parameter {param} appears more than once")]
    DuplicateParam { name: String, param: String },
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen_names = HashSet::new();

    for (index, route) in config.routes.iter().enumerate() {
        if route.name.is_empty() {
            errors.push(ValidationError::EmptyName { index });
        } else if !seen_names.insert(route.name.as_str()) {
            tracing::warn!(route = %route.name, "Duplicate route name, only the first is addressable by name");
        }

        if route.name == NOT_FOUND_NAME {
            tracing::warn!("A route is named {NOT_FOUND_NAME:?}, which is also the not-found location name");
        }

        if !route.path.starts_with('/') {
            errors.push(ValidationError::RelativePath {
                name: route.name.clone(),
                path: route.path.clone(),
            });
        }

        // First ':' in a segment opens a parameter running to the segment end.
        let unnamed = route
            .path
            .split('/')
            .any(|segment| segment.find(':').is_some_and(|idx| idx + 1 == segment.len()));
        if unnamed {
            errors.push(ValidationError::UnnamedParam {
                name: route.name.clone(),
                path: route.path.clone(),
            });
        }

        // Compile errors surface when the table is built.
        if let Ok(pattern) = PathPattern::new(route.path.as_str()) {
            let mut seen_params = HashSet::new();
            for param in pattern.param_names() {
                if !seen_params.insert(param.as_str()) {
                    errors.push(ValidationError::DuplicateParam {
                        name: route.name.clone(),
                        param: param.clone(),
                    });
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
