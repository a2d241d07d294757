//! Routing error definitions.

use thiserror::Error;

/// Errors signalled by the programmer-facing routing paths.
///
/// URL and ref resolution never fail; they fall back to the not-found
/// location instead. Only href construction and table construction report
/// errors, since both indicate a route table and a caller that disagree.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The ref names a route that is not in the table.
    #[error("Can't find {name} route")]
    RouteNotFound { name: String },

    /// A `:param` token in the route template has no value in the ref.
    #[error("Can't generate the path for {route} route: {param} param is missing in the passed params")]
    MissingParam { route: String, param: String },

    /// The value would form a `.` or `..` segment, which URL parsing collapses.
    #[error("Can't generate the path for {route} route: {param} param value {value:?} is a dot segment")]
    DotSegmentParam {
        route: String,
        param: String,
        value: String,
    },

    /// The path template could not be compiled into a matcher.
    #[error("Invalid path template {path}: {source}")]
    InvalidPattern {
        path: String,
        #[source]
        source: regex::Error,
    },
}

/// Result type for routing operations.
pub type RouteResult<T> = Result<T, RouteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RouteError::RouteNotFound {
            name: "settings".into(),
        };
        assert_eq!(err.to_string(), "Can't find settings route");

        let err = RouteError::MissingParam {
            route: "project".into(),
            param: "projectId".into(),
        };
        assert!(err.to_string().contains("projectId param is missing"));
        assert!(err.to_string().contains("project route"));
    }
}
