//! Route table and the three resolution operations.
//!
//! # Responsibilities
//! - Compile every route template once, at construction
//! - Resolve absolute URLs into locations (first match in declaration order)
//! - Turn refs into locations without any string parsing
//! - Build hrefs from refs, failing loudly on refs the table cannot honour
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(1) name lookup via HashMap, first declaration wins on duplicates
//! - O(n) ordered scan for URL matching, so declaration order breaks ties
//! - URL and ref resolution degrade to the not-found location; href
//!   construction returns an error

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use url::Url;

use crate::routing::error::{RouteError, RouteResult};
use crate::routing::location::{LandingProps, Location, RouteParams, RouteRef};
use crate::routing::pattern::{InterpolateError, PathPattern};
use crate::routing::query::{encode_query, parse_query};
use crate::routing::route::Route;

/// Base used for inputs that carry only a path, such as `/projects/1?tab=2`.
const RELATIVE_BASE: &str = "http://localhost/";

#[derive(Debug, Clone)]
struct CompiledRoute {
    route: Route,
    pattern: PathPattern,
}

/// A compiled, immutable route table.
#[derive(Debug, Clone)]
pub struct RouterCore {
    routes: Vec<CompiledRoute>,
    by_name: HashMap<String, usize>,
}

impl RouterCore {
    /// Compile a route table. Routes keep their declaration order.
    pub fn new(routes: impl IntoIterator<Item = Route>) -> RouteResult<Self> {
        let mut compiled = Vec::new();
        let mut by_name = HashMap::new();

        for route in routes {
            let pattern = PathPattern::new(route.path.as_str())?;

            match by_name.entry(route.name.clone()) {
                Entry::Occupied(_) => {
                    tracing::warn!(
                        route = %route.name,
                        path = %route.path,
                        "Duplicate route name, the first declaration wins for lookups"
                    );
                }
                Entry::Vacant(entry) => {
                    entry.insert(compiled.len());
                }
            }

            compiled.push(CompiledRoute { route, pattern });
        }

        tracing::debug!(routes = compiled.len(), "Route table compiled");

        Ok(Self {
            routes: compiled,
            by_name,
        })
    }

    /// Number of routes in the table.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if the table has no routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Routes in declaration order.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter().map(|compiled| &compiled.route)
    }

    /// Routes with their compiled templates, in declaration order.
    pub fn compiled(&self) -> impl Iterator<Item = (&Route, &PathPattern)> {
        self.routes
            .iter()
            .map(|compiled| (&compiled.route, &compiled.pattern))
    }

    /// Look up a route by name.
    pub fn route(&self, name: &str) -> Option<&Route> {
        self.find(name).map(|compiled| &compiled.route)
    }

    /// Look up the compiled template of a route by name.
    pub fn pattern(&self, name: &str) -> Option<&PathPattern> {
        self.find(name).map(|compiled| &compiled.pattern)
    }

    /// Resolve a URL into a location.
    ///
    /// Never fails: unparseable or unmatched URLs yield the not-found
    /// location, which still carries whatever query and hash could be read.
    pub fn resolve_location(&self, url: &str) -> Location {
        let Some(parsed) = parse_url(url) else {
            tracing::debug!(url, "Unparseable URL, resolving to not-found");
            return Location::not_found();
        };

        let query = parsed.query().map(parse_query).unwrap_or_default();
        let hash = parsed.fragment().unwrap_or_default().to_string();
        let path = parsed.path();

        for compiled in &self.routes {
            if let Some(params) = compiled.pattern.captures(path) {
                tracing::trace!(route = %compiled.route.name, path, "Route matched");
                return Location {
                    name: compiled.route.name.clone(),
                    params: compiled.pattern.has_params().then_some(params),
                    query,
                    hash,
                    meta: compiled.route.meta.clone(),
                    landing: LandingProps::default(),
                };
            }
        }

        tracing::debug!(path, "No route matched");
        Location::not_found_with(query, hash)
    }

    /// Turn a ref into a location with default landing props.
    pub fn ref_to_location(&self, route_ref: &RouteRef) -> Location {
        self.ref_to_location_with_landing(route_ref, LandingProps::default())
    }

    /// Turn a ref into a location.
    ///
    /// A ref naming an unknown route yields the not-found location.
    pub fn ref_to_location_with_landing(
        &self,
        route_ref: &RouteRef,
        landing: LandingProps,
    ) -> Location {
        let Some(compiled) = self.find(&route_ref.name) else {
            tracing::debug!(route = %route_ref.name, "Ref names an unknown route");
            return Location::not_found();
        };

        Location {
            name: route_ref.name.clone(),
            params: route_ref.params.clone(),
            query: route_ref.query.clone().unwrap_or_default(),
            hash: route_ref.hash.clone().unwrap_or_default(),
            meta: compiled.route.meta.clone(),
            landing,
        }
    }

    /// Build an href (path, query and hash) for a ref.
    pub fn build_href(&self, route_ref: &RouteRef) -> RouteResult<String> {
        let compiled = self
            .find(&route_ref.name)
            .ok_or_else(|| RouteError::RouteNotFound {
                name: route_ref.name.clone(),
            })?;

        let no_params = RouteParams::new();
        let params = route_ref.params.as_ref().unwrap_or(&no_params);

        let mut href = compiled
            .pattern
            .interpolate(params)
            .map_err(|err| match err {
                InterpolateError::Missing(param) => RouteError::MissingParam {
                    route: route_ref.name.clone(),
                    param: param.to_string(),
                },
                InterpolateError::DotSegment(param) => RouteError::DotSegmentParam {
                    route: route_ref.name.clone(),
                    param: param.to_string(),
                    value: params.get(param).cloned().unwrap_or_default(),
                },
            })?;

        if let Some(query) = route_ref.query.as_ref().filter(|query| !query.is_empty()) {
            href.push('?');
            href.push_str(&encode_query(query));
        }

        if let Some(hash) = route_ref.hash.as_deref().filter(|hash| !hash.is_empty()) {
            href.push('#');
            href.push_str(hash);
        }

        Ok(href)
    }

    fn find(&self, name: &str) -> Option<&CompiledRoute> {
        self.by_name.get(name).map(|&index| &self.routes[index])
    }
}

fn parse_url(input: &str) -> Option<Url> {
    match Url::parse(input) {
        Ok(url) => Some(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(RELATIVE_BASE).and_then(|base| base.join(input)).ok()
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::query::{QueryValue, RouteQuery};

    fn app_router() -> RouterCore {
        RouterCore::new(vec![
            Route::new("home", "/"),
            Route::new("project", "/projects/:projectId").with_meta("title", "Project"),
        ])
        .unwrap()
    }

    fn scenario_query() -> RouteQuery {
        let mut query = RouteQuery::new();
        query.insert("qwe".into(), "rty".into());
        query.insert("asd".into(), true.into());
        query.insert("zxc".into(), 123.into());
        query
    }

    fn scenario_ref() -> RouteRef {
        RouteRef {
            name: "project".into(),
            params: Some(RouteParams::from([("projectId".into(), "qwe".into())])),
            query: Some(scenario_query()),
            hash: Some("456".into()),
        }
    }

    #[test]
    fn test_resolve_location_by_url() {
        let router = app_router();
        let location =
            router.resolve_location("http://localhost:3000/projects/qwe?qwe=rty&asd=true&zxc=123#456");

        assert_eq!(location.name, "project");
        assert_eq!(location.param("projectId"), Some("qwe"));
        assert_eq!(location.query, scenario_query());
        assert_eq!(location.hash, "456");
        assert_eq!(location.meta["title"], "Project");
    }

    #[test]
    fn test_resolve_literal_route_has_no_params() {
        let router = app_router();
        let location = router.resolve_location("http://localhost:3000/");

        assert_eq!(location.name, "home");
        assert_eq!(location.params, None);
        assert!(location.query.is_empty());
        assert_eq!(location.hash, "");
    }

    #[test]
    fn test_resolve_accepts_trailing_slash() {
        let router = app_router();
        let location = router.resolve_location("http://x/projects/qwe/");
        assert_eq!(location.name, "project");
        assert_eq!(location.param("projectId"), Some("qwe"));
    }

    #[test]
    fn test_resolve_unmatched_keeps_query_and_hash() {
        let router = app_router();
        let location = router.resolve_location("http://x/nowhere/at/all?page=2#top");

        assert!(location.is_not_found());
        assert_eq!(location.params, None);
        assert!(location.meta.is_empty());
        assert_eq!(location.query["page"], QueryValue::Number(2.0));
        assert_eq!(location.hash, "top");
    }

    #[test]
    fn test_resolve_never_fails_on_garbage() {
        let router = app_router();
        assert_eq!(router.resolve_location("http://[::1"), Location::not_found());
        assert_eq!(router.resolve_location(""), router.resolve_location("http://localhost/"));
    }

    #[test]
    fn test_resolve_relative_url() {
        let router = app_router();
        let location = router.resolve_location("/projects/abc?tab=files");
        assert_eq!(location.name, "project");
        assert_eq!(location.param("projectId"), Some("abc"));
        assert_eq!(location.query["tab"], QueryValue::String("files".into()));
    }

    #[test]
    fn test_declaration_order_precedence() {
        let router = RouterCore::new(vec![
            Route::new("new-project", "/projects/new").with_meta("form", true),
            Route::new("project", "/projects/:projectId"),
        ])
        .unwrap();

        let location = router.resolve_location("http://x/projects/new");
        assert_eq!(location.name, "new-project");
        assert_eq!(location.params, None);
        assert_eq!(location.meta["form"], true);

        let location = router.resolve_location("http://x/projects/42");
        assert_eq!(location.name, "project");
    }

    #[test]
    fn test_duplicate_names_first_wins() {
        let router = RouterCore::new(vec![
            Route::new("settings", "/settings").with_meta("v", 1),
            Route::new("settings", "/preferences").with_meta("v", 2),
        ])
        .unwrap();

        assert_eq!(router.len(), 2);
        assert_eq!(router.route("settings").unwrap().path, "/settings");
        assert_eq!(router.build_href(&RouteRef::new("settings")).unwrap(), "/settings");
        // URL matching still sees both routes.
        assert_eq!(router.resolve_location("http://x/preferences").meta["v"], 2);
    }

    #[test]
    fn test_ref_to_location() {
        let router = app_router();
        let location = router.ref_to_location(&scenario_ref());

        assert_eq!(location.name, "project");
        assert_eq!(location.param("projectId"), Some("qwe"));
        assert_eq!(location.query, scenario_query());
        assert_eq!(location.hash, "456");
        assert_eq!(location.meta["title"], "Project");
        assert_eq!(location.landing, LandingProps::default());
    }

    #[test]
    fn test_ref_to_location_defaults() {
        let router = app_router();
        let location = router.ref_to_location(&RouteRef::new("project").param("projectId", "qwe"));

        assert!(location.query.is_empty());
        assert_eq!(location.hash, "");
    }

    #[test]
    fn test_ref_to_location_with_landing() {
        let router = app_router();
        let landing = LandingProps {
            redirected: true,
            ..LandingProps::default()
        };
        let location = router.ref_to_location_with_landing(&RouteRef::new("home"), landing);
        assert!(location.landing.redirected);
        assert!(!location.landing.replaced);
    }

    #[test]
    fn test_ref_to_unknown_route_is_not_found() {
        let router = app_router();
        let location = router.ref_to_location(&RouteRef::new("missing").hash("x"));
        assert_eq!(location, Location::not_found());
    }

    #[test]
    fn test_build_href() {
        let router = app_router();
        let href = router.build_href(&scenario_ref()).unwrap();
        assert_eq!(href, "/projects/qwe?qwe=rty&asd=true&zxc=123#456");
    }

    #[test]
    fn test_build_href_literal_route() {
        let router = app_router();
        assert_eq!(router.build_href(&RouteRef::new("home")).unwrap(), "/");
        assert_eq!(
            router.build_href(&RouteRef::new("home").hash("")).unwrap(),
            "/"
        );
    }

    #[test]
    fn test_build_href_unknown_route() {
        let router = app_router();
        let err = router.build_href(&RouteRef::new("settings")).unwrap_err();
        assert!(matches!(err, RouteError::RouteNotFound { ref name } if name == "settings"));
    }

    #[test]
    fn test_build_href_missing_param() {
        let router = app_router();

        let err = router.build_href(&RouteRef::new("project")).unwrap_err();
        assert!(matches!(
            err,
            RouteError::MissingParam { ref route, ref param } if route == "project" && param == "projectId"
        ));

        let err = router
            .build_href(&RouteRef::new("project").param("other", "1"))
            .unwrap_err();
        assert!(matches!(err, RouteError::MissingParam { .. }));
    }

    #[test]
    fn test_build_href_refuses_dot_segment_params() {
        let router = app_router();
        for value in [".", ".."] {
            let err = router
                .build_href(&RouteRef::new("project").param("projectId", value))
                .unwrap_err();
            assert!(matches!(
                err,
                RouteError::DotSegmentParam { ref param, value: ref v, .. } if param == "projectId" && v == value
            ));
        }
    }

    #[test]
    fn test_round_trip_backslash_param() {
        let router = app_router();
        let route_ref = RouteRef::new("project").param("projectId", "a\\b");

        let href = router.build_href(&route_ref).unwrap();
        assert_eq!(href, "/projects/a%5Cb");

        let location = router.resolve_location(&format!("http://localhost{}", href));
        assert_eq!(location.name, "project");
        assert_eq!(location.param("projectId"), Some("a\\b"));
    }

    #[test]
    fn test_empty_table() {
        let router = RouterCore::new(Vec::new()).unwrap();
        assert!(router.is_empty());
        assert!(router.resolve_location("http://localhost/").is_not_found());
        assert!(!app_router().is_empty());
    }

    #[test]
    fn test_build_href_does_not_mutate_ref() {
        let router = app_router();
        let route_ref = scenario_ref();
        let before = route_ref.clone();
        router.build_href(&route_ref).unwrap();
        assert_eq!(route_ref, before);
    }

    #[test]
    fn test_round_trip() {
        let router = app_router();
        let route_ref = RouteRef::new("project")
            .param("projectId", "a b/c")
            .query("q", "x y&z")
            .query("n", 1.5)
            .query("f", false)
            .hash("section-2");

        let href = router.build_href(&route_ref).unwrap();
        let resolved = router.resolve_location(&format!("http://localhost{}", href));
        let expected = router.ref_to_location(&route_ref);

        assert_eq!(resolved.name, expected.name);
        assert_eq!(resolved.params, expected.params);
        assert_eq!(resolved.query, expected.query);
        assert_eq!(resolved.hash, expected.hash);
    }

    #[test]
    fn test_idempotence() {
        let router = app_router();
        let url = "http://x/projects/qwe?a=1#h";
        assert_eq!(router.resolve_location(url), router.resolve_location(url));
        assert_eq!(
            router.ref_to_location(&scenario_ref()),
            router.ref_to_location(&scenario_ref())
        );
        assert_eq!(
            router.build_href(&scenario_ref()).unwrap(),
            router.build_href(&scenario_ref()).unwrap()
        );
    }

    #[test]
    fn test_router_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RouterCore>();
    }
}
