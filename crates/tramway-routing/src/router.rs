//! The route table: registration, dispatch, and tie-breaking.
//!
//! [`Router`] holds every registered [`Route`], indexed per HTTP method in
//! registration order, plus an alias index for reverse URL building.
//! Resolution scans the requested method's entries in order and the
//! earliest-registered match wins; specificity plays no part in precedence.
//!
//! The table is built single-threaded during bootstrap and is read-only
//! afterwards: [`Router::resolve`] takes `&self` and returns an owned
//! [`RouteMatch`], so any number of concurrent resolutions can share one
//! table without extracted parameters leaking between requests.

use std::collections::HashMap;
use std::hash::BuildHasher;
use std::sync::Arc;

use tramway_core::{TramwayError, TramwayResult};

use crate::route::{Destination, Route};

/// The result of successfully resolving a `(method, path)` pair.
///
/// Owns the extracted parameter values for this one call; the shared
/// [`Route`] is never written to during resolution.
#[derive(Debug, Clone)]
pub struct RouteMatch<H> {
    route: Arc<Route<H>>,
    params: Vec<String>,
}

impl<H> RouteMatch<H> {
    /// Returns the matched route.
    pub fn route(&self) -> &Route<H> {
        &self.route
    }

    /// Returns the destination of the matched route.
    pub fn destination(&self) -> &Destination<H> {
        self.route.destination()
    }

    /// Returns the extracted parameter values, in the order the
    /// placeholders appear in the template. Empty for static routes.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Looks up an extracted value by placeholder name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.route
            .pattern()
            .param_names()
            .iter()
            .position(|candidate| candidate == name)
            .and_then(|index| self.params.get(index))
            .map(String::as_str)
    }

    /// Returns the extracted parameters as a name -> value map.
    pub fn params_map(&self) -> HashMap<&str, &str> {
        self.route
            .pattern()
            .param_names()
            .iter()
            .map(String::as_str)
            .zip(self.params.iter().map(String::as_str))
            .collect()
    }
}

/// The route table.
///
/// `H` is the embedding application's pre-bound handler type; tables that
/// only use `"Controller@action"` destinations can instantiate it as
/// `Router<()>`.
pub struct Router<H> {
    /// Per-method entry lists, registration order preserved
    by_method: HashMap<String, Vec<Arc<Route<H>>>>,
    /// Alias index, used only for reverse URL building
    by_name: HashMap<String, Arc<Route<H>>>,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self {
            by_method: HashMap::new(),
            by_name: HashMap::new(),
        }
    }
}

impl<H> Router<H> {
    /// Creates an empty route table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a route under every method it declares, appending to the
    /// existing order for each method.
    ///
    /// # Errors
    ///
    /// Returns [`TramwayError::DuplicateAlias`] if the route carries a name
    /// that is already registered. The table is unchanged on error.
    pub fn add(&mut self, route: Route<H>) -> TramwayResult<()> {
        let route = Arc::new(route);

        if let Some(name) = route.name() {
            if self.by_name.contains_key(name) {
                return Err(TramwayError::DuplicateAlias(name.to_string()));
            }
            self.by_name.insert(name.to_string(), Arc::clone(&route));
        }

        for method in route.methods() {
            self.by_method
                .entry(method.clone())
                .or_default()
                .push(Arc::clone(&route));
        }

        tracing::debug!(
            template = route.template(),
            methods = ?route.methods(),
            name = route.name(),
            "registered route"
        );
        Ok(())
    }

    /// Replaces the entire table contents atomically.
    ///
    /// A fresh table is fully built from `routes` first and only then
    /// swapped in; prior entries and indices are discarded in one step.
    /// Compiled matchers ride along inside the `Route` values, so a
    /// precomputed route set is cached without recompiling patterns.
    ///
    /// # Errors
    ///
    /// Returns [`TramwayError::DuplicateAlias`] if two routes share a name;
    /// the previous contents are left untouched in that case.
    pub fn make(&mut self, routes: Vec<Route<H>>) -> TramwayResult<()> {
        let mut fresh = Self::new();
        for route in routes {
            fresh.add(route)?;
        }

        tracing::debug!(methods = fresh.by_method.len(), "route table replaced");
        *self = fresh;
        Ok(())
    }

    /// Resolves a request to a route and its extracted parameters.
    ///
    /// The method token is uppercased before lookup. If no routes are
    /// registered for the method at all, the result is `MethodNotAllowed`
    /// so callers can answer with a 405; if routes exist but none matches
    /// the path, the result is `NotFound`. Entries are scanned in
    /// registration order, trying byte equality against the raw template
    /// before the compiled matcher, and the first match wins.
    ///
    /// # Errors
    ///
    /// Returns [`TramwayError::MethodNotAllowed`] or
    /// [`TramwayError::NotFound`] as described above. Both are routine
    /// outcomes for the caller to translate, not table defects.
    pub fn resolve(&self, method: &str, path: &str) -> TramwayResult<RouteMatch<H>> {
        let method = method.to_ascii_uppercase();
        let Some(entries) = self.by_method.get(&method) else {
            return Err(TramwayError::MethodNotAllowed(method));
        };

        for route in entries {
            if let Some(params) = route.pattern().captures(path) {
                tracing::trace!(template = route.template(), path, "route matched");
                return Ok(RouteMatch {
                    route: Arc::clone(route),
                    params,
                });
            }
        }

        tracing::trace!(%method, path, "no route matched");
        Err(TramwayError::NotFound(path.to_string()))
    }

    /// Returns the route registered under the given alias, if any.
    pub fn route_named(&self, name: &str) -> Option<&Route<H>> {
        self.by_name.get(name).map(Arc::as_ref)
    }

    /// Builds a URL from a route's alias and placeholder values.
    ///
    /// Convenience front for [`build_url`](crate::url::build_url).
    ///
    /// # Errors
    ///
    /// Returns [`TramwayError::RouteNotFound`] or
    /// [`TramwayError::MissingParameter`]; see [`crate::url`].
    pub fn build_url<S: BuildHasher>(
        &self,
        name: &str,
        args: &HashMap<&str, &str, S>,
    ) -> TramwayResult<String> {
        crate::url::build_url(self, name, args)
    }

    /// Returns the entries registered for a method, in registration order.
    pub fn routes_for(&self, method: &str) -> Vec<&Route<H>> {
        self.by_method
            .get(&method.to_ascii_uppercase())
            .map(|entries| entries.iter().map(Arc::as_ref).collect())
            .unwrap_or_default()
    }

    /// Returns `true` if no routes are registered.
    pub fn is_empty(&self) -> bool {
        self.by_method.is_empty()
    }
}

impl<H> std::fmt::Debug for Router<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("methods", &self.by_method.keys().collect::<Vec<_>>())
            .field("named", &self.by_name.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(spec: &str) -> Destination<()> {
        Destination::parse(spec).unwrap()
    }

    fn route(methods: &[&str], template: &str, spec: &str) -> Route<()> {
        Route::new(methods.iter().copied(), template, controller(spec)).unwrap()
    }

    #[test]
    fn test_resolve_static_route() {
        let mut router = Router::new();
        router.add(route(&["GET"], "/articles", "Article@index")).unwrap();

        let m = router.resolve("GET", "/articles").unwrap();
        assert!(m.params().is_empty());
        assert_eq!(m.route().template(), "/articles");
    }

    #[test]
    fn test_resolve_extracts_params_in_order() {
        let mut router = Router::new();
        router
            .add(route(&["GET"], "/articles/{year}/{slug}", "Article@show"))
            .unwrap();

        let m = router.resolve("GET", "/articles/2024/hello-world").unwrap();
        assert_eq!(m.params(), ["2024", "hello-world"]);
        assert_eq!(m.param("year"), Some("2024"));
        assert_eq!(m.param("slug"), Some("hello-world"));
        assert_eq!(m.param("missing"), None);
    }

    #[test]
    fn test_params_map() {
        let mut router = Router::new();
        router.add(route(&["GET"], "/user/{id}", "User@show")).unwrap();

        let m = router.resolve("GET", "/user/42").unwrap();
        let map = m.params_map();
        assert_eq!(map.len(), 1);
        assert_eq!(map["id"], "42");
    }

    #[test]
    fn test_method_not_allowed_vs_not_found() {
        let mut router = Router::new();
        router.add(route(&["GET"], "/user/{id}", "User@show")).unwrap();

        assert!(matches!(
            router.resolve("POST", "/user/42"),
            Err(TramwayError::MethodNotAllowed(_))
        ));
        assert!(matches!(
            router.resolve("GET", "/order/42"),
            Err(TramwayError::NotFound(_))
        ));
    }

    #[test]
    fn test_method_token_case_normalized() {
        let mut router = Router::new();
        router.add(route(&["get"], "/articles", "Article@index")).unwrap();

        assert!(router.resolve("GET", "/articles").is_ok());
        assert!(router.resolve("get", "/articles").is_ok());
    }

    #[test]
    fn test_route_indexed_under_every_method() {
        let mut router = Router::new();
        router
            .add(route(&["GET", "HEAD", "POST"], "/form", "Form@submit"))
            .unwrap();

        for method in ["GET", "HEAD", "POST"] {
            assert!(router.resolve(method, "/form").is_ok());
        }
    }

    #[test]
    fn test_registration_order_beats_specificity() {
        let mut router = Router::new();
        router.add(route(&["GET"], "/user/{id}", "User@show")).unwrap();
        router
            .add(route(&["GET"], "/user/special", "User@special"))
            .unwrap();

        // The dynamic route was registered first, so it wins even though
        // the static one matches the same path exactly.
        let m = router.resolve("GET", "/user/special").unwrap();
        assert_eq!(m.route().template(), "/user/{id}");
        assert_eq!(m.params(), ["special"]);
    }

    #[test]
    fn test_first_registered_static_wins_over_later_duplicate() {
        let mut router = Router::new();
        router
            .add(route(&["GET"], "/articles", "Article@first").named("first"))
            .unwrap();
        router
            .add(route(&["GET"], "/articles", "Article@second").named("second"))
            .unwrap();

        let m = router.resolve("GET", "/articles").unwrap();
        assert_eq!(m.route().name(), Some("first"));
    }

    #[test]
    fn test_duplicate_alias_rejected() {
        let mut router = Router::new();
        router
            .add(route(&["GET"], "/a", "A@index").named("page"))
            .unwrap();
        let result = router.add(route(&["GET"], "/b", "B@index").named("page"));
        assert!(matches!(result, Err(TramwayError::DuplicateAlias(_))));
    }

    #[test]
    fn test_make_replaces_all_contents() {
        let mut router = Router::new();
        router
            .add(route(&["GET"], "/old", "Old@index").named("old"))
            .unwrap();

        router
            .make(vec![route(&["GET"], "/new", "New@index").named("new")])
            .unwrap();

        assert!(matches!(
            router.resolve("GET", "/old"),
            Err(TramwayError::NotFound(_))
        ));
        assert!(router.resolve("GET", "/new").is_ok());
        assert!(router.route_named("old").is_none());
        assert!(router.route_named("new").is_some());
    }

    #[test]
    fn test_failed_make_leaves_table_untouched() {
        let mut router = Router::new();
        router
            .add(route(&["GET"], "/keep", "Keep@index").named("keep"))
            .unwrap();

        let result = router.make(vec![
            route(&["GET"], "/a", "A@index").named("dup"),
            route(&["GET"], "/b", "B@index").named("dup"),
        ]);
        assert!(matches!(result, Err(TramwayError::DuplicateAlias(_))));

        assert!(router.resolve("GET", "/keep").is_ok());
        assert!(router.route_named("keep").is_some());
    }

    #[test]
    fn test_handler_destination_returned_intact() {
        let mut router: Router<&'static str> = Router::new();
        router
            .add(Route::new(["GET"], "/health", Destination::Handler("health-handler")).unwrap())
            .unwrap();

        let m = router.resolve("GET", "/health").unwrap();
        match m.destination() {
            Destination::Handler(handler) => assert_eq!(*handler, "health-handler"),
            Destination::Controller { .. } => panic!("expected handler destination"),
        }
    }

    #[test]
    fn test_controller_destination_returned_as_pair() {
        let mut router = Router::new();
        router.add(route(&["GET"], "/user/{id}", "UserController@show")).unwrap();

        let m = router.resolve("GET", "/user/42").unwrap();
        match m.destination() {
            Destination::Controller { controller, action } => {
                assert_eq!(controller, "UserController");
                assert_eq!(action, "show");
            }
            Destination::Handler(()) => panic!("expected controller destination"),
        }
    }

    #[test]
    fn test_routes_for_order_and_missing_method() {
        let mut router = Router::new();
        router.add(route(&["GET"], "/a", "A@index")).unwrap();
        router.add(route(&["GET"], "/b", "B@index")).unwrap();

        let entries = router.routes_for("GET");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].template(), "/a");
        assert_eq!(entries[1].template(), "/b");
        assert!(router.routes_for("DELETE").is_empty());
    }

    #[test]
    fn test_empty_router() {
        let router: Router<()> = Router::new();
        assert!(router.is_empty());
        assert!(matches!(
            router.resolve("GET", "/"),
            Err(TramwayError::MethodNotAllowed(_))
        ));
    }
}
