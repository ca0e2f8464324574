//! Route records and destination references.
//!
//! A [`Route`] associates a set of HTTP methods and a compiled URI pattern
//! with a [`Destination`], plus an optional alias for reverse URL building
//! and an optional set of origins allowed for cross-origin requests. Routes
//! are built once at startup and are immutable afterwards; everything
//! request-scoped lives in the per-call
//! [`RouteMatch`](crate::router::RouteMatch) instead.

use std::fmt;

use tramway_core::{TramwayError, TramwayResult};

use crate::pattern::RoutePattern;

/// The handler reference a matched route points to.
///
/// The engine never invokes the destination; it only hands it back to the
/// caller on a successful match. `H` is whatever pre-bound handler type the
/// embedding application uses.
#[derive(Clone)]
pub enum Destination<H> {
    /// A controller/action pair, parsed from a `"Controller@action"` string.
    Controller {
        /// The controller class name.
        controller: String,
        /// The action method name.
        action: String,
    },
    /// A pre-bound handler value, opaque to the engine.
    Handler(H),
}

impl<H> Destination<H> {
    /// Parses a composite `"Controller@action"` string.
    ///
    /// The string must contain exactly one `@`, with non-empty text on both
    /// sides. Parsing happens once, at registration time; resolution never
    /// re-parses destinations.
    ///
    /// # Errors
    ///
    /// Returns [`TramwayError::MalformedDestination`] for any other string
    /// shape.
    pub fn parse(spec: &str) -> TramwayResult<Self> {
        let mut parts = spec.split('@');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(controller), Some(action), None)
                if !controller.is_empty() && !action.is_empty() =>
            {
                Ok(Self::Controller {
                    controller: controller.to_string(),
                    action: action.to_string(),
                })
            }
            _ => Err(TramwayError::MalformedDestination(spec.to_string())),
        }
    }
}

impl<H> fmt::Debug for Destination<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Controller { controller, action } => f
                .debug_struct("Controller")
                .field("controller", controller)
                .field("action", action)
                .finish(),
            Self::Handler(_) => f.write_str("Handler(..)"),
        }
    }
}

/// One registered route.
///
/// Created by registration collaborators during application bootstrap,
/// either directly via [`Route::new`] or from a
/// [`RouteDescriptor`](crate::descriptor::RouteDescriptor).
#[derive(Clone)]
pub struct Route<H> {
    /// HTTP method tokens, uppercased and deduplicated, in declaration order
    methods: Vec<String>,
    /// The compiled URI pattern
    pattern: RoutePattern,
    /// The handler reference returned on a match
    destination: Destination<H>,
    /// Optional unique alias for reverse URL building
    name: Option<String>,
    /// Origins permitted for cross-origin requests; empty means disallowed
    allowed_origins: Vec<String>,
}

impl<H> Route<H> {
    /// Creates a route for the given methods, URI template, and destination.
    ///
    /// Method tokens are normalized to ASCII uppercase and deduplicated,
    /// preserving declaration order. The template is compiled eagerly, so
    /// pattern defects surface here rather than at request time.
    ///
    /// # Errors
    ///
    /// Returns [`TramwayError::InvalidPattern`] if the template does not
    /// compile, or [`TramwayError::ConfigurationError`] if no methods are
    /// given.
    pub fn new<I, S>(methods: I, template: &str, destination: Destination<H>) -> TramwayResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let pattern = RoutePattern::compile(template)?;

        let mut normalized: Vec<String> = Vec::new();
        for method in methods {
            let token = method.as_ref().to_ascii_uppercase();
            if !normalized.contains(&token) {
                normalized.push(token);
            }
        }
        if normalized.is_empty() {
            return Err(TramwayError::ConfigurationError(format!(
                "Route '{template}' declares no HTTP methods"
            )));
        }

        Ok(Self {
            methods: normalized,
            pattern,
            destination,
            name: None,
            allowed_origins: Vec::new(),
        })
    }

    /// Sets the route's alias, used for reverse URL building.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the origins permitted for cross-origin requests to this route.
    ///
    /// The engine only carries this data; emitting the matching response
    /// headers is the transport collaborator's job.
    #[must_use]
    pub fn allow_origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_origins = origins.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the HTTP method tokens this route responds to.
    pub fn methods(&self) -> &[String] {
        &self.methods
    }

    /// Returns the compiled pattern.
    pub const fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    /// Returns the raw URI template as registered.
    pub fn template(&self) -> &str {
        self.pattern.template()
    }

    /// Returns the destination handler reference.
    pub const fn destination(&self) -> &Destination<H> {
        &self.destination
    }

    /// Returns the route's alias, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the origins permitted for cross-origin requests.
    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    /// Returns `true` if the given origin may make cross-origin requests to
    /// this route. An empty origin list disallows everything; `"*"` allows
    /// any origin.
    pub fn allows_origin(&self, origin: &str) -> bool {
        self.allowed_origins
            .iter()
            .any(|allowed| allowed == "*" || allowed.eq_ignore_ascii_case(origin))
    }
}

impl<H> fmt::Debug for Route<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("methods", &self.methods)
            .field("template", &self.pattern.template())
            .field("destination", &self.destination)
            .field("name", &self.name)
            .field("allowed_origins", &self.allowed_origins)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_parse() {
        let dest = Destination::<()>::parse("UserController@show").unwrap();
        match dest {
            Destination::Controller { controller, action } => {
                assert_eq!(controller, "UserController");
                assert_eq!(action, "show");
            }
            Destination::Handler(()) => panic!("expected controller destination"),
        }
    }

    #[test]
    fn test_destination_parse_no_separator() {
        let result = Destination::<()>::parse("UserController");
        assert!(matches!(result, Err(TramwayError::MalformedDestination(_))));
    }

    #[test]
    fn test_destination_parse_two_separators() {
        let result = Destination::<()>::parse("a@b@c");
        assert!(matches!(result, Err(TramwayError::MalformedDestination(_))));
    }

    #[test]
    fn test_destination_parse_empty_parts() {
        assert!(Destination::<()>::parse("@show").is_err());
        assert!(Destination::<()>::parse("UserController@").is_err());
        assert!(Destination::<()>::parse("@").is_err());
    }

    #[test]
    fn test_methods_normalized_and_deduplicated() {
        let route = Route::new(
            ["get", "HEAD", "Get"],
            "/",
            Destination::<()>::parse("Home@index").unwrap(),
        )
        .unwrap();
        assert_eq!(route.methods(), ["GET", "HEAD"]);
    }

    #[test]
    fn test_empty_methods_rejected() {
        let result = Route::new(
            Vec::<String>::new(),
            "/",
            Destination::<()>::parse("Home@index").unwrap(),
        );
        assert!(matches!(result, Err(TramwayError::ConfigurationError(_))));
    }

    #[test]
    fn test_invalid_template_rejected() {
        let result = Route::new(
            ["GET"],
            "/user/{id",
            Destination::<()>::parse("User@show").unwrap(),
        );
        assert!(matches!(result, Err(TramwayError::InvalidPattern(_))));
    }

    #[test]
    fn test_named_builder() {
        let route = Route::new(["GET"], "/", Destination::<()>::parse("Home@index").unwrap())
            .unwrap()
            .named("home");
        assert_eq!(route.name(), Some("home"));
    }

    #[test]
    fn test_allows_origin() {
        let route = Route::new(["GET"], "/", Destination::<()>::parse("Home@index").unwrap())
            .unwrap()
            .allow_origins(["https://example.com"]);
        assert!(route.allows_origin("https://example.com"));
        assert!(route.allows_origin("HTTPS://EXAMPLE.COM"));
        assert!(!route.allows_origin("https://evil.example"));
    }

    #[test]
    fn test_origins_default_disallowed() {
        let route =
            Route::new(["GET"], "/", Destination::<()>::parse("Home@index").unwrap()).unwrap();
        assert!(route.allowed_origins().is_empty());
        assert!(!route.allows_origin("https://example.com"));
    }

    #[test]
    fn test_wildcard_origin() {
        let route = Route::new(["GET"], "/", Destination::<()>::parse("Home@index").unwrap())
            .unwrap()
            .allow_origins(["*"]);
        assert!(route.allows_origin("https://anything.example"));
    }

    #[test]
    fn test_handler_destination_debug_is_opaque() {
        let dest = Destination::Handler(42_u32);
        assert_eq!(format!("{dest:?}"), "Handler(..)");
    }
}
