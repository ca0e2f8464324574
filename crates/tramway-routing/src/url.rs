//! Reverse URL building.
//!
//! Given a route's registered alias and a mapping of placeholder name to
//! value, [`build_url`] reconstructs the literal URI by substituting each
//! `{placeholder}` in the route's raw template. This is the reverse of
//! resolution and is used for link generation.
//!
//! Values are substituted as-is: the builder performs no percent-encoding,
//! so callers must encode values that may contain reserved characters.

use std::collections::HashMap;
use std::hash::BuildHasher;

use tramway_core::{TramwayError, TramwayResult};

use crate::router::Router;

/// Builds a URL from a route's alias and placeholder values.
///
/// Pure with respect to the table: nothing is mutated, and the same inputs
/// always produce the same URL.
///
/// # Errors
///
/// Returns [`TramwayError::RouteNotFound`] if no route is registered under
/// `name`, or [`TramwayError::MissingParameter`] if the template contains a
/// placeholder with no value in `args`.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use tramway_routing::{build_url, Destination, Route, Router};
///
/// let mut router = Router::<()>::new();
/// let route = Route::new(["GET"], "/post/{slug}", Destination::parse("Post@show")?)?
///     .named("post");
/// router.add(route)?;
///
/// let mut args = HashMap::new();
/// args.insert("slug", "hello-world");
/// assert_eq!(build_url(&router, "post", &args)?, "/post/hello-world");
/// # Ok::<(), tramway_core::TramwayError>(())
/// ```
pub fn build_url<H, S: BuildHasher>(
    router: &Router<H>,
    name: &str,
    args: &HashMap<&str, &str, S>,
) -> TramwayResult<String> {
    let route = router
        .route_named(name)
        .ok_or_else(|| TramwayError::RouteNotFound(name.to_string()))?;
    substitute_template(route.template(), args)
}

/// Substitutes placeholder values into a raw URI template, in declaration
/// order. Unused entries in `args` are ignored.
fn substitute_template<S: BuildHasher>(
    template: &str,
    args: &HashMap<&str, &str, S>,
) -> TramwayResult<String> {
    let mut result = String::with_capacity(template.len());
    let mut remaining = template;

    while !remaining.is_empty() {
        if let Some(start) = remaining.find('{') {
            result.push_str(&remaining[..start]);

            let end = remaining[start..].find('}').ok_or_else(|| {
                TramwayError::InvalidPattern(format!("Unclosed '{{' in template: {template}"))
            })? + start;

            let name = &remaining[start + 1..end];
            let value = args.get(name).ok_or_else(|| TramwayError::MissingParameter {
                name: name.to_string(),
                route: template.to_string(),
            })?;
            result.push_str(value);

            remaining = &remaining[end + 1..];
        } else {
            result.push_str(remaining);
            break;
        }
    }

    Ok(result)
}
