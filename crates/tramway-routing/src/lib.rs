//! # tramway-routing
//!
//! HTTP route tables, URI pattern matching, and reverse URL generation.
//!
//! This crate is the routing engine of the tramway workspace:
//!
//! - [`pattern`]: URI template compilation (`/user/{id}` into a matcher
//!   plus ordered parameter names)
//! - [`route`]: route records and tagged destination references
//! - [`router`]: the route table, with per-method registration-ordered
//!   dispatch and first-match-wins tie-breaking
//! - [`url`]: reverse URL building from a route's alias
//! - [`descriptor`]: plain route descriptors and TOML/JSON manifest loading
//!
//! The table is built once at startup and is read-only afterwards;
//! [`Router::resolve`] takes `&self` and returns an owned [`RouteMatch`],
//! so concurrent resolutions share one table safely.
//!
//! # Examples
//!
//! ```
//! use std::collections::HashMap;
//! use tramway_routing::{Destination, Route, Router};
//!
//! let mut router = Router::<()>::new();
//! let route = Route::new(["GET"], "/user/{id}", Destination::parse("UserController@show")?)?
//!     .named("user.show");
//! router.add(route)?;
//!
//! // Forward resolution
//! let m = router.resolve("GET", "/user/42")?;
//! assert_eq!(m.params(), ["42"]);
//!
//! // Reverse resolution
//! let mut args = HashMap::new();
//! args.insert("id", "7");
//! assert_eq!(router.build_url("user.show", &args)?, "/user/7");
//! # Ok::<(), tramway_core::TramwayError>(())
//! ```

pub mod descriptor;
pub mod pattern;
pub mod route;
pub mod router;
pub mod url;

// Re-export the primary surface at the crate root.
pub use descriptor::{RouteDescriptor, RouteManifest};
pub use pattern::RoutePattern;
pub use route::{Destination, Route};
pub use router::{RouteMatch, Router};
pub use url::build_url;
