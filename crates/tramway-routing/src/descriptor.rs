//! Plain route descriptors and manifest loading.
//!
//! External registration passes (an annotation front-end, code generation,
//! or a precompiled route cache) hand the engine plain data: a sequence of
//! [`RouteDescriptor`] values. This module provides that data form, the
//! [`RouteManifest`] document that groups descriptors in a TOML or JSON
//! file, and the loaders that turn a manifest into a fully built table via
//! [`Router::make`].
//!
//! ## Manifest format
//!
//! ```toml
//! [[routes]]
//! methods = ["GET", "HEAD"]
//! path = "/user/{id}"
//! destination = "UserController@show"
//! name = "user.show"
//! allowed_origins = ["https://example.com"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use tramway_core::{TramwayError, TramwayResult};

use crate::route::{Destination, Route};
use crate::router::Router;

/// The plain data form of one route registration.
///
/// Destinations are composite `"Controller@action"` strings here; pre-bound
/// handler values cannot be described in data and are registered through
/// [`Route::new`] directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteDescriptor {
    /// HTTP method tokens this route responds to.
    /// Defaults to `GET`, `HEAD`, `POST` when omitted.
    #[serde(default = "default_methods")]
    pub methods: Vec<String>,
    /// The URI template (e.g. `"/user/{id}"`).
    pub path: String,
    /// The composite destination string (e.g. `"UserController@show"`).
    pub destination: String,
    /// Optional unique alias for reverse URL building.
    #[serde(default)]
    pub name: Option<String>,
    /// Origins permitted for cross-origin requests.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

fn default_methods() -> Vec<String> {
    vec!["GET".to_string(), "HEAD".to_string(), "POST".to_string()]
}

impl<H> Route<H> {
    /// Builds a route from a descriptor.
    ///
    /// The destination string is parsed and the template compiled eagerly,
    /// so every registration defect in a descriptor surfaces here, at
    /// startup, rather than at request time.
    ///
    /// # Errors
    ///
    /// Returns [`TramwayError::MalformedDestination`],
    /// [`TramwayError::InvalidPattern`], or
    /// [`TramwayError::ConfigurationError`] for a defective descriptor.
    pub fn from_descriptor(descriptor: &RouteDescriptor) -> TramwayResult<Self> {
        let destination = Destination::parse(&descriptor.destination)?;
        let mut route = Self::new(&descriptor.methods, &descriptor.path, destination)?;
        if let Some(name) = &descriptor.name {
            route = route.named(name.clone());
        }
        if !descriptor.allowed_origins.is_empty() {
            route = route.allow_origins(descriptor.allowed_origins.iter().cloned());
        }
        Ok(route)
    }
}

/// A loadable document holding a sequence of route descriptors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteManifest {
    /// The descriptors, in registration (and therefore precedence) order.
    #[serde(default)]
    pub routes: Vec<RouteDescriptor>,
}

impl RouteManifest {
    /// Parses a manifest from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or cannot be deserialized.
    pub fn from_toml_str(toml_str: &str) -> TramwayResult<Self> {
        toml::from_str(toml_str).map_err(|e| {
            TramwayError::ConfigurationError(format!("Failed to parse route manifest TOML: {e}"))
        })
    }

    /// Parses a manifest from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or cannot be deserialized.
    pub fn from_json_str(json_str: &str) -> TramwayResult<Self> {
        serde_json::from_str(json_str).map_err(|e| {
            TramwayError::ConfigurationError(format!("Failed to parse route manifest JSON: {e}"))
        })
    }

    /// Loads a manifest from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML is malformed.
    pub fn from_toml_file(path: impl AsRef<Path>) -> TramwayResult<Self> {
        Self::from_toml_str(&read_manifest_file(path.as_ref())?)
    }

    /// Loads a manifest from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the JSON is malformed.
    pub fn from_json_file(path: impl AsRef<Path>) -> TramwayResult<Self> {
        Self::from_json_str(&read_manifest_file(path.as_ref())?)
    }
}

fn read_manifest_file(path: &Path) -> TramwayResult<String> {
    std::fs::read_to_string(path).map_err(|e| {
        TramwayError::ConfigurationError(format!(
            "Failed to read route manifest '{}': {e}",
            path.display()
        ))
    })
}

impl<H> Router<H> {
    /// Builds every descriptor in the manifest and replaces the table
    /// contents atomically.
    ///
    /// All routes are built up front; the swap only happens once every
    /// descriptor has compiled, so a defective manifest leaves the previous
    /// table contents untouched.
    ///
    /// # Errors
    ///
    /// Returns any descriptor build error, or
    /// [`TramwayError::DuplicateAlias`] if two descriptors share a name.
    pub fn load_manifest(&mut self, manifest: &RouteManifest) -> TramwayResult<()> {
        let mut routes = Vec::with_capacity(manifest.routes.len());
        for descriptor in &manifest.routes {
            routes.push(Route::from_descriptor(descriptor)?);
        }
        self.make(routes)
    }
}
