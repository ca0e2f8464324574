//! Core error types for the tramway routing engine.
//!
//! This module provides the [`TramwayError`] enum covering every failure the
//! engine can report: resolution misses, registration defects, reverse-URL
//! lookup failures, and configuration errors. Each variant maps to an HTTP
//! status code via [`TramwayError::status_code`].

use thiserror::Error;

/// The primary error type for the tramway routing engine.
///
/// Resolution-time variants (`MethodNotAllowed`, `NotFound`) are routine,
/// expected outcomes: every request for a genuinely missing page produces
/// one, and callers translate them into the matching HTTP status.
/// Registration-time variants (`MalformedDestination`, `DuplicateAlias`,
/// `InvalidPattern`) indicate a configuration defect and should be treated
/// as fatal startup failures.
#[derive(Error, Debug)]
pub enum TramwayError {
    // ── Resolution ───────────────────────────────────────────────────

    /// No routes are registered for the requested HTTP method.
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    /// Routes exist for the method, but none match the request path.
    #[error("Not found: {0}")]
    NotFound(String),

    // ── Registration ─────────────────────────────────────────────────

    /// A destination string does not split into exactly two non-empty
    /// parts on `@`.
    #[error("Malformed destination: {0}")]
    MalformedDestination(String),

    /// Two routes were registered under the same alias.
    #[error("Duplicate route alias: {0}")]
    DuplicateAlias(String),

    /// A URI template could not be compiled.
    #[error("Invalid route pattern: {0}")]
    InvalidPattern(String),

    // ── Reverse URL building ─────────────────────────────────────────

    /// No route is registered under the requested alias.
    #[error("No route named '{0}'")]
    RouteNotFound(String),

    /// A placeholder in the route template has no supplied value.
    #[error("No value for parameter '{name}' in route '{route}'")]
    MissingParameter {
        /// The placeholder that was left unfilled.
        name: String,
        /// The raw template of the route being built.
        route: String,
    },

    // ── Configuration ────────────────────────────────────────────────

    /// A settings or route-manifest file is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred while reading a configuration file.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl TramwayError {
    /// Returns the HTTP status code associated with this error.
    ///
    /// - `NotFound` -> 404
    /// - `MethodNotAllowed` -> 405
    /// - Everything else -> 500 (configuration and usage defects)
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::MethodNotAllowed(_) => 405,
            Self::MalformedDestination(_)
            | Self::DuplicateAlias(_)
            | Self::InvalidPattern(_)
            | Self::RouteNotFound(_)
            | Self::MissingParameter { .. }
            | Self::ConfigurationError(_)
            | Self::IoError(_) => 500,
        }
    }

    /// Returns `true` for the routine resolution-time misses that callers
    /// handle per request, as opposed to fatal configuration defects.
    pub const fn is_resolution_miss(&self) -> bool {
        matches!(self, Self::MethodNotAllowed(_) | Self::NotFound(_))
    }
}

/// A convenience type alias for `Result<T, TramwayError>`.
pub type TramwayResult<T> = Result<T, TramwayError>;
