//! URI template compilation and matching.
//!
//! This module provides [`RoutePattern`], the compiled form of a URI
//! template such as `/user/{id}`. Literal segments match verbatim and
//! case-insensitively; `{name}` placeholders match one path segment each
//! and capture it for parameter extraction.

use once_cell::sync::Lazy;
use regex::Regex;

use tramway_core::{TramwayError, TramwayResult};

/// Valid placeholder names: one or more word characters.
static PARAM_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\w+$").unwrap_or_else(|e| panic!("placeholder name regex: {e}"))
});

/// A compiled URI template.
///
/// Holds the raw template as registered, the anchored case-insensitive
/// regex built from it, and the placeholder names in declaration order.
/// Compilation is deterministic: compiling the same template twice yields
/// an equivalent matcher, so compiled patterns can be cached and reused
/// across resolutions.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    /// The original template string (e.g. `"/user/{id}"`)
    template: String,
    /// The compiled regex used for matching
    regex: Regex,
    /// Placeholder names extracted from the template, in order
    param_names: Vec<String>,
}

impl RoutePattern {
    /// Compiles a URI template into a matchable pattern.
    ///
    /// `{name}` placeholders become single-segment capture groups; all other
    /// text is matched literally (case-insensitively). The resulting regex
    /// is anchored at both ends of the path.
    ///
    /// # Errors
    ///
    /// Returns [`TramwayError::InvalidPattern`] if the template contains an
    /// unclosed `{`, an empty or non-word placeholder name, or the same
    /// placeholder name twice.
    pub fn compile(template: &str) -> TramwayResult<Self> {
        let mut regex_str = String::from("(?i)^");
        let mut param_names: Vec<String> = Vec::new();
        let mut remaining = template;

        while !remaining.is_empty() {
            if let Some(start) = remaining.find('{') {
                let prefix = &remaining[..start];
                regex_str.push_str(&regex::escape(prefix));

                let end = remaining[start..].find('}').ok_or_else(|| {
                    TramwayError::InvalidPattern(format!("Unclosed '{{' in template: {template}"))
                })? + start;

                let name = &remaining[start + 1..end];
                if !PARAM_NAME.is_match(name) {
                    return Err(TramwayError::InvalidPattern(format!(
                        "Invalid placeholder name '{name}' in template: {template}"
                    )));
                }
                if param_names.iter().any(|existing| existing == name) {
                    return Err(TramwayError::InvalidPattern(format!(
                        "Duplicate placeholder '{name}' in template: {template}"
                    )));
                }

                regex_str.push_str("([^/]+)");
                param_names.push(name.to_string());

                remaining = &remaining[end + 1..];
            } else {
                regex_str.push_str(&regex::escape(remaining));
                break;
            }
        }

        regex_str.push('$');
        let regex = Regex::new(&regex_str).map_err(|e| {
            TramwayError::InvalidPattern(format!("Template '{template}' compiled to invalid regex: {e}"))
        })?;

        Ok(Self {
            template: template.to_string(),
            regex,
            param_names,
        })
    }

    /// Returns the original template string.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Returns the compiled regex.
    pub const fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Returns the placeholder names, in declaration order.
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// Returns `true` if the template contains no placeholders.
    pub fn is_static(&self) -> bool {
        self.param_names.is_empty()
    }

    /// Attempts to match a request path against this pattern.
    ///
    /// Byte equality against the raw template is tried first; only on a
    /// mismatch does the compiled regex run. On a regex match the full-match
    /// group is dropped and the captured segments are returned in
    /// declaration order. Returns `None` if the path does not match.
    pub fn captures(&self, path: &str) -> Option<Vec<String>> {
        if path == self.template {
            return Some(Vec::new());
        }

        let caps = self.regex.captures(path)?;
        Some(
            caps.iter()
                .skip(1)
                .flatten()
                .map(|group| group.as_str().to_string())
                .collect(),
        )
    }
}
