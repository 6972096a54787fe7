use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of the environment variable holding the deployment path prefix
pub const PATH_PREFIX_ENV: &str = "ELEVENTY_PATH_PREFIX";

pub const DEFAULT_PATH_PREFIX: &str = "/";

/// Resolves the path prefix from an optional external value.
/// Absent and empty values fall back to `/`, anything else is taken verbatim.
pub fn resolve_path_prefix(value: Option<&str>) -> String {
    match value {
        Some(prefix) if !prefix.is_empty() => prefix.to_owned(),
        _ => DEFAULT_PATH_PREFIX.to_owned(),
    }
}

/// URL path prefix prepended to generated links
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub struct PathPrefix(String);

impl PathPrefix {
    pub fn new(value: Option<&str>) -> Self {
        Self(resolve_path_prefix(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Composes a site-absolute path with the prefix.
    /// External and relative urls are passed through untouched.
    pub fn url(&self, path: &str) -> String {
        if !path.starts_with('/') || path.starts_with("//") || path.contains("://") {
            return path.to_owned();
        }
        let prefix = self.0.trim_end_matches('/');

        if prefix.is_empty() {
            path.to_owned()
        } else {
            format!("{prefix}{path}")
        }
    }
}

impl Default for PathPrefix {
    fn default() -> Self {
        Self(DEFAULT_PATH_PREFIX.to_owned())
    }
}

impl From<String> for PathPrefix {
    fn from(value: String) -> Self {
        Self::new(Some(&value))
    }
}

impl From<PathPrefix> for String {
    fn from(prefix: PathPrefix) -> Self {
        prefix.0
    }
}

impl AsRef<str> for PathPrefix {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PathPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
