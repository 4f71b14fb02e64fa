//! Route keys and name normalization.
//!
//! A route key is the SHA-256 of `method://uri[#name]`, rendered as
//! lowercase hex. The same triple always produces the same key, which is
//! what makes re-registration detectable.

use std::fmt;

use serde::Serialize;
use sha2::{Digest, Sha256};

/// Stable identity of a registered route.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RouteKey(String);

impl RouteKey {
    /// Compute the key for a canonical method string, URI and normalized name.
    pub fn compute(method: &str, uri: &str, name: Option<&str>) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(method.as_bytes());
        hasher.update(b"://");
        hasher.update(uri.as_bytes());
        if let Some(name) = name {
            hasher.update(b"#");
            hasher.update(name.as_bytes());
        }
        Self(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RouteKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Fold a route name for use as an index key.
///
/// Trims, lowercases and collapses inner whitespace runs to a single space.
/// Returns `None` when nothing is left.
pub fn normalize_name(name: &str) -> Option<String> {
    let folded = name
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ");
    if folded.is_empty() {
        None
    } else {
        Some(folded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_deterministic() {
        let a = RouteKey::compute("GET", "/widgets", Some("widget.list"));
        let b = RouteKey::compute("GET", "/widgets", Some("widget.list"));
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 64);
    }

    #[test]
    fn test_key_depends_on_every_component() {
        let base = RouteKey::compute("GET", "/widgets", None);
        assert_ne!(base, RouteKey::compute("POST", "/widgets", None));
        assert_ne!(base, RouteKey::compute("GET", "/widgets/", None));
        assert_ne!(base, RouteKey::compute("GET", "/widgets", Some("w")));
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Widget   View "), Some("widget view".to_string()));
        assert_eq!(normalize_name("widget.view"), Some("widget.view".to_string()));
        assert_eq!(normalize_name("   "), None);
    }
}
