//! HTTP verbs and verb sets.
//!
//! A route accepts either one verb, a `|`-separated set of verbs, or any
//! verb (`*`). Parsing is case-insensitive; the canonical form is uppercase
//! in the order given, duplicates removed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::routing::error::RouterError;

/// A single HTTP verb the router knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verb {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Merge,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Head => "HEAD",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Patch => "PATCH",
            Verb::Delete => "DELETE",
            Verb::Options => "OPTIONS",
            Verb::Merge => "MERGE",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Verb::Get),
            "HEAD" => Ok(Verb::Head),
            "POST" => Ok(Verb::Post),
            "PUT" => Ok(Verb::Put),
            "PATCH" => Ok(Verb::Patch),
            "DELETE" => Ok(Verb::Delete),
            "OPTIONS" => Ok(Verb::Options),
            "MERGE" => Ok(Verb::Merge),
            _ => Err(RouterError::InvalidMethod(s.to_string())),
        }
    }
}

/// The verbs a route accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodSpec {
    /// Wildcard: any method, including ones not listed in [`Verb`].
    Any,
    /// An explicit, non-empty set kept in declaration order.
    Set(Vec<Verb>),
}

impl MethodSpec {
    /// Returns true if a request with `method` may use this route.
    ///
    /// Unknown request methods only match [`MethodSpec::Any`].
    pub fn allows(&self, method: &str) -> bool {
        match self {
            MethodSpec::Any => true,
            MethodSpec::Set(verbs) => method
                .parse::<Verb>()
                .map(|v| verbs.contains(&v))
                .unwrap_or(false),
        }
    }

    /// Canonical string used for display and route keys.
    pub fn canonical(&self) -> String {
        match self {
            MethodSpec::Any => "*".to_string(),
            MethodSpec::Set(verbs) => verbs
                .iter()
                .map(Verb::as_str)
                .collect::<Vec<_>>()
                .join("|"),
        }
    }
}

impl From<Verb> for MethodSpec {
    fn from(verb: Verb) -> Self {
        MethodSpec::Set(vec![verb])
    }
}

impl FromStr for MethodSpec {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed == "*" {
            return Ok(MethodSpec::Any);
        }
        if trimmed.is_empty() {
            return Err(RouterError::InvalidMethod(s.to_string()));
        }

        let mut verbs = Vec::new();
        for part in trimmed.split('|') {
            let verb: Verb = part
                .parse()
                .map_err(|_| RouterError::InvalidMethod(s.to_string()))?;
            if !verbs.contains(&verb) {
                verbs.push(verb);
            }
        }
        Ok(MethodSpec::Set(verbs))
    }
}

impl TryFrom<&str> for MethodSpec {
    type Error = RouterError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for MethodSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_and_set() {
        let get: MethodSpec = "get".parse().unwrap();
        assert_eq!(get, MethodSpec::Set(vec![Verb::Get]));

        let set: MethodSpec = "GET | post|GET".parse().unwrap();
        assert_eq!(set, MethodSpec::Set(vec![Verb::Get, Verb::Post]));
        assert_eq!(set.canonical(), "GET|POST");
    }

    #[test]
    fn test_wildcard_allows_anything() {
        let any: MethodSpec = "*".parse().unwrap();
        assert!(any.allows("PATCH"));
        assert!(any.allows("PROPFIND"));
        assert_eq!(any.canonical(), "*");
    }

    #[test]
    fn test_set_filters_methods() {
        let spec: MethodSpec = "GET|MERGE".parse().unwrap();
        assert!(spec.allows("get"));
        assert!(spec.allows("MERGE"));
        assert!(!spec.allows("DELETE"));
        assert!(!spec.allows("PROPFIND"));
    }

    #[test]
    fn test_invalid_specs_rejected() {
        assert!(matches!("".parse::<MethodSpec>(), Err(RouterError::InvalidMethod(_))));
        assert!(matches!("GET|FETCH".parse::<MethodSpec>(), Err(RouterError::InvalidMethod(_))));
        assert!(matches!("GET||POST".parse::<MethodSpec>(), Err(RouterError::InvalidMethod(_))));
    }
}
