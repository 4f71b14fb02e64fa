//! Route matching strategies.
//!
//! # Responsibilities
//! - Compare a request URI against one stored template
//! - Bind placeholder and capture-group values on success
//!
//! # Design Decisions
//! - One strategy per template shape, chosen once at registration
//! - Placeholder templates compile to a single anchored regex
//! - Pattern templates (`@...`) are not anchored; the author decides
//! - Method filtering happens in the table, before any matcher runs

use regex::Regex;

use crate::routing::error::RouterError;
use crate::routing::route::Params;
use crate::routing::template::{Segment, Template};

/// Trait for matching a request URI against one route template.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns the bound parameters if `uri` matches.
    fn capture(&self, uri: &str) -> Option<Params>;
}

/// Matches every URI.
#[derive(Debug, Clone, Default)]
pub struct WildcardMatcher;

impl Matcher for WildcardMatcher {
    fn capture(&self, _uri: &str) -> Option<Params> {
        Some(Params::new())
    }
}

/// Exact string comparison.
#[derive(Debug, Clone)]
pub struct LiteralMatcher {
    uri: String,
}

impl LiteralMatcher {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }
}

impl Matcher for LiteralMatcher {
    fn capture(&self, uri: &str) -> Option<Params> {
        (uri == self.uri).then(Params::new)
    }
}

/// A user-supplied regex. Named groups bind by name, unnamed ones by index.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    regex: Regex,
}

impl PatternMatcher {
    pub fn new(regex: Regex) -> Self {
        Self { regex }
    }
}

impl Matcher for PatternMatcher {
    fn capture(&self, uri: &str) -> Option<Params> {
        let caps = self.regex.captures(uri)?;
        let mut params = Params::new();
        for (index, name) in self.regex.capture_names().enumerate().skip(1) {
            if let Some(value) = caps.get(index) {
                let key = name.map(str::to_string).unwrap_or_else(|| index.to_string());
                params.insert(key, value.as_str().to_string());
            }
        }
        Some(params)
    }
}

/// Placeholder template compiled to an anchored regex.
#[derive(Debug, Clone)]
pub struct PlaceholderMatcher {
    regex: Regex,
    names: Vec<String>,
}

impl PlaceholderMatcher {
    pub fn compile(raw: &str, segments: &[Segment]) -> Result<Self, RouterError> {
        let mut pattern = String::from("^");
        let mut names = Vec::new();

        for segment in segments {
            let (placeholder, optional) = match segment {
                Segment::Literal(text) => {
                    pattern.push_str(&regex::escape(text));
                    continue;
                }
                Segment::Required(p) => (p, false),
                Segment::Optional(p) => (p, true),
            };

            pattern.push_str("(?:");
            if let Some(sep) = placeholder.separator {
                pattern.push_str(&regex::escape(&sep.to_string()));
            }
            pattern.push_str(&format!("(?P<{}>{})", placeholder.name, placeholder.pattern));
            pattern.push(')');
            if optional {
                pattern.push('?');
            }
            names.push(placeholder.name.clone());
        }
        pattern.push('$');

        let regex = Regex::new(&pattern).map_err(|e| {
            RouterError::template(raw, format!("compiled pattern is invalid: {e}"))
        })?;
        Ok(Self { regex, names })
    }
}

impl Matcher for PlaceholderMatcher {
    fn capture(&self, uri: &str) -> Option<Params> {
        let caps = self.regex.captures(uri)?;
        Some(
            self.names
                .iter()
                .filter_map(|name| {
                    caps.name(name)
                        .map(|m| (name.clone(), m.as_str().to_string()))
                })
                .collect(),
        )
    }
}

/// Pick the strategy for a parsed template.
pub fn compile(template: &Template) -> Result<Box<dyn Matcher>, RouterError> {
    Ok(match template {
        Template::Wildcard => Box::new(WildcardMatcher),
        Template::Literal(uri) => Box::new(LiteralMatcher::new(uri.clone())),
        Template::Pattern { regex, .. } => Box::new(PatternMatcher::new(regex.clone())),
        Template::Placeholders { raw, segments } => {
            Box::new(PlaceholderMatcher::compile(raw, segments)?)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::template::MatchTypes;

    fn matcher(raw: &str) -> Box<dyn Matcher> {
        let template = Template::parse(raw, &MatchTypes::default()).unwrap();
        compile(&template).unwrap()
    }

    #[test]
    fn test_wildcard_matcher() {
        let m = matcher("*");
        assert!(m.capture("/anything/at/all").unwrap().is_empty());
    }

    #[test]
    fn test_literal_matcher() {
        let m = matcher("/widgets");
        assert!(m.capture("/widgets").is_some());
        assert!(m.capture("/widgets/").is_none());
        assert!(m.capture("/WIDGETS").is_none());
    }

    #[test]
    fn test_placeholder_matcher_binds_values() {
        let m = matcher("/widgets/[id:int]");
        let params = m.capture("/widgets/42").unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("42"));
        assert!(m.capture("/widgets/abc").is_none());
        assert!(m.capture("/widgets/42/extra").is_none());
    }

    #[test]
    fn test_optional_placeholder_may_be_absent() {
        let m = matcher("/files/[:name].[a:ext]?");
        let params = m.capture("/files/report.pdf").unwrap();
        assert_eq!(params.get("name").map(String::as_str), Some("report"));
        assert_eq!(params.get("ext").map(String::as_str), Some("pdf"));

        let params = m.capture("/files/report").unwrap();
        assert_eq!(params.get("name").map(String::as_str), Some("report"));
        assert!(!params.contains_key("ext"));
    }

    #[test]
    fn test_pattern_matcher_captures() {
        let m = matcher(r"@^/archive/(?P<year>\d{4})/(\d{2})$");
        let params = m.capture("/archive/2024/05").unwrap();
        assert_eq!(params.get("year").map(String::as_str), Some("2024"));
        assert_eq!(params.get("2").map(String::as_str), Some("05"));
        assert!(m.capture("/archive/24/05").is_none());
    }

    #[test]
    fn test_path_type_spans_segments() {
        let m = matcher("/static/[**:rest]");
        let params = m.capture("/static/css/site.css").unwrap();
        assert_eq!(params.get("rest").map(String::as_str), Some("css/site.css"));
    }
}
