//! URI templates and the placeholder tokenizer.
//!
//! # Grammar
//! ```text
//! template    := "*" | "@" regex | piece*
//! piece       := literal | placeholder
//! placeholder := [ "/" | "." ] "[" tag ":" name "]" [ "?" ]
//! ```
//! `[name:tag]` is accepted too: whichever side is a known tag is the type.
//! The tokenizer produces a flat list of [`Segment`]s shared by rewriting
//! (`Template::expand`) and matching (`matcher::compile`).

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use regex::Regex;

use crate::routing::error::RouterError;
use crate::routing::route::Params;

/// Built-in placeholder tags and the patterns they accept.
const BUILTIN_TYPES: &[(&str, &str)] = &[
    ("", "[^/.]+"),
    ("seg", "[^/.]+"),
    ("i", "[0-9]+"),
    ("int", "[0-9]+"),
    ("a", "[0-9A-Za-z]+"),
    ("alpha", "[0-9A-Za-z]+"),
    ("h", "[0-9A-Fa-f]+"),
    ("hex", "[0-9A-Fa-f]+"),
    ("*", ".+?"),
    ("any", ".+?"),
    ("**", ".+"),
    ("path", ".+"),
];

/// Registry of placeholder tags, built-ins plus any custom ones.
#[derive(Debug, Clone)]
pub struct MatchTypes {
    types: HashMap<String, String>,
}

impl Default for MatchTypes {
    fn default() -> Self {
        Self {
            types: BUILTIN_TYPES
                .iter()
                .map(|(tag, pattern)| (tag.to_string(), pattern.to_string()))
                .collect(),
        }
    }
}

impl MatchTypes {
    /// Add or replace a tag. The pattern must compile on its own.
    pub fn insert(&mut self, tag: &str, pattern: &str) -> Result<(), RouterError> {
        Regex::new(pattern).map_err(|source| RouterError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        self.types.insert(tag.to_string(), pattern.to_string());
        Ok(())
    }

    pub fn pattern(&self, tag: &str) -> Option<&str> {
        self.types.get(tag).map(String::as_str)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.types.contains_key(tag)
    }
}

/// A bracketed placeholder inside a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// `/` or `.` directly before the bracket, owned by the placeholder.
    pub separator: Option<char>,
    /// Type tag as written.
    pub tag: String,
    /// Pattern the tag resolved to.
    pub pattern: String,
    /// Parameter name.
    pub name: String,
    /// Source text of the token, separator included.
    pub raw: String,
}

/// One piece of a tokenized template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Required(Placeholder),
    Optional(Placeholder),
}

/// The shape of a stored URI template.
#[derive(Debug, Clone)]
pub enum Template {
    /// `*`: any URI.
    Wildcard,
    /// `@regex`: the regex is tested against the URI.
    Pattern { source: String, regex: Regex },
    /// No placeholders: compared as a plain string.
    Literal(String),
    /// Literal text interleaved with placeholders.
    Placeholders { raw: String, segments: Vec<Segment> },
}

impl Template {
    /// Classify and tokenize a canonical template.
    pub fn parse(raw: &str, types: &MatchTypes) -> Result<Self, RouterError> {
        if raw == "*" {
            return Ok(Template::Wildcard);
        }
        if let Some(source) = raw.strip_prefix('@') {
            let regex = Regex::new(source).map_err(|e| RouterError::InvalidPattern {
                pattern: source.to_string(),
                source: e,
            })?;
            return Ok(Template::Pattern {
                source: source.to_string(),
                regex,
            });
        }

        let segments = tokenize(raw, types)?;
        if segments.iter().all(|s| matches!(s, Segment::Literal(_))) {
            return Ok(Template::Literal(raw.to_string()));
        }
        Ok(Template::Placeholders {
            raw: raw.to_string(),
            segments,
        })
    }

    /// True for templates without any placeholder or pattern syntax.
    pub fn is_literal(&self) -> bool {
        matches!(self, Template::Literal(_))
    }

    /// Substitute `params` into the template.
    ///
    /// Returns the expanded URI and the names of required placeholders that
    /// had no value; those are left in the output as written.
    pub fn expand(&self, params: &Params) -> (String, Vec<String>) {
        let segments = match self {
            Template::Wildcard => return ("*".to_string(), Vec::new()),
            Template::Pattern { source, .. } => return (format!("@{source}"), Vec::new()),
            Template::Literal(raw) => return (raw.clone(), Vec::new()),
            Template::Placeholders { segments, .. } => segments,
        };

        let mut uri = String::new();
        let mut missing = Vec::new();
        for segment in segments {
            match segment {
                Segment::Literal(text) => uri.push_str(text),
                Segment::Required(p) | Segment::Optional(p) => match params.get(&p.name) {
                    Some(value) => {
                        if let Some(sep) = p.separator {
                            uri.push(sep);
                        }
                        uri.push_str(value);
                    }
                    None if matches!(segment, Segment::Optional(_)) => {}
                    None => {
                        uri.push_str(&p.raw);
                        missing.push(p.name.clone());
                    }
                },
            }
        }
        (uri, missing)
    }

    /// Names of all placeholders, in template order.
    pub fn parameter_names(&self) -> Vec<&str> {
        match self {
            Template::Placeholders { segments, .. } => segments
                .iter()
                .filter_map(|s| match s {
                    Segment::Required(p) | Segment::Optional(p) => Some(p.name.as_str()),
                    Segment::Literal(_) => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Template::Wildcard => f.write_str("*"),
            Template::Pattern { source, .. } => write!(f, "@{source}"),
            Template::Literal(raw) | Template::Placeholders { raw, .. } => f.write_str(raw),
        }
    }
}

fn tokenize(raw: &str, types: &MatchTypes) -> Result<Vec<Segment>, RouterError> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut names = BTreeSet::new();
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '[' {
            literal.push(c);
            continue;
        }

        let separator = match literal.chars().last() {
            Some(sep @ ('/' | '.')) => {
                literal.pop();
                Some(sep)
            }
            _ => None,
        };
        if !literal.is_empty() {
            segments.push(Segment::Literal(std::mem::take(&mut literal)));
        }

        let mut inner = String::new();
        let mut closed = false;
        for c in chars.by_ref() {
            match c {
                ']' => {
                    closed = true;
                    break;
                }
                '[' => return Err(RouterError::template(raw, "nested '['")),
                c => inner.push(c),
            }
        }
        if !closed {
            return Err(RouterError::template(raw, "unterminated placeholder"));
        }

        let (tag, name) = resolve_parts(raw, &inner, types)?;
        if !is_identifier(name) {
            return Err(RouterError::template(
                raw,
                format!("'{name}' is not a valid parameter name"),
            ));
        }
        if !names.insert(name.to_string()) {
            return Err(RouterError::template(raw, format!("parameter '{name}' appears twice")));
        }

        let optional = chars.next_if_eq(&'?').is_some();
        let mut token = String::new();
        if let Some(sep) = separator {
            token.push(sep);
        }
        token.push('[');
        token.push_str(&inner);
        token.push(']');

        let placeholder = Placeholder {
            separator,
            tag: tag.to_string(),
            pattern: types.pattern(tag).unwrap_or_default().to_string(),
            name: name.to_string(),
            raw: token,
        };
        segments.push(if optional {
            Segment::Optional(placeholder)
        } else {
            Segment::Required(placeholder)
        });
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}

/// Split `tag:name` (or `name:tag`) and decide which side is the tag.
fn resolve_parts<'a>(
    raw: &str,
    inner: &'a str,
    types: &MatchTypes,
) -> Result<(&'a str, &'a str), RouterError> {
    let (first, second) = inner
        .split_once(':')
        .ok_or_else(|| RouterError::template(raw, format!("placeholder '[{inner}]' has no ':'")))?;

    if types.contains(first) {
        Ok((first, second))
    } else if types.contains(second) {
        Ok((second, first))
    } else {
        Err(RouterError::template(
            raw,
            format!("unknown placeholder type in '[{inner}]'"),
        ))
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
