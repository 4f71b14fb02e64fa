//! Routing error taxonomy.
//!
//! Registration errors (`DuplicateRoute`, `InvalidMethod`, `InvalidTemplate`,
//! `InvalidPattern`) mean the route table is broken and must stop startup.
//! A match miss is not an error: `RouteTable::match_route` returns `None`.

use thiserror::Error;

/// Errors raised while building or querying a route table.
#[derive(Error, Debug)]
pub enum RouterError {
    /// A route name is already registered to a different route.
    #[error("route name '{name}' is already registered (route {existing})")]
    DuplicateRoute { name: String, existing: String },

    /// No route is registered under this name.
    #[error("no route named '{0}'")]
    UnknownRouteName(String),

    /// The method spec could not be parsed.
    #[error("invalid method spec '{0}'")]
    InvalidMethod(String),

    /// A placeholder template is malformed.
    #[error("invalid route template '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },

    /// A regular expression failed to compile.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Strict rewrite found a required placeholder without a value.
    #[error("route '{name}' requires parameter '{parameter}'")]
    MissingParameter { name: String, parameter: String },
}

impl RouterError {
    pub(crate) fn template(template: &str, reason: impl Into<String>) -> Self {
        Self::InvalidTemplate {
            template: template.to_string(),
            reason: reason.into(),
        }
    }
}
