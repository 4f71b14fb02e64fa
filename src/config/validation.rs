//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts and connection cap > 0, addresses parse)
//! - Detect broken routes: bad methods, bad templates, duplicate names
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Route checks trial-build a scratch table so they agree with startup

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::routing::{RouteTable, RouterError};

/// A single semantic problem in a config file.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    InvalidBindAddress(String),

    #[error("listener.max_connections must be greater than zero")]
    ZeroMaxConnections,

    #[error("observability.metrics_address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),

    #[error("admin.bind_address '{0}' is not a socket address")]
    InvalidAdminAddress(String),

    #[error("admin.api_key must be set when the admin API is enabled")]
    MissingAdminKey,

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("router.match_types.{tag}: {source}")]
    MatchType {
        tag: String,
        #[source]
        source: RouterError,
    },

    #[error("routes[{index}] has an empty path")]
    EmptyPath { index: usize },

    #[error("routes[{index}] has an empty handler")]
    EmptyHandler { index: usize },

    #[error("routes[{index}] ({path}): {source}")]
    Route {
        index: usize,
        path: String,
        #[source]
        source: RouterError,
    },
}

/// Check a parsed config, collecting every problem found.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.listener.max_connections == 0 {
        errors.push(ValidationError::ZeroMaxConnections);
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }
    if config.admin.enabled {
        if config.admin.bind_address.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::InvalidAdminAddress(
                config.admin.bind_address.clone(),
            ));
        }
        if config.admin.api_key.trim().is_empty() {
            errors.push(ValidationError::MissingAdminKey);
        }
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let mut scratch: RouteTable<()> = RouteTable::with_base_path(&config.router.base_path);
    for (tag, pattern) in &config.router.match_types {
        if let Err(source) = scratch.add_match_type(tag, pattern) {
            errors.push(ValidationError::MatchType {
                tag: tag.clone(),
                source,
            });
        }
    }

    for (index, route) in config.routes.iter().enumerate() {
        if route.path.trim().is_empty() {
            errors.push(ValidationError::EmptyPath { index });
            continue;
        }
        if route.handler.trim().is_empty() {
            errors.push(ValidationError::EmptyHandler { index });
        }
        if let Err(source) =
            scratch.register(&route.method, &route.path, (), route.name.as_deref())
        {
            errors.push(ValidationError::Route {
                index,
                path: route.path.clone(),
                source,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteConfig;

    fn route(method: &str, path: &str, handler: &str, name: Option<&str>) -> RouteConfig {
        RouteConfig {
            method: method.to_string(),
            path: path.to_string(),
            handler: handler.to_string(),
            name: name.map(str::to_string),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&RouterConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = RouterConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.timeouts.request_secs = 0;
        config.listener.max_connections = 0;
        config.admin.enabled = true;
        config.routes = vec![
            route("GET", "/a", "a", Some("dup")),
            route("POST", "/b", "b", Some("DUP")),
            route("FETCH", "/c", "c", None),
            route("GET", "", "d", None),
            route("GET", "/e/[bogus:x]", "", None),
        ];

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(e, ValidationError::InvalidBindAddress(_))));
        assert!(errors.iter().any(|e| matches!(e, ValidationError::ZeroTimeout)));
        assert!(errors.iter().any(|e| matches!(e, ValidationError::ZeroMaxConnections)));
        assert!(errors.iter().any(|e| matches!(e, ValidationError::MissingAdminKey)));
        assert!(errors.iter().any(|e| matches!(
            e,
            ValidationError::Route { index: 1, source: RouterError::DuplicateRoute { .. }, .. }
        )));
        assert!(errors.iter().any(|e| matches!(
            e,
            ValidationError::Route { index: 2, source: RouterError::InvalidMethod(_), .. }
        )));
        assert!(errors.iter().any(|e| matches!(e, ValidationError::EmptyPath { index: 3 })));
        assert!(errors.iter().any(|e| matches!(e, ValidationError::EmptyHandler { index: 4 })));
        assert!(errors.iter().any(|e| matches!(
            e,
            ValidationError::Route { index: 4, source: RouterError::InvalidTemplate { .. }, .. }
        )));
    }

    #[test]
    fn test_custom_match_types_are_checked_before_routes() {
        let mut config = RouterConfig::default();
        config.router.match_types.insert("slug".into(), "[a-z-]+".into());
        config.router.match_types.insert("broken".into(), "(".into());
        config.routes = vec![route("GET", "/posts/[slug:title]", "post", None)];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], ValidationError::MatchType { tag, .. } if tag == "broken"));
    }
}
