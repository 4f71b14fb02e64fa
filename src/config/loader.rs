//! Configuration loading from disk and route table construction.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{Endpoint, RouterConfig};
use crate::config::validation::{validate_config, ValidationError};
use crate::routing::{RouteTable, RouterError};

/// Error type for configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("Route table error: {0}")]
    Table(#[from] RouterError),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RouterConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<RouterConfig, ConfigError> {
    let config: RouterConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Build the route table described by `config`.
///
/// Custom match types are added first, then routes in file order.
pub fn build_table(config: &RouterConfig) -> Result<RouteTable<Endpoint>, RouterError> {
    let mut table = RouteTable::with_base_path(&config.router.base_path);
    for (tag, pattern) in &config.router.match_types {
        table.add_match_type(tag, pattern)?;
    }
    for route in &config.routes {
        table.register(&route.method, &route.path, route.handler.clone(), route.name.as_deref())?;
    }

    tracing::info!(
        routes = table.len(),
        base_path = %table.base_path(),
        "Route table built"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
[listener]
bind_address = "127.0.0.1:9000"

[router]
base_path = "/api"

[router.match_types]
slug = "[a-z0-9-]+"

[[routes]]
method = "GET"
path = "/widgets/[id:int]"
handler = "widgets#show"
name = "widget.view"

[[routes]]
method = "POST"
path = "/widgets"
handler = "widgets#create"

[[routes]]
path = "/posts/[slug:title]"
handler = "posts#show"
"#;

    #[test]
    fn test_parse_and_build() {
        let config = parse_config(SAMPLE).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.routes.len(), 3);
        assert_eq!(config.routes[2].method, "GET");

        let table = build_table(&config).unwrap();
        assert_eq!(table.len(), 3);
        let matched = table.match_route("GET", "/api/widgets/42").unwrap();
        assert_eq!(matched.handler(), "widgets#show");
        let matched = table.match_route("GET", "/api/posts/hello-world").unwrap();
        assert_eq!(matched.param("title"), Some("hello-world"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.router.base_path, "/api");
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            load_config(Path::new("/definitely/not/here.toml")),
            Err(ConfigError::Io(_))
        ));
        assert!(matches!(parse_config("routes = 5"), Err(ConfigError::Parse(_))));

        let duplicate = r#"
[[routes]]
path = "/a"
handler = "a"
name = "same"

[[routes]]
path = "/b"
handler = "b"
name = "same"
"#;
        let err = parse_config(duplicate).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
        assert!(err.to_string().contains("already registered"));
    }
}
