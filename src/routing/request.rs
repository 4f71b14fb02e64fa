//! Ambient request context.
//!
//! `RouteTable::match_or_default` falls back to the current request's method
//! and URI when the caller leaves them out. The router never reads request
//! state itself: the embedding layer implements [`RequestSource`] for its
//! own request type (see `http::request`).

/// Supplies the default method and URI for a match.
pub trait RequestSource {
    /// HTTP method of the current request.
    fn method(&self) -> &str;

    /// Request target of the current request (path plus optional query).
    fn uri(&self) -> &str;
}

/// A fixed method/URI pair, mostly for tests and the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticRequest {
    pub method: String,
    pub uri: String,
}

impl StaticRequest {
    pub fn new(method: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            uri: uri.into(),
        }
    }
}

impl RequestSource for StaticRequest {
    fn method(&self) -> &str {
        &self.method
    }

    fn uri(&self) -> &str {
        &self.uri
    }
}
