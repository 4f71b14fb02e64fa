//! Response bodies.
//!
//! # Design Decisions
//! - Every response body is JSON
//! - A routing miss is a 404 body, not an error path
//! - Router errors map to status codes in one place (`ApiError`)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::config::Endpoint;
use crate::routing::{Params, Route, RouteMatch, RouterError};

/// Body returned when a request resolves to a route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchResponse {
    pub route: String,
    pub handler: Endpoint,
    pub name: Option<String>,
    pub method: String,
    pub uri: String,
    pub params: Params,
}

impl MatchResponse {
    pub fn new(matched: &RouteMatch<'_, Endpoint>, method: &str, uri: &str) -> Self {
        Self {
            route: matched.route.key().to_string(),
            handler: matched.handler().clone(),
            name: matched.route.name().map(str::to_string),
            method: method.to_string(),
            uri: uri.to_string(),
            params: matched.params.clone(),
        }
    }
}

/// Body returned when nothing matches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotFoundResponse {
    pub error: String,
    pub method: String,
    pub uri: String,
}

impl NotFoundResponse {
    pub fn new(method: &str, uri: &str) -> Self {
        Self {
            error: "not_found".to_string(),
            method: method.to_string(),
            uri: uri.to_string(),
        }
    }
}

impl IntoResponse for NotFoundResponse {
    fn into_response(self) -> Response {
        (StatusCode::NOT_FOUND, Json(self)).into_response()
    }
}

/// One route as listed by the admin API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouteSummary {
    pub key: String,
    pub method: String,
    pub uri: String,
    pub name: Option<String>,
    pub handler: Endpoint,
}

impl From<&Route<Endpoint>> for RouteSummary {
    fn from(route: &Route<Endpoint>) -> Self {
        Self {
            key: route.key().to_string(),
            method: route.methods().canonical(),
            uri: route.uri().to_string(),
            name: route.name().map(str::to_string),
            handler: route.handler().clone(),
        }
    }
}

/// Router error surfaced over HTTP.
#[derive(Debug)]
pub struct ApiError(pub RouterError);

impl From<RouterError> for ApiError {
    fn from(err: RouterError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            RouterError::UnknownRouteName(_) => StatusCode::NOT_FOUND,
            RouterError::MissingParameter { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, Json(body)).into_response()
    }
}
