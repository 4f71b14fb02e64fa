use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::http::response::{ApiError, RouteSummary};
use crate::http::server::AppState;
use crate::routing::Params;

const STRICT_FLAG: &str = "strict";

#[derive(Debug, Serialize, Deserialize)]
pub struct SystemStatus {
    pub version: String,
    pub status: String,
    pub routes: usize,
    pub base_path: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RewriteResponse {
    pub name: String,
    pub uri: String,
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    let table = state.table.load();
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "operational".to_string(),
        routes: table.len(),
        base_path: table.base_path().to_string(),
    })
}

pub async fn get_routes(State(state): State<AppState>) -> Json<Vec<RouteSummary>> {
    let table = state.table.load();
    Json(table.routes().map(RouteSummary::from).collect())
}

/// Query parameters become placeholder values.
///
/// `strict=true` is reserved: it rejects a rewrite that would leave a
/// required placeholder unresolved (400) instead of keeping it literal.
pub async fn get_rewrite(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(mut params): Query<Params>,
) -> Result<Json<RewriteResponse>, ApiError> {
    let strict = params
        .remove(STRICT_FLAG)
        .is_some_and(|value| matches!(value.as_str(), "" | "1" | "true"));

    let table = state.table.load();
    let uri = if strict {
        table.rewrite_strict(&name, &params)?
    } else {
        table.rewrite(&name, &params)?
    };
    Ok(Json(RewriteResponse { name, uri }))
}
