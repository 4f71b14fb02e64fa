//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the route table from config and publish it
//! - Create the Axum Router with the dispatch handler
//! - Wire up middleware (request ID, tracing, timeout, concurrency cap)
//! - Swap in a fresh table on every accepted config reload
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::admin;
use crate::config::{build_table, ConfigError, Endpoint, RouterConfig};
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::http::response::{MatchResponse, NotFoundResponse};
use crate::lifecycle::ShutdownSignal;
use crate::observability::metrics::{self, MatchOutcome};
use crate::routing::{RequestSource, RouteTable, RouterError};

/// The published route table. Readers `load()` a snapshot; reloads `store()` a new one.
pub type SharedTable = Arc<ArcSwap<RouteTable<Endpoint>>>;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub table: SharedTable,
    pub admin_key: Arc<str>,
}

/// HTTP server fronting the route table.
pub struct HttpServer {
    config: RouterConfig,
    state: AppState,
}

impl HttpServer {
    /// Build the route table and server state.
    ///
    /// Fails if the configured routes do not form a valid table.
    pub fn new(config: RouterConfig) -> Result<Self, ConfigError> {
        let table = build_table(&config)?;
        metrics::record_table_size(table.len());

        let state = AppState {
            table: Arc::new(ArcSwap::from_pointee(table)),
            admin_key: Arc::from(config.admin.api_key.as_str()),
        };
        Ok(Self { config, state })
    }

    /// Handle to the published table.
    pub fn table(&self) -> SharedTable {
        self.state.table.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// The dispatch router with all middleware layers.
    ///
    /// Requests beyond `listener.max_connections` wait for a slot; the wait
    /// counts against the request timeout.
    pub fn router(&self) -> Router {
        let timeout = Duration::from_secs(self.config.timeouts.request_secs);
        Router::new()
            .fallback(dispatch)
            .with_state(self.state.clone())
            .layer(GlobalConcurrencyLimitLayer::new(
                self.config.listener.max_connections.max(1),
            ))
            .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The authenticated admin router.
    pub fn admin_router(&self) -> Router {
        admin::setup_admin_router(self.state.clone())
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Config updates received while running replace the route table; the
    /// listener address and timeouts are fixed for the life of the server.
    pub async fn run(
        self,
        listener: TcpListener,
        config_updates: mpsc::UnboundedReceiver<RouterConfig>,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.state.table.load().len(),
            max_connections = self.config.listener.max_connections,
            "HTTP server starting"
        );

        tokio::spawn(reload_loop(
            self.state.table.clone(),
            config_updates,
            shutdown.clone(),
        ));

        let app = self.router();
        let mut serve_shutdown = shutdown;
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { serve_shutdown.recv().await })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build a table from `config` and publish it.
///
/// On failure the current table stays published.
pub fn apply_config(
    table: &ArcSwap<RouteTable<Endpoint>>,
    config: &RouterConfig,
) -> Result<usize, RouterError> {
    let fresh = build_table(config)?;
    let routes = fresh.len();
    table.store(Arc::new(fresh));
    metrics::record_table_size(routes);
    Ok(routes)
}

async fn reload_loop(
    table: SharedTable,
    mut config_updates: mpsc::UnboundedReceiver<RouterConfig>,
    mut shutdown: ShutdownSignal,
) {
    loop {
        tokio::select! {
            update = config_updates.recv() => {
                let Some(config) = update else {
                    tracing::debug!("Config update channel closed");
                    return;
                };
                match apply_config(&table, &config) {
                    Ok(routes) => {
                        metrics::record_reload(true);
                        tracing::info!(routes, "Route table swapped");
                    }
                    Err(e) => {
                        metrics::record_reload(false);
                        tracing::error!(
                            error = %e,
                            "Rejected reloaded routes, keeping current table"
                        );
                    }
                }
            }
            _ = shutdown.recv() => return,
        }
    }
}

/// Resolve every inbound request against the published table.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let table = state.table.load();
    let method = RequestSource::method(&request);
    let uri = RequestSource::uri(&request);
    let request_id = request_id(&request);

    match table.match_request(&request) {
        Some(matched) => {
            tracing::debug!(
                request_id = %request_id,
                method = %method,
                uri = %uri,
                route = %matched.route.key(),
                handler = %matched.handler(),
                "Route matched"
            );
            metrics::record_match(method, MatchOutcome::Matched, start);
            Json(MatchResponse::new(&matched, method, uri)).into_response()
        }
        None => {
            tracing::debug!(
                request_id = %request_id,
                method = %method,
                uri = %uri,
                "No route matched"
            );
            metrics::record_match(method, MatchOutcome::NotFound, start);
            NotFoundResponse::new(method, uri).into_response()
        }
    }
}
