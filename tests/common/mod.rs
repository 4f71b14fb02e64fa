//! Shared utilities for integration and load testing.

#![allow(dead_code)]

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::sync::mpsc;

use resource_router::config::{RouteConfig, RouterConfig};
use resource_router::http::HttpServer;
use resource_router::lifecycle::Shutdown;

/// A running router service on an ephemeral port.
pub struct TestRouter {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub updates: mpsc::UnboundedSender<RouterConfig>,
    pub handle: tokio::task::JoinHandle<Result<(), std::io::Error>>,
}

impl TestRouter {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start the service with `config`. The listener is bound before returning,
/// so requests can be sent immediately.
pub async fn start_router(config: RouterConfig) -> TestRouter {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let (updates, config_updates) = mpsc::unbounded_channel();
    let server = HttpServer::new(config).expect("valid route table");
    let server_shutdown = shutdown.subscribe();

    let handle = tokio::spawn(async move {
        server
            .run(listener, config_updates, server_shutdown)
            .await
    });

    TestRouter {
        addr,
        shutdown,
        updates,
        handle,
    }
}

pub fn route(method: &str, path: &str, handler: &str, name: Option<&str>) -> RouteConfig {
    RouteConfig {
        method: method.to_string(),
        path: path.to_string(),
        handler: handler.to_string(),
        name: name.map(str::to_string),
    }
}

/// Client that ignores proxy env vars and keeps no idle connections.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
