//! Method-aware, named, parameterized HTTP route table.
//!
//! The core is [`routing::RouteTable`]; the remaining modules embed it in an
//! axum service driven by a TOML config file.

pub mod admin;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::RouterConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Params, RouteMatch, RouteTable, RouterError};
