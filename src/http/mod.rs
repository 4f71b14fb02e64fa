//! HTTP embedding layer.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, RequestSource for http::Request)
//!     → RouteTable::match_request on the published snapshot
//!     → response.rs (MatchResponse / NotFoundResponse as JSON)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use response::{ApiError, MatchResponse, NotFoundResponse, RouteSummary};
pub use server::{apply_config, AppState, HttpServer, SharedTable};
