//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (at startup):
//!     (method, relative path, handler, name?)
//!     → key.rs (canonical URI, SHA-256 route key, name folding)
//!     → template.rs (tokenize placeholders)
//!     → matcher.rs (pick strategy per template shape)
//!     → table.rs (by-key store + by-name index)
//!
//! Incoming request (method, URI):
//!     → table.rs exact key lookup (literal routes)
//!     → ordered scan: method filter → matcher
//!     → Return: RouteMatch (route + params) or None
//!
//! Reverse lookup (name, params):
//!     → table.rs name index → template.rs expand → URI
//! ```
//!
//! # Design Decisions
//! - Table built once, then read-only; reloads build a new table
//! - Handlers are opaque: the table stores and returns them, nothing else
//! - Deterministic: same input always matches same route
//! - First match wins (registration order)

pub mod error;
pub mod key;
pub mod matcher;
pub mod method;
pub mod request;
pub mod route;
pub mod table;
pub mod template;

pub use error::RouterError;
pub use key::RouteKey;
pub use method::{MethodSpec, Verb};
pub use request::{RequestSource, StaticRequest};
pub use route::{Params, Route, RouteMatch};
pub use table::RouteTable;
pub use template::{MatchTypes, Segment, Template};
