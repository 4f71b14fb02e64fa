//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks, trial route table)
//!     → RouterConfig (validated, immutable)
//!     → loader.rs build_table → RouteTable<Endpoint>
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → new table built and atomically swapped in by the server
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All sections have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{build_table, load_config, parse_config, ConfigError};
pub use schema::{
    AdminConfig, Endpoint, ListenerConfig, ObservabilityConfig, RouteConfig, RouterConfig,
    TableConfig, TimeoutConfig,
};
pub use validation::ValidationError;
pub use watcher::ConfigWatcher;
