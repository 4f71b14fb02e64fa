//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Build route table → Start listeners
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain in-flight requests → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: a broken route table is fatal at startup
//! - Listeners start last (traffic only when the table is ready)
//! - Late subscribers still observe a shutdown that already happened

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownSignal};
