//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Initialize subsystems → Bind listener
//!
//! Shutdown:
//!     SIGTERM/SIGINT (signals.rs) or Shutdown::trigger (shutdown.rs)
//!     → Stop accepting → Drain in-flight requests → Exit
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
