//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → router.rs (prefix match)
//!     → Return: backend Route or frontend Route (catch-all)
//!
//! Route Compilation (at startup):
//!     RoutesConfig
//!     → Compile the two fixed routes
//!     → Freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same path always resolves to the same route
//! - Total: the frontend route is the default, so routing never fails

pub mod router;

pub use router::{Route, Router};
