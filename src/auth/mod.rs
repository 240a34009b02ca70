//! Identity token acquisition subsystem.
//!
//! # Data Flow
//! ```text
//! Route (audience = upstream base URL)
//!     → metadata.rs (GET <metadata_url>?audience=..., Metadata-Flavor header)
//!     → opaque bearer token string
//!     → injected as X-Serverless-Authorization on the outbound request
//! ```

pub mod metadata;

pub use metadata::{TokenError, TokenProvider};
