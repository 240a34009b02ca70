//! Identity-injecting reverse proxy.
//!
//! Sits in front of two upstream services (a frontend and a backend) and
//! routes each request by path prefix, fetching a fresh identity token from
//! the local metadata endpoint and injecting it as
//! `X-Serverless-Authorization` so the upstream's access-control layer
//! admits the call.
//!
//! # Architecture Overview
//!
//! ```text
//!                   ┌───────────────────────────────────────────────┐
//!                   │                IDENTITY PROXY                  │
//!                   │                                                │
//!  Client Request   │  ┌─────────┐   ┌──────────┐   ┌────────────┐  │
//!  ─────────────────┼─▶│  http   │──▶│ routing  │──▶│    auth    │  │
//!                   │  │ server  │   │ (prefix) │   │ (metadata  │  │
//!                   │  └─────────┘   └──────────┘   │   token)   │  │
//!                   │       │                       └─────┬──────┘  │
//!                   │  OPTIONS? → cors                    │         │
//!                   │       │                             ▼         │
//!  Client Response  │  ┌─────────┐   ┌──────────┐   ┌────────────┐  │   Frontend /
//!  ◀────────────────┼──│ headers │◀──│  error   │◀──│  upstream  │◀─┼── Backend
//!                   │  │ filter  │   │ mapping  │   │    call    │  │   (HTTPS)
//!                   │  └─────────┘   └──────────┘   └────────────┘  │
//!                   │                                                │
//!                   │  config │ observability │ lifecycle            │
//!                   └───────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
