//! relate-account-mcp — MCP gateway for the web3.bio identity graph
//!
//! Resolves a `(platform, identity)` pair into the cross-platform identity
//! graph for that entity, deduplicating repeated lookups through a
//! TTL-bounded in-memory cache. Exposed to agents as one MCP tool,
//! `get-related-address`, over stdio and streamable-HTTP transports.
//!
//! # Architecture
//!
//! - **normalize**: input validation and canonicalization
//! - **cache**: TTL cache with lazy expiry and a background sweep
//! - **upstream**: timeout-bounded GraphQL query executor
//! - **lookup**: cache-first orchestration of a single lookup
//! - **format**: shaping payloads and errors into tool results
//! - **server**: rmcp tool surface and transports

pub mod cache;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod lookup;
pub mod normalize;
pub mod server;
pub mod upstream;

pub use error::{LookupError, Result};
