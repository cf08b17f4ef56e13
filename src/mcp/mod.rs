//! Model Context Protocol (MCP) Module
//!
//! Exposes catalog search and cart operations as MCP tools over JSON-RPC:
//! - Protocol models (JsonRpcRequest, tool inputs, constants)
//! - RPC helpers (success/error envelopes, tool results)
//! - MCP handlers (initialize, tools/list, tools/call, ping)

pub mod handlers;
pub mod helpers;
pub mod models;

// Re-export commonly used types and functions
pub use handlers::routes;
