//! A persistent "memory bank": a directory of markdown documents holding a
//! project's running context, served to agents over MCP or HTTP.

pub mod api;
pub mod config;
pub mod mcp;
pub mod models;
pub mod store;
