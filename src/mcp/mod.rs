//! MCP module
//!
//! Protocol types, tool dispatch, and the stdio server loop.

pub mod server;
pub mod tools;
pub mod types;
