pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod mcp;
pub mod session;
pub mod tools;
