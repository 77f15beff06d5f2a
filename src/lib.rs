#![deny(warnings)]
#![recursion_limit = "256"]

// Library crate for file-ops-mcp

pub mod error;
pub mod logging;
pub mod operations;
pub mod resources;
pub mod server;
pub mod tools;
pub mod transport;
