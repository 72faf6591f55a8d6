//! HTTP API module.
//!
//! This module provides the HTTP server, the response envelope and the
//! broadcast logger used during analysis runs.

pub mod logs;
pub mod server;
pub mod types;

pub use logs::*;
pub use server::start_server;
pub use types::*;
