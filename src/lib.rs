//! Webs - Minimal static file server
//!
//! Serves files and directory listings from a single root directory over a
//! one-request-per-connection subset of HTTP/1.1.

pub mod cli;
pub mod config;
pub mod error;
pub mod files;
pub mod http;
pub mod server;
pub mod site;
