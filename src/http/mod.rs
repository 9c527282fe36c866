//! HTTP protocol implementation.
//!
//! A deliberately small subset of HTTP/1.1: one request line per
//! connection, no request headers, no keep-alive.
//!
//! # Architecture
//!
//! - **`connection`**: The per-connection state machine and the dispatch from request to response
//! - **`parser`**: Parses the request line
//! - **`request`**: Request and method types
//! - **`response`**: Status table, response representation and the three response kinds
//! - **`writer`**: Serializes and streams responses to the client
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for the request line
//!        └──────┬──────┘
//!               │ Line received (or unreadable → 400)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← 405 / resolve → 400, 404, 200; panics → 500
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ▼
//!            Closed
//! ```
//!
//! Responses carry no `Content-Length`. Clients find the end of the body
//! when the server closes the connection, so persistent-connection clients
//! must not reuse the socket.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use webs::http::connection::Connection;
//! use webs::site::Site;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let site = Arc::new(Site::new(".", "Webs")?);
//!     let listener = TcpListener::bind("127.0.0.1:8000").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let site = Arc::clone(&site);
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, site);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod request;
pub mod response;
pub mod parser;
pub mod connection;
pub mod writer;
pub mod mime;
