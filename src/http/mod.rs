//! HTTP protocol implementation.
//!
//! This module implements the HTTP/1.1 subset the server speaks: one request
//! per connection, explicit `Content-Length` framing, then close.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: The main connection handler implementing the request-response state machine
//! - **`parser`**: Frames and parses incoming HTTP requests from byte buffers
//! - **`request`**: HTTP request representation and method set
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes and writes HTTP responses to the client
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Buffer incoming bytes until one full request
//!        └──────┬──────┘
//!               │ Request framed and parsed
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Route through the file servers
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               └─ Close (exactly one response per connection)
//! ```

pub mod connection;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
