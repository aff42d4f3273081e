//! Alcove - Confined Static File Server
//!
//! Core library for HTTP framing, parsing and file serving.

pub mod config;
pub mod files;
pub mod http;
pub mod server;
