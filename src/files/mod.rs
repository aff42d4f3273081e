//! Static file serving confined to a directory root.
//!
//! A [`FileServer`] claims requests by URI prefix, resolves them to a path
//! that is guaranteed to stay inside its served root, and answers with the
//! file's bytes or a JSON error body.

pub mod mime;
pub mod resolver;
pub mod server;

pub use resolver::{PathResolver, Resolved, ResolveError, ServedPath};
pub use server::FileServer;
