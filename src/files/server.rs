use std::io::ErrorKind;
use std::path::PathBuf;

use crate::files::mime;
use crate::files::resolver::{PathResolver, Resolved, ResolveError, ServedPath};
use crate::http::request::{Method, Request};
use crate::http::response::{Response, ResponseBuilder, StatusCode};

/// Body sent with 404s, whatever the real cause.
const NOT_FOUND_REASON: &str = "No such file or directory";

/// Serves files from a directory through HTTP routes under a URI prefix.
///
/// Handles GET only. The served root is a hard boundary: targets that
/// resolve outside it are answered exactly like missing files.
pub struct FileServer {
    resolver: PathResolver,
}

impl FileServer {
    /// Creates a file server answering targets under `prefix` with files
    /// under `root`.
    pub fn new(prefix: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            resolver: PathResolver::new(prefix, root),
        }
    }

    /// Attempts to handle a request with this file server.
    ///
    /// Returns `None` when the target is outside this server's prefix so
    /// the caller can try the next route. `Some` means the route was
    /// claimed; whatever happened, the response inside is final.
    pub async fn handle(&self, request: &Request) -> Option<Response> {
        if !self.resolver.claims(&request.target) {
            return None;
        }

        if request.method != Method::GET {
            return Some(Response::err_json(
                StatusCode::MethodNotAllowed,
                "Only GET is supported on this route",
            ));
        }

        let response = match self.resolver.resolve(&request.target) {
            Ok(Resolved::File(served)) => self.serve_file(&served).await,

            Ok(Resolved::RedirectToDir) => self.redirect_to_dir(request),

            Err(ResolveError::NotFound) => {
                Response::err_json(StatusCode::NotFound, NOT_FOUND_REASON)
            }

            Err(ResolveError::Traversal) => {
                tracing::warn!(
                    target = %request.target,
                    prefix = self.resolver.prefix(),
                    "Request target escapes served root"
                );
                // Same answer as a missing file
                Response::err_json(StatusCode::NotFound, NOT_FOUND_REASON)
            }

            Err(ResolveError::Io(e)) => {
                tracing::error!(target = %request.target, error = %e, "Failed to resolve path");
                Response::err_json(StatusCode::InternalServerError, &e.to_string())
            }
        };

        Some(response)
    }

    /// 301 to the slash-terminated form of the target, absolute when the
    /// client sent a Host header.
    fn redirect_to_dir(&self, request: &Request) -> Response {
        let location = match request.host() {
            Some(host) => format!("http://{}{}/", host, request.target),
            None => format!("{}/", request.target),
        };

        let body = serde_json::json!({
            "msg": format!("Redirecting you to {}/", request.target),
        });

        ResponseBuilder::new(StatusCode::MovedPermanently)
            .header("Location", location)
            .header("Content-Type", "application/json")
            .body(body.to_string().into_bytes())
            .build()
    }

    async fn serve_file(&self, served: &ServedPath) -> Response {
        let bytes = match tokio::fs::read(&served.path).await {
            Ok(bytes) => bytes,

            // Raced with a deletion since resolution
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Response::err_json(StatusCode::NotFound, NOT_FOUND_REASON);
            }

            Err(e) => {
                tracing::error!(path = %served.path.display(), error = %e, "Failed to read file");
                return Response::err_json(StatusCode::InternalServerError, &e.to_string());
            }
        };

        ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", mime::content_type_for(&served.extension))
            .body(bytes)
            .build()
    }
}
