//! Extension to content-type lookup.

/// Content type served for any extension not in the text table.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// The extensions served as text, per the IANA media-type registry.
/// Everything else, including files with no extension at all, is binary.
pub fn text_content_type(extension: &str) -> Option<&'static str> {
    match extension {
        "html" => Some("text/html"),
        "css" => Some("text/css"),
        "json" => Some("application/json"),
        _ => None,
    }
}

/// The Content-Type header value for a file extension. Text types carry a
/// charset; binary types are bare octet-stream.
pub fn content_type_for(extension: &str) -> String {
    match text_content_type(extension) {
        Some(t) => format!("{}; charset=utf-8", t),
        None => OCTET_STREAM.to_string(),
    }
}
