use crate::http::request::{Method, Request};
use std::collections::HashMap;

/// Why a buffer could not be turned into a request.
///
/// `Incomplete` is the only recoverable variant: the caller keeps reading
/// and retries with more bytes. Everything else is terminal for the
/// connection; the consumer answers all of them with the same fixed
/// rejection, so a client cannot tell a malformed request apart from an
/// unsupported method or version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    InvalidRequest,
    UnsupportedMethod,
    UnsupportedVersion,
    InvalidHeader,
    InvalidContentLength,
    Incomplete,
}

/// Parses one HTTP/1.1 request out of `buf`.
///
/// Frames on the `\r\n\r\n` header terminator, then on `Content-Length`
/// for the body: the body is exactly that many bytes, and absent without
/// the header (no chunked encoding). Returns the request and the number
/// of bytes consumed.
///
/// The result is independent of how the bytes arrived: any prefix of a
/// well-formed request yields `Incomplete`, never a different error or a
/// different request.
pub fn parse_request(buf: &[u8]) -> Result<(Request, usize), ParseError> {
    // Look for header/body separator
    let headers_end = find_headers_end(buf).ok_or(ParseError::Incomplete)?;
    let header_bytes = &buf[..headers_end];
    let body_bytes = &buf[headers_end + 4..];

    let headers_str =
        std::str::from_utf8(header_bytes).map_err(|_| ParseError::InvalidRequest)?;

    let mut lines = headers_str.split("\r\n");

    // Request line: exactly METHOD SP TARGET SP VERSION
    let request_line = lines.next().ok_or(ParseError::InvalidRequest)?;
    let tokens: Vec<&str> = request_line.split(' ').collect();
    if tokens.len() != 3 {
        return Err(ParseError::InvalidRequest);
    }
    let (method_str, target, version) = (tokens[0], tokens[1], tokens[2]);

    let method = Method::from_str(method_str).ok_or(ParseError::UnsupportedMethod)?;

    if version != "HTTP/1.1" {
        return Err(ParseError::UnsupportedVersion);
    }

    // Headers: Name: Value, split on the first colon, last occurrence wins
    let mut headers = HashMap::new();

    for line in lines {
        if line.is_empty() {
            continue;
        }

        let (key, value) = line.split_once(':').ok_or(ParseError::InvalidHeader)?;

        headers.insert(key.trim().to_string(), value.trim().to_string());
    }

    // Body: present iff Content-Length says so. A non-numeric or negative
    // value is a framing failure, not an empty body.
    let content_length = headers
        .get("Content-Length")
        .map(|v| v.parse::<usize>().map_err(|_| ParseError::InvalidContentLength))
        .transpose()?
        .unwrap_or(0);

    if body_bytes.len() < content_length {
        return Err(ParseError::Incomplete);
    }

    let body = body_bytes[..content_length].to_vec();

    let request = Request {
        method,
        target: target.to_string(),
        version: version.to_string(),
        headers,
        body,
    };

    let total_consumed = headers_end + 4 + content_length;
    Ok((request, total_consumed))
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}
