use alcove::http::response::{Response, ResponseBuilder, StatusCode};

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Continue.as_u16(), 100);
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::MovedPermanently.as_u16(), 301);
    assert_eq!(StatusCode::BadRequest.as_u16(), 400);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
    assert_eq!(StatusCode::MethodNotAllowed.as_u16(), 405);
    assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
    assert_eq!(StatusCode::HttpVersionNotSupported.as_u16(), 505);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::MovedPermanently.reason_phrase(), "Moved Permanently");
    assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    assert_eq!(
        StatusCode::MethodNotAllowed.reason_phrase(),
        "Method Not Allowed"
    );
    assert_eq!(
        StatusCode::InternalServerError.reason_phrase(),
        "Internal Server Error"
    );
}

#[test]
fn test_status_code_rfc2616_phrasing() {
    // RFC 2616 spells a few of these unusually; keep them verbatim
    assert_eq!(StatusCode::RequestTimeout.reason_phrase(), "Request Time-out");
    assert_eq!(
        StatusCode::RequestUriTooLarge.reason_phrase(),
        "Request-URI Too Large"
    );
    assert_eq!(
        StatusCode::RequestedRangeNotSatisfiable.reason_phrase(),
        "Requested range not satisfiable"
    );
    assert_eq!(StatusCode::GatewayTimeout.reason_phrase(), "Gateway Time-out");
    assert_eq!(
        StatusCode::HttpVersionNotSupported.reason_phrase(),
        "HTTP Version not supported"
    );
}

#[test]
fn test_response_builder_basic() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .body(b"Hello, World!".to_vec())
        .build();

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.body, b"Hello, World!".to_vec());
}

#[test]
fn test_response_builder_with_headers() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "text/plain")
        .header("Location", "http://localhost/www/")
        .body(b"test".to_vec())
        .build();

    assert_eq!(response.headers.get("Content-Type").unwrap(), "text/plain");
    assert_eq!(
        response.headers.get("Location").unwrap(),
        "http://localhost/www/"
    );
}

#[test]
fn test_response_builder_auto_content_length() {
    let body = b"This is the body".to_vec();
    let response = ResponseBuilder::new(StatusCode::Ok)
        .body(body.clone())
        .build();

    let content_length = response.headers.get("Content-Length").unwrap();
    assert_eq!(content_length, &body.len().to_string());
}

#[test]
fn test_response_builder_content_length_counts_bytes_not_chars() {
    // "héllo" is 5 characters but 6 bytes in UTF-8
    let body = "héllo".as_bytes().to_vec();
    let response = ResponseBuilder::new(StatusCode::Ok).body(body).build();

    assert_eq!(response.headers.get("Content-Length").unwrap(), "6");
}

#[test]
fn test_response_builder_preserves_custom_content_length() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Length", "999")
        .body(b"test".to_vec())
        .build();

    // Should keep the custom value
    assert_eq!(response.headers.get("Content-Length").unwrap(), "999");
}

#[test]
fn test_response_builder_empty_body() {
    let response = ResponseBuilder::new(StatusCode::NoContent).build();

    assert_eq!(response.body.len(), 0);
    assert_eq!(response.headers.get("Content-Length").unwrap(), "0");
}

#[test]
fn test_response_builder_omits_content_type_unless_given() {
    let response = ResponseBuilder::new(StatusCode::NotFound)
        .body(b"gone".to_vec())
        .build();

    assert!(!response.headers.contains_key("Content-Type"));
}

#[test]
fn test_response_err_json_shape() {
    let response = Response::err_json(StatusCode::NotFound, "No such file or directory");

    assert_eq!(response.status, StatusCode::NotFound);
    assert_eq!(
        response.headers.get("Content-Type").unwrap(),
        "application/json"
    );

    let parsed: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
    assert_eq!(parsed["err"], "No such file or directory");
}

#[test]
fn test_response_err_json_content_length_matches_body() {
    let response = Response::err_json(StatusCode::InternalServerError, "disk on fire");

    let content_length: usize = response
        .headers
        .get("Content-Length")
        .unwrap()
        .parse()
        .unwrap();
    assert_eq!(content_length, response.body.len());
}

#[test]
fn test_response_protocol_rejection() {
    let response = Response::protocol_rejection();

    assert_eq!(response.status, StatusCode::BadRequest);
    assert_eq!(
        response.body,
        b"Request doesn't follow HTTP/1.1 protocol".to_vec()
    );
}
