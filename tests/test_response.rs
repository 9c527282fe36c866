use bytes::Bytes;
use webs::error::ServeError;
use webs::files::ListingEntry;
use webs::http::response::{Body, Response, ResponseBuilder, StatusCode, reason_phrase_for};
use webs::http::writer::{ResponseWriter, serialize_head};

fn body_text(response: &Response) -> String {
    match &response.body {
        Body::Bytes(bytes) => String::from_utf8(bytes.to_vec()).unwrap(),
        Body::File(_) => panic!("expected an in-memory body"),
    }
}

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::BadRequest.as_u16(), 400);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
    assert_eq!(StatusCode::MethodNotAllowed.as_u16(), 405);
    assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::BadRequest.reason_phrase(), "Bad Request");
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
fn test_status_table_unknown_code_is_empty() {
    assert_eq!(StatusCode::from_u16(418), None);
    assert_eq!(reason_phrase_for(418), "");
    assert_eq!(reason_phrase_for(404), "Not Found");
}

#[test]
fn test_serve_error_status_mapping() {
    let cases = vec![
        (ServeError::MalformedRequest("x".into()), StatusCode::BadRequest),
        (ServeError::MethodNotSupported("POST".into()), StatusCode::MethodNotAllowed),
        (ServeError::NotFound("x".into()), StatusCode::NotFound),
        (ServeError::InternalFault("x".into()), StatusCode::InternalServerError),
    ];

    for (err, status) in cases {
        assert_eq!(err.status(), status);
    }
}

#[test]
fn test_response_builder_keeps_header_order() {
    let response = ResponseBuilder::new(200)
        .header("Server", "Webs")
        .header("Content-Type", "text/plain")
        .header("X-Custom", "value")
        .build();

    let names: Vec<&str> = response.headers.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(names, vec!["Server", "Content-Type", "X-Custom"]);
}

#[test]
fn test_response_builder_replaces_existing_header() {
    let response = ResponseBuilder::new(200)
        .header("Content-Type", "text/plain")
        .header("Server", "Webs")
        .header("content-type", "text/html")
        .build();

    assert_eq!(response.headers.len(), 2);
    assert_eq!(response.headers[0].1, "text/html");
    assert_eq!(response.header("Content-Type"), Some("text/html"));
}

#[test]
fn test_response_never_sets_content_length() {
    let response = Response::error(404, "Webs");
    assert_eq!(response.header("Content-Length"), None);
}

#[test]
fn test_error_response_shape() {
    let response = Response::error(405, "Webs");

    assert_eq!(response.status, 405);
    assert_eq!(
        response.headers,
        vec![
            ("Content-Type".to_string(), "text/html".to_string()),
            ("Server".to_string(), "Webs".to_string()),
        ]
    );
    assert_eq!(body_text(&response), "Method Not Allowed");
}

#[test]
fn test_error_response_unknown_code_does_not_panic() {
    let response = Response::error(599, "Webs");

    assert_eq!(response.status, 599);
    assert_eq!(body_text(&response), "");
    assert!(serialize_head(&response).starts_with(b"HTTP/1.1 599 \r\n"));
}

#[test]
fn test_directory_response_shape() {
    let entries = vec![
        ListingEntry { name: "docs".to_string(), is_dir: true },
        ListingEntry { name: "readme.txt".to_string(), is_dir: false },
    ];
    let response = Response::directory("/pub/", &entries, "Webs");

    assert_eq!(response.status, 200);
    assert_eq!(response.header("Server"), Some("Webs"));
    assert_eq!(response.header("Content-Type"), Some("text/html; charset=utf-8"));

    let html = body_text(&response);
    assert!(html.contains("<title>Directory listing for /pub/</title>"));
    assert!(html.contains("<h1>Directory listing for /pub/</h1>"));
    assert!(html.contains("<li><a href=\"/pub/docs/\">docs/</a></li>"));
    assert!(html.contains("<li><a href=\"/pub/readme.txt\">readme.txt</a></li>"));
}

#[test]
fn test_directory_response_escapes_names() {
    let entries = vec![ListingEntry {
        name: "<b>&co.txt".to_string(),
        is_dir: false,
    }];
    let response = Response::directory("/<x>", &entries, "Webs");
    let html = body_text(&response);

    assert!(html.contains("Directory listing for /&lt;x&gt;"));
    assert!(html.contains("&lt;b&gt;&amp;co.txt</a>"));
    assert!(html.contains("href=\"/%3Cx%3E/%3Cb%3E%26co.txt\""));
    assert!(!html.contains("<b>"));
}

#[test]
fn test_serialize_head() {
    let response = ResponseBuilder::new(200)
        .header("Server", "Webs")
        .header("Content-Type", "text/plain")
        .body(Body::Bytes(Bytes::from_static(b"ignored")))
        .build();

    let head = serialize_head(&response);
    assert_eq!(
        &head[..],
        b"HTTP/1.1 200 OK\r\nServer: Webs\r\nContent-Type: text/plain\r\n\r\n"
    );
}

#[tokio::test]
async fn test_writer_emits_head_then_body() {
    let mut writer = ResponseWriter::new(Response::error(404, "Webs"));
    assert!(!writer.has_started());

    let mut out: Vec<u8> = Vec::new();
    writer.write_to_stream(&mut out).await.unwrap();

    assert!(writer.has_started());
    assert_eq!(
        out,
        b"HTTP/1.1 404 Not Found\r\nContent-Type: text/html\r\nServer: Webs\r\n\r\nNot Found".to_vec()
    );
}

#[tokio::test]
async fn test_writer_streams_file_body() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, b"line one\nline two\n").unwrap();

    let file = tokio::fs::File::open(&path).await.unwrap();
    let mut writer = ResponseWriter::new(Response::file(&path, file, "Webs"));

    let mut out: Vec<u8> = Vec::new();
    writer.write_to_stream(&mut out).await.unwrap();

    let expected = b"HTTP/1.1 200 OK\r\nServer: Webs\r\nContent-Type: text/plain\r\n\r\nline one\nline two\n";
    assert_eq!(out, expected.to_vec());
}
