use std::path::Path;

use bytes::Bytes;
use tokio::fs::File;

use crate::files::listing::{self, ListingEntry};
use crate::http::mime;

/// HTTP status codes used by the server.
///
/// - `Ok` (200): Request successful
/// - `BadRequest` (400): Malformed request line or path encoding
/// - `NotFound` (404): Resource not found
/// - `MethodNotAllowed` (405): HTTP method not supported
/// - `InternalServerError` (500): Server error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 405 Method Not Allowed
    MethodNotAllowed,
    /// 500 Internal Server Error
    InternalServerError,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use webs::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
            StatusCode::InternalServerError => 500,
        }
    }

    /// Looks up a known status code.
    pub fn from_u16(code: u16) -> Option<Self> {
        match code {
            200 => Some(StatusCode::Ok),
            400 => Some(StatusCode::BadRequest),
            404 => Some(StatusCode::NotFound),
            405 => Some(StatusCode::MethodNotAllowed),
            500 => Some(StatusCode::InternalServerError),
            _ => None,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use webs::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}

/// Reason phrase for an arbitrary numeric code; empty when the code is unknown.
pub fn reason_phrase_for(code: u16) -> &'static str {
    StatusCode::from_u16(code).map_or("", |status| status.reason_phrase())
}

/// Where the response body comes from.
#[derive(Debug)]
pub enum Body {
    /// Generated text: listings and error pages
    Bytes(Bytes),
    /// An open file, streamed to the client and closed when the body is dropped
    File(File),
}

/// A complete HTTP response ready to be written to a client.
///
/// Headers keep their insertion order on the wire. No `Content-Length` is
/// ever set: the body ends when the connection closes.
#[derive(Debug)]
pub struct Response {
    /// Numeric status code
    pub status: u16,
    /// HTTP headers in wire order
    pub headers: Vec<(String, String)>,
    /// Response body
    pub body: Body,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(200)
///     .header("Content-Type", "text/plain")
///     .body(Body::Bytes(Bytes::from_static(b"hi")))
///     .build();
/// ```
pub struct ResponseBuilder {
    status: u16,
    headers: Vec<(String, String)>,
    body: Body,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code and an empty body.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Body::Bytes(Bytes::new()),
        }
    }

    /// Appends a header, or replaces the value in place if the name is already present.
    ///
    /// Names compare case-insensitively.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&key))
        {
            Some(existing) => existing.1 = value,
            None => self.headers.push((key, value)),
        }
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    /// Builds the final Response.
    pub fn build(self) -> Response {
        Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// Error page: `Content-Type` then `Server`, with the reason phrase as the body.
    ///
    /// Unknown codes get an empty reason phrase.
    pub fn error(code: u16, server_name: &str) -> Self {
        let reason = reason_phrase_for(code);
        ResponseBuilder::new(code)
            .header("Content-Type", "text/html")
            .header("Server", server_name)
            .body(Body::Bytes(Bytes::from_static(reason.as_bytes())))
            .build()
    }

    /// 200 with the file streamed as the body; the type comes from `path`'s extension.
    pub fn file(path: &Path, file: File, server_name: &str) -> Self {
        ResponseBuilder::new(StatusCode::Ok.as_u16())
            .header("Server", server_name)
            .header("Content-Type", mime::content_type_for(path))
            .body(Body::File(file))
            .build()
    }

    /// 200 with a generated HTML listing of `entries` under `request_path`.
    pub fn directory(request_path: &str, entries: &[ListingEntry], server_name: &str) -> Self {
        let html = listing::render(request_path, entries);
        ResponseBuilder::new(StatusCode::Ok.as_u16())
            .header("Server", server_name)
            .header("Content-Type", "text/html; charset=utf-8")
            .body(Body::Bytes(Bytes::from(html)))
            .build()
    }

    /// Value of the first header named `key`, compared case-insensitively.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}
