use crate::error::ServeError;
use crate::http::request::{Method, Request};

/// Longest request line accepted, excluding the line terminator.
pub const MAX_REQUEST_LINE: usize = 8 * 1024;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("request line is not valid UTF-8")]
    InvalidEncoding,
    #[error("expected 3 tokens on the request line, found {0}")]
    WrongTokenCount(usize),
    #[error("request line exceeds {} bytes", MAX_REQUEST_LINE)]
    LineTooLong,
    #[error("connection closed before a request line was received")]
    Empty,
}

impl From<ParseError> for ServeError {
    fn from(err: ParseError) -> Self {
        ServeError::MalformedRequest(err.to_string())
    }
}

/// Parses `<METHOD> <path> <version>` with the line terminator already removed.
///
/// Tokens are separated by exactly one space, so `"GET  / HTTP/1.1"` has
/// four tokens and is rejected.
pub fn parse_request_line(line: &[u8]) -> Result<Request, ParseError> {
    if line.is_empty() {
        return Err(ParseError::Empty);
    }
    if line.len() > MAX_REQUEST_LINE {
        return Err(ParseError::LineTooLong);
    }

    let line = std::str::from_utf8(line).map_err(|_| ParseError::InvalidEncoding)?;
    let tokens: Vec<&str> = line.split(' ').collect();

    let &[method, path, version] = tokens.as_slice() else {
        return Err(ParseError::WrongTokenCount(tokens.len()));
    };

    Ok(Request {
        method: Method::from(method),
        path: path.to_string(),
        version: version.to_string(),
    })
}

/// Position of the first `\n` in `buf`, if any.
pub fn find_line_end(buf: &[u8]) -> Option<usize> {
    buf.iter().position(|&b| b == b'\n')
}

/// Drops a trailing `\r` left over from a `\r\n` terminator.
pub fn trim_line(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}
