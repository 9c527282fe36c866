//! Content-Type detection from file extensions.

use std::path::Path;

/// MIME type for `path`, judged by its extension alone.
///
/// Missing or unknown extensions get `application/octet-stream`.
///
/// ```
/// # use std::path::Path;
/// # use webs::http::mime::content_type_for;
/// assert_eq!(content_type_for(Path::new("index.html")), "text/html");
/// assert_eq!(content_type_for(Path::new("LICENSE")), "application/octet-stream");
/// ```
pub fn content_type_for(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
