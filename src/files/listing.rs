//! HTML directory listings.

use std::fmt::Write;
use std::io;
use std::path::Path;

/// One immediate child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub is_dir: bool,
}

/// Reads the immediate entries of `dir`, sorted by name.
///
/// Symlinks are not followed when deciding whether an entry is a directory,
/// and entries whose type cannot be read are listed as files.
pub async fn read_entries(dir: &Path) -> io::Result<Vec<ListingEntry>> {
    let mut reader = tokio::fs::read_dir(dir).await?;
    let mut entries = Vec::new();

    while let Some(entry) = reader.next_entry().await? {
        let is_dir = entry
            .file_type()
            .await
            .map(|t| t.is_dir())
            .unwrap_or(false);

        entries.push(ListingEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Renders the listing page for `request_path` (decoded, as the client asked for it).
pub fn render(request_path: &str, entries: &[ListingEntry]) -> String {
    let title = escape_html(request_path);
    let mut html = String::with_capacity(256 + entries.len() * 64);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    let _ = writeln!(html, "<title>Directory listing for {title}</title>");
    html.push_str("</head>\n<body>\n");
    let _ = writeln!(html, "<h1>Directory listing for {title}</h1>");
    html.push_str("<hr>\n<ul>\n");

    let base = href_base(request_path);
    for entry in entries {
        let href = format!("{base}{}", urlencoding::encode(&entry.name));
        let text = escape_html(&entry.name);
        if entry.is_dir {
            let _ = writeln!(html, "<li><a href=\"{href}/\">{text}/</a></li>");
        } else {
            let _ = writeln!(html, "<li><a href=\"{href}\">{text}</a></li>");
        }
    }

    html.push_str("</ul>\n</body>\n</html>\n");
    html
}

/// Absolute, percent-encoded directory prefix ending in `/`, so links work
/// whether or not the request carried a trailing slash.
fn href_base(request_path: &str) -> String {
    let mut base = String::from("/");
    for segment in request_path.split('/').filter(|s| !s.is_empty()) {
        base.push_str(&urlencoding::encode(segment));
        base.push('/');
    }
    base
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn href_base_is_absolute_with_trailing_slash() {
        assert_eq!(href_base("/"), "/");
        assert_eq!(href_base("/pub"), "/pub/");
        assert_eq!(href_base("/pub//my docs/"), "/pub/my%20docs/");
    }

    #[test]
    fn escapes_markup_in_names() {
        assert_eq!(escape_html("<a href='x'>&"), "&lt;a href=&#39;x&#39;&gt;&amp;");
    }
}
