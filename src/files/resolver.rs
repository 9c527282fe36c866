//! Request path → sandboxed filesystem target
//!
//! Resolution runs in three stages:
//! 1. percent-decode the raw path to bytes (`+` is a space, `%XX` must be valid hex)
//! 2. lexically normalize it onto the root, refusing any `..` that climbs above it
//! 3. canonicalize the candidate and require the result to stay under the root,
//!    which also catches symlinks pointing outside

use std::path::{Component, Path, PathBuf};

use tokio::fs::File;

use crate::error::ServeError;
use crate::files::listing::{self, ListingEntry};
use crate::site::Site;

const INDEX_FILE: &str = "index.html";

/// What a request path points at.
#[derive(Debug)]
pub struct ResolvedTarget {
    /// The decoded request path, as the client asked for it, for display.
    /// Bytes that are not UTF-8 are replaced.
    pub request_path: String,
    /// Path under the root as requested, before symlinks are followed.
    /// For a directory served through its index this is the index path.
    pub path: PathBuf,
    pub kind: TargetKind,
}

#[derive(Debug)]
pub enum TargetKind {
    /// A regular file, already opened
    File(File),
    /// A directory without a usable `index.html`, with its immediate entries
    Directory(Vec<ListingEntry>),
}

/// Decodes a raw request path with query-unescape rules.
///
/// Escapes only need to be well formed; the decoded bytes may be any
/// byte sequence, since file names need not be UTF-8.
///
/// ```
/// # use webs::files::resolver::decode_path;
/// assert_eq!(decode_path("/a%20b+c").unwrap(), b"/a b c");
/// assert_eq!(decode_path("/%FF").unwrap(), b"/\xff");
/// assert!(decode_path("/%zz").is_err());
/// ```
pub fn decode_path(raw: &str) -> Result<Vec<u8>, ServeError> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return Err(ServeError::MalformedRequest(format!(
                    "invalid escape at byte {i}"
                )));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    let spaced = raw.replace('+', " ");
    Ok(urlencoding::decode_binary(spaced.as_bytes()).into_owned())
}

#[cfg(unix)]
fn path_from_bytes(bytes: Vec<u8>) -> PathBuf {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    PathBuf::from(OsString::from_vec(bytes))
}

// Non-UTF-8 names cannot be spelled on these platforms; the lossy
// replacement never matches a real entry and ends as NotFound.
#[cfg(not(unix))]
fn path_from_bytes(bytes: Vec<u8>) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(&bytes).into_owned())
}

/// Joins `decoded` onto `root`, dropping `.` and empty segments and applying `..`.
///
/// A `..` with nothing left to pop would leave the root and is rejected.
pub fn normalize(root: &Path, decoded: &Path) -> Result<PathBuf, ServeError> {
    let mut path = root.to_path_buf();
    let mut depth = 0usize;

    for component in decoded.components() {
        match component {
            Component::RootDir | Component::CurDir => {}
            Component::Normal(segment) => {
                path.push(segment);
                depth += 1;
            }
            Component::ParentDir => {
                if depth == 0 {
                    tracing::debug!(path = %decoded.display(), "Rejected path climbing above root");
                    return Err(ServeError::MalformedRequest(
                        "path escapes the root".to_string(),
                    ));
                }
                path.pop();
                depth -= 1;
            }
            Component::Prefix(_) => {
                return Err(ServeError::MalformedRequest(
                    "path carries a drive prefix".to_string(),
                ));
            }
        }
    }

    Ok(path)
}

/// Canonical form of `candidate`, provided it exists and stays under the root.
async fn contain(site: &Site, candidate: &Path) -> Result<PathBuf, ServeError> {
    let canonical = tokio::fs::canonicalize(candidate)
        .await
        .map_err(|e| ServeError::NotFound(e.to_string()))?;

    if !canonical.starts_with(site.root()) {
        tracing::warn!(
            path = %candidate.display(),
            "Resolved path lies outside the root"
        );
        return Err(ServeError::NotFound("outside root".to_string()));
    }

    Ok(canonical)
}

async fn open_regular(site: &Site, candidate: &Path) -> Result<File, ServeError> {
    let canonical = contain(site, candidate).await?;
    let meta = tokio::fs::metadata(&canonical)
        .await
        .map_err(|e| ServeError::NotFound(e.to_string()))?;

    if !meta.is_file() {
        return Err(ServeError::NotFound("not a regular file".to_string()));
    }

    File::open(&canonical)
        .await
        .map_err(|e| ServeError::NotFound(e.to_string()))
}

/// Resolves `raw_path` against the site root.
///
/// Invalid escapes and escapes above the root give `MalformedRequest`;
/// anything missing, unreadable or outside the root gives `NotFound`.
pub async fn resolve(site: &Site, raw_path: &str) -> Result<ResolvedTarget, ServeError> {
    let bytes = decode_path(raw_path)?;
    let decoded = String::from_utf8_lossy(&bytes).into_owned();
    let candidate = normalize(site.root(), &path_from_bytes(bytes))?;
    let canonical = contain(site, &candidate).await?;

    let meta = tokio::fs::metadata(&canonical)
        .await
        .map_err(|e| ServeError::NotFound(e.to_string()))?;

    if meta.is_dir() {
        let index = candidate.join(INDEX_FILE);
        if let Ok(file) = open_regular(site, &index).await {
            return Ok(ResolvedTarget {
                request_path: decoded,
                path: index,
                kind: TargetKind::File(file),
            });
        }

        let entries = listing::read_entries(&canonical)
            .await
            .map_err(|e| ServeError::NotFound(e.to_string()))?;

        return Ok(ResolvedTarget {
            request_path: decoded,
            path: candidate,
            kind: TargetKind::Directory(entries),
        });
    }

    let file = open_regular(site, &candidate).await?;
    Ok(ResolvedTarget {
        request_path: decoded,
        path: candidate,
        kind: TargetKind::File(file),
    })
}
