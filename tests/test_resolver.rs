use std::fs;

use tokio::io::AsyncReadExt;
use webs::error::ServeError;
use webs::files::{ListingEntry, TargetKind, resolve};
use webs::site::Site;

fn site_with(files: &[(&str, &str)]) -> (tempfile::TempDir, Site) {
    let dir = tempfile::tempdir().unwrap();
    for (name, contents) in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }
    let site = Site::new(dir.path(), "Webs").unwrap();
    (dir, site)
}

#[test]
fn test_site_rejects_missing_root() {
    assert!(Site::new("/no/such/root/anywhere", "Webs").is_err());
}

#[test]
fn test_site_rejects_file_root() {
    let (dir, _) = site_with(&[("plain.txt", "x")]);
    assert!(Site::new(dir.path().join("plain.txt"), "Webs").is_err());
}

#[tokio::test]
async fn test_resolve_regular_file() {
    let (_dir, site) = site_with(&[("hello.txt", "hi there")]);

    let target = resolve(&site, "/hello.txt").await.unwrap();
    assert!(target.path.ends_with("hello.txt"));

    let TargetKind::File(mut file) = target.kind else {
        panic!("expected a file");
    };
    let mut contents = String::new();
    file.read_to_string(&mut contents).await.unwrap();
    assert_eq!(contents, "hi there");
}

#[tokio::test]
async fn test_resolve_decodes_percent_escapes() {
    let (_dir, site) = site_with(&[("my notes.txt", "x")]);

    let target = resolve(&site, "/my%20notes.txt").await.unwrap();
    assert_eq!(target.request_path, "/my notes.txt");
    assert!(matches!(target.kind, TargetKind::File(_)));

    let target = resolve(&site, "/my+notes.txt").await.unwrap();
    assert!(matches!(target.kind, TargetKind::File(_)));
}

#[tokio::test]
async fn test_resolve_invalid_escape_is_malformed() {
    let (_dir, site) = site_with(&[]);

    let err = resolve(&site, "/bad%zzpath").await.unwrap_err();
    assert!(matches!(err, ServeError::MalformedRequest(_)));
}

#[tokio::test]
async fn test_resolve_missing_is_not_found() {
    let (_dir, site) = site_with(&[]);

    let err = resolve(&site, "/nope.html").await.unwrap_err();
    assert!(matches!(err, ServeError::NotFound(_)));
}

#[tokio::test]
async fn test_resolve_directory_prefers_index() {
    let (_dir, site) = site_with(&[("docs/index.html", "<p>docs</p>"), ("docs/other.txt", "x")]);

    let target = resolve(&site, "/docs/").await.unwrap();
    assert!(target.path.ends_with("docs/index.html"));
    assert!(matches!(target.kind, TargetKind::File(_)));
}

#[tokio::test]
async fn test_resolve_directory_without_index_lists_entries() {
    let (dir, site) = site_with(&[("b.txt", "b"), ("a.txt", "a")]);
    fs::create_dir(dir.path().join("zdir")).unwrap();

    let target = resolve(&site, "/").await.unwrap();
    let TargetKind::Directory(entries) = target.kind else {
        panic!("expected a listing");
    };

    assert_eq!(
        entries,
        vec![
            ListingEntry { name: "a.txt".to_string(), is_dir: false },
            ListingEntry { name: "b.txt".to_string(), is_dir: false },
            ListingEntry { name: "zdir".to_string(), is_dir: true },
        ]
    );
}

#[tokio::test]
async fn test_resolve_index_directory_is_ignored() {
    let (dir, site) = site_with(&[("readme.txt", "x")]);
    fs::create_dir(dir.path().join("index.html")).unwrap();

    let target = resolve(&site, "/").await.unwrap();
    assert!(matches!(target.kind, TargetKind::Directory(_)));
}

#[tokio::test]
async fn test_resolve_dot_segments_inside_root() {
    let (_dir, site) = site_with(&[("a/b.txt", "x")]);

    let target = resolve(&site, "/a/./c/../b.txt").await.unwrap();
    assert!(matches!(target.kind, TargetKind::File(_)));
}

#[tokio::test]
async fn test_resolve_traversal_is_rejected() {
    let (_dir, site) = site_with(&[("a.txt", "x")]);

    for raw in ["/../../etc/passwd", "../etc/passwd", "/%2e%2e/%2e%2e/etc/passwd", "/a/../../etc/passwd"] {
        let err = resolve(&site, raw).await.unwrap_err();
        assert!(
            matches!(err, ServeError::MalformedRequest(_) | ServeError::NotFound(_)),
            "{raw} resolved to {err:?}"
        );
    }
}

#[cfg(unix)]
#[tokio::test]
async fn test_resolve_symlink_outside_root_is_not_found() {
    let outside = tempfile::tempdir().unwrap();
    fs::write(outside.path().join("secret.txt"), "secret").unwrap();

    let (dir, site) = site_with(&[]);
    std::os::unix::fs::symlink(outside.path().join("secret.txt"), dir.path().join("leak.txt")).unwrap();

    let err = resolve(&site, "/leak.txt").await.unwrap_err();
    assert!(matches!(err, ServeError::NotFound(_)));
}

#[cfg(unix)]
#[tokio::test]
async fn test_resolve_symlink_inside_root_is_served() {
    let (dir, site) = site_with(&[("real.txt", "real")]);
    std::os::unix::fs::symlink(dir.path().join("real.txt"), dir.path().join("alias.txt")).unwrap();

    let target = resolve(&site, "/alias.txt").await.unwrap();
    assert!(target.path.ends_with("alias.txt"));
    assert!(matches!(target.kind, TargetKind::File(_)));
}
