//! Process-wide, read-only serving context.

use std::path::{Path, PathBuf};

use anyhow::Context;

/// The served root and the name announced in the `Server` header.
///
/// Built once at startup and shared behind an `Arc` by every connection task.
#[derive(Debug, Clone)]
pub struct Site {
    root: PathBuf,
    server_name: String,
}

impl Site {
    /// Canonicalizes `root`, which must be an existing directory.
    pub fn new(root: impl AsRef<Path>, server_name: impl Into<String>) -> anyhow::Result<Self> {
        let root = root.as_ref();
        let root = std::fs::canonicalize(root)
            .with_context(|| format!("cannot resolve root directory {}", root.display()))?;

        if !root.is_dir() {
            anyhow::bail!("root {} is not a directory", root.display());
        }

        Ok(Self {
            root,
            server_name: server_name.into(),
        })
    }

    /// Canonical absolute root; every resolved target lies under it.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn server_name(&self) -> &str {
        &self.server_name
    }
}
