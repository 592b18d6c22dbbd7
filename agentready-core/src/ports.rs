//! Port traits abstracting git and artifact writes away from the pipeline.

use camino::Utf8Path;

/// Git queries. `Ok(None)` means "not available" (no commits, no remote).
pub trait GitPort {
    fn is_repository(&self, path: &Utf8Path) -> bool;
    fn branch(&self, repo_root: &Utf8Path) -> anyhow::Result<Option<String>>;
    fn head_sha(&self, repo_root: &Utf8Path) -> anyhow::Result<Option<String>>;
    fn remote_url(&self, repo_root: &Utf8Path) -> anyhow::Result<Option<String>>;
}

/// File-system write operations.
pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()>;
}
