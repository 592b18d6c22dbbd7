use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use std::collections::BTreeMap;

/// Read-only view of a repository checkout, addressed by repo-relative paths.
pub trait RepoView {
    fn root(&self) -> &Utf8Path;

    fn read_to_string(&self, rel: &Utf8Path) -> anyhow::Result<String>;

    /// True for files and directories alike.
    fn exists(&self, rel: &Utf8Path) -> bool;

    /// Sorted entry names directly under `rel`. Empty when `rel` is not a directory.
    fn list_dir(&self, rel: &Utf8Path) -> Vec<String>;
}

/// File-system backed `RepoView`.
#[derive(Debug, Clone)]
pub struct FsRepoView {
    root: Utf8PathBuf,
}

impl FsRepoView {
    pub fn new(root: Utf8PathBuf) -> Self {
        Self { root }
    }

    fn abs(&self, rel: &Utf8Path) -> Utf8PathBuf {
        if rel.is_absolute() {
            rel.to_path_buf()
        } else {
            self.root.join(rel)
        }
    }
}

impl RepoView for FsRepoView {
    fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn read_to_string(&self, rel: &Utf8Path) -> anyhow::Result<String> {
        let abs = self.abs(rel);
        fs::read_to_string(&abs).with_context(|| format!("read {}", abs))
    }

    fn exists(&self, rel: &Utf8Path) -> bool {
        self.abs(rel).exists()
    }

    fn list_dir(&self, rel: &Utf8Path) -> Vec<String> {
        let Ok(entries) = fs::read_dir(self.abs(rel)) else {
            return vec![];
        };
        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .filter_map(|e| e.file_name().into_string().ok())
            .collect();
        names.sort();
        names
    }
}

/// In-memory `RepoView` keyed by repo-relative file path. Directories are implied
/// by the paths of the files they contain.
#[derive(Debug, Clone, Default)]
pub struct MemRepoView {
    root: Utf8PathBuf,
    files: BTreeMap<Utf8PathBuf, String>,
}

impl MemRepoView {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: BTreeMap::new(),
        }
    }

    pub fn with_file(mut self, rel: impl Into<Utf8PathBuf>, contents: impl Into<String>) -> Self {
        self.files.insert(rel.into(), contents.into());
        self
    }
}

impl RepoView for MemRepoView {
    fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn read_to_string(&self, rel: &Utf8Path) -> anyhow::Result<String> {
        self.files
            .get(rel)
            .cloned()
            .with_context(|| format!("read {}", rel))
    }

    fn exists(&self, rel: &Utf8Path) -> bool {
        self.files.contains_key(rel) || self.files.keys().any(|p| p.starts_with(rel))
    }

    fn list_dir(&self, rel: &Utf8Path) -> Vec<String> {
        let mut names: Vec<String> = self
            .files
            .keys()
            .filter_map(|p| p.strip_prefix(rel).ok())
            .filter_map(|rest| rest.components().next())
            .map(|c| c.as_str().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        names.sort();
        names.dedup();
        names
    }
}
