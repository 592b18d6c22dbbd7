use crate::error::ValidationError;
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const UNKNOWN: &str = "unknown";

/// Snapshot of a scanned repository. One instance per assessment run.
///
/// Construction through [`Repository::new`] checks the path; deserialization
/// does not, so stored assessments for moved or deleted checkouts stay readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub path: Utf8PathBuf,
    pub name: String,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default = "unknown")]
    pub branch: String,

    #[serde(default = "unknown")]
    pub commit_hash: String,

    /// Language name to file count.
    #[serde(default)]
    pub languages: BTreeMap<String, u64>,

    #[serde(default)]
    pub total_files: u64,

    #[serde(default)]
    pub total_lines: u64,
}

fn unknown() -> String {
    UNKNOWN.to_string()
}

impl Repository {
    pub fn new(path: impl Into<Utf8PathBuf>, name: impl Into<String>) -> Result<Self, ValidationError> {
        let path = path.into();
        ensure_directory(&path)?;
        Ok(Self {
            path,
            name: name.into(),
            url: None,
            branch: unknown(),
            commit_hash: unknown(),
            languages: BTreeMap::new(),
            total_files: 0,
            total_lines: 0,
        })
    }

    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url;
        self
    }

    pub fn with_git(mut self, branch: impl Into<String>, commit_hash: impl Into<String>) -> Self {
        self.branch = branch.into();
        self.commit_hash = commit_hash.into();
        self
    }

    pub fn with_languages(mut self, languages: BTreeMap<String, u64>) -> Self {
        self.languages = languages;
        self
    }

    pub fn with_totals(mut self, total_files: u64, total_lines: u64) -> Self {
        self.total_files = total_files;
        self.total_lines = total_lines;
        self
    }

    /// Language with the largest metric; ties resolve to the alphabetically first name.
    pub fn primary_language(&self) -> Option<&str> {
        self.languages
            .iter()
            .max_by(|(a_name, a), (b_name, b)| a.cmp(b).then_with(|| b_name.cmp(a_name)))
            .map(|(name, _)| name.as_str())
    }
}

fn ensure_directory(path: &Utf8Path) -> Result<(), ValidationError> {
    if !path.exists() {
        return Err(ValidationError::PathDoesNotExist(path.to_string()));
    }
    if !path.is_dir() {
        return Err(ValidationError::NotADirectory(path.to_string()));
    }
    Ok(())
}
