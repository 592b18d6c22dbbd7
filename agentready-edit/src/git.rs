//! Thin wrappers over the `git` CLI.

use anyhow::Context;
use camino::Utf8Path;
use std::process::Command;

fn git(repo_root: &Utf8Path, args: &[&str]) -> anyhow::Result<String> {
    let output = Command::new("git")
        .current_dir(repo_root)
        .args(args)
        .output()
        .with_context(|| format!("run git {}", args.join(" ")))?;
    if !output.status.success() {
        anyhow::bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// True when `path` is inside a git work tree.
pub fn is_git_repository(path: &Utf8Path) -> bool {
    matches!(
        git(path, &["rev-parse", "--is-inside-work-tree"]).as_deref(),
        Ok("true")
    )
}

pub fn get_head_sha(repo_root: &Utf8Path) -> anyhow::Result<String> {
    git(repo_root, &["rev-parse", "HEAD"])
}

pub fn current_branch(repo_root: &Utf8Path) -> anyhow::Result<String> {
    git(repo_root, &["rev-parse", "--abbrev-ref", "HEAD"])
}

/// `None` when no `origin` remote is configured.
pub fn remote_url(repo_root: &Utf8Path) -> Option<String> {
    git(repo_root, &["remote", "get-url", "origin"])
        .ok()
        .filter(|url| !url.is_empty())
}

pub fn is_working_tree_dirty(repo_root: &Utf8Path) -> anyhow::Result<bool> {
    Ok(!git(repo_root, &["status", "--porcelain"])?.is_empty())
}
