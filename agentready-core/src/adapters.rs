//! Default shell- and filesystem-backed port implementations.

use crate::ports::{GitPort, WritePort};
use anyhow::Context;
use camino::Utf8Path;
use fs_err as fs;

/// Git operations via the `agentready_edit` shell helpers.
#[derive(Debug, Clone, Default)]
pub struct ShellGitPort;

impl GitPort for ShellGitPort {
    fn is_repository(&self, path: &Utf8Path) -> bool {
        agentready_edit::is_git_repository(path)
    }

    fn branch(&self, repo_root: &Utf8Path) -> anyhow::Result<Option<String>> {
        Ok(agentready_edit::current_branch(repo_root).ok())
    }

    fn head_sha(&self, repo_root: &Utf8Path) -> anyhow::Result<Option<String>> {
        Ok(agentready_edit::get_head_sha(repo_root).ok())
    }

    fn remote_url(&self, repo_root: &Utf8Path) -> anyhow::Result<Option<String>> {
        Ok(agentready_edit::remote_url(repo_root))
    }
}

/// Filesystem write operations.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create parent dir for {}", path))?;
        }
        fs::write(path, contents).with_context(|| format!("write {}", path))
    }

    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()> {
        fs::create_dir_all(path).with_context(|| format!("create_dir_all {}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use std::process::Command;
    use tempfile::TempDir;

    fn temp_root() -> (TempDir, Utf8PathBuf) {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        (temp, root)
    }

    #[test]
    fn fs_write_port_creates_parents() {
        let (_temp, root) = temp_root();
        let target = root.join(".agentready/nested/file.json");
        FsWritePort.write_file(&target, b"{}").expect("write");
        assert_eq!(fs::read_to_string(&target).expect("read"), "{}");
    }

    #[test]
    fn shell_git_port_reports_none_outside_repo() {
        let (_temp, root) = temp_root();
        let git = ShellGitPort;
        assert!(!git.is_repository(&root));
        assert_eq!(git.head_sha(&root).expect("head"), None);
        assert_eq!(git.remote_url(&root).expect("remote"), None);
    }

    #[test]
    fn shell_git_port_reads_head_after_commit() {
        let (_temp, root) = temp_root();
        let git_cmd = |args: &[&str]| {
            let status = Command::new("git")
                .args(args)
                .current_dir(&root)
                .status()
                .expect("git");
            assert!(status.success(), "git {:?} failed", args);
        };
        fs::write(root.join("a.txt"), "a").expect("write");
        git_cmd(&["init", "-b", "trunk"]);
        git_cmd(&["config", "user.email", "test@example.com"]);
        git_cmd(&["config", "user.name", "Test User"]);
        git_cmd(&["add", "."]);
        git_cmd(&["commit", "-m", "init"]);

        let git = ShellGitPort;
        assert!(git.is_repository(&root));
        assert_eq!(git.branch(&root).expect("branch").as_deref(), Some("trunk"));
        assert_eq!(git.head_sha(&root).expect("head").map(|s| s.len()), Some(40));
    }
}
