use agentready_edit::{current_branch, get_head_sha, is_git_repository, is_working_tree_dirty, remote_url};
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use std::process::Command;
use tempfile::TempDir;

fn run_git(root: &Utf8Path, args: &[&str]) {
    let status = Command::new("git")
        .args(args)
        .current_dir(root)
        .status()
        .expect("run git");
    assert!(status.success(), "git {:?} failed", args);
}

#[test]
fn helpers_report_repository_state() {
    let temp = TempDir::new().expect("temp dir");
    let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
    assert!(!is_git_repository(&root));

    fs::write(root.join("README.md"), "# demo\n").expect("write");
    run_git(&root, &["init", "-b", "main"]);
    run_git(&root, &["config", "user.email", "test@example.com"]);
    run_git(&root, &["config", "user.name", "Test User"]);
    run_git(&root, &["add", "."]);
    run_git(&root, &["commit", "-m", "init"]);

    assert!(is_git_repository(&root));
    assert_eq!(get_head_sha(&root).expect("head").len(), 40);
    assert_eq!(current_branch(&root).expect("branch"), "main");
    assert_eq!(remote_url(&root), None);
    assert!(!is_working_tree_dirty(&root).expect("dirty"));

    fs::write(root.join("README.md"), "# changed\n").expect("write");
    assert!(is_working_tree_dirty(&root).expect("dirty"));

    run_git(&root, &["remote", "add", "origin", "https://example.com/demo.git"]);
    assert_eq!(remote_url(&root).as_deref(), Some("https://example.com/demo.git"));
}
