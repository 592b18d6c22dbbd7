//! Builds the `Repository` snapshot an assessment runs against.

use crate::ports::GitPort;
use agentready_types::config::Config;
use agentready_types::repository::{Repository, UNKNOWN};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use std::collections::BTreeMap;
use tracing::{debug, warn};

const SKIP_DIRS: &[&str] = &[
    ".git",
    "target",
    "node_modules",
    ".venv",
    "venv",
    "__pycache__",
    ".agentready",
];

fn language_for_extension(ext: &str) -> Option<&'static str> {
    Some(match ext {
        "py" => "Python",
        "rs" => "Rust",
        "js" | "jsx" | "mjs" | "cjs" => "JavaScript",
        "ts" | "tsx" => "TypeScript",
        "go" => "Go",
        "java" => "Java",
        "rb" => "Ruby",
        "c" | "h" => "C",
        "cc" | "cpp" | "hpp" => "C++",
        "cs" => "C#",
        "sh" | "bash" => "Shell",
        _ => return None,
    })
}

struct LanguageOverrides {
    patterns: Vec<(glob::Pattern, String)>,
}

impl LanguageOverrides {
    fn compile(config: &Config) -> Self {
        let mut patterns = Vec::new();
        for (language, globs) in &config.language_overrides {
            for g in globs {
                match glob::Pattern::new(g) {
                    Ok(p) => patterns.push((p, language.clone())),
                    Err(err) => warn!(pattern = %g, error = %err, "ignoring invalid language override"),
                }
            }
        }
        Self { patterns }
    }

    fn language_for(&self, rel: &Utf8Path) -> Option<&str> {
        self.patterns
            .iter()
            .find(|(p, _)| p.matches(rel.as_str()))
            .map(|(_, lang)| lang.as_str())
    }
}

#[derive(Default)]
struct Tally {
    languages: BTreeMap<String, u64>,
    files: u64,
    lines: u64,
}

/// Snapshot `root`: name, git facts, per-language file counts, totals.
///
/// Git facts fall back to `"unknown"` when unavailable.
pub fn scan_repository(
    root: &Utf8Path,
    git: &dyn GitPort,
    config: &Config,
) -> anyhow::Result<Repository> {
    let name = root
        .canonicalize_utf8()
        .ok()
        .and_then(|p| p.file_name().map(str::to_string))
        .unwrap_or_else(|| "repository".to_string());

    let overrides = LanguageOverrides::compile(config);
    let mut tally = Tally::default();
    walk(root, Utf8Path::new(""), &overrides, &mut tally)?;
    debug!(
        files = tally.files,
        lines = tally.lines,
        languages = tally.languages.len(),
        "scanned repository"
    );

    let branch = git.branch(root)?.unwrap_or_else(|| UNKNOWN.to_string());
    let commit = git.head_sha(root)?.unwrap_or_else(|| UNKNOWN.to_string());
    let url = git.remote_url(root)?;

    Ok(Repository::new(root, name)?
        .with_url(url)
        .with_git(branch, commit)
        .with_languages(tally.languages)
        .with_totals(tally.files, tally.lines))
}

fn walk(
    root: &Utf8Path,
    rel: &Utf8Path,
    overrides: &LanguageOverrides,
    tally: &mut Tally,
) -> anyhow::Result<()> {
    let dir = root.join(rel);
    let mut entries: Vec<_> = fs::read_dir(&dir)
        .with_context(|| format!("read_dir {}", dir))?
        .filter_map(Result::ok)
        .collect();
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        let child: Utf8PathBuf = rel.join(&name);
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_dir() {
            if SKIP_DIRS.contains(&name.as_str()) {
                continue;
            }
            if let Err(err) = walk(root, &child, overrides, tally) {
                let error = format!("{err:#}");
                warn!(dir = %child, error = %error, "skipping unreadable directory");
            }
        } else if file_type.is_file() {
            tally.files += 1;
            let language = overrides.language_for(&child).or_else(|| {
                child.extension().and_then(language_for_extension)
            });
            if let Some(language) = language {
                *tally.languages.entry(language.to_string()).or_default() += 1;
            }
            // non-UTF-8 files count as files but contribute no lines
            if let Ok(text) = fs::read_to_string(root.join(&child)) {
                tally.lines += text.lines().count() as u64;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    struct NoGit;

    impl GitPort for NoGit {
        fn is_repository(&self, _: &Utf8Path) -> bool {
            false
        }
        fn branch(&self, _: &Utf8Path) -> anyhow::Result<Option<String>> {
            Ok(None)
        }
        fn head_sha(&self, _: &Utf8Path) -> anyhow::Result<Option<String>> {
            Ok(None)
        }
        fn remote_url(&self, _: &Utf8Path) -> anyhow::Result<Option<String>> {
            Ok(None)
        }
    }

    fn repo_with(files: &[(&str, &str)]) -> (TempDir, Utf8PathBuf) {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        for (path, contents) in files {
            let p = root.join(path);
            fs::create_dir_all(p.parent().expect("parent")).expect("mkdir");
            fs::write(&p, contents).expect("write");
        }
        (temp, root)
    }

    #[test]
    fn counts_languages_files_and_lines() {
        let (_temp, root) = repo_with(&[
            ("src/main.rs", "fn main() {}\n"),
            ("src/lib.rs", "pub fn a() {}\npub fn b() {}\n"),
            ("tools/gen.py", "print(1)\n"),
            ("README.md", "# x\n\ny\n"),
            ("target/debug/junk.rs", "ignored\n"),
            (".git/HEAD", "ref: refs/heads/main\n"),
        ]);
        let repo = scan_repository(&root, &NoGit, &Config::default()).expect("scan");

        assert_eq!(repo.languages.get("Rust"), Some(&2));
        assert_eq!(repo.languages.get("Python"), Some(&1));
        assert_eq!(repo.total_files, 4);
        assert_eq!(repo.total_lines, 7);
        assert_eq!(repo.primary_language(), Some("Rust"));
        assert_eq!(repo.branch, UNKNOWN);
        assert_eq!(repo.commit_hash, UNKNOWN);
        assert_eq!(repo.url, None);
    }

    #[test]
    fn language_overrides_take_precedence() {
        let (_temp, root) = repo_with(&[("build/gen.inc", "x\n"), ("lib.js", "x\n")]);
        let mut config = Config::default();
        config
            .language_overrides
            .insert("Python".to_string(), vec!["build/*.inc".to_string()]);
        let repo = scan_repository(&root, &NoGit, &config).expect("scan");

        assert_eq!(repo.languages.get("Python"), Some(&1));
        assert_eq!(repo.languages.get("JavaScript"), Some(&1));
    }

    #[test]
    fn missing_root_is_an_error() {
        let (_temp, root) = repo_with(&[]);
        assert!(scan_repository(&root.join("nope"), &NoGit, &Config::default()).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_subdirectory_does_not_fail_the_scan() {
        use std::os::unix::fs::PermissionsExt;

        let (_temp, root) = repo_with(&[("app.py", "print(1)\n"), ("secret/key.py", "x\n")]);
        let secret = root.join("secret");
        fs::set_permissions(&secret, std::fs::Permissions::from_mode(0o000)).expect("chmod");

        let scanned = scan_repository(&root, &NoGit, &Config::default());
        fs::set_permissions(&secret, std::fs::Permissions::from_mode(0o755)).expect("chmod back");

        let repo = scanned.expect("scan");
        assert!(repo.languages.get("Python").is_some_and(|n| *n >= 1));
        assert!(repo.total_files >= 1);
    }
}
