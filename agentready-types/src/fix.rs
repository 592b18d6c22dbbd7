use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

/// What a file-creation fix does when the target already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExistingFilePolicy {
    /// Leave the existing file alone and report the fix as skipped.
    #[default]
    Skip,
    Overwrite,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FixAction {
    FileCreation {
        /// Relative to the fix's repository path.
        file_path: Utf8PathBuf,
        content: String,
        #[serde(default)]
        on_existing: ExistingFilePolicy,
    },
    Command {
        command: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        working_dir: Option<Utf8PathBuf>,
    },
    MultiStep {
        steps: Vec<Fix>,
    },
}

/// A proposed remediation for one failing attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fix {
    /// Deterministic id, assigned at planning time. Empty until then.
    #[serde(default)]
    pub id: String,
    pub attribute_id: String,
    pub description: String,
    pub points_gained: f64,
    pub repository_path: Utf8PathBuf,
    pub action: FixAction,
}

impl Fix {
    pub fn file_creation(
        attribute_id: impl Into<String>,
        description: impl Into<String>,
        points_gained: f64,
        repository_path: impl Into<Utf8PathBuf>,
        file_path: impl Into<Utf8PathBuf>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            attribute_id: attribute_id.into(),
            description: description.into(),
            points_gained,
            repository_path: repository_path.into(),
            action: FixAction::FileCreation {
                file_path: file_path.into(),
                content: content.into(),
                on_existing: ExistingFilePolicy::default(),
            },
        }
    }

    pub fn command(
        attribute_id: impl Into<String>,
        description: impl Into<String>,
        points_gained: f64,
        repository_path: impl Into<Utf8PathBuf>,
        command: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            attribute_id: attribute_id.into(),
            description: description.into(),
            points_gained,
            repository_path: repository_path.into(),
            action: FixAction::Command {
                command: command.into(),
                working_dir: None,
            },
        }
    }

    pub fn multi_step(
        attribute_id: impl Into<String>,
        description: impl Into<String>,
        points_gained: f64,
        repository_path: impl Into<Utf8PathBuf>,
        steps: Vec<Fix>,
    ) -> Self {
        Self {
            id: String::new(),
            attribute_id: attribute_id.into(),
            description: description.into(),
            points_gained,
            repository_path: repository_path.into(),
            action: FixAction::MultiStep { steps },
        }
    }

    /// Only meaningful for file creations; other actions are returned unchanged.
    pub fn with_existing_policy(mut self, policy: ExistingFilePolicy) -> Self {
        if let FixAction::FileCreation { on_existing, .. } = &mut self.action {
            *on_existing = policy;
        }
        self
    }

    /// Only meaningful for commands; other actions are returned unchanged.
    pub fn with_working_dir(mut self, dir: impl Into<Utf8PathBuf>) -> Self {
        if let FixAction::Command { working_dir, .. } = &mut self.action {
            *working_dir = Some(dir.into());
        }
        self
    }

    pub fn kind(&self) -> &'static str {
        match &self.action {
            FixAction::FileCreation { .. } => "file_creation",
            FixAction::Command { .. } => "command",
            FixAction::MultiStep { .. } => "multi_step",
        }
    }

    /// Absolute target of a file creation.
    pub fn target_path(&self) -> Option<Utf8PathBuf> {
        match &self.action {
            FixAction::FileCreation { file_path, .. } => {
                Some(resolve(&self.repository_path, file_path))
            }
            _ => None,
        }
    }

    /// One-paragraph, human-readable summary of what applying this fix will do.
    pub fn preview(&self) -> String {
        match &self.action {
            FixAction::FileCreation {
                file_path, content, ..
            } => format!("CREATE {} ({} bytes)", file_path, content.len()),
            FixAction::Command {
                command,
                working_dir,
            } => match working_dir {
                Some(dir) => format!("RUN {} (in {})", command, dir),
                None => format!("RUN {}", command),
            },
            FixAction::MultiStep { steps } => {
                let mut out = format!("MULTI-STEP FIX ({} steps):", steps.len());
                for (i, step) in steps.iter().enumerate() {
                    out.push_str(&format!("\n  {}. {}", i + 1, step.preview()));
                }
                out
            }
        }
    }
}

pub fn resolve(root: &Utf8Path, rel: &Utf8Path) -> Utf8PathBuf {
    if rel.is_absolute() {
        rel.to_path_buf()
    } else {
        root.join(rel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_is_tagged_by_type() {
        let fix = Fix::command("precommit_hooks", "Install hooks", 3.0, "/repo", "pre-commit install");
        let json = serde_json::to_value(&fix).expect("json");
        assert_eq!(json["action"]["type"], "command");
        assert_eq!(json["action"]["command"], "pre-commit install");
        assert!(json["action"].get("working_dir").is_none());
    }

    #[test]
    fn file_creation_defaults_to_skip_on_existing() {
        let json = r#"{
            "attribute_id": "readme_file",
            "description": "Create README",
            "points_gained": 10.0,
            "repository_path": "/repo",
            "action": {"type": "file_creation", "file_path": "README.md", "content": "x"}
        }"#;
        let fix: Fix = serde_json::from_str(json).expect("parse");
        assert!(matches!(
            fix.action,
            FixAction::FileCreation {
                on_existing: ExistingFilePolicy::Skip,
                ..
            }
        ));
        assert!(fix.id.is_empty());
    }

    #[test]
    fn preview_lists_steps_in_order() {
        let steps = vec![
            Fix::file_creation("p", "cfg", 0.0, "/repo", ".pre-commit-config.yaml", "repos: []\n"),
            Fix::command("p", "install", 0.0, "/repo", "pre-commit install"),
        ];
        let fix = Fix::multi_step("p", "hooks", 3.0, "/repo", steps);
        let preview = fix.preview();
        assert!(preview.starts_with("MULTI-STEP FIX (2 steps):"));
        let create = preview.find("CREATE .pre-commit-config.yaml").expect("create step");
        let run = preview.find("RUN pre-commit install").expect("run step");
        assert!(create < run);
    }

    #[test]
    fn with_existing_policy_ignores_commands() {
        let fix = Fix::command("a", "b", 0.0, "/repo", "true")
            .with_existing_policy(ExistingFilePolicy::Overwrite);
        assert!(matches!(fix.action, FixAction::Command { .. }));
    }

    #[test]
    fn target_path_joins_relative_paths() {
        let fix = Fix::file_creation("a", "b", 0.0, "/repo", "docs/x.md", "");
        assert_eq!(fix.target_path(), Some(Utf8PathBuf::from("/repo/docs/x.md")));
    }
}
