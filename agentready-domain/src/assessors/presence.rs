use super::Assessor;
use crate::ports::RepoView;
use agentready_types::attribute::Attribute;
use agentready_types::config::Config;
use agentready_types::finding::{Citation, Finding, Remediation};
use agentready_types::repository::Repository;
use camino::Utf8Path;

/// Attribute satisfied by the presence of any one of a set of paths.
///
/// A candidate ending in `/` names a directory that must have at least one entry.
#[derive(Debug, Clone, Copy)]
pub struct PresenceRule {
    pub attribute_id: &'static str,
    pub candidates: &'static [&'static str],
    pub summary: &'static str,
    pub steps: &'static [&'static str],
    pub commands: &'static [&'static str],
    pub citation: Option<(&'static str, &'static str, &'static str)>,
}

const RULES: &[PresenceRule] = &[
    PresenceRule {
        attribute_id: "claude_md_file",
        candidates: &["CLAUDE.md", "AGENTS.md", ".claude/CLAUDE.md"],
        summary: "Create a CLAUDE.md with project context for coding agents",
        steps: &[
            "Describe the tech stack and primary language",
            "List the build, test, and lint commands",
            "Outline the repository layout",
        ],
        commands: &["touch CLAUDE.md"],
        citation: Some((
            "Anthropic",
            "Claude Code memory files",
            "https://docs.anthropic.com/en/docs/claude-code/memory",
        )),
    },
    PresenceRule {
        attribute_id: "readme_file",
        candidates: &["README.md", "README.rst", "README.txt", "README"],
        summary: "Add a README.md with installation, usage, and development sections",
        steps: &[
            "Summarize what the project does",
            "Document installation and usage",
            "Explain how to run the tests",
        ],
        commands: &[],
        citation: None,
    },
    PresenceRule {
        attribute_id: "lock_files",
        candidates: &[
            "Cargo.lock",
            "package-lock.json",
            "yarn.lock",
            "pnpm-lock.yaml",
            "poetry.lock",
            "uv.lock",
            "Pipfile.lock",
            "go.sum",
            "Gemfile.lock",
        ],
        summary: "Commit a dependency lock file for reproducible installs",
        steps: &["Generate the lock file with your package manager", "Commit it"],
        commands: &["npm install", "poetry lock", "cargo generate-lockfile"],
        citation: None,
    },
    PresenceRule {
        attribute_id: "precommit_hooks",
        candidates: &[".pre-commit-config.yaml", ".husky/"],
        summary: "Configure pre-commit hooks for formatting and linting",
        steps: &[
            "Add a .pre-commit-config.yaml",
            "Install the hooks locally",
        ],
        commands: &["pip install pre-commit", "pre-commit install"],
        citation: Some(("pre-commit", "pre-commit documentation", "https://pre-commit.com/")),
    },
    PresenceRule {
        attribute_id: "issue_pr_templates",
        candidates: &[
            ".github/ISSUE_TEMPLATE/",
            ".github/PULL_REQUEST_TEMPLATE.md",
            ".github/pull_request_template.md",
        ],
        summary: "Add issue and pull request templates",
        steps: &[
            "Create .github/ISSUE_TEMPLATE/ with bug and feature templates",
            "Create .github/PULL_REQUEST_TEMPLATE.md",
        ],
        commands: &[],
        citation: None,
    },
    PresenceRule {
        attribute_id: "cicd_pipeline_visibility",
        candidates: &[
            ".github/workflows/",
            ".gitlab-ci.yml",
            ".circleci/config.yml",
            "Jenkinsfile",
            "azure-pipelines.yml",
        ],
        summary: "Define CI in the repository so agents can see how changes are verified",
        steps: &["Add a workflow that builds and tests on every push"],
        commands: &[],
        citation: None,
    },
    PresenceRule {
        attribute_id: "architecture_decisions",
        candidates: &["docs/adr/", "docs/decisions/", "adr/", "doc/adr/"],
        summary: "Record architecture decisions as ADRs",
        steps: &[
            "Create docs/adr/",
            "Write one markdown file per decision",
        ],
        commands: &["mkdir -p docs/adr"],
        citation: Some((
            "Michael Nygard",
            "Documenting Architecture Decisions",
            "https://cognitect.com/blog/2011/11/15/documenting-architecture-decisions",
        )),
    },
    PresenceRule {
        attribute_id: "container_setup",
        candidates: &[
            "Dockerfile",
            "Containerfile",
            "docker-compose.yml",
            "compose.yaml",
            ".devcontainer/",
        ],
        summary: "Provide a container definition for a reproducible environment",
        steps: &["Add a Dockerfile or a .devcontainer/ configuration"],
        commands: &[],
        citation: None,
    },
    PresenceRule {
        attribute_id: "openapi_specs",
        candidates: &[
            "openapi.yaml",
            "openapi.yml",
            "openapi.json",
            "swagger.yaml",
            "swagger.json",
            "docs/openapi.yaml",
            "api/openapi.yaml",
        ],
        summary: "Publish an OpenAPI description of the service API",
        steps: &["Write or generate openapi.yaml at the repository root"],
        commands: &[],
        citation: None,
    },
];

pub(crate) fn rule_for(attribute_id: &str) -> Option<PresenceRule> {
    RULES.iter().find(|r| r.attribute_id == attribute_id).copied()
}

pub struct FilePresenceAssessor {
    attribute: Attribute,
    rule: PresenceRule,
}

impl FilePresenceAssessor {
    pub fn new(attribute: Attribute, rule: PresenceRule) -> Self {
        Self { attribute, rule }
    }

    fn remediation(&self) -> Remediation {
        let mut r = Remediation::new(self.rule.summary)
            .with_steps(self.rule.steps.iter().copied())
            .with_commands(self.rule.commands.iter().copied());
        if let Some((source, title, url)) = self.rule.citation {
            r = r.with_citation(Citation {
                source: source.to_string(),
                title: title.to_string(),
                url: Some(url.to_string()),
                relevance: format!("Guidance for {}", self.attribute.name),
            });
        }
        r
    }
}

fn candidate_present(repo: &dyn RepoView, candidate: &str) -> bool {
    match candidate.strip_suffix('/') {
        Some(dir) => !repo.list_dir(Utf8Path::new(dir)).is_empty(),
        None => repo.exists(Utf8Path::new(candidate)),
    }
}

impl Assessor for FilePresenceAssessor {
    fn attribute(&self) -> &Attribute {
        &self.attribute
    }

    fn assess(&self, _: &Repository, repo: &dyn RepoView, _: &Config) -> anyhow::Result<Finding> {
        let found: Vec<&str> = self
            .rule
            .candidates
            .iter()
            .copied()
            .filter(|c| candidate_present(repo, c))
            .collect();

        if found.is_empty() {
            let finding = Finding::fail(self.attribute.clone(), 0.0, Some(self.remediation()))?
                .with_measurement("missing", "present")
                .with_evidence([format!(
                    "none of {} found",
                    self.rule.candidates.join(", ")
                )]);
            return Ok(finding);
        }

        Ok(Finding::pass(self.attribute.clone(), 100.0)?
            .with_measurement("present", "present")
            .with_evidence(found.iter().map(|f| format!("found {f}"))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MemRepoView;
    use agentready_types::attribute::Tier;
    use agentready_types::finding::FindingStatus;

    fn assessor(id: &str) -> FilePresenceAssessor {
        let attr = Attribute::new(id, id, "Test", Tier::Essential, 0.1).expect("attr");
        FilePresenceAssessor::new(attr, rule_for(id).expect("rule"))
    }

    fn repo() -> (tempfile::TempDir, Repository) {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = camino::Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf8");
        let repo = Repository::new(root, "demo").expect("repo");
        (dir, repo)
    }

    #[test]
    fn passes_when_any_candidate_exists() {
        let (_dir, repository) = repo();
        let view = MemRepoView::new(repository.path.clone()).with_file("AGENTS.md", "# agents");
        let finding = assessor("claude_md_file")
            .assess(&repository, &view, &Config::default())
            .expect("assess");
        assert_eq!(finding.status, FindingStatus::Pass);
        assert_eq!(finding.score, Some(100.0));
        assert_eq!(finding.evidence, vec!["found AGENTS.md".to_string()]);
    }

    #[test]
    fn fails_with_remediation_when_absent() {
        let (_dir, repository) = repo();
        let view = MemRepoView::new(repository.path.clone());
        let finding = assessor("readme_file")
            .assess(&repository, &view, &Config::default())
            .expect("assess");
        assert_eq!(finding.status, FindingStatus::Fail);
        assert_eq!(finding.score, Some(0.0));
        assert_eq!(finding.measured_value.as_deref(), Some("missing"));
        assert!(finding.remediation.is_some());
    }

    #[test]
    fn directory_candidates_need_an_entry() {
        let (_dir, repository) = repo();
        let empty = MemRepoView::new(repository.path.clone()).with_file("Jenkinsfile.bak", "");
        let ci = assessor("cicd_pipeline_visibility");
        let finding = ci
            .assess(&repository, &empty, &Config::default())
            .expect("assess");
        assert_eq!(finding.status, FindingStatus::Fail);

        let with_workflow = MemRepoView::new(repository.path.clone())
            .with_file(".github/workflows/ci.yml", "on: push");
        let finding = ci
            .assess(&repository, &with_workflow, &Config::default())
            .expect("assess");
        assert_eq!(finding.status, FindingStatus::Pass);
    }
}
