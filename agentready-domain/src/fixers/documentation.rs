use super::{Fixer, SharedTemplates, render_first, repo_params};
use agentready_types::finding::Finding;
use agentready_types::fix::Fix;
use agentready_types::repository::Repository;
use tracing::debug;

pub struct ClaudeMdFixer {
    templates: SharedTemplates,
}

impl ClaudeMdFixer {
    const ATTRIBUTE_ID: &'static str = "claude_md_file";

    pub fn new(templates: SharedTemplates) -> Self {
        Self { templates }
    }
}

impl Fixer for ClaudeMdFixer {
    fn attribute_id(&self) -> &'static str {
        Self::ATTRIBUTE_ID
    }

    fn summary(&self) -> &'static str {
        "Create a CLAUDE.md skeleton describing stack, commands, and layout"
    }

    fn generate_fix(&self, repository: &Repository, finding: &Finding) -> Option<Fix> {
        if !self.can_fix(finding) {
            return None;
        }
        let content = render_first(
            self.templates.as_ref(),
            &["claude_md".to_string()],
            &repo_params(repository),
        )?;
        debug!(repo = %repository.name, "generated CLAUDE.md fix");
        Some(Fix::file_creation(
            Self::ATTRIBUTE_ID,
            "Create CLAUDE.md",
            self.estimate_score_improvement(finding),
            repository.path.clone(),
            "CLAUDE.md",
            content,
        ))
    }
}

pub struct ReadmeFixer {
    templates: SharedTemplates,
}

impl ReadmeFixer {
    const ATTRIBUTE_ID: &'static str = "readme_file";

    pub fn new(templates: SharedTemplates) -> Self {
        Self { templates }
    }
}

impl Fixer for ReadmeFixer {
    fn attribute_id(&self) -> &'static str {
        Self::ATTRIBUTE_ID
    }

    fn summary(&self) -> &'static str {
        "Create a README.md with installation, usage, and development sections"
    }

    fn generate_fix(&self, repository: &Repository, finding: &Finding) -> Option<Fix> {
        if !self.can_fix(finding) {
            return None;
        }
        let content = render_first(
            self.templates.as_ref(),
            &["readme".to_string()],
            &repo_params(repository),
        )?;
        Some(Fix::file_creation(
            Self::ATTRIBUTE_ID,
            "Create README.md",
            self.estimate_score_improvement(finding),
            repository.path.clone(),
            "README.md",
            content,
        ))
    }
}
