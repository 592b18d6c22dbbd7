use super::{Fixer, SharedTemplates, primary_language_key, render_first};
use crate::templates::TemplateParams;
use agentready_types::finding::Finding;
use agentready_types::fix::Fix;
use agentready_types::repository::Repository;
use tracing::debug;

/// Writes `.pre-commit-config.yaml` and installs the hooks.
pub struct PrecommitHooksFixer {
    templates: SharedTemplates,
}

impl PrecommitHooksFixer {
    const ATTRIBUTE_ID: &'static str = "precommit_hooks";

    pub fn new(templates: SharedTemplates) -> Self {
        Self { templates }
    }
}

impl Fixer for PrecommitHooksFixer {
    fn attribute_id(&self) -> &'static str {
        Self::ATTRIBUTE_ID
    }

    fn summary(&self) -> &'static str {
        "Create .pre-commit-config.yaml for the primary language and run `pre-commit install`"
    }

    fn generate_fix(&self, repository: &Repository, finding: &Finding) -> Option<Fix> {
        if !self.can_fix(finding) {
            return None;
        }

        let lang = primary_language_key(repository, "python");
        debug!(language = %lang, "selecting pre-commit template");
        let candidates = [format!("precommit-{lang}"), "precommit-python".to_string()];
        let content = render_first(self.templates.as_ref(), &candidates, &TemplateParams::new())?;

        let config = Fix::file_creation(
            Self::ATTRIBUTE_ID,
            "Create .pre-commit-config.yaml",
            0.0,
            repository.path.clone(),
            ".pre-commit-config.yaml",
            content,
        );
        let install = Fix::command(
            Self::ATTRIBUTE_ID,
            "Install pre-commit hooks",
            0.0,
            repository.path.clone(),
            "pre-commit install",
        );

        Some(Fix::multi_step(
            Self::ATTRIBUTE_ID,
            "Set up pre-commit hooks (config + install)",
            self.estimate_score_improvement(finding),
            repository.path.clone(),
            vec![config, install],
        ))
    }
}
