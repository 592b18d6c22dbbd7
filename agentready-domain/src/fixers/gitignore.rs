use super::{Fixer, SharedTemplates, primary_language_key, render_first};
use crate::templates::TemplateParams;
use agentready_types::finding::Finding;
use agentready_types::fix::Fix;
use agentready_types::repository::Repository;

/// Measured value the gitignore assessor reports when the file is absent.
pub const GITIGNORE_MISSING: &str = "missing";

/// Creates a `.gitignore` when none exists. An incomplete existing file is
/// left for a human to merge.
pub struct GitignoreFixer {
    templates: SharedTemplates,
}

impl GitignoreFixer {
    const ATTRIBUTE_ID: &'static str = "gitignore_completeness";

    pub fn new(templates: SharedTemplates) -> Self {
        Self { templates }
    }
}

impl Fixer for GitignoreFixer {
    fn attribute_id(&self) -> &'static str {
        Self::ATTRIBUTE_ID
    }

    fn summary(&self) -> &'static str {
        "Create a language-appropriate .gitignore"
    }

    fn can_fix(&self, finding: &Finding) -> bool {
        finding.status == agentready_types::finding::FindingStatus::Fail
            && finding.attribute_id() == Self::ATTRIBUTE_ID
            && finding.measured_value.as_deref() == Some(GITIGNORE_MISSING)
    }

    fn generate_fix(&self, repository: &Repository, finding: &Finding) -> Option<Fix> {
        if !self.can_fix(finding) {
            return None;
        }
        let lang = primary_language_key(repository, "generic");
        let candidates = [format!("gitignore-{lang}"), "gitignore-generic".to_string()];
        let content = render_first(self.templates.as_ref(), &candidates, &TemplateParams::new())?;
        Some(Fix::file_creation(
            Self::ATTRIBUTE_ID,
            "Create .gitignore",
            self.estimate_score_improvement(finding),
            repository.path.clone(),
            ".gitignore",
            content,
        ))
    }
}
