use crate::templates::{BuiltinTemplates, TemplateParams, TemplateRenderer};
use agentready_types::finding::{Finding, FindingStatus};
use agentready_types::fix::Fix;
use agentready_types::repository::Repository;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::warn;

mod documentation;
mod gitignore;
mod testing;

pub use documentation::{ClaudeMdFixer, ReadmeFixer};
pub use gitignore::{GITIGNORE_MISSING, GitignoreFixer};
pub use testing::PrecommitHooksFixer;

pub type SharedTemplates = Arc<dyn TemplateRenderer + Send + Sync>;

/// Remediates exactly one attribute.
pub trait Fixer {
    fn attribute_id(&self) -> &'static str;

    /// One line for listings.
    fn summary(&self) -> &'static str;

    fn can_fix(&self, finding: &Finding) -> bool {
        finding.status == FindingStatus::Fail && finding.attribute_id() == self.attribute_id()
    }

    /// `None` is a decline (e.g. a template could not be rendered), not an error.
    fn generate_fix(&self, repository: &Repository, finding: &Finding) -> Option<Fix>;

    /// Attribute-local improvement on the 0-100 scale.
    fn estimate_score_improvement(&self, finding: &Finding) -> f64 {
        (100.0 - finding.score.unwrap_or(0.0)).clamp(0.0, 100.0)
    }
}

/// Attribute id to fixer, built once per process.
pub struct FixerRegistry {
    fixers: BTreeMap<&'static str, Box<dyn Fixer>>,
}

impl Default for FixerRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FixerRegistry {
    pub fn empty() -> Self {
        Self {
            fixers: BTreeMap::new(),
        }
    }

    pub fn builtin() -> Self {
        Self::with_templates(Arc::new(BuiltinTemplates))
    }

    pub fn with_templates(templates: SharedTemplates) -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(ClaudeMdFixer::new(templates.clone())));
        registry.register(Box::new(ReadmeFixer::new(templates.clone())));
        registry.register(Box::new(GitignoreFixer::new(templates.clone())));
        registry.register(Box::new(PrecommitHooksFixer::new(templates)));
        registry
    }

    /// Replaces any fixer already registered for the same attribute.
    pub fn register(&mut self, fixer: Box<dyn Fixer>) {
        self.fixers.insert(fixer.attribute_id(), fixer);
    }

    pub fn get(&self, attribute_id: &str) -> Option<&dyn Fixer> {
        self.fixers.get(attribute_id).map(|f| f.as_ref())
    }

    pub fn has_fixer(&self, attribute_id: &str) -> bool {
        self.fixers.contains_key(attribute_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Fixer> {
        self.fixers.values().map(|f| f.as_ref())
    }

    pub fn len(&self) -> usize {
        self.fixers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixers.is_empty()
    }
}

/// Lower-cased primary language, or `fallback` when nothing was detected.
pub(crate) fn primary_language_key(repository: &Repository, fallback: &str) -> String {
    repository
        .primary_language()
        .map(str::to_lowercase)
        .unwrap_or_else(|| fallback.to_string())
}

pub(crate) fn repo_params(repository: &Repository) -> TemplateParams {
    let mut params = TemplateParams::new();
    params.insert("repo_name".to_string(), repository.name.clone());
    params.insert(
        "primary_language".to_string(),
        repository
            .primary_language()
            .unwrap_or("Unknown")
            .to_string(),
    );
    params
}

/// Render the first template that exists among `candidates`.
pub(crate) fn render_first(
    templates: &dyn TemplateRenderer,
    candidates: &[String],
    params: &TemplateParams,
) -> Option<String> {
    for id in candidates {
        if !templates.has_template(id) {
            warn!(template = %id, "template not found, trying fallback");
            continue;
        }
        return match templates.render(id, params) {
            Ok(content) => Some(content),
            Err(err) => {
                warn!(template = %id, error = %err, "template render failed");
                None
            }
        };
    }
    warn!(candidates = ?candidates, "no usable template");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentready_types::attribute::{Attribute, Tier};

    struct NoopFixer;

    impl Fixer for NoopFixer {
        fn attribute_id(&self) -> &'static str {
            "readme_file"
        }

        fn summary(&self) -> &'static str {
            "does nothing"
        }

        fn generate_fix(&self, _: &Repository, _: &Finding) -> Option<Fix> {
            None
        }
    }

    #[test]
    fn builtin_registry_covers_expected_attributes() {
        let reg = FixerRegistry::builtin();
        let ids: Vec<_> = reg.iter().map(|f| f.attribute_id()).collect();
        assert_eq!(
            ids,
            vec![
                "claude_md_file",
                "gitignore_completeness",
                "precommit_hooks",
                "readme_file"
            ]
        );
    }

    #[test]
    fn register_replaces_existing_entry() {
        let mut reg = FixerRegistry::builtin();
        reg.register(Box::new(NoopFixer));
        assert_eq!(reg.len(), 4);
        assert_eq!(reg.get("readme_file").map(|f| f.summary()), Some("does nothing"));
    }

    #[test]
    fn default_can_fix_requires_fail_and_matching_id() {
        let attr = Attribute::new("readme_file", "README", "Docs", Tier::Essential, 0.1).expect("attr");
        let other = Attribute::new("lock_files", "Locks", "Deps", Tier::Essential, 0.1).expect("attr");
        let fixer = NoopFixer;
        assert!(fixer.can_fix(&Finding::fail(attr.clone(), 0.0, None).expect("f")));
        assert!(!fixer.can_fix(&Finding::pass(attr.clone(), 100.0).expect("f")));
        assert!(!fixer.can_fix(&Finding::error(attr, "x")));
        assert!(!fixer.can_fix(&Finding::fail(other, 0.0, None).expect("f")));
    }

    #[test]
    fn default_improvement_is_distance_to_perfect() {
        let attr = Attribute::new("readme_file", "README", "Docs", Tier::Essential, 0.1).expect("attr");
        let finding = Finding::fail(attr, 40.0, None).expect("f");
        assert_eq!(NoopFixer.estimate_score_improvement(&finding), 60.0);
    }
}
