//! Per-attribute assessors.
//!
//! An assessor returns `Ok(finding)` for every ordinary outcome, including
//! "not applicable" (a skipped finding). `Err` is reserved for genuine tool
//! failures; the orchestrator turns those into error findings.

use crate::catalog::AttributeCatalog;
use crate::ports::RepoView;
use agentready_types::attribute::Attribute;
use agentready_types::config::Config;
use agentready_types::finding::Finding;
use agentready_types::repository::Repository;

mod gitignore;
mod presence;

pub use gitignore::GitignoreAssessor;
pub use presence::{FilePresenceAssessor, PresenceRule};

pub trait Assessor {
    fn attribute(&self) -> &Attribute;

    fn attribute_id(&self) -> &str {
        &self.attribute().id
    }

    fn assess(
        &self,
        repository: &Repository,
        repo: &dyn RepoView,
        config: &Config,
    ) -> anyhow::Result<Finding>;
}

/// Placeholder for attributes without a detector: always skipped.
pub struct StubAssessor {
    attribute: Attribute,
}

impl StubAssessor {
    pub fn new(attribute: Attribute) -> Self {
        Self { attribute }
    }
}

impl Assessor for StubAssessor {
    fn attribute(&self) -> &Attribute {
        &self.attribute
    }

    fn assess(&self, _: &Repository, _: &dyn RepoView, _: &Config) -> anyhow::Result<Finding> {
        Ok(Finding::skipped(self.attribute.clone(), "not yet implemented"))
    }
}

/// One assessor per catalog attribute, in catalog order.
pub fn create_all_assessors(catalog: &AttributeCatalog) -> Vec<Box<dyn Assessor>> {
    catalog
        .iter()
        .map(|attr| -> Box<dyn Assessor> {
            if attr.id == GitignoreAssessor::ATTRIBUTE_ID {
                return Box::new(GitignoreAssessor::new(attr.clone()));
            }
            match presence::rule_for(&attr.id) {
                Some(rule) => Box::new(FilePresenceAssessor::new(attr.clone(), rule)),
                None => Box::new(StubAssessor::new(attr.clone())),
            }
        })
        .collect()
}
