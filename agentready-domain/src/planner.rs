use crate::fixers::FixerRegistry;
use crate::scoring::estimate_points_gained;
use agentready_types::assessment::Assessment;
use agentready_types::config::Config;
use agentready_types::finding::FindingStatus;
use agentready_types::fix::{Fix, FixAction};
use agentready_types::plan::FixPlan;
use agentready_types::repository::Repository;
use sha2::{Digest, Sha256};
use tracing::{debug, info};
use uuid::Uuid;

/// Turns the failing findings of an assessment into an ordered `FixPlan`.
///
/// Planning is pure: nothing here touches the working tree.
pub struct FixerService {
    registry: FixerRegistry,
}

impl Default for FixerService {
    fn default() -> Self {
        Self::new()
    }
}

impl FixerService {
    pub fn new() -> Self {
        Self {
            registry: FixerRegistry::builtin(),
        }
    }

    pub fn with_registry(registry: FixerRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &FixerRegistry {
        &self.registry
    }

    /// Fixes come out in the order their findings appear in the assessment.
    /// `attribute_filter` of `None` means every failing attribute is a candidate.
    pub fn generate_fix_plan(
        &self,
        repository: &Repository,
        assessment: &Assessment,
        attribute_filter: Option<&[String]>,
    ) -> FixPlan {
        let default_config = Config::default();
        let config = assessment.config().unwrap_or(&default_config);
        let findings = assessment.findings();

        let mut fixes = Vec::new();
        for finding in findings {
            if finding.status != FindingStatus::Fail {
                continue;
            }
            let attribute_id = finding.attribute_id();
            if let Some(filter) = attribute_filter
                && !filter.iter().any(|id| id == attribute_id)
            {
                continue;
            }

            let Some(fixer) = self.registry.get(attribute_id) else {
                debug!(attribute = attribute_id, "no fixer registered");
                continue;
            };
            if !fixer.can_fix(finding) {
                debug!(attribute = attribute_id, "fixer declined finding");
                continue;
            }
            let Some(mut fix) = fixer.generate_fix(repository, finding) else {
                debug!(attribute = attribute_id, "fixer produced no fix");
                continue;
            };

            let local = fixer.estimate_score_improvement(finding);
            fix.points_gained = estimate_points_gained(finding, local, findings, config);
            assign_ids(&mut fix);
            fixes.push(fix);
        }

        let plan = FixPlan::new(repository.path.clone(), assessment.overall_score(), fixes);
        info!(
            fixes = plan.fixes.len(),
            points_gained = plan.points_gained,
            projected_score = plan.projected_score,
            "fix plan generated"
        );
        plan
    }
}

const NAMESPACE: Uuid = Uuid::from_bytes([
    0x6a, 0x1e, 0x93, 0x0c, 0x2f, 0x47, 0x4d, 0x8b, 0x9c, 0x15, 0x3e, 0x70, 0xa2, 0x5b, 0xd4,
    0x81,
]);

/// Ids derive from the fix content, so replanning the same assessment yields the same ids.
fn assign_ids(fix: &mut Fix) {
    let key = format!(
        "{}|{}|{}",
        fix.attribute_id,
        fix.description,
        action_fingerprint(&fix.action)
    );
    fix.id = Uuid::new_v5(&NAMESPACE, key.as_bytes()).to_string();
    assign_step_ids(fix);
}

fn assign_step_ids(parent: &mut Fix) {
    let parent_id = parent.id.clone();
    if let FixAction::MultiStep { steps } = &mut parent.action {
        for (idx, step) in steps.iter_mut().enumerate() {
            let key = format!("{}|{}|{}", parent_id, idx, step.description);
            step.id = Uuid::new_v5(&NAMESPACE, key.as_bytes()).to_string();
            assign_step_ids(step);
        }
    }
}

fn action_fingerprint(action: &FixAction) -> String {
    let s = serde_json::to_string(action).unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    hex::encode(hasher.finalize())
}
