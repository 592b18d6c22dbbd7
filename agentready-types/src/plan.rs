use crate::fix::Fix;
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Ordered, scored batch of fixes for one repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixPlan {
    pub schema: String,
    pub repository_path: Utf8PathBuf,
    pub current_score: f64,

    #[serde(default)]
    pub fixes: Vec<Fix>,

    pub points_gained: f64,
    pub projected_score: f64,
}

impl FixPlan {
    /// Aggregates are derived from `fixes`; `projected_score` is clipped to [0, 100].
    pub fn new(repository_path: Utf8PathBuf, current_score: f64, fixes: Vec<Fix>) -> Self {
        let points_gained: f64 = fixes.iter().map(|f| f.points_gained).sum();
        Self {
            schema: crate::schema::AGENTREADY_FIX_PLAN_V1.to_string(),
            repository_path,
            current_score,
            fixes,
            points_gained,
            projected_score: (current_score + points_gained).clamp(0.0, 100.0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }

    /// A plan over the selected subset, in the selected order.
    pub fn select(&self, ids: &[String]) -> Self {
        let fixes = ids
            .iter()
            .filter_map(|id| self.fixes.iter().find(|f| &f.id == id).cloned())
            .collect();
        Self::new(self.repository_path.clone(), self.current_score, fixes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fix(id: &str, points: f64) -> Fix {
        let mut f = Fix::command("a", id, points, "/repo", "true");
        f.id = id.to_string();
        f
    }

    #[test]
    fn projected_score_adds_points() {
        let plan = FixPlan::new("/repo".into(), 65.0, vec![fix("x", 5.0)]);
        assert_eq!(plan.points_gained, 5.0);
        assert_eq!(plan.projected_score, 70.0);
    }

    #[test]
    fn projected_score_is_clipped_at_100() {
        let plan = FixPlan::new("/repo".into(), 95.0, vec![fix("x", 10.0), fix("y", 10.0)]);
        assert_eq!(plan.projected_score, 100.0);
    }

    #[test]
    fn select_keeps_requested_order() {
        let plan = FixPlan::new("/repo".into(), 0.0, vec![fix("a", 1.0), fix("b", 2.0)]);
        let sub = plan.select(&["b".to_string(), "missing".to_string(), "a".to_string()]);
        let ids: Vec<_> = sub.fixes.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(sub.points_gained, 3.0);
    }
}
