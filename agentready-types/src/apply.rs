use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplyStatus {
    Applied,
    /// Nothing to do (target already present under the skip policy).
    Skipped,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixResult {
    pub fix_id: String,
    pub attribute_id: String,
    pub description: String,
    pub status: ApplyStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Per-step outcomes for multi-step fixes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<FixResult>,
}

/// Outcome of applying a batch of fixes. Partial success is a normal result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplyReport {
    pub schema: String,
    pub succeeded: u64,
    pub failed: u64,

    /// `"<description>: <error>"`, one per failed fix, in execution order.
    #[serde(default)]
    pub failures: Vec<String>,

    #[serde(default)]
    pub results: Vec<FixResult>,
}

impl Default for ApplyReport {
    fn default() -> Self {
        Self {
            schema: crate::schema::AGENTREADY_APPLY_V1.to_string(),
            succeeded: 0,
            failed: 0,
            failures: vec![],
            results: vec![],
        }
    }
}

impl ApplyReport {
    pub fn attempted(&self) -> u64 {
        self.succeeded + self.failed
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }

    pub fn record(&mut self, result: FixResult) {
        match result.status {
            ApplyStatus::Applied | ApplyStatus::Skipped => self.succeeded += 1,
            ApplyStatus::Failed => {
                self.failed += 1;
                self.failures.push(format!(
                    "{}: {}",
                    result.description,
                    result.message.as_deref().unwrap_or("unknown error")
                ));
            }
        }
        self.results.push(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(status: ApplyStatus, message: Option<&str>) -> FixResult {
        FixResult {
            fix_id: "id".into(),
            attribute_id: "readme_file".into(),
            description: "Create README.md".into(),
            status,
            message: message.map(str::to_string),
            steps: vec![],
        }
    }

    #[test]
    fn record_formats_failure_message() {
        let mut report = ApplyReport::default();
        report.record(result(ApplyStatus::Applied, None));
        report.record(result(ApplyStatus::Failed, Some("permission denied")));
        report.record(result(ApplyStatus::Skipped, Some("already exists")));

        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.failures, vec!["Create README.md: permission denied"]);
        assert_eq!(report.attempted(), 3);
        assert!(!report.all_succeeded());
    }
}
