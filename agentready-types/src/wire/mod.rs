//! Schema-exact persisted documents.
//!
//! Internal models may grow helper fields; these types are what lands on disk.

use serde::{Deserialize, Serialize};

pub mod assessment_v1;

pub use assessment_v1::AssessmentV1;

/// Tool information stamped into persisted documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfoV1 {
    pub name: String,
    pub version: String,
}

impl ToolInfoV1 {
    pub fn current(version: &str) -> Self {
        Self {
            name: "agentready".to_string(),
            version: version.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ToolInfoV1;

    #[test]
    fn tool_info_uses_agentready_name() {
        let tool = ToolInfoV1::current("1.2.3");
        let json = serde_json::to_string(&tool).expect("serialize");
        assert_eq!(json, r#"{"name":"agentready","version":"1.2.3"}"#);
    }
}
