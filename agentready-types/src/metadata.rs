//! Execution provenance.
//!
//! This is the one place where ambient process state (clock, identity, cwd)
//! is captured. Everything downstream receives the captured value.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const HUMAN_FORMAT: &str = "%B %-d, %Y at %-I:%M %p";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentMetadata {
    pub agentready_version: String,
    pub assessment_timestamp: String,
    pub assessment_timestamp_human: String,
    pub executed_by: String,
    pub command: String,
    pub working_directory: String,
}

impl AssessmentMetadata {
    /// Capture identity and working directory from the running process.
    pub fn create(version: &str, timestamp: NaiveDateTime, command: &str) -> Self {
        let working_directory = std::env::current_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| ".".to_string());
        Self::from_parts(
            version,
            timestamp,
            &format!("{}@{}", current_user(), current_host()),
            command,
            &working_directory,
        )
    }

    pub fn from_parts(
        version: &str,
        timestamp: NaiveDateTime,
        executed_by: &str,
        command: &str,
        working_directory: &str,
    ) -> Self {
        Self {
            agentready_version: version.to_string(),
            assessment_timestamp: timestamp.format(ISO_FORMAT).to_string(),
            assessment_timestamp_human: human_timestamp(timestamp),
            executed_by: executed_by.to_string(),
            command: command.to_string(),
            working_directory: working_directory.to_string(),
        }
    }
}

/// `November 21, 2025 at 2:11 AM`
pub fn human_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format(HUMAN_FORMAT).to_string()
}

fn current_user() -> String {
    ["USER", "USERNAME", "LOGNAME"]
        .iter()
        .find_map(|k| std::env::var(k).ok().filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| "unknown".to_string())
}

fn current_host() -> String {
    if let Some(host) = ["HOSTNAME", "COMPUTERNAME"]
        .iter()
        .find_map(|k| std::env::var(k).ok().filter(|v| !v.trim().is_empty()))
    {
        return host;
    }
    fs_err::read_to_string("/etc/hostname")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "localhost".to_string())
}
