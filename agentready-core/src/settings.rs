//! Clap-free settings for the assess and align pipelines.

use agentready_types::config::Config;
use camino::Utf8PathBuf;
use std::time::Duration;

/// Settings for the assess pipeline.
#[derive(Debug, Clone)]
pub struct AssessSettings {
    pub repo_root: Utf8PathBuf,
    pub config: Config,

    // Metadata stamped onto the assessment
    pub tool_version: String,
    pub command: String,
}

impl Default for AssessSettings {
    fn default() -> Self {
        Self {
            repo_root: Utf8PathBuf::from("."),
            config: Config::default(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            command: "agentready assess".to_string(),
        }
    }
}

/// Settings for the align pipeline.
#[derive(Debug, Clone)]
pub struct AlignSettings {
    pub assess: AssessSettings,

    /// Restrict the plan to these attribute ids.
    pub attributes: Option<Vec<String>>,

    pub command_timeout: Duration,
}

impl Default for AlignSettings {
    fn default() -> Self {
        Self {
            assess: AssessSettings {
                command: "agentready align".to_string(),
                ..AssessSettings::default()
            },
            attributes: None,
            command_timeout: agentready_edit::DEFAULT_COMMAND_TIMEOUT,
        }
    }
}
