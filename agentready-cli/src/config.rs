//! Configuration file loading for agentready.
//!
//! Discovers and loads `.agentready-config.yaml` from the repository root, or
//! an explicit `--config` path. Merges file settings with CLI arguments (CLI
//! takes precedence).

use agentready_types::config::Config;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = ".agentready-config.yaml";

/// Top-level configuration from `.agentready-config.yaml`.
///
/// Unknown keys are ignored so configs written for other versions still load.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AgentreadyConfig {
    /// Attribute id to weight. Must sum to 1.0 when present.
    pub weights: BTreeMap<String, f64>,

    /// Attributes to leave out of the run.
    pub excluded_attributes: Vec<String>,

    /// Language name to glob patterns forcing that language.
    pub language_overrides: BTreeMap<String, Vec<String>>,

    /// Where assessment reports are written.
    pub output_dir: Option<Utf8PathBuf>,
}

/// Discover the config file in the repository root.
pub fn discover_config(repo_root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = repo_root.join(CONFIG_FILE_NAME);
    if config_path.is_file() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<AgentreadyConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string. An empty document is the default config.
pub fn parse_config(contents: &str) -> anyhow::Result<AgentreadyConfig> {
    if contents.trim().is_empty() {
        return Ok(AgentreadyConfig::default());
    }
    let config: Option<AgentreadyConfig> =
        serde_yaml::from_str(contents).context("invalid YAML")?;
    Ok(config.unwrap_or_default())
}

/// Load config from repo root, or return default if not found.
pub fn load_or_default(repo_root: &Utf8Path) -> anyhow::Result<AgentreadyConfig> {
    match discover_config(repo_root) {
        Some(path) => load_config(&path),
        None => Ok(AgentreadyConfig::default()),
    }
}

/// Load the explicit `--config` file if given, otherwise discover one.
///
/// A missing explicit path is an error; a missing discovered file is not.
pub fn resolve(repo_root: &Utf8Path, explicit: Option<&Utf8Path>) -> anyhow::Result<AgentreadyConfig> {
    match explicit {
        Some(path) => {
            if !path.is_file() {
                anyhow::bail!("config file not found: {}", path);
            }
            load_config(path)
        }
        None => load_or_default(repo_root),
    }
}

/// Builder for merging the config file with CLI arguments.
pub struct ConfigMerger {
    config: AgentreadyConfig,
}

impl ConfigMerger {
    pub fn new(config: AgentreadyConfig) -> Self {
        Self { config }
    }

    /// CLI `--exclude` extends the file's exclusions; CLI `--output-dir`
    /// replaces the file's `output_dir`.
    pub fn merge_assess_args(self, cli_exclude: &[String], cli_output_dir: Option<&Utf8Path>) -> Config {
        let AgentreadyConfig {
            weights,
            excluded_attributes,
            language_overrides,
            output_dir,
        } = self.config;

        let excluded_attributes = excluded_attributes
            .into_iter()
            .chain(cli_exclude.iter().cloned())
            .collect();

        Config {
            weights,
            excluded_attributes,
            language_overrides,
            output_dir: cli_output_dir.map(Utf8Path::to_path_buf).or(output_dir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_example_config() {
        let yaml = r#"
weights:
  claude_md_file: 0.6
  readme_file: 0.4
excluded_attributes:
  - openapi_specs
language_overrides:
  Python:
    - "scripts/*"
output_dir: reports
"#;
        let config = parse_config(yaml).expect("parse");
        assert_eq!(config.weights.len(), 2);
        assert_eq!(config.excluded_attributes, vec!["openapi_specs"]);
        assert_eq!(config.language_overrides["Python"], vec!["scripts/*"]);
        assert_eq!(config.output_dir.as_deref(), Some(Utf8Path::new("reports")));
    }

    #[test]
    fn test_parse_tolerates_unknown_keys() {
        let yaml = "schema_version: \"1.0\"\ntier_weights:\n  essential: 0.5\nexcluded_attributes: [lock_files]\n";
        let config = parse_config(yaml).expect("parse");
        assert_eq!(config.excluded_attributes, vec!["lock_files"]);
        assert!(config.weights.is_empty());
    }

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config("").expect("parse");
        assert!(config.weights.is_empty());
        assert!(config.output_dir.is_none());

        let config = parse_config("# only a comment\n").expect("parse");
        assert!(config.excluded_attributes.is_empty());
    }

    #[test]
    fn test_parse_rejects_malformed_yaml() {
        assert!(parse_config("weights: [unclosed").is_err());
        assert!(parse_config("weights: not-a-map").is_err());
    }

    #[test]
    fn test_merge_cli_extends_exclusions() {
        let config = parse_config("excluded_attributes: [a, b]\n").expect("parse");
        let merged =
            ConfigMerger::new(config).merge_assess_args(&["b".to_string(), "c".to_string()], None);
        let excluded: Vec<_> = merged.excluded_attributes.iter().map(String::as_str).collect();
        assert_eq!(excluded, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_merge_cli_output_dir_overrides() {
        let config = parse_config("output_dir: from-file\n").expect("parse");
        let merged = ConfigMerger::new(config.clone()).merge_assess_args(&[], None);
        assert_eq!(merged.output_dir.as_deref(), Some(Utf8Path::new("from-file")));

        let merged =
            ConfigMerger::new(config).merge_assess_args(&[], Some(Utf8Path::new("from-cli")));
        assert_eq!(merged.output_dir.as_deref(), Some(Utf8Path::new("from-cli")));
    }

    #[test]
    fn test_merged_weights_are_validated_downstream() {
        let config = parse_config("weights:\n  a: 0.5\n").expect("parse");
        let merged = ConfigMerger::new(config).merge_assess_args(&[], None);
        assert!(merged.validate().is_err());
    }

    #[test]
    fn test_discover_config_some_and_none() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = Utf8Path::from_path(temp.path()).expect("utf8");
        assert!(discover_config(root).is_none());

        std::fs::write(root.join(CONFIG_FILE_NAME), "excluded_attributes: []\n").expect("write");
        assert_eq!(discover_config(root), Some(root.join(CONFIG_FILE_NAME)));
    }

    #[test]
    fn test_resolve_missing_explicit_path_is_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = Utf8Path::from_path(temp.path()).expect("utf8");
        let err = resolve(root, Some(&root.join("nope.yaml"))).expect_err("missing");
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn test_load_or_default_returns_default_when_missing() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = Utf8Path::from_path(temp.path()).expect("utf8");
        let config = resolve(root, None).expect("default");
        assert!(config.excluded_attributes.is_empty());
    }
}
