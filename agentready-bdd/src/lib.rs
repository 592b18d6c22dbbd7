//! BDD harness (cucumber-rs).
//!
//! Scenario fixtures live here so step definitions stay short.

use agentready_types::attribute::{Attribute, Tier};
use agentready_types::finding::Finding;
use anyhow::Context;
use chrono::{NaiveDate, NaiveDateTime};
use std::path::Path;

/// Attribute ids with a built-in fixer. They lead the attribute list, so the
/// first failing finding is always fixable and the rest are not.
pub const FIXABLE_IDS: &[&str] = &["claude_md_file"];

/// `count` attributes of equal `weight`, led by the fixable ids.
pub fn uniform_attributes(count: usize, weight: f64) -> anyhow::Result<Vec<Attribute>> {
    (0..count)
        .map(|i| {
            let id = FIXABLE_IDS
                .get(i)
                .map(|s| s.to_string())
                .unwrap_or_else(|| format!("attribute_{i:02}"));
            Attribute::new(id.clone(), id, "Scenario", Tier::Critical, weight)
                .context("build scenario attribute")
        })
        .collect()
}

/// Findings for `attributes` in order: the first `failing` fail at 0, the last
/// `skipped` are skipped, the rest pass at 100.
pub fn findings_for(
    attributes: &[Attribute],
    failing: usize,
    skipped: usize,
) -> anyhow::Result<Vec<Finding>> {
    let n = attributes.len();
    anyhow::ensure!(failing + skipped <= n, "more failing/skipped than attributes");
    let first_skipped = n - skipped;

    attributes
        .iter()
        .enumerate()
        .map(|(i, a)| -> anyhow::Result<Finding> {
            let finding = if i >= first_skipped {
                Finding::skipped(a.clone(), "not applicable")
            } else if i < failing {
                Finding::fail(a.clone(), 0.0, None)?
            } else {
                Finding::pass(a.clone(), 100.0)?
            };
            Ok(finding)
        })
        .collect()
}

pub fn fixed_timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 2)
        .and_then(|d| d.and_hms_opt(3, 4, 5))
        .unwrap_or_default()
}

/// `git init` in `dir`.
pub fn init_git_repo(dir: &Path) -> anyhow::Result<()> {
    let status = std::process::Command::new("git")
        .args(["init", "-q"])
        .current_dir(dir)
        .status()
        .context("run git init")?;
    anyhow::ensure!(status.success(), "git init failed in {}", dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixable_ids_lead() {
        let attrs = uniform_attributes(4, 0.25).expect("attrs");
        assert_eq!(attrs[0].id, "claude_md_file");
        assert_eq!(attrs[1].id, "attribute_01");
        assert_eq!(attrs[3].id, "attribute_03");
    }

    #[test]
    fn findings_are_laid_out_fail_pass_skip() {
        let attrs = uniform_attributes(5, 0.2).expect("attrs");
        let findings = findings_for(&attrs, 1, 2).expect("findings");
        let statuses: Vec<_> = findings.iter().map(|f| f.status.as_str()).collect();
        assert_eq!(statuses, vec!["fail", "pass", "pass", "skipped", "skipped"]);
    }

    #[test]
    fn too_many_findings_is_an_error() {
        let attrs = uniform_attributes(2, 0.5).expect("attrs");
        assert!(findings_for(&attrs, 2, 1).is_err());
    }
}
