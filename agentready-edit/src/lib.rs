//! Fix executor: applies planned fixes to a working tree.
//!
//! Execution is best-effort and deliberately not transactional. Fixes run in
//! the order given; a failing fix is recorded and the batch continues. Inside a
//! multi-step fix every step is attempted even after an earlier step fails.

mod command;
mod error;
mod git;

pub use command::{CommandOutput, run_command};
pub use error::{EditError, EditResult};
pub use git::{current_branch, get_head_sha, is_git_repository, is_working_tree_dirty, remote_url};

use agentready_types::apply::{ApplyReport, ApplyStatus, FixResult};
use agentready_types::fix::{ExistingFilePolicy, Fix, FixAction, resolve};
use camino::Utf8Path;
use diffy::PatchFormatter;
use fs_err as fs;
use std::time::Duration;
use tracing::{info, warn};

pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone)]
pub struct ApplyOptions {
    /// Wall-clock limit for each external command.
    pub command_timeout: Duration,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }
}

/// Apply `fixes` in order. Always returns a report, even when every fix failed.
pub fn apply_fixes(fixes: &[Fix], opts: &ApplyOptions) -> ApplyReport {
    let mut report = ApplyReport::default();
    for fix in fixes {
        let result = apply_fix(fix, opts);
        match result.status {
            ApplyStatus::Failed => warn!(
                fix_id = %fix.id,
                attribute_id = %fix.attribute_id,
                error = result.message.as_deref().unwrap_or(""),
                "fix failed"
            ),
            status => info!(
                fix_id = %fix.id,
                attribute_id = %fix.attribute_id,
                status = ?status,
                "fix applied"
            ),
        }
        report.record(result);
    }
    report
}

/// Apply one fix. Errors are folded into the returned result.
pub fn apply_fix(fix: &Fix, opts: &ApplyOptions) -> FixResult {
    let mut result = FixResult {
        fix_id: fix.id.clone(),
        attribute_id: fix.attribute_id.clone(),
        description: fix.description.clone(),
        status: ApplyStatus::Applied,
        message: None,
        steps: vec![],
    };

    let outcome = match &fix.action {
        FixAction::FileCreation {
            file_path,
            content,
            on_existing,
        } => create_file(&fix.repository_path, file_path, content, *on_existing),
        FixAction::Command {
            command,
            working_dir,
        } => {
            let cwd = working_dir
                .as_deref()
                .map(|d| resolve(&fix.repository_path, d))
                .unwrap_or_else(|| fix.repository_path.clone());
            run_command(command, &cwd, opts.command_timeout).map(|_| ApplyStatus::Applied)
        }
        FixAction::MultiStep { steps } => {
            result.steps = steps.iter().map(|s| apply_fix(s, opts)).collect();
            multi_step_status(&result.steps)
        }
    };

    match outcome {
        Ok(status) => {
            result.status = status;
            if status == ApplyStatus::Skipped {
                result.message = Some("target already exists, left unchanged".to_string());
            }
        }
        Err(err) => {
            result.status = ApplyStatus::Failed;
            result.message = Some(err.to_string());
        }
    }
    result
}

fn create_file(
    repo_root: &Utf8Path,
    rel: &Utf8Path,
    content: &str,
    policy: ExistingFilePolicy,
) -> EditResult<ApplyStatus> {
    let target = resolve(repo_root, rel);
    if target.exists() {
        match policy {
            ExistingFilePolicy::Skip => return Ok(ApplyStatus::Skipped),
            ExistingFilePolicy::Fail => return Err(EditError::FileExists(target)),
            ExistingFilePolicy::Overwrite => {}
        }
    }
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&target, content)?;
    Ok(ApplyStatus::Applied)
}

fn multi_step_status(steps: &[FixResult]) -> EditResult<ApplyStatus> {
    let failed = steps
        .iter()
        .filter(|s| s.status == ApplyStatus::Failed)
        .count();
    if failed > 0 {
        return Err(EditError::StepsFailed {
            failed,
            total: steps.len(),
        });
    }
    if !steps.is_empty() && steps.iter().all(|s| s.status == ApplyStatus::Skipped) {
        return Ok(ApplyStatus::Skipped);
    }
    Ok(ApplyStatus::Applied)
}

/// Unified diff for file creations, `$ <command>` for commands. Read-only.
pub fn preview_fix(fix: &Fix) -> anyhow::Result<String> {
    let mut out = String::new();
    match &fix.action {
        FixAction::FileCreation {
            file_path,
            content,
            on_existing,
        } => {
            let target = resolve(&fix.repository_path, file_path);
            let existing = if target.exists() {
                Some(fs::read_to_string(&target)?)
            } else {
                None
            };
            match (existing, on_existing) {
                (Some(_), ExistingFilePolicy::Skip) => {
                    out.push_str(&format!("# {} exists; left unchanged\n", file_path));
                }
                (Some(_), ExistingFilePolicy::Fail) => {
                    out.push_str(&format!("# {} exists; fix will fail\n", file_path));
                }
                (old, _) => {
                    let old = old.unwrap_or_default();
                    out.push_str(&format!("--- a/{0}\n+++ b/{0}\n", file_path));
                    let patch = diffy::create_patch(&old, content);
                    let formatted = PatchFormatter::new().fmt_patch(&patch).to_string();
                    // drop diffy's own ---/+++ header lines
                    for line in formatted.lines().skip_while(|l| !l.starts_with("@@")) {
                        out.push_str(line);
                        out.push('\n');
                    }
                }
            }
        }
        FixAction::Command { command, .. } => {
            out.push_str(&format!("$ {}\n", command));
        }
        FixAction::MultiStep { steps } => {
            for step in steps {
                out.push_str(&preview_fix(step)?);
            }
        }
    }
    Ok(out)
}
