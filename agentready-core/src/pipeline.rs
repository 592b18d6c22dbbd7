//! Core assess and align pipelines.
//!
//! Git queries and artifact writes go through the port traits; repository
//! content is read through a `RepoView`.

use crate::ports::GitPort;
use crate::scanner::scan_repository;
use crate::settings::{AlignSettings, AssessSettings};
use agentready_domain::scoring::calculate_overall_score;
use agentready_domain::{
    Assessor, AttributeCatalog, FixerService, FsRepoView, RepoView, ScoreStatus,
    create_all_assessors,
};
use agentready_edit::{ApplyOptions, apply_fixes};
use agentready_types::ValidationError;
use agentready_types::apply::ApplyReport;
use agentready_types::assessment::{Assessment, AssessmentCounts};
use agentready_types::attribute::Attribute;
use agentready_types::config::Config;
use agentready_types::finding::Finding;
use agentready_types::fix::Fix;
use agentready_types::metadata::AssessmentMetadata;
use agentready_types::plan::FixPlan;
use agentready_types::repository::Repository;
use anyhow::Context;
use camino::Utf8PathBuf;
use chrono::Local;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Error type for pipeline results. Every variant maps to exit code 1.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Not a git repository: {0}")]
    NotAGitRepository(Utf8PathBuf),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

/// Lifecycle of one assessment run. Assessor failures do not leave `Scanning`;
/// they become error findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Initialized,
    Scanning,
    Scoring,
    Complete,
}

#[derive(Debug)]
struct RunTracker {
    phases: Vec<RunPhase>,
}

impl RunTracker {
    fn new() -> Self {
        debug!(phase = ?RunPhase::Initialized, "run phase");
        Self {
            phases: vec![RunPhase::Initialized],
        }
    }

    fn advance(&mut self, next: RunPhase) {
        debug!(phase = ?next, "run phase");
        self.phases.push(next);
    }
}

/// Tool version and invoking command stamped into assessment metadata.
#[derive(Debug, Clone)]
pub struct RunStamp {
    pub tool_version: String,
    pub command: String,
}

/// Outcome of `run` / `run_assessment`.
#[derive(Debug)]
pub struct AssessOutcome {
    pub assessment: Assessment,
    pub score_status: ScoreStatus,
    /// Phases visited, in order.
    pub phases: Vec<RunPhase>,
    /// Attribute ids whose assessor raised an error.
    pub errored: Vec<String>,
}

/// Assess an already-scanned repository.
///
/// Excluded attributes are not assessed; they are recorded as skipped. An
/// assessor that errors or panics yields an error finding and the run goes on.
pub fn run(
    repository: Repository,
    assessors: &[Box<dyn Assessor>],
    config: &Config,
    view: &dyn RepoView,
    stamp: &RunStamp,
) -> Result<AssessOutcome, ToolError> {
    config.validate()?;
    let started = Instant::now();
    let timestamp = Local::now().naive_local();
    let mut tracker = RunTracker::new();

    tracker.advance(RunPhase::Scanning);
    let mut findings = Vec::with_capacity(assessors.len());
    let mut errored = Vec::new();
    for assessor in assessors {
        let attribute = assessor.attribute();
        if config.is_excluded(&attribute.id) {
            debug!(attribute_id = %attribute.id, "excluded by configuration");
            findings.push(Finding::skipped(attribute.clone(), "excluded by configuration"));
            continue;
        }

        let finding = match catch_unwind(AssertUnwindSafe(|| {
            assessor.assess(&repository, view, config)
        })) {
            Ok(Ok(finding)) => match check_finding(&finding, attribute) {
                Ok(()) => finding,
                Err(msg) => {
                    warn!(attribute_id = %attribute.id, error = %msg, "invalid finding");
                    errored.push(attribute.id.clone());
                    Finding::error(attribute.clone(), format!("invalid finding: {msg}"))
                }
            },
            Ok(Err(err)) => {
                warn!(attribute_id = %attribute.id, error = %format!("{err:#}"), "assessor failed");
                errored.push(attribute.id.clone());
                Finding::error(attribute.clone(), format!("{err:#}"))
            }
            Err(panic) => {
                let msg = panic_message(panic.as_ref());
                warn!(attribute_id = %attribute.id, error = %msg, "assessor panicked");
                errored.push(attribute.id.clone());
                Finding::error(attribute.clone(), format!("assessor panicked: {msg}"))
            }
        };
        debug!(attribute_id = %attribute.id, status = %finding.status, "assessed");
        findings.push(finding);
    }

    tracker.advance(RunPhase::Scoring);
    let outcome = calculate_overall_score(&findings, config);
    if outcome.status == ScoreStatus::NoAttributesAssessed {
        warn!("no attributes assessed; score is 0");
    }
    let counts = AssessmentCounts::from_findings(&findings, Some(config));
    let metadata = AssessmentMetadata::create(&stamp.tool_version, timestamp, &stamp.command);
    let assessment = Assessment::new(repository, timestamp, outcome.score, counts, findings)?
        .with_config(config.clone())
        .with_duration(started.elapsed().as_secs_f64())
        .with_metadata(metadata);

    tracker.advance(RunPhase::Complete);
    info!(
        score = assessment.overall_score(),
        level = %assessment.certification_level(),
        assessed = counts.assessed,
        skipped = counts.skipped,
        "assessment complete"
    );

    Ok(AssessOutcome {
        assessment,
        score_status: outcome.status,
        phases: tracker.phases,
        errored,
    })
}

/// A returned finding must be valid and belong to the assessor's attribute.
fn check_finding(finding: &Finding, attribute: &Attribute) -> Result<(), String> {
    if finding.attribute_id() != attribute.id {
        return Err(format!(
            "finding is for attribute '{}', expected '{}'",
            finding.attribute_id(),
            attribute.id
        ));
    }
    finding.validate().map_err(|e| e.to_string())
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Refuse non-git directories before any work is done.
fn ensure_git_repository(settings: &AssessSettings, git: &dyn GitPort) -> Result<(), ToolError> {
    if !settings.repo_root.is_dir() {
        return Err(ValidationError::PathDoesNotExist(settings.repo_root.to_string()).into());
    }
    if !git.is_repository(&settings.repo_root) {
        return Err(ToolError::NotAGitRepository(settings.repo_root.clone()));
    }
    Ok(())
}

/// Scan the repository, run every catalog assessor, and score the result.
pub fn run_assessment(
    settings: &AssessSettings,
    git: &dyn GitPort,
) -> Result<AssessOutcome, ToolError> {
    ensure_git_repository(settings, git)?;
    settings.config.validate()?;

    let repository = scan_repository(&settings.repo_root, git, &settings.config)
        .context("scan repository")?;
    let catalog = AttributeCatalog::builtin();
    let assessors = create_all_assessors(&catalog);
    let view = FsRepoView::new(settings.repo_root.clone());
    let stamp = RunStamp {
        tool_version: settings.tool_version.clone(),
        command: settings.command.clone(),
    };

    run(repository, &assessors, &settings.config, &view, &stamp)
}

/// Outcome of `run_align`.
#[derive(Debug)]
pub struct AlignOutcome {
    pub assessment: Assessment,
    pub plan: FixPlan,
}

/// Assess, then plan fixes for failing attributes. Does not touch the tree.
pub fn run_align(settings: &AlignSettings, git: &dyn GitPort) -> Result<AlignOutcome, ToolError> {
    let assessed = run_assessment(&settings.assess, git)?;
    let plan = FixerService::new().generate_fix_plan(
        assessed.assessment.repository(),
        &assessed.assessment,
        settings.attributes.as_deref(),
    );
    Ok(AlignOutcome {
        assessment: assessed.assessment,
        plan,
    })
}

/// Apply `fixes` in the given order. Partial success is reported, not raised.
pub fn apply_fix_plan(fixes: &[Fix], command_timeout: Duration) -> ApplyReport {
    let opts = ApplyOptions { command_timeout };
    let report = apply_fixes(fixes, &opts);
    info!(
        succeeded = report.succeeded,
        failed = report.failed,
        "fixes applied"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::GitPort;
    use agentready_domain::MemRepoView;
    use agentready_types::attribute::Tier;
    use agentready_types::finding::FindingStatus;
    use camino::Utf8Path;
    use tempfile::TempDir;

    #[derive(Default)]
    struct StubGitPort {
        repo: bool,
    }

    impl GitPort for StubGitPort {
        fn is_repository(&self, _: &Utf8Path) -> bool {
            self.repo
        }
        fn branch(&self, _: &Utf8Path) -> anyhow::Result<Option<String>> {
            Ok(Some("main".into()))
        }
        fn head_sha(&self, _: &Utf8Path) -> anyhow::Result<Option<String>> {
            Ok(Some("a".repeat(40)))
        }
        fn remote_url(&self, _: &Utf8Path) -> anyhow::Result<Option<String>> {
            Ok(None)
        }
    }

    enum Behaviour {
        Pass,
        Fail,
        Err,
        Panic,
        OutOfRange,
        WrongAttribute,
    }

    struct ScriptedAssessor {
        attribute: Attribute,
        behaviour: Behaviour,
    }

    impl Assessor for ScriptedAssessor {
        fn attribute(&self) -> &Attribute {
            &self.attribute
        }

        fn assess(&self, _: &Repository, _: &dyn RepoView, _: &Config) -> anyhow::Result<Finding> {
            match self.behaviour {
                Behaviour::Pass => Ok(Finding::pass(self.attribute.clone(), 100.0)?),
                Behaviour::Fail => Ok(Finding::fail(self.attribute.clone(), 0.0, None)?),
                Behaviour::Err => anyhow::bail!("tool missing"),
                Behaviour::Panic => panic!("boom"),
                Behaviour::OutOfRange => {
                    let mut finding = Finding::pass(self.attribute.clone(), 100.0)?;
                    finding.score = Some(150.0);
                    Ok(finding)
                }
                Behaviour::WrongAttribute => {
                    let other = Attribute::new("other", "other", "Test", Tier::Critical, 0.25)?;
                    Ok(Finding::pass(other, 100.0)?)
                }
            }
        }
    }

    fn scripted(id: &str, behaviour: Behaviour) -> Box<dyn Assessor> {
        Box::new(ScriptedAssessor {
            attribute: Attribute::new(id, id, "Test", Tier::Critical, 0.25).expect("attr"),
            behaviour,
        })
    }

    fn temp_repo() -> (TempDir, Repository) {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        let repo = Repository::new(root, "demo").expect("repo");
        (temp, repo)
    }

    fn stamp() -> RunStamp {
        RunStamp {
            tool_version: "0.0.0-test".into(),
            command: "agentready assess".into(),
        }
    }

    #[test]
    fn invalid_findings_become_error_findings() {
        let (_temp, repo) = temp_repo();
        let view = MemRepoView::new(repo.path.clone());
        let assessors = vec![
            scripted("a", Behaviour::Pass),
            scripted("b", Behaviour::OutOfRange),
            scripted("c", Behaviour::WrongAttribute),
            scripted("d", Behaviour::Fail),
        ];
        let out = run(repo, &assessors, &Config::default(), &view, &stamp()).expect("run");

        let statuses: Vec<_> = out.assessment.findings().iter().map(|f| f.status).collect();
        assert_eq!(
            statuses,
            vec![
                FindingStatus::Pass,
                FindingStatus::Error,
                FindingStatus::Error,
                FindingStatus::Fail
            ]
        );
        assert_eq!(out.errored, vec!["b".to_string(), "c".to_string()]);
        let b = out.assessment.finding("b").expect("finding b");
        assert_eq!(b.score, None);
        assert!(
            b.error_message
                .as_deref()
                .is_some_and(|m| m.starts_with("invalid finding:"))
        );
        assert!(out.assessment.finding("other").is_none());
        assert_eq!(out.assessment.overall_score(), 25.0);
    }

    #[test]
    fn assessor_errors_become_error_findings() {
        let (_temp, repo) = temp_repo();
        let view = MemRepoView::new(repo.path.clone());
        let assessors = vec![
            scripted("a", Behaviour::Pass),
            scripted("b", Behaviour::Err),
            scripted("c", Behaviour::Panic),
            scripted("d", Behaviour::Pass),
        ];
        let out = run(repo, &assessors, &Config::default(), &view, &stamp()).expect("run");

        let statuses: Vec<_> = out.assessment.findings().iter().map(|f| f.status).collect();
        assert_eq!(
            statuses,
            vec![
                FindingStatus::Pass,
                FindingStatus::Error,
                FindingStatus::Error,
                FindingStatus::Pass
            ]
        );
        assert_eq!(out.errored, vec!["b".to_string(), "c".to_string()]);
        assert_eq!(
            out.assessment.finding("b").and_then(|f| f.error_message.as_deref()),
            Some("tool missing")
        );
        assert_eq!(
            out.assessment.finding("c").and_then(|f| f.error_message.as_deref()),
            Some("assessor panicked: boom")
        );
        // errors stay in the denominator
        assert_eq!(out.assessment.overall_score(), 50.0);
        assert_eq!(
            out.phases,
            vec![
                RunPhase::Initialized,
                RunPhase::Scanning,
                RunPhase::Scoring,
                RunPhase::Complete
            ]
        );
    }

    #[test]
    fn excluded_attributes_are_skipped_without_assessing() {
        let (_temp, repo) = temp_repo();
        let view = MemRepoView::new(repo.path.clone());
        let assessors = vec![
            scripted("a", Behaviour::Pass),
            scripted("b", Behaviour::Panic),
            scripted("c", Behaviour::Fail),
        ];
        let config = Config {
            excluded_attributes: ["b".to_string(), "c".to_string()].into_iter().collect(),
            ..Config::default()
        };
        let out = run(repo, &assessors, &config, &view, &stamp()).expect("run");

        assert!(out.errored.is_empty());
        assert_eq!(out.assessment.overall_score(), 100.0);
        let counts = out.assessment.counts();
        assert_eq!((counts.assessed, counts.skipped, counts.total), (1, 2, 3));
        assert_eq!(
            out.assessment.finding("c").map(|f| f.status),
            Some(FindingStatus::Skipped)
        );
    }

    #[test]
    fn nothing_assessed_scores_zero_with_distinct_status() {
        let (_temp, repo) = temp_repo();
        let view = MemRepoView::new(repo.path.clone());
        let out = run(repo, &[], &Config::default(), &view, &stamp()).expect("run");
        assert_eq!(out.assessment.overall_score(), 0.0);
        assert_eq!(out.score_status, ScoreStatus::NoAttributesAssessed);
    }

    #[test]
    fn metadata_and_config_are_stamped() {
        let (_temp, repo) = temp_repo();
        let view = MemRepoView::new(repo.path.clone());
        let out = run(
            repo,
            &[scripted("a", Behaviour::Pass)],
            &Config::default(),
            &view,
            &stamp(),
        )
        .expect("run");
        let meta = out.assessment.metadata().expect("metadata");
        assert_eq!(meta.agentready_version, "0.0.0-test");
        assert_eq!(meta.command, "agentready assess");
        assert!(out.assessment.config().is_some());
        assert!(out.assessment.duration_seconds() >= 0.0);
    }

    #[test]
    fn invalid_config_is_rejected_before_assessing() {
        let (_temp, repo) = temp_repo();
        let view = MemRepoView::new(repo.path.clone());
        let config = Config {
            weights: [("a".to_string(), 0.4)].into_iter().collect(),
            ..Config::default()
        };
        let err = run(repo, &[scripted("a", Behaviour::Panic)], &config, &view, &stamp())
            .expect_err("invalid weights");
        assert!(matches!(err, ToolError::Validation(ValidationError::WeightsSum { .. })));
    }

    #[test]
    fn run_assessment_refuses_non_git_directory() {
        let (_temp, repo) = temp_repo();
        let settings = AssessSettings {
            repo_root: repo.path.clone(),
            ..AssessSettings::default()
        };
        let err = run_assessment(&settings, &StubGitPort { repo: false }).expect_err("not git");
        assert_eq!(err.to_string(), format!("Not a git repository: {}", repo.path));
    }

    #[test]
    fn run_assessment_covers_the_whole_catalog() {
        let (_temp, repo) = temp_repo();
        fs_err::write(repo.path.join("README.md"), "# demo\n").expect("write");
        let settings = AssessSettings {
            repo_root: repo.path.clone(),
            ..AssessSettings::default()
        };
        let out = run_assessment(&settings, &StubGitPort { repo: true }).expect("assess");
        let a = &out.assessment;

        assert_eq!(a.counts().total, 25);
        assert_eq!(a.repository().branch, "main");
        assert_eq!(
            a.finding("readme_file").map(|f| f.status),
            Some(FindingStatus::Pass)
        );
        assert_eq!(
            a.finding("claude_md_file").map(|f| f.status),
            Some(FindingStatus::Fail)
        );
    }

    #[test]
    fn run_align_plans_fixes_without_writing() {
        let (_temp, repo) = temp_repo();
        let settings = AlignSettings {
            assess: AssessSettings {
                repo_root: repo.path.clone(),
                ..AssessSettings::default()
            },
            attributes: Some(vec!["readme_file".to_string()]),
            ..AlignSettings::default()
        };
        let out = run_align(&settings, &StubGitPort { repo: true }).expect("align");

        assert_eq!(out.plan.fixes.len(), 1);
        assert_eq!(out.plan.fixes[0].attribute_id, "readme_file");
        assert!(out.plan.projected_score > out.plan.current_score);
        assert!(!repo.path.join("README.md").exists());

        let report = apply_fix_plan(&out.plan.fixes, Duration::from_secs(5));
        assert_eq!((report.succeeded, report.failed), (1, 0));
        assert!(repo.path.join("README.md").exists());
    }
}
