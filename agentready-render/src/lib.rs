//! Rendering helpers (markdown) for human-readable artifacts.

use agentready_types::apply::{ApplyReport, ApplyStatus, FixResult};
use agentready_types::assessment::Assessment;
use agentready_types::attribute::Tier;
use agentready_types::finding::{Finding, FindingStatus};
use agentready_types::plan::FixPlan;

pub fn render_assessment_md(assessment: &Assessment) -> String {
    let repo = assessment.repository();
    let level = assessment.certification_level();
    let counts = assessment.counts();

    let mut out = String::new();
    out.push_str(&format!("# Agent-readiness assessment: {}\n\n", repo.name));
    out.push_str(&format!(
        "- Score: **{:.1}/100**\n",
        assessment.overall_score()
    ));
    out.push_str(&format!("- Certification: {} {}\n", level.emoji(), level));
    out.push_str(&format!(
        "- Attributes: {} assessed, {} skipped, {} total\n",
        counts.assessed, counts.skipped, counts.total
    ));
    out.push_str(&format!("- Branch: `{}`\n", repo.branch));
    out.push_str(&format!("- Commit: `{}`\n", short_sha(&repo.commit_hash)));
    if let Some(url) = &repo.url {
        out.push_str(&format!("- Remote: {}\n", url));
    }
    out.push_str(&format!(
        "- Assessed: {}\n",
        assessment.timestamp().format("%Y-%m-%d %H:%M:%S")
    ));
    out.push_str(&format!(
        "- Duration: {:.2}s\n",
        assessment.duration_seconds()
    ));
    if let Some(meta) = assessment.metadata() {
        out.push_str(&format!(
            "- Tool: agentready {} (`{}` by {})\n",
            meta.agentready_version, meta.command, meta.executed_by
        ));
    }
    out.push('\n');

    out.push_str("## Findings\n\n");
    if assessment.findings().is_empty() {
        out.push_str("_No attributes assessed._\n");
        return out;
    }

    for tier in Tier::ALL {
        let in_tier: Vec<&Finding> = assessment
            .findings()
            .iter()
            .filter(|f| f.attribute.tier == tier)
            .collect();
        if in_tier.is_empty() {
            continue;
        }
        out.push_str(&format!("### Tier {} ({})\n\n", tier.as_u8(), tier.label()));
        out.push_str("| Attribute | Status | Score | Evidence |\n");
        out.push_str("|---|---|---|---|\n");
        for f in in_tier {
            out.push_str(&format!(
                "| {} (`{}`) | {} | {} | {} |\n",
                f.attribute.name,
                f.attribute.id,
                status_badge(f.status),
                f.score.map(|s| format!("{:.0}", s)).unwrap_or_else(|| "-".to_string()),
                evidence_cell(f)
            ));
        }
        out.push('\n');
    }

    let failing: Vec<&Finding> = assessment.failing_findings().collect();
    if !failing.is_empty() {
        out.push_str("## Remediation\n\n");
        for f in failing {
            out.push_str(&format!("### {}\n\n", f.attribute.name));
            let Some(r) = &f.remediation else {
                out.push_str("_No remediation guidance._\n\n");
                continue;
            };
            out.push_str(&format!("{}\n\n", r.summary));
            for (i, step) in r.steps.iter().enumerate() {
                out.push_str(&format!("{}. {}\n", i + 1, step));
            }
            if !r.steps.is_empty() {
                out.push('\n');
            }
            if !r.commands.is_empty() {
                out.push_str("```bash\n");
                for cmd in &r.commands {
                    out.push_str(&format!("{}\n", cmd));
                }
                out.push_str("```\n\n");
            }
            for c in &r.citations {
                match &c.url {
                    Some(url) => out.push_str(&format!("- [{}]({}) ({})\n", c.title, url, c.source)),
                    None => out.push_str(&format!("- {} ({})\n", c.title, c.source)),
                }
            }
            if !r.citations.is_empty() {
                out.push('\n');
            }
        }
    }

    out
}

pub fn render_fix_plan_md(plan: &FixPlan) -> String {
    let mut out = String::new();
    out.push_str("# agentready fix plan\n\n");
    out.push_str(&format!("- Repository: `{}`\n", plan.repository_path));
    out.push_str(&format!("- Current score: {:.1}\n", plan.current_score));
    out.push_str(&format!("- Points gained: +{:.1}\n", plan.points_gained));
    out.push_str(&format!("- Projected score: {:.1}\n\n", plan.projected_score));

    out.push_str("## Fixes\n\n");
    if plan.fixes.is_empty() {
        out.push_str("_No automatic fixes available._\n");
        return out;
    }

    for (i, fix) in plan.fixes.iter().enumerate() {
        out.push_str(&format!("### {}. {}\n\n", i + 1, fix.description));
        out.push_str(&format!("- Attribute: `{}`\n", fix.attribute_id));
        out.push_str(&format!("- Kind: `{}`\n", fix.kind()));
        out.push_str(&format!("- Points: +{:.1}\n", fix.points_gained));
        out.push_str(&format!("- Id: `{}`\n\n", fix.id));
        out.push_str("```text\n");
        out.push_str(&fix.preview());
        out.push_str("\n```\n\n");
    }

    out
}

pub fn render_apply_md(report: &ApplyReport) -> String {
    let mut out = String::new();
    out.push_str("# agentready apply\n\n");
    out.push_str(&format!(
        "- Fixes applied: {}/{}\n",
        report.succeeded,
        report.attempted()
    ));
    out.push_str(&format!("- Fixes failed: {}\n\n", report.failed));

    out.push_str("## Results\n\n");
    if report.results.is_empty() {
        out.push_str("_No fixes attempted._\n");
        return out;
    }

    for r in &report.results {
        push_result(&mut out, r, 0);
    }

    if !report.failures.is_empty() {
        out.push_str("\n## Failures\n\n");
        for f in &report.failures {
            out.push_str(&format!("- {}\n", f));
        }
    }

    out
}

fn push_result(out: &mut String, r: &FixResult, depth: usize) {
    let indent = "  ".repeat(depth);
    out.push_str(&format!(
        "{}- `{}` {}",
        indent,
        apply_status_label(r.status),
        r.description
    ));
    if let Some(msg) = &r.message {
        out.push_str(&format!(" ({})", msg));
    }
    out.push('\n');
    for step in &r.steps {
        push_result(out, step, depth + 1);
    }
}

fn status_badge(status: FindingStatus) -> &'static str {
    match status {
        FindingStatus::Pass => "✅ pass",
        FindingStatus::Fail => "❌ fail",
        FindingStatus::Skipped => "⏭️ skipped",
        FindingStatus::Error => "⚠️ error",
    }
}

fn apply_status_label(status: ApplyStatus) -> &'static str {
    match status {
        ApplyStatus::Applied => "applied",
        ApplyStatus::Skipped => "skipped",
        ApplyStatus::Failed => "failed",
    }
}

fn evidence_cell(f: &Finding) -> String {
    if let Some(err) = &f.error_message {
        return escape_cell(err);
    }
    escape_cell(&f.evidence.join("; "))
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}

fn short_sha(sha: &str) -> &str {
    if sha.len() > 12 && sha.is_ascii() {
        &sha[..12]
    } else {
        sha
    }
}
