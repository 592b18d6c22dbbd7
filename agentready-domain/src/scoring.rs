//! Weighted scoring over findings.
//!
//! Policy:
//! - `skipped` findings and excluded attributes leave both numerator and denominator.
//! - `error` findings score 0 and stay in the denominator.
//! - Scores are rounded to one decimal place and clipped to [0, 100].

use agentready_types::attribute::Attribute;
use agentready_types::config::Config;
use agentready_types::finding::{Finding, FindingStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreStatus {
    Scored,
    /// Zero total weight: nothing contributed, so the score is 0 by definition.
    NoAttributesAssessed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreOutcome {
    pub score: f64,
    pub status: ScoreStatus,
    pub total_weight: f64,
}

impl ScoreOutcome {
    pub fn is_scored(&self) -> bool {
        self.status == ScoreStatus::Scored
    }
}

/// `None` when the attribute is excluded.
pub fn effective_weight(attribute: &Attribute, config: &Config) -> Option<f64> {
    if config.is_excluded(&attribute.id) {
        return None;
    }
    Some(config.get_weight(&attribute.id, attribute.default_weight))
}

/// Weight of a finding in the aggregate, or `None` when it does not participate.
fn participating_weight(finding: &Finding, config: &Config) -> Option<f64> {
    if finding.status == FindingStatus::Skipped {
        return None;
    }
    effective_weight(&finding.attribute, config)
}

fn contribution(finding: &Finding) -> f64 {
    match finding.status {
        FindingStatus::Error | FindingStatus::Skipped => 0.0,
        FindingStatus::Pass | FindingStatus::Fail => finding.score.unwrap_or(0.0),
    }
}

pub fn total_weight(findings: &[Finding], config: &Config) -> f64 {
    findings
        .iter()
        .filter_map(|f| participating_weight(f, config))
        .sum()
}

pub fn calculate_overall_score(findings: &[Finding], config: &Config) -> ScoreOutcome {
    let mut weighted = 0.0;
    let mut total = 0.0;
    for f in findings {
        if let Some(w) = participating_weight(f, config) {
            weighted += contribution(f) * w;
            total += w;
        }
    }

    if total <= 0.0 {
        return ScoreOutcome {
            score: 0.0,
            status: ScoreStatus::NoAttributesAssessed,
            total_weight: 0.0,
        };
    }

    ScoreOutcome {
        score: round_score(weighted / total),
        status: ScoreStatus::Scored,
        total_weight: total,
    }
}

/// Overall-score delta from raising one finding by `local_improvement` points
/// (attribute-local, 0-100), scaled by its share of the total weight.
pub fn estimate_points_gained(
    finding: &Finding,
    local_improvement: f64,
    findings: &[Finding],
    config: &Config,
) -> f64 {
    let Some(weight) = participating_weight(finding, config) else {
        return 0.0;
    };
    let total = total_weight(findings, config);
    if total <= 0.0 {
        return 0.0;
    }
    local_improvement.clamp(0.0, 100.0) * weight / total
}

pub fn round_score(raw: f64) -> f64 {
    ((raw * 10.0).round() / 10.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentready_types::attribute::Tier;

    fn attr(id: &str, weight: f64) -> Attribute {
        Attribute::new(id, id, "Test", Tier::Essential, weight).expect("attr")
    }

    #[test]
    fn twenty_pass_five_skipped_is_perfect() {
        let mut findings = Vec::new();
        for i in 0..20 {
            findings.push(Finding::pass(attr(&format!("a{i}"), 0.04), 100.0).expect("finding"));
        }
        for i in 20..25 {
            findings.push(Finding::skipped(attr(&format!("a{i}"), 0.04), "n/a"));
        }
        let out = calculate_overall_score(&findings, &Config::default());
        assert_eq!(out.score, 100.0);
        assert!(out.is_scored());
    }

    #[test]
    fn one_failure_in_twenty_equal_weights_is_ninety_five() {
        let mut findings = Vec::new();
        for i in 0..19 {
            findings.push(Finding::pass(attr(&format!("a{i}"), 0.05), 100.0).expect("finding"));
        }
        findings.push(Finding::fail(attr("a19", 0.05), 0.0, None).expect("finding"));
        let out = calculate_overall_score(&findings, &Config::default());
        assert_eq!(out.score, 95.0);
    }

    #[test]
    fn error_counts_as_zero_in_denominator() {
        let findings = vec![
            Finding::pass(attr("a", 0.5), 100.0).expect("finding"),
            Finding::error(attr("b", 0.5), "assessor crashed"),
        ];
        let out = calculate_overall_score(&findings, &Config::default());
        assert_eq!(out.score, 50.0);
    }

    #[test]
    fn excluded_attribute_is_ignored() {
        let findings = vec![
            Finding::pass(attr("a", 0.5), 100.0).expect("finding"),
            Finding::fail(attr("b", 0.5), 0.0, None).expect("finding"),
        ];
        let mut cfg = Config::default();
        cfg.excluded_attributes.insert("b".into());
        assert_eq!(calculate_overall_score(&findings, &cfg).score, 100.0);
    }

    #[test]
    fn config_weight_overrides_default() {
        let findings = vec![
            Finding::pass(attr("a", 0.5), 100.0).expect("finding"),
            Finding::fail(attr("b", 0.5), 0.0, None).expect("finding"),
        ];
        let mut cfg = Config::default();
        cfg.weights.insert("a".into(), 0.75);
        cfg.weights.insert("b".into(), 0.25);
        assert_eq!(calculate_overall_score(&findings, &cfg).score, 75.0);
    }

    #[test]
    fn zero_weight_reports_no_attributes_assessed() {
        let findings = vec![Finding::skipped(attr("a", 0.5), "n/a")];
        let out = calculate_overall_score(&findings, &Config::default());
        assert_eq!(out.score, 0.0);
        assert_eq!(out.status, ScoreStatus::NoAttributesAssessed);

        let empty = calculate_overall_score(&[], &Config::default());
        assert_eq!(empty.status, ScoreStatus::NoAttributesAssessed);

        let zero = vec![Finding::pass(attr("z", 0.0), 100.0).expect("finding")];
        let out = calculate_overall_score(&zero, &Config::default());
        assert_eq!(out.status, ScoreStatus::NoAttributesAssessed);
    }

    #[test]
    fn points_gained_scales_by_weight_share() {
        let findings = vec![
            Finding::pass(attr("a", 0.75), 100.0).expect("finding"),
            Finding::fail(attr("b", 0.25), 0.0, None).expect("finding"),
        ];
        let pts = estimate_points_gained(&findings[1], 100.0, &findings, &Config::default());
        assert!((pts - 25.0).abs() < 1e-9);
    }

    #[test]
    fn points_gained_is_zero_for_excluded() {
        let findings = vec![Finding::fail(attr("b", 0.25), 0.0, None).expect("finding")];
        let mut cfg = Config::default();
        cfg.excluded_attributes.insert("b".into());
        assert_eq!(estimate_points_gained(&findings[0], 100.0, &findings, &cfg), 0.0);
    }
}
