use crate::config::Config;
use crate::error::ValidationError;
use crate::finding::{Finding, FindingStatus};
use crate::metadata::AssessmentMetadata;
use crate::repository::Repository;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Five-step named score bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CertificationLevel {
    Platinum,
    Gold,
    Silver,
    Bronze,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl CertificationLevel {
    pub const ALL: [CertificationLevel; 5] = [
        CertificationLevel::Platinum,
        CertificationLevel::Gold,
        CertificationLevel::Silver,
        CertificationLevel::Bronze,
        CertificationLevel::NeedsImprovement,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CertificationLevel::Platinum => "Platinum",
            CertificationLevel::Gold => "Gold",
            CertificationLevel::Silver => "Silver",
            CertificationLevel::Bronze => "Bronze",
            CertificationLevel::NeedsImprovement => "Needs Improvement",
        }
    }

    /// Inclusive lower bound of the level.
    pub fn min_score(self) -> f64 {
        match self {
            CertificationLevel::Platinum => 90.0,
            CertificationLevel::Gold => 75.0,
            CertificationLevel::Silver => 60.0,
            CertificationLevel::Bronze => 40.0,
            CertificationLevel::NeedsImprovement => 0.0,
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            CertificationLevel::Platinum => "💎",
            CertificationLevel::Gold => "🥇",
            CertificationLevel::Silver => "🥈",
            CertificationLevel::Bronze => "🥉",
            CertificationLevel::NeedsImprovement => "📊",
        }
    }
}

impl fmt::Display for CertificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn determine_certification_level(score: f64) -> CertificationLevel {
    CertificationLevel::ALL
        .into_iter()
        .find(|level| score >= level.min_score())
        .unwrap_or(CertificationLevel::NeedsImprovement)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentCounts {
    pub assessed: u64,
    pub skipped: u64,
    pub total: u64,
}

impl AssessmentCounts {
    /// Skipped covers both `skipped` findings and findings for excluded attributes.
    pub fn from_findings(findings: &[Finding], config: Option<&Config>) -> Self {
        let total = findings.len() as u64;
        let skipped = findings
            .iter()
            .filter(|f| {
                f.status == FindingStatus::Skipped
                    || config.is_some_and(|c| c.is_excluded(f.attribute_id()))
            })
            .count() as u64;
        Self {
            assessed: total - skipped,
            skipped,
            total,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.assessed + self.skipped != self.total {
            return Err(ValidationError::CountMismatch {
                assessed: self.assessed,
                skipped: self.skipped,
                total: self.total,
            });
        }
        Ok(())
    }
}

/// Aggregate root for one assessment run. Immutable once built.
///
/// Persist through [`crate::wire::AssessmentV1`].
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    repository: Repository,
    timestamp: NaiveDateTime,
    overall_score: f64,
    certification_level: CertificationLevel,
    counts: AssessmentCounts,
    findings: Vec<Finding>,
    config: Option<Config>,
    duration_seconds: f64,
    metadata: Option<AssessmentMetadata>,
}

impl Assessment {
    pub fn new(
        repository: Repository,
        timestamp: NaiveDateTime,
        overall_score: f64,
        counts: AssessmentCounts,
        findings: Vec<Finding>,
    ) -> Result<Self, ValidationError> {
        if !(0.0..=100.0).contains(&overall_score) {
            return Err(ValidationError::InvalidOverallScore(overall_score));
        }
        counts.validate()?;
        if findings.len() as u64 != counts.total {
            return Err(ValidationError::FindingCountMismatch {
                findings: findings.len() as u64,
                total: counts.total,
            });
        }
        for f in &findings {
            f.validate()?;
        }

        Ok(Self {
            repository,
            timestamp,
            overall_score,
            certification_level: determine_certification_level(overall_score),
            counts,
            findings,
            config: None,
            duration_seconds: 0.0,
            metadata: None,
        })
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_duration(mut self, duration_seconds: f64) -> Self {
        self.duration_seconds = duration_seconds;
        self
    }

    pub fn with_metadata(mut self, metadata: AssessmentMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn overall_score(&self) -> f64 {
        self.overall_score
    }

    pub fn certification_level(&self) -> CertificationLevel {
        self.certification_level
    }

    pub fn counts(&self) -> AssessmentCounts {
        self.counts
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn config(&self) -> Option<&Config> {
        self.config.as_ref()
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    pub fn metadata(&self) -> Option<&AssessmentMetadata> {
        self.metadata.as_ref()
    }

    pub fn finding(&self, attribute_id: &str) -> Option<&Finding> {
        self.findings.iter().find(|f| f.attribute_id() == attribute_id)
    }

    pub fn failing_findings(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.status == FindingStatus::Fail)
    }
}
