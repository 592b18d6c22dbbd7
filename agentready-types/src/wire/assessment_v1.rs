use crate::ValidationError;
use crate::assessment::{Assessment, AssessmentCounts, CertificationLevel, determine_certification_level};
use crate::config::Config;
use crate::finding::Finding;
use crate::metadata::AssessmentMetadata;
use crate::repository::Repository;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Persisted assessment document (`schema_version` 1.x).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentV1 {
    pub schema_version: String,
    pub timestamp: NaiveDateTime,
    pub repository: Repository,
    pub overall_score: f64,
    pub certification_level: CertificationLevel,
    pub attributes_assessed: u64,

    #[serde(alias = "attributes_not_assessed")]
    pub attributes_skipped: u64,

    pub attributes_total: u64,

    #[serde(default)]
    pub findings: Vec<Finding>,

    #[serde(default)]
    pub config: Option<Config>,

    #[serde(default)]
    pub duration_seconds: f64,

    #[serde(default)]
    pub metadata: Option<AssessmentMetadata>,
}

impl From<&Assessment> for AssessmentV1 {
    fn from(a: &Assessment) -> Self {
        let counts = a.counts();
        Self {
            schema_version: crate::schema::ASSESSMENT_SCHEMA_VERSION.to_string(),
            timestamp: a.timestamp(),
            repository: a.repository().clone(),
            overall_score: a.overall_score(),
            certification_level: a.certification_level(),
            attributes_assessed: counts.assessed,
            attributes_skipped: counts.skipped,
            attributes_total: counts.total,
            findings: a.findings().to_vec(),
            config: a.config().cloned(),
            duration_seconds: a.duration_seconds(),
            metadata: a.metadata().cloned(),
        }
    }
}

impl TryFrom<AssessmentV1> for Assessment {
    type Error = ValidationError;

    /// Re-validates every construction invariant; a stored level that disagrees
    /// with the stored score is rejected rather than silently re-derived.
    fn try_from(doc: AssessmentV1) -> Result<Self, Self::Error> {
        if !doc.schema_version.starts_with("1.") {
            return Err(ValidationError::UnsupportedSchemaVersion(doc.schema_version));
        }

        let expected = determine_certification_level(doc.overall_score);
        if expected != doc.certification_level {
            return Err(ValidationError::CertificationMismatch {
                stored: doc.certification_level.to_string(),
                expected: expected.to_string(),
                score: doc.overall_score,
            });
        }

        let counts = AssessmentCounts {
            assessed: doc.attributes_assessed,
            skipped: doc.attributes_skipped,
            total: doc.attributes_total,
        };

        let mut assessment = Assessment::new(
            doc.repository,
            doc.timestamp,
            doc.overall_score,
            counts,
            doc.findings,
        )?
        .with_duration(doc.duration_seconds);
        if let Some(config) = doc.config {
            assessment = assessment.with_config(config);
        }
        if let Some(metadata) = doc.metadata {
            assessment = assessment.with_metadata(metadata);
        }
        Ok(assessment)
    }
}
