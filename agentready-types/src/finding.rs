use crate::attribute::Attribute;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingStatus {
    Pass,
    Fail,
    Skipped,
    Error,
}

impl FindingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FindingStatus::Pass => "pass",
            FindingStatus::Fail => "fail",
            FindingStatus::Skipped => "skipped",
            FindingStatus::Error => "error",
        }
    }
}

impl fmt::Display for FindingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FindingStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pass" => Ok(FindingStatus::Pass),
            "fail" => Ok(FindingStatus::Fail),
            "skipped" => Ok(FindingStatus::Skipped),
            "error" => Ok(FindingStatus::Error),
            other => Err(ValidationError::InvalidStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub source: String,
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default)]
    pub relevance: String,
}

/// How a human or a fixer could address a failing finding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Remediation {
    pub summary: String,

    #[serde(default)]
    pub steps: Vec<String>,

    #[serde(default)]
    pub tools: Vec<String>,

    #[serde(default)]
    pub commands: Vec<String>,

    #[serde(default)]
    pub examples: Vec<String>,

    #[serde(default)]
    pub citations: Vec<Citation>,
}

impl Remediation {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            ..Self::default()
        }
    }

    pub fn with_steps<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.steps = steps.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_commands<I, S>(mut self, commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.commands = commands.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tools = tools.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_citation(mut self, citation: Citation) -> Self {
        self.citations.push(citation);
        self
    }
}

/// Outcome of assessing one attribute against one repository.
///
/// `score` is on a 0-100 scale and only meaningful for `pass`/`fail`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub attribute: Attribute,
    pub status: FindingStatus,

    #[serde(default)]
    pub score: Option<f64>,

    #[serde(default)]
    pub measured_value: Option<String>,

    #[serde(default)]
    pub threshold: Option<String>,

    #[serde(default)]
    pub evidence: Vec<String>,

    #[serde(default)]
    pub remediation: Option<Remediation>,

    #[serde(default)]
    pub error_message: Option<String>,
}

impl Finding {
    fn bare(attribute: Attribute, status: FindingStatus, score: Option<f64>) -> Self {
        Self {
            attribute,
            status,
            score,
            measured_value: None,
            threshold: None,
            evidence: vec![],
            remediation: None,
            error_message: None,
        }
    }

    pub fn pass(attribute: Attribute, score: f64) -> Result<Self, ValidationError> {
        let f = Self::bare(attribute, FindingStatus::Pass, Some(score));
        f.validate()?;
        Ok(f)
    }

    pub fn fail(
        attribute: Attribute,
        score: f64,
        remediation: Option<Remediation>,
    ) -> Result<Self, ValidationError> {
        let mut f = Self::bare(attribute, FindingStatus::Fail, Some(score));
        f.remediation = remediation;
        f.validate()?;
        Ok(f)
    }

    /// The attribute does not apply to this repository (or has no detector yet).
    pub fn skipped(attribute: Attribute, reason: impl Into<String>) -> Self {
        let mut f = Self::bare(attribute, FindingStatus::Skipped, None);
        f.evidence.push(reason.into());
        f
    }

    pub fn error(attribute: Attribute, message: impl Into<String>) -> Self {
        let mut f = Self::bare(attribute, FindingStatus::Error, None);
        f.error_message = Some(message.into());
        f
    }

    pub fn with_evidence<I, S>(mut self, evidence: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.evidence.extend(evidence.into_iter().map(Into::into));
        self
    }

    pub fn with_measurement(
        mut self,
        measured_value: impl Into<String>,
        threshold: impl Into<String>,
    ) -> Self {
        self.measured_value = Some(measured_value.into());
        self.threshold = Some(threshold.into());
        self
    }

    pub fn attribute_id(&self) -> &str {
        &self.attribute.id
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(score) = self.score
            && !(0.0..=100.0).contains(&score)
        {
            return Err(ValidationError::InvalidScore {
                attribute_id: self.attribute.id.clone(),
                score,
            });
        }
        self.attribute.validate()
    }
}
