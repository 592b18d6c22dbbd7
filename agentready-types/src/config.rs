use crate::error::ValidationError;
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Scoring policy for one run. Read-only once the run starts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Attribute id to weight. When non-empty it must sum to 1.0.
    pub weights: BTreeMap<String, f64>,

    pub excluded_attributes: BTreeSet<String>,

    /// Language name to glob patterns that force detection of that language.
    pub language_overrides: BTreeMap<String, Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<Utf8PathBuf>,
}

impl Config {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (id, weight) in &self.weights {
            if !(0.0..=1.0).contains(weight) {
                return Err(ValidationError::InvalidWeight {
                    attribute_id: id.clone(),
                    weight: *weight,
                });
            }
        }

        if !self.weights.is_empty() {
            let sum: f64 = self.weights.values().sum();
            if (sum - 1.0).abs() > crate::WEIGHT_SUM_TOLERANCE {
                return Err(ValidationError::WeightsSum { sum });
            }
        }

        Ok(())
    }

    /// Configured weight for `attribute_id`, or `default` when not overridden.
    pub fn get_weight(&self, attribute_id: &str, default: f64) -> f64 {
        self.weights.get(attribute_id).copied().unwrap_or(default)
    }

    pub fn is_excluded(&self, attribute_id: &str) -> bool {
        self.excluded_attributes.contains(attribute_id)
    }
}
