use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Attribute priority bucket. Distinct from the certification level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Tier {
    Essential = 1,
    Critical = 2,
    Important = 3,
    Advanced = 4,
}

impl Tier {
    pub const ALL: [Tier; 4] = [
        Tier::Essential,
        Tier::Critical,
        Tier::Important,
        Tier::Advanced,
    ];

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Essential => "Essential",
            Tier::Critical => "Critical",
            Tier::Important => "Important",
            Tier::Advanced => "Advanced",
        }
    }
}

impl TryFrom<u8> for Tier {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Tier::Essential),
            2 => Ok(Tier::Critical),
            3 => Ok(Tier::Important),
            4 => Ok(Tier::Advanced),
            other => Err(ValidationError::InvalidTier(other)),
        }
    }
}

impl From<Tier> for u8 {
    fn from(t: Tier) -> Self {
        t.as_u8()
    }
}

/// A single best-practice criterion in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub id: String,
    pub name: String,
    pub category: String,
    pub tier: Tier,
    pub description: String,
    pub criteria: String,
    pub default_weight: f64,
}

impl Attribute {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        tier: Tier,
        default_weight: f64,
    ) -> Result<Self, ValidationError> {
        let attr = Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            tier,
            description: String::new(),
            criteria: String::new(),
            default_weight,
        };
        attr.validate()?;
        Ok(attr)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_criteria(mut self, criteria: impl Into<String>) -> Self {
        self.criteria = criteria.into();
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=1.0).contains(&self.default_weight) {
            return Err(ValidationError::InvalidWeight {
                attribute_id: self.id.clone(),
                weight: self.default_weight,
            });
        }
        Ok(())
    }
}
