//! Attribute explanations for the `agentready explain` and
//! `agentready list-attributes` commands.

use agentready_domain::{AttributeCatalog, Fixer, FixerRegistry};
use agentready_types::attribute::{Attribute, Tier};
use serde::Serialize;

/// Everything `explain` prints about one attribute.
#[derive(Debug, Clone, Serialize)]
pub struct AttributeExplanation {
    #[serde(flatten)]
    pub attribute: Attribute,
    /// What the automatic fixer does, if one is registered.
    pub fixer: Option<&'static str>,
}

/// Find an attribute by id. Case-insensitive; hyphens match underscores.
pub fn lookup_attribute<'a>(catalog: &'a AttributeCatalog, query: &str) -> Option<&'a Attribute> {
    let normalized = query.trim().to_lowercase().replace('-', "_");
    catalog.get(&normalized)
}

pub fn explain(catalog: &AttributeCatalog, fixers: &FixerRegistry, query: &str) -> Option<AttributeExplanation> {
    let attribute = lookup_attribute(catalog, query)?;
    Some(AttributeExplanation {
        attribute: attribute.clone(),
        fixer: fixers.get(&attribute.id).map(|f| f.summary()),
    })
}

/// Every attribute in catalog order, with fixer availability.
pub fn list_attributes(catalog: &AttributeCatalog, fixers: &FixerRegistry) -> Vec<AttributeExplanation> {
    catalog
        .iter()
        .map(|attribute| AttributeExplanation {
            attribute: attribute.clone(),
            fixer: fixers.get(&attribute.id).map(|f| f.summary()),
        })
        .collect()
}

pub fn format_tier(tier: Tier) -> String {
    format!("Tier {} ({})", tier.as_u8(), tier.label())
}

/// What a tier means for scoring.
pub fn tier_meaning(tier: Tier) -> &'static str {
    match tier {
        Tier::Essential => {
            "ESSENTIAL attributes carry half of the total default weight.\n\
             Missing one costs more than any other single gap."
        }
        Tier::Critical => "CRITICAL attributes carry 30% of the total default weight.",
        Tier::Important => "IMPORTANT attributes carry 15% of the total default weight.",
        Tier::Advanced => "ADVANCED attributes carry 5% of the total default weight.",
    }
}
