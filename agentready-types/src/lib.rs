//! Shared DTOs (schemas-as-code) for the agentready workspace.
//!
//! # Design constraints
//! - Assessments are persisted to disk and read back by later runs.
//! - Be conservative with breaking changes.
//! - Prefer adding optional fields over changing semantics.
//! - Derived values (certification level, projected score) are computed here,
//!   never accepted from callers.

pub mod apply;
pub mod assessment;
pub mod attribute;
pub mod config;
pub mod error;
pub mod finding;
pub mod fix;
pub mod metadata;
pub mod plan;
pub mod repository;
pub mod wire;

pub use error::ValidationError;

/// Schema identifiers.
pub mod schema {
    /// Version stamped into every persisted assessment document.
    pub const ASSESSMENT_SCHEMA_VERSION: &str = "1.0.0";
    pub const AGENTREADY_FIX_PLAN_V1: &str = "agentready.fix_plan.v1";
    pub const AGENTREADY_APPLY_V1: &str = "agentready.apply.v1";
}

/// Tolerance used when checking that a weight set sums to 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.001;
