//! Domain logic: the attribute catalog, the scoring engine, and turning failing
//! findings into a deterministic fix plan.
//!
//! This crate owns *what* is measured and *what* should be fixed. It does not
//! own *how* fixes are applied; that's the `agentready-edit` crate.

pub mod assessors;
pub mod catalog;
pub mod fixers;
mod planner;
mod ports;
pub mod scoring;
pub mod templates;

pub use assessors::{Assessor, create_all_assessors};
pub use catalog::AttributeCatalog;
pub use fixers::{Fixer, FixerRegistry};
pub use planner::FixerService;
pub use ports::{FsRepoView, MemRepoView, RepoView};
pub use scoring::{ScoreOutcome, ScoreStatus};
pub use templates::{BuiltinTemplates, TemplateError, TemplateRenderer};
