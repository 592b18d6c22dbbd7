//! Embeddable core library for agentready.
//!
//! Provides a clap-free, I/O-abstracted entry point for assessing a
//! repository and aligning it with the attribute catalog.
//!
//! # Port traits
//!
//! Git queries and artifact writes go through the port traits in [`ports`]:
//! - [`GitPort`](ports::GitPort): repository detection, branch, HEAD, remote
//! - [`WritePort`](ports::WritePort): write files and create directories
//!
//! The [`adapters`] module provides the default shell/filesystem implementations.
//!
//! # Entry points
//!
//! - [`run_assessment`](pipeline::run_assessment): scan, assess, score
//! - [`run`](pipeline::run): assess an already-scanned repository with given assessors
//! - [`run_align`](pipeline::run_align): assess, then build a fix plan
//! - [`apply_fix_plan`](pipeline::apply_fix_plan): apply a (possibly narrowed) plan

pub mod adapters;
pub mod pipeline;
pub mod ports;
pub mod scanner;
pub mod settings;
pub mod store;

pub use agentready_domain::RepoView;
pub use pipeline::{RunPhase, ToolError};
