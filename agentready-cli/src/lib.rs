//! Library half of the `agentready` CLI: config loading, attribute
//! explanations and interactive prompts. The binary wires these to clap.

pub mod config;
pub mod explain;
pub mod prompt;
