use agentready_domain::{AttributeCatalog, FixerRegistry};
use agentready_types::attribute::Tier;
use anyhow::Context;
use clap::{Parser, Subcommand};
use fs_err as fs;
use serde::Serialize;
use std::collections::BTreeMap;
use std::process::Command as ProcessCommand;

#[derive(Debug, Parser)]
#[command(name = "xtask", about = "Workspace helper tasks")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print schema identifiers used by agentready.
    PrintSchemas,
    /// Print the attribute catalog as a markdown table (or JSON).
    PrintCatalog {
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Write a sample .agentready-config.yaml spelling out every default weight.
    SampleConfig {
        #[arg(long, default_value = ".agentready-config.yaml")]
        out: String,
    },
    /// Run the cucumber acceptance suite.
    Bdd,
}

#[derive(Debug, Serialize)]
struct SampleConfig {
    weights: BTreeMap<String, f64>,
    excluded_attributes: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::PrintSchemas => {
            println!(
                "assessment {}",
                agentready_types::schema::ASSESSMENT_SCHEMA_VERSION
            );
            println!("{}", agentready_types::schema::AGENTREADY_FIX_PLAN_V1);
            println!("{}", agentready_types::schema::AGENTREADY_APPLY_V1);
        }
        Command::PrintCatalog { json } => {
            let catalog = AttributeCatalog::builtin();
            if json {
                let attrs: Vec<_> = catalog.iter().collect();
                println!("{}", serde_json::to_string_pretty(&attrs)?);
                return Ok(());
            }
            let fixers = FixerRegistry::builtin();
            println!("| Tier | Id | Name | Weight | Auto-fix |");
            println!("|---|---|---|---|---|");
            for tier in Tier::ALL {
                for attr in catalog.by_tier(tier) {
                    println!(
                        "| {} | `{}` | {} | {:.4} | {} |",
                        tier.as_u8(),
                        attr.id,
                        attr.name,
                        attr.default_weight,
                        if fixers.has_fixer(&attr.id) { "yes" } else { "" }
                    );
                }
            }
        }
        Command::SampleConfig { out } => {
            let catalog = AttributeCatalog::builtin();
            let sample = SampleConfig {
                weights: catalog
                    .iter()
                    .map(|a| (a.id.clone(), a.default_weight))
                    .collect(),
                excluded_attributes: vec![],
            };
            let yaml = serde_yaml::to_string(&sample).context("serialize sample config")?;
            fs::write(&out, yaml).with_context(|| format!("write {out}"))?;
            println!("wrote {out}");
        }
        Command::Bdd => {
            let status = ProcessCommand::new("cargo")
                .args(["test", "-p", "agentready-bdd", "--test", "cucumber"])
                .status()
                .context("run cucumber suite")?;
            if !status.success() {
                anyhow::bail!("bdd failed");
            }
        }
    }
    Ok(())
}
