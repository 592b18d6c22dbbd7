use agentready_cli::config::{self, ConfigMerger};
use agentready_cli::explain::{self, format_tier, tier_meaning};
use agentready_cli::prompt::confirm;
use agentready_core::adapters::{FsWritePort, ShellGitPort};
use agentready_core::pipeline::{apply_fix_plan, run_align, run_assessment};
use agentready_core::settings::{AlignSettings, AssessSettings};
use agentready_core::store::AssessmentStore;
use agentready_domain::{AttributeCatalog, FixerRegistry};
use agentready_edit::preview_fix;
use agentready_types::assessment::determine_certification_level;
use agentready_types::plan::FixPlan;
use agentready_types::wire::ToolInfoV1;
use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use tracing::error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "agentready",
    version,
    about = "Score a repository's readiness for coding agents and fix the gaps."
)]
struct Cli {
    /// Log at debug level (RUST_LOG still wins when set).
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Assess a repository and write JSON and Markdown reports.
    Assess(AssessArgs),
    /// Assess, then plan and apply automatic fixes for failing attributes.
    Align(AlignArgs),
    /// Explain what an attribute measures and whether it can be fixed automatically.
    Explain(ExplainArgs),
    /// List every attribute in the catalog.
    ListAttributes(ListAttributesArgs),
}

#[derive(Debug, Parser)]
struct AssessArgs {
    /// Repository to assess (default: current directory).
    #[arg(default_value = ".")]
    path: Utf8PathBuf,

    /// Report directory (default: <path>/.agentready).
    #[arg(long)]
    output_dir: Option<Utf8PathBuf>,

    /// Config file (default: <path>/.agentready-config.yaml when present).
    #[arg(long)]
    config: Option<Utf8PathBuf>,

    /// Attribute ids to exclude, in addition to the config file's list.
    #[arg(long)]
    exclude: Vec<String>,
}

#[derive(Debug, Parser)]
struct AlignArgs {
    /// Repository to align (default: current directory).
    #[arg(default_value = ".")]
    path: Utf8PathBuf,

    /// Show the planned changes without applying them.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Only fix these attribute ids (comma-separated).
    #[arg(long, value_delimiter = ',')]
    attributes: Option<Vec<String>>,

    /// Confirm each fix individually.
    #[arg(long, default_value_t = false)]
    interactive: bool,

    /// Apply without asking for confirmation.
    #[arg(long, short, default_value_t = false)]
    yes: bool,

    /// Config file (default: <path>/.agentready-config.yaml when present).
    #[arg(long)]
    config: Option<Utf8PathBuf>,
}

#[derive(Debug, Parser)]
struct ExplainArgs {
    /// Attribute id to explain (e.g. "claude_md_file").
    attribute_id: String,
}

#[derive(Debug, Parser)]
struct ListAttributesArgs {
    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:?}", e);
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .init();

    match cli.cmd {
        Command::Assess(args) => cmd_assess(args),
        Command::Align(args) => cmd_align(args),
        Command::Explain(args) => cmd_explain(args),
        Command::ListAttributes(args) => cmd_list_attributes(args),
    }
}

/// The command line as invoked, recorded in assessment metadata.
fn invocation() -> String {
    std::env::args().collect::<Vec<_>>().join(" ")
}

fn cmd_assess(args: AssessArgs) -> anyhow::Result<()> {
    let repo_root = args.path;
    let file_config = config::resolve(&repo_root, args.config.as_deref())?;
    let config = ConfigMerger::new(file_config)
        .merge_assess_args(&args.exclude, args.output_dir.as_deref());

    let store = AssessmentStore::for_repo(&repo_root, config.output_dir.as_deref());
    let settings = AssessSettings {
        repo_root,
        config,
        command: invocation(),
        ..AssessSettings::default()
    };

    let outcome = run_assessment(&settings, &ShellGitPort)?;
    let assessment = &outcome.assessment;
    let saved = store
        .save(assessment, &FsWritePort)
        .context("write assessment reports")?;

    let level = assessment.certification_level();
    let counts = assessment.counts();
    println!("Assessment complete");
    println!("Score: {:.1}/100 ({})", assessment.overall_score(), level);
    println!("Certification: {} {}", level.emoji(), level);
    println!(
        "Attributes: {} assessed, {} skipped, {} total",
        counts.assessed, counts.skipped, counts.total
    );
    println!("Duration: {:.1}s", assessment.duration_seconds());
    println!();
    println!("Reports:");
    println!("  JSON:     {}", saved.json);
    println!("  Markdown: {}", saved.markdown);
    Ok(())
}

fn cmd_align(args: AlignArgs) -> anyhow::Result<()> {
    let repo_root = args.path;
    let file_config = config::resolve(&repo_root, args.config.as_deref())?;
    let config = ConfigMerger::new(file_config).merge_assess_args(&[], None);

    let defaults = AlignSettings::default();
    let settings = AlignSettings {
        assess: AssessSettings {
            repo_root,
            config,
            command: invocation(),
            ..defaults.assess
        },
        attributes: args.attributes,
        command_timeout: defaults.command_timeout,
    };

    let outcome = run_align(&settings, &ShellGitPort)?;
    let assessment = &outcome.assessment;
    println!(
        "Current Score: {:.1}/100 ({})",
        assessment.overall_score(),
        assessment.certification_level()
    );

    let plan = outcome.plan;
    if plan.is_empty() {
        println!("No automatic fixes available");
        return Ok(());
    }

    print_plan_summary(&plan);
    println!();
    println!("Changes to be applied:");
    for fix in &plan.fixes {
        println!();
        println!("[{}] {}", fix.attribute_id, fix.description);
        print!("{}", preview_fix(fix).with_context(|| format!("preview {}", fix.id))?);
    }
    println!();

    if args.dry_run {
        println!("Run without --dry-run to apply fixes");
        return Ok(());
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let plan = if args.interactive {
        let selected = select_interactively(&plan, &mut input, &mut output)?;
        if selected.is_empty() {
            println!("No fixes selected");
            return Ok(());
        }
        plan.select(&selected)
    } else if args.yes {
        plan
    } else {
        let question = format!("Apply {} fix(es)?", plan.fixes.len());
        if !confirm(&question, &mut input, &mut output)? {
            println!("Aborted");
            return Ok(());
        }
        plan
    };

    let report = apply_fix_plan(&plan.fixes, settings.command_timeout);
    println!();
    println!("Fixes applied: {}/{}", report.succeeded, report.attempted());
    println!("Fixes failed: {}", report.failed);
    for failure in &report.failures {
        println!("  - {}", failure);
    }
    if report.succeeded > 0 {
        println!();
        println!("Run 'agentready assess' to see the updated score");
    }
    Ok(())
}

fn print_plan_summary(plan: &FixPlan) {
    println!("Fixes Available: {}", plan.fixes.len());
    for fix in &plan.fixes {
        println!(
            "  - [{}] {} (+{:.1} points)",
            fix.attribute_id, fix.description, fix.points_gained
        );
    }
    println!(
        "Projected Score: {:.1}/100 ({})",
        plan.projected_score,
        determine_certification_level(plan.projected_score)
    );
}

fn select_interactively(
    plan: &FixPlan,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> anyhow::Result<Vec<String>> {
    let mut selected = Vec::new();
    for fix in &plan.fixes {
        let question = format!("Apply fix '{}' (+{:.1} points)?", fix.description, fix.points_gained);
        if confirm(&question, input, output)? {
            selected.push(fix.id.clone());
        }
    }
    Ok(selected)
}

fn cmd_explain(args: ExplainArgs) -> anyhow::Result<()> {
    let catalog = AttributeCatalog::builtin();
    let fixers = FixerRegistry::builtin();

    let Some(explanation) = explain::explain(&catalog, &fixers, &args.attribute_id) else {
        anyhow::bail!(
            "Unknown attribute: '{}'\n\nRun 'agentready list-attributes' to see every attribute id.",
            args.attribute_id
        );
    };
    let attr = &explanation.attribute;

    println!("================================================================================");
    println!("ATTRIBUTE: {}", attr.name);
    println!("================================================================================");
    println!();
    println!("ID:       {}", attr.id);
    println!("Category: {}", attr.category);
    println!("Tier:     {}", format_tier(attr.tier));
    println!("Weight:   {:.4}", attr.default_weight);
    println!();

    println!("DESCRIPTION");
    println!("--------------------------------------------------------------------------------");
    println!("{}", attr.description);
    println!();

    println!("CRITERIA");
    println!("--------------------------------------------------------------------------------");
    println!("{}", attr.criteria);
    println!();

    println!("{}", format_tier(attr.tier).to_uppercase());
    println!("--------------------------------------------------------------------------------");
    println!("{}", tier_meaning(attr.tier));
    println!();

    println!("AUTOMATIC FIX");
    println!("--------------------------------------------------------------------------------");
    match explanation.fixer {
        Some(summary) => {
            println!("Available: {}", summary);
            println!("Run 'agentready align --attributes {}' to apply it.", attr.id);
        }
        None => println!("Not available. See the remediation section of an assessment report."),
    }
    println!();

    Ok(())
}

#[derive(serde::Serialize)]
struct AttributeListing {
    tool: ToolInfoV1,
    attributes: Vec<explain::AttributeExplanation>,
}

fn cmd_list_attributes(args: ListAttributesArgs) -> anyhow::Result<()> {
    let catalog = AttributeCatalog::builtin();
    let fixers = FixerRegistry::builtin();
    let entries = explain::list_attributes(&catalog, &fixers);

    match args.format {
        OutputFormat::Text => {
            println!("Attributes ({}):", entries.len());
            let mut current_tier = None;
            for entry in &entries {
                let attr = &entry.attribute;
                if current_tier != Some(attr.tier) {
                    current_tier = Some(attr.tier);
                    println!();
                    println!("{}", format_tier(attr.tier));
                    println!("  {:<32} {:<8} {:<4} NAME", "ID", "WEIGHT", "FIX");
                }
                println!(
                    "  {:<32} {:<8.4} {:<4} {}",
                    attr.id,
                    attr.default_weight,
                    if entry.fixer.is_some() { "yes" } else { "-" },
                    attr.name
                );
            }
            println!();
            println!("Use 'agentready explain <id>' for details.");
        }
        OutputFormat::Json => {
            let listing = AttributeListing {
                tool: ToolInfoV1::current(env!("CARGO_PKG_VERSION")),
                attributes: entries,
            };
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
    }
    Ok(())
}
