//! The fixed catalog of agent-readiness attributes.
//!
//! Tier shares of the total default weight: Essential 50%, Critical 30%,
//! Important 15%, Advanced 5%.

use agentready_types::ValidationError;
use agentready_types::attribute::{Attribute, Tier};
use std::collections::BTreeSet;

struct AttributeDef {
    id: &'static str,
    name: &'static str,
    category: &'static str,
    tier: Tier,
    description: &'static str,
    criteria: &'static str,
}

const DEFS: &[AttributeDef] = &[
    // Tier 1
    AttributeDef {
        id: "claude_md_file",
        name: "CLAUDE.md Configuration Files",
        category: "Context Window Optimization",
        tier: Tier::Essential,
        description: "Project-specific configuration file giving coding agents immediate context.",
        criteria: "CLAUDE.md (or AGENTS.md) exists in the repository root",
    },
    AttributeDef {
        id: "readme_file",
        name: "README Structure",
        category: "Documentation Standards",
        tier: Tier::Essential,
        description: "Well-structured README with installation, usage, and development sections.",
        criteria: "README.md exists in the repository root",
    },
    AttributeDef {
        id: "type_annotations",
        name: "Type Annotations",
        category: "Code Quality",
        tier: Tier::Essential,
        description: "Static type hints that let agents reason about interfaces without running code.",
        criteria: ">80% of functions carry type annotations",
    },
    AttributeDef {
        id: "standard_project_layout",
        name: "Standard Project Layouts",
        category: "Repository Structure",
        tier: Tier::Essential,
        description: "Conventional directory layout for the primary language.",
        criteria: "Source and test directories follow the language convention",
    },
    AttributeDef {
        id: "lock_files",
        name: "Lock Files for Reproducibility",
        category: "Dependency Management",
        tier: Tier::Essential,
        description: "Pinned dependency versions so builds are reproducible.",
        criteria: "A dependency lock file is committed",
    },
    // Tier 2
    AttributeDef {
        id: "test_coverage",
        name: "Test Coverage Requirements",
        category: "Testing & CI/CD",
        tier: Tier::Critical,
        description: "Automated tests with measured coverage.",
        criteria: ">80% line coverage",
    },
    AttributeDef {
        id: "precommit_hooks",
        name: "Pre-commit Hooks & CI/CD Linting",
        category: "Testing & CI/CD",
        tier: Tier::Critical,
        description: "Local hooks that run formatters and linters before each commit.",
        criteria: ".pre-commit-config.yaml exists",
    },
    AttributeDef {
        id: "conventional_commits",
        name: "Conventional Commit Messages",
        category: "Git & Version Control",
        tier: Tier::Critical,
        description: "Structured commit messages that agents can parse and generate.",
        criteria: ">80% of recent commits follow the conventional format",
    },
    AttributeDef {
        id: "gitignore_completeness",
        name: ".gitignore Completeness",
        category: "Git & Version Control",
        tier: Tier::Critical,
        description: "Ignore rules that keep build output and secrets out of version control.",
        criteria: ".gitignore covers the language's standard patterns",
    },
    AttributeDef {
        id: "one_command_setup",
        name: "One-Command Build/Setup",
        category: "Build & Development",
        tier: Tier::Critical,
        description: "A single documented command that prepares a working development environment.",
        criteria: "Makefile, justfile, or setup script with a setup target",
    },
    AttributeDef {
        id: "separation_of_concerns",
        name: "Separation of Concerns",
        category: "Code Organization",
        tier: Tier::Critical,
        description: "Modules with focused responsibilities.",
        criteria: "No module mixes unrelated layers",
    },
    AttributeDef {
        id: "concise_documentation",
        name: "Concise Documentation",
        category: "Documentation Standards",
        tier: Tier::Critical,
        description: "Documentation that is structured for scanning rather than prose-heavy.",
        criteria: "README under 500 lines with headings and lists",
    },
    AttributeDef {
        id: "inline_documentation",
        name: "Inline Documentation",
        category: "Documentation Standards",
        tier: Tier::Critical,
        description: "Docstrings and doc comments on public interfaces.",
        criteria: ">80% of public functions documented",
    },
    AttributeDef {
        id: "dependency_security",
        name: "Dependency Security Scanning",
        category: "Security",
        tier: Tier::Critical,
        description: "Automated vulnerability scanning of dependencies.",
        criteria: "Dependabot, Renovate, or an audit step is configured",
    },
    AttributeDef {
        id: "file_size_limits",
        name: "File Size Limits",
        category: "Context Window Optimization",
        tier: Tier::Critical,
        description: "Source files small enough to fit comfortably in a context window.",
        criteria: "<5% of source files exceed 500 lines",
    },
    // Tier 3
    AttributeDef {
        id: "architecture_decisions",
        name: "Architecture Decision Records",
        category: "Documentation Standards",
        tier: Tier::Important,
        description: "Recorded rationale for significant design decisions.",
        criteria: "docs/adr or an equivalent ADR directory exists",
    },
    AttributeDef {
        id: "issue_pr_templates",
        name: "Issue & Pull Request Templates",
        category: "Repository Structure",
        tier: Tier::Important,
        description: "Templates that give contributions a predictable shape.",
        criteria: "PR template or issue templates under .github",
    },
    AttributeDef {
        id: "cicd_pipeline_visibility",
        name: "CI/CD Pipeline Visibility",
        category: "Testing & CI/CD",
        tier: Tier::Important,
        description: "Continuous integration configuration checked into the repository.",
        criteria: "CI workflow configuration exists",
    },
    AttributeDef {
        id: "semantic_naming",
        name: "Semantic Naming",
        category: "Code Quality",
        tier: Tier::Important,
        description: "Descriptive, consistent identifiers.",
        criteria: "Identifiers follow language naming conventions",
    },
    AttributeDef {
        id: "structured_logging",
        name: "Structured Logging",
        category: "Code Quality",
        tier: Tier::Important,
        description: "Machine-parseable log output.",
        criteria: "A structured logging library is used",
    },
    AttributeDef {
        id: "openapi_specs",
        name: "OpenAPI/Swagger Specifications",
        category: "API Documentation",
        tier: Tier::Important,
        description: "Machine-readable API contracts.",
        criteria: "openapi.yaml, openapi.json, or swagger file exists",
    },
    // Tier 4
    AttributeDef {
        id: "branch_protection",
        name: "Branch Protection Rules",
        category: "Git & Version Control",
        tier: Tier::Advanced,
        description: "Required reviews and status checks on the default branch.",
        criteria: "Default branch is protected",
    },
    AttributeDef {
        id: "code_smells",
        name: "Code Smell Elimination",
        category: "Code Quality",
        tier: Tier::Advanced,
        description: "Absence of common anti-patterns.",
        criteria: "Linter reports no code smells",
    },
    AttributeDef {
        id: "container_setup",
        name: "Container/Virtualization Setup",
        category: "Build & Development",
        tier: Tier::Advanced,
        description: "Reproducible containerized development or runtime environment.",
        criteria: "Dockerfile, Containerfile, or compose file exists",
    },
    AttributeDef {
        id: "cyclomatic_complexity",
        name: "Cyclomatic Complexity Thresholds",
        category: "Code Quality",
        tier: Tier::Advanced,
        description: "Functions with bounded branching complexity.",
        criteria: "Average cyclomatic complexity below 10",
    },
];

fn tier_share(tier: Tier) -> f64 {
    match tier {
        Tier::Essential => 0.50,
        Tier::Critical => 0.30,
        Tier::Important => 0.15,
        Tier::Advanced => 0.05,
    }
}

/// Static registry of attribute definitions, in canonical assessment order.
#[derive(Debug, Clone)]
pub struct AttributeCatalog {
    attributes: Vec<Attribute>,
}

impl AttributeCatalog {
    /// The 25 built-in attributes; default weights sum to 1.0.
    pub fn builtin() -> Self {
        let attributes = DEFS
            .iter()
            .map(|d| {
                let in_tier = DEFS.iter().filter(|o| o.tier == d.tier).count() as f64;
                Attribute {
                    id: d.id.to_string(),
                    name: d.name.to_string(),
                    category: d.category.to_string(),
                    tier: d.tier,
                    description: d.description.to_string(),
                    criteria: d.criteria.to_string(),
                    default_weight: tier_share(d.tier) / in_tier,
                }
            })
            .collect();
        Self { attributes }
    }

    /// A catalog over caller-supplied attributes. Each must be valid and
    /// ids must be unique.
    pub fn from_attributes(attributes: Vec<Attribute>) -> Result<Self, ValidationError> {
        let mut seen = BTreeSet::new();
        for attribute in &attributes {
            attribute.validate()?;
            if !seen.insert(attribute.id.as_str()) {
                return Err(ValidationError::DuplicateAttribute(attribute.id.clone()));
            }
        }
        Ok(Self { attributes })
    }

    pub fn get(&self, id: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter()
    }

    pub fn by_tier(&self, tier: Tier) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter().filter(move |a| a.tier == tier)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.attributes.iter().map(|a| a.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
