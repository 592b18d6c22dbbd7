//! Content templates for fixer-generated files.
//!
//! Placeholders are `{{name}}`. A missing template or an unbound placeholder is
//! an error the caller treats as a soft decline.

use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("template not found: {0}")]
    NotFound(String),

    #[error("template '{template}' requires parameter '{param}'")]
    MissingParam { template: String, param: String },

    #[error("template '{0}' has an unterminated placeholder")]
    Unterminated(String),
}

pub type TemplateParams = BTreeMap<String, String>;

pub trait TemplateRenderer {
    fn render(&self, template_id: &str, params: &TemplateParams) -> Result<String, TemplateError>;

    fn has_template(&self, template_id: &str) -> bool;
}

/// Templates compiled into the binary.
#[derive(Debug, Clone, Default)]
pub struct BuiltinTemplates;

impl BuiltinTemplates {
    fn source(template_id: &str) -> Option<&'static str> {
        BUILTIN
            .iter()
            .find(|(id, _)| *id == template_id)
            .map(|(_, src)| *src)
    }

    pub fn ids() -> impl Iterator<Item = &'static str> {
        BUILTIN.iter().map(|(id, _)| *id)
    }
}

impl TemplateRenderer for BuiltinTemplates {
    fn render(&self, template_id: &str, params: &TemplateParams) -> Result<String, TemplateError> {
        let src = Self::source(template_id)
            .ok_or_else(|| TemplateError::NotFound(template_id.to_string()))?;
        substitute(template_id, src, params)
    }

    fn has_template(&self, template_id: &str) -> bool {
        Self::source(template_id).is_some()
    }
}

pub fn substitute(
    template_id: &str,
    src: &str,
    params: &TemplateParams,
) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(src.len());
    let mut rest = src;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after
            .find("}}")
            .ok_or_else(|| TemplateError::Unterminated(template_id.to_string()))?;
        let key = after[..end].trim();
        let value = params.get(key).ok_or_else(|| TemplateError::MissingParam {
            template: template_id.to_string(),
            param: key.to_string(),
        })?;
        out.push_str(value);
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    Ok(out)
}

const BUILTIN: &[(&str, &str)] = &[
    ("claude_md", CLAUDE_MD),
    ("readme", README_MD),
    ("gitignore-python", GITIGNORE_PYTHON),
    ("gitignore-rust", GITIGNORE_RUST),
    ("gitignore-javascript", GITIGNORE_NODE),
    ("gitignore-typescript", GITIGNORE_NODE),
    ("gitignore-go", GITIGNORE_GO),
    ("gitignore-generic", GITIGNORE_GENERIC),
    ("precommit-python", PRECOMMIT_PYTHON),
    ("precommit-javascript", PRECOMMIT_NODE),
    ("precommit-typescript", PRECOMMIT_NODE),
    ("precommit-rust", PRECOMMIT_RUST),
    ("precommit-go", PRECOMMIT_GO),
];

const CLAUDE_MD: &str = r#"# {{repo_name}}

## Overview

<!-- One paragraph: what this repository is and who uses it. -->

## Tech Stack

- Primary language: {{primary_language}}

## Common Commands

```bash
# setup
# test
# lint
```

## Project Structure

<!-- Key directories and what lives in them. -->

## Conventions

<!-- Naming, error handling, and testing rules agents should follow. -->
"#;

const README_MD: &str = r#"# {{repo_name}}

<!-- Short description of the project. -->

## Installation

```bash
# install steps
```

## Usage

```bash
# basic usage
```

## Development

```bash
# run tests
```

## License

<!-- License name. -->
"#;

const GITIGNORE_GENERIC: &str = r#"# Environment
.env
.env.*

# Editors
.idea/
.vscode/
*.swp

# OS
.DS_Store
Thumbs.db
"#;

const GITIGNORE_PYTHON: &str = r#"# Python
__pycache__/
*.py[cod]
*.egg-info/
.venv/
venv/
build/
dist/
.pytest_cache/
.mypy_cache/
.coverage
htmlcov/

# Environment
.env

# OS
.DS_Store
"#;

const GITIGNORE_RUST: &str = r#"# Rust
/target/
**/*.rs.bk

# Environment
.env

# OS
.DS_Store
"#;

const GITIGNORE_NODE: &str = r#"# Node
node_modules/
dist/
build/
coverage/
npm-debug.log*

# Environment
.env

# OS
.DS_Store
"#;

const GITIGNORE_GO: &str = r#"# Go
/bin/
*.exe
*.test
*.out
vendor/

# Environment
.env

# OS
.DS_Store
"#;

const PRECOMMIT_PYTHON: &str = r#"repos:
  - repo: https://github.com/pre-commit/pre-commit-hooks
    rev: v4.6.0
    hooks:
      - id: trailing-whitespace
      - id: end-of-file-fixer
      - id: check-yaml
  - repo: https://github.com/psf/black
    rev: 24.4.2
    hooks:
      - id: black
  - repo: https://github.com/pycqa/isort
    rev: 5.13.2
    hooks:
      - id: isort
  - repo: https://github.com/astral-sh/ruff-pre-commit
    rev: v0.4.4
    hooks:
      - id: ruff
"#;

const PRECOMMIT_NODE: &str = r#"repos:
  - repo: https://github.com/pre-commit/pre-commit-hooks
    rev: v4.6.0
    hooks:
      - id: trailing-whitespace
      - id: end-of-file-fixer
      - id: check-json
  - repo: https://github.com/pre-commit/mirrors-prettier
    rev: v3.1.0
    hooks:
      - id: prettier
"#;

const PRECOMMIT_RUST: &str = r#"repos:
  - repo: https://github.com/pre-commit/pre-commit-hooks
    rev: v4.6.0
    hooks:
      - id: trailing-whitespace
      - id: end-of-file-fixer
      - id: check-toml
  - repo: local
    hooks:
      - id: cargo-fmt
        name: cargo fmt
        entry: cargo fmt --all --
        language: system
        types: [rust]
      - id: cargo-clippy
        name: cargo clippy
        entry: cargo clippy --all-targets -- -D warnings
        language: system
        types: [rust]
        pass_filenames: false
"#;

const PRECOMMIT_GO: &str = r#"repos:
  - repo: https://github.com/pre-commit/pre-commit-hooks
    rev: v4.6.0
    hooks:
      - id: trailing-whitespace
      - id: end-of-file-fixer
  - repo: https://github.com/dnephin/pre-commit-golang
    rev: v0.5.1
    hooks:
      - id: go-fmt
      - id: go-vet
"#;
