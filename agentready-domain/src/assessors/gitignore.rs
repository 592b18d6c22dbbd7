use super::Assessor;
use crate::fixers::GITIGNORE_MISSING;
use crate::ports::RepoView;
use agentready_types::attribute::Attribute;
use agentready_types::config::Config;
use agentready_types::finding::{Finding, Remediation};
use agentready_types::repository::Repository;
use camino::Utf8Path;

const PASS_THRESHOLD: f64 = 70.0;

const COMMON_PATTERNS: &[&str] = &[".DS_Store", ".env", ".idea/", ".vscode/", "*.log"];

fn language_patterns(language: &str) -> &'static [&'static str] {
    match language {
        "Python" => &["__pycache__/", "*.pyc", ".venv/", "dist/", "*.egg-info/"],
        "Rust" => &["target/"],
        "JavaScript" | "TypeScript" => &["node_modules/", "dist/", "coverage/"],
        "Go" => &["vendor/", "*.test"],
        "Java" => &["target/", "*.class", "build/"],
        "Ruby" => &[".bundle/", "vendor/bundle/"],
        _ => &[],
    }
}

/// Scores `.gitignore` by coverage of the patterns expected for the
/// repository's languages.
pub struct GitignoreAssessor {
    attribute: Attribute,
}

impl GitignoreAssessor {
    pub const ATTRIBUTE_ID: &'static str = "gitignore_completeness";

    pub fn new(attribute: Attribute) -> Self {
        Self { attribute }
    }

    fn expected(repository: &Repository) -> Vec<&'static str> {
        let mut expected: Vec<&'static str> = COMMON_PATTERNS.to_vec();
        for language in repository.languages.keys() {
            for p in language_patterns(language) {
                if !expected.contains(p) {
                    expected.push(p);
                }
            }
        }
        expected
    }
}

/// Entry matches when a line equals it, ignoring a leading `/` and trailing `/`.
fn covers(lines: &[&str], pattern: &str) -> bool {
    let want = pattern.trim_end_matches('/');
    lines.iter().any(|line| {
        let got = line.trim().trim_start_matches('/').trim_end_matches('/');
        got == want
    })
}

impl Assessor for GitignoreAssessor {
    fn attribute(&self) -> &Attribute {
        &self.attribute
    }

    fn assess(
        &self,
        repository: &Repository,
        repo: &dyn RepoView,
        _: &Config,
    ) -> anyhow::Result<Finding> {
        let path = Utf8Path::new(".gitignore");
        if !repo.exists(path) {
            let remediation = Remediation::new("Create a .gitignore for the project's languages")
                .with_steps(["Start from a language template", "Add editor and OS files"])
                .with_tools(["gitignore.io"]);
            return Ok(Finding::fail(self.attribute.clone(), 0.0, Some(remediation))?
                .with_measurement(GITIGNORE_MISSING, format!("{PASS_THRESHOLD}% coverage"))
                .with_evidence([".gitignore not found"]));
        }

        let contents = repo.read_to_string(path)?;
        let lines: Vec<&str> = contents
            .lines()
            .filter(|l| !l.trim().is_empty() && !l.trim_start().starts_with('#'))
            .collect();

        let expected = Self::expected(repository);
        let missing: Vec<&str> = expected
            .iter()
            .copied()
            .filter(|p| !covers(&lines, p))
            .collect();
        let covered = expected.len() - missing.len();
        let score = (covered as f64 / expected.len() as f64 * 100.0).round();

        let measured = format!("{covered}/{} patterns", expected.len());
        let threshold = format!("{PASS_THRESHOLD}% coverage");
        let mut evidence = vec![format!(".gitignore covers {measured}")];
        if !missing.is_empty() {
            evidence.push(format!("missing: {}", missing.join(", ")));
        }

        let finding = if score >= PASS_THRESHOLD {
            Finding::pass(self.attribute.clone(), score)?
        } else {
            let remediation = Remediation::new("Add the missing ignore patterns to .gitignore")
                .with_steps(missing.iter().map(|p| format!("Add {p}")));
            Finding::fail(self.attribute.clone(), score, Some(remediation))?
        };
        Ok(finding.with_measurement(measured, threshold).with_evidence(evidence))
    }
}
