//! On-disk assessment history under `<repo>/.agentready/`.
//!
//! Layout, one pair of files per run plus stable "latest" copies:
//!
//! ```text
//! .agentready/
//!   assessment-20250102-030405-123.json
//!   assessment-latest.json
//!   report-20250102-030405-123.md
//!   report-latest.md
//! ```

use crate::ports::WritePort;
use agentready_render::render_assessment_md;
use agentready_types::assessment::Assessment;
use agentready_types::wire::AssessmentV1;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use tracing::debug;

pub const DEFAULT_DIR: &str = ".agentready";
const LATEST_JSON: &str = "assessment-latest.json";
const LATEST_MD: &str = "report-latest.md";

/// Paths written by one `save`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedPaths {
    pub json: Utf8PathBuf,
    pub latest_json: Utf8PathBuf,
    pub markdown: Utf8PathBuf,
    pub latest_markdown: Utf8PathBuf,
}

#[derive(Debug, Clone)]
pub struct AssessmentStore {
    dir: Utf8PathBuf,
}

impl AssessmentStore {
    pub fn new(dir: Utf8PathBuf) -> Self {
        Self { dir }
    }

    /// `<repo>/.agentready`, or `output_dir` (relative paths resolve against the repo).
    pub fn for_repo(repo_root: &Utf8Path, output_dir: Option<&Utf8Path>) -> Self {
        let dir = match output_dir {
            Some(d) if d.is_absolute() => d.to_path_buf(),
            Some(d) => repo_root.join(d),
            None => repo_root.join(DEFAULT_DIR),
        };
        Self { dir }
    }

    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    /// Write the JSON document and markdown report, each with a "latest" copy.
    pub fn save(&self, assessment: &Assessment, writer: &dyn WritePort) -> anyhow::Result<SavedPaths> {
        writer.create_dir_all(&self.dir)?;

        let base = assessment.timestamp().format("%Y%m%d-%H%M%S-%3f").to_string();
        let stamp = self.unused_stamp(&base);
        let wire = AssessmentV1::from(assessment);
        let json = serde_json::to_string_pretty(&wire).context("serialize assessment")?;
        let md = render_assessment_md(assessment);

        let paths = SavedPaths {
            json: self.dir.join(format!("assessment-{stamp}.json")),
            latest_json: self.dir.join(LATEST_JSON),
            markdown: self.dir.join(format!("report-{stamp}.md")),
            latest_markdown: self.dir.join(LATEST_MD),
        };
        writer.write_file(&paths.json, json.as_bytes())?;
        writer.write_file(&paths.latest_json, json.as_bytes())?;
        writer.write_file(&paths.markdown, md.as_bytes())?;
        writer.write_file(&paths.latest_markdown, md.as_bytes())?;
        debug!(dir = %self.dir, stamp = %stamp, "assessment saved");
        Ok(paths)
    }

    /// `base`, or `base_N` for the first N whose history files are both free.
    fn unused_stamp(&self, base: &str) -> String {
        let taken = |stamp: &str| {
            self.dir.join(format!("assessment-{stamp}.json")).exists()
                || self.dir.join(format!("report-{stamp}.md")).exists()
        };
        if !taken(base) {
            return base.to_string();
        }
        (1u32..)
            .map(|n| format!("{base}_{n}"))
            .find(|stamp| !taken(stamp))
            .unwrap_or_else(|| base.to_string())
    }

    pub fn load(&self, path: &Utf8Path) -> anyhow::Result<Assessment> {
        let text = fs::read_to_string(path).with_context(|| format!("read {}", path))?;
        let wire: AssessmentV1 =
            serde_json::from_str(&text).with_context(|| format!("parse {}", path))?;
        Assessment::try_from(wire).with_context(|| format!("validate {}", path))
    }

    /// `None` when no assessment has been saved yet.
    pub fn load_latest(&self) -> anyhow::Result<Option<Assessment>> {
        let latest = self.dir.join(LATEST_JSON);
        if !latest.exists() {
            return Ok(None);
        }
        self.load(&latest).map(Some)
    }

    /// Timestamped assessment files, oldest first.
    pub fn list(&self) -> anyhow::Result<Vec<Utf8PathBuf>> {
        let pattern = self.dir.join("assessment-*.json");
        let mut out = Vec::new();
        for entry in glob::glob(pattern.as_str()).context("invalid store glob")? {
            let path = entry.context("read store entry")?;
            let path = Utf8PathBuf::from_path_buf(path)
                .map_err(|p| anyhow::anyhow!("non-UTF-8 path {}", p.display()))?;
            if path.file_name() == Some(LATEST_JSON) {
                continue;
            }
            out.push(path);
        }
        out.sort();
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_dir_resolution() {
        let root = Utf8Path::new("/repo");
        assert_eq!(
            AssessmentStore::for_repo(root, None).dir(),
            Utf8Path::new("/repo/.agentready")
        );
        assert_eq!(
            AssessmentStore::for_repo(root, Some(Utf8Path::new("reports"))).dir(),
            Utf8Path::new("/repo/reports")
        );
        assert_eq!(
            AssessmentStore::for_repo(root, Some(Utf8Path::new("/tmp/out"))).dir(),
            Utf8Path::new("/tmp/out")
        );
    }
}
