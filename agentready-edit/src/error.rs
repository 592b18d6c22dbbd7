//! Error types for agentready-edit.
//!
//! Every variant describes why one fix (or one step) could not be applied.
//! The executor records them in the report; they never abort a batch.

use camino::Utf8PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    /// Target exists and the fix was built with the `fail` policy.
    #[error("refusing to overwrite existing file {0}")]
    FileExists(Utf8PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to start `{command}`: {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}{}", stderr_suffix(.stderr))]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("`{command}` timed out after {seconds}s")]
    CommandTimedOut { command: String, seconds: u64 },

    #[error("{failed} of {total} steps failed")]
    StepsFailed { failed: usize, total: usize },
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

impl EditError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, EditError::CommandTimedOut { .. })
    }
}

pub type EditResult<T> = Result<T, EditError>;

#[cfg(test)]
mod tests {
    use super::EditError;

    #[test]
    fn command_failure_includes_trimmed_stderr() {
        let err = EditError::CommandFailed {
            command: "pre-commit install".to_string(),
            status: "exit status: 1".to_string(),
            stderr: "  not a git repository\n".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "`pre-commit install` exited with exit status: 1: not a git repository"
        );
    }

    #[test]
    fn empty_stderr_is_omitted() {
        let err = EditError::CommandFailed {
            command: "false".to_string(),
            status: "exit status: 1".to_string(),
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "`false` exited with exit status: 1");
    }

    #[test]
    fn timeout_is_flagged() {
        let err = EditError::CommandTimedOut {
            command: "sleep 5".to_string(),
            seconds: 1,
        };
        assert!(err.is_timeout());
        assert!(err.to_string().contains("timed out after 1s"));
    }
}
