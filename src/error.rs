//! Typed failures raised by the gitops workflow.
//!
//! These are converted into `color_eyre::Report` at the call site so
//! callers still deal with a single [`crate::result::Result`], while tests
//! can downcast to assert on the exact failure.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitopsError {
    #[error("must set github token: pass --github-token or set GITHUB_TOKEN")]
    MissingToken,

    #[error("the {action} action requires --{flag}")]
    MissingArgument {
        action: &'static str,
        flag: &'static str,
    },

    #[error("Invalid repository URL: {0}")]
    InvalidRepoUrl(String),

    #[error("no file found for path: {0}")]
    FileNotFound(String),

    #[error("failed to decode file content for path: {0}")]
    UndecodableContent(String),

    #[error("{path}: missing or malformed field `{field}`")]
    ManifestField { path: String, field: String },

    #[error("{path}: no `{param}` helm parameter found")]
    MissingParameter { path: String, param: String },

    #[error("no version collected for service {0}")]
    MissingVersion(String),

    #[error("branch {0} already exists")]
    BranchExists(String),

    #[error("Forge operation failed: {0}")]
    Forge(String),
}

impl GitopsError {
    /// Create a manifest field error with context
    pub fn manifest_field(
        path: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        Self::ManifestField {
            path: path.into(),
            field: field.into(),
        }
    }

    /// Create a forge error with context
    pub fn forge(msg: impl Into<String>) -> Self {
        Self::Forge(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_field_error_names_path_and_field() {
        let err = GitopsError::manifest_field(
            "environments/dev/svc/application.yaml",
            "metadata",
        );
        assert_eq!(
            err.to_string(),
            "environments/dev/svc/application.yaml: missing or malformed field `metadata`"
        );
    }

    #[test]
    fn missing_argument_error_names_flag() {
        let err = GitopsError::MissingArgument {
            action: "push",
            flag: "source-env",
        };
        assert_eq!(err.to_string(), "the push action requires --source-env");
    }
}
