//! Fixed repository layout and per-run configuration.
use chrono::NaiveDate;
use color_eyre::eyre::eyre;
use derive_builder::Builder;
use std::fmt;

use crate::{error::GitopsError, result::Result};

/// Directory holding one sub-directory per environment.
pub const ENVIRONMENTS_DIR: &str = "environments";
/// Directory of helm charts enumerated when collecting versions for a push.
pub const CHARTS_DIR: &str = "helm-charts";
/// Argo CD application manifest file name inside each service directory.
pub const APPLICATION_FILE: &str = "application.yaml";
/// Helm parameter carrying the deployed image tag.
pub const IMAGE_TAG_PARAM: &str = "image.tag";
/// Value of the ignore-tags annotation that freezes every tag.
pub const IGNORE_TAGS_VALUE: &str = "*";
/// Date format used in branch names.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Repository edited when no --github-repo is given.
pub const DEFAULT_GITHUB_REPO: &str = "https://github.com/antonputra/k8s";

/// Workflow selected with `--action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Freeze image updates for every service in the target environment.
    Pause,
    /// Unfreeze image updates for every service in the target environment.
    Resume,
    /// Copy deployed image tags from the source into the target environment.
    Push,
}

impl Action {
    /// Matches the action name exactly. Anything else yields `None` and the
    /// run does nothing.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "pause" => Some(Self::Pause),
            "resume" => Some(Self::Resume),
            "push" => Some(Self::Push),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::Push => "push",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Builder)]
#[builder(setter(into), build_fn(private, name = "_build"))]
pub struct RunConfigParams {
    pub action: Action,
    #[builder(default)]
    pub source_env: Option<String>,
    #[builder(default)]
    pub target_env: Option<String>,
    pub date: NaiveDate,
}

impl RunConfigParamsBuilder {
    pub fn build(&self) -> Result<RunConfig> {
        let params = self
            ._build()
            .map_err(|e| eyre!("failed to build run config: {e}"))?;
        RunConfig::new(params)
    }
}

/// Everything a single invocation needs besides the remote connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub action: Action,
    pub source_env: Option<String>,
    pub target_env: String,
    pub date: NaiveDate,
}

impl RunConfig {
    pub fn builder() -> RunConfigParamsBuilder {
        RunConfigParamsBuilder::default()
    }

    fn new(params: RunConfigParams) -> Result<Self> {
        let target_env = non_empty(params.target_env).ok_or(
            GitopsError::MissingArgument {
                action: params.action.as_str(),
                flag: "target-env",
            },
        )?;

        let source_env = non_empty(params.source_env);

        if params.action == Action::Push && source_env.is_none() {
            return Err(GitopsError::MissingArgument {
                action: params.action.as_str(),
                flag: "source-env",
            }
            .into());
        }

        Ok(Self {
            action: params.action,
            source_env,
            target_env,
            date: params.date,
        })
    }

    /// Date stamp embedded in branch names.
    pub fn today(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
