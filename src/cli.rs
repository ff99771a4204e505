//! CLI argument parsing and remote repository configuration.
use chrono::NaiveDate;
use clap::Parser;
use color_eyre::eyre::{ContextCompat, eyre};
use git_url_parse::GitUrl;
use secrecy::SecretString;
use std::env;

use crate::{
    config::{Action, DEFAULT_GITHUB_REPO, RunConfig},
    error::GitopsError,
    forge::config::RemoteConfig,
    result::Result,
};

/// Environment variable consulted when no token is passed on the command
/// line or embedded in the repository URL.
pub const GITHUB_TOKEN_VAR: &str = "GITHUB_TOKEN";

/// Pause, resume or promote the services of a GitOps repository by opening
/// a pull request.
#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long)]
    /// Environment to read deployed versions from (push).
    pub source_env: Option<String>,

    #[arg(long)]
    /// Environment whose manifests are edited.
    pub target_env: Option<String>,

    #[arg(long)]
    /// Action to perform: pause, resume or push. Anything else does nothing.
    pub action: Option<String>,

    #[arg(long, default_value = DEFAULT_GITHUB_REPO)]
    /// GitHub repository URL (https://github.com/owner/repo) or owner/repo.
    pub github_repo: String,

    #[arg(long, default_value = "")]
    /// GitHub personal access token. Falls back to GITHUB_TOKEN env var.
    pub github_token: String,

    #[arg(long, default_value_t = false)]
    /// Log the branch, commits and pull request that would be created
    /// without touching the remote repository.
    pub dry_run: bool,

    #[arg(long, default_value_t = false)]
    /// Enable debug logging.
    pub debug: bool,
}

impl Args {
    /// The selected action, if it is one this tool knows.
    pub fn action(&self) -> Option<Action> {
        self.action.as_deref().and_then(Action::parse)
    }

    /// Per-run configuration for `action`, stamped with `date`.
    pub fn run_config(
        &self,
        action: Action,
        date: NaiveDate,
    ) -> Result<RunConfig> {
        RunConfig::builder()
            .action(action)
            .source_env(self.source_env.clone())
            .target_env(self.target_env.clone())
            .date(date)
            .build()
    }

    /// Configure remote repository connection from CLI arguments.
    pub fn get_remote(&self) -> Result<RemoteConfig> {
        get_github_remote(&self.github_repo, &self.github_token, self.dry_run)
    }
}

/// Validate repository URL uses HTTP or HTTPS scheme.
fn validate_scheme(scheme: git_url_parse::Scheme) -> Result<()> {
    match scheme {
        git_url_parse::Scheme::Http => Ok(()),
        git_url_parse::Scheme::Https => Ok(()),
        _ => Err(eyre!(
            "only http and https schemes are supported for repo urls"
        )),
    }
}

/// Expands the `owner/repo` shorthand into a github.com URL.
fn expand_repo_shorthand(repo: &str) -> String {
    let is_shorthand = !repo.contains("://")
        && !repo.contains('@')
        && repo.split('/').filter(|p| !p.is_empty()).count() == 2;

    if is_shorthand {
        format!("https://github.com/{}", repo.trim_matches('/'))
    } else {
        repo.to_string()
    }
}

/// Picks the first non-empty token: flag, then URL, then environment.
fn resolve_token(
    flag_token: &str,
    url_token: Option<String>,
    env_token: Option<String>,
) -> Result<SecretString> {
    let token = [Some(flag_token.to_string()), url_token, env_token]
        .into_iter()
        .flatten()
        .find(|t| !t.is_empty())
        .ok_or(GitopsError::MissingToken)?;

    Ok(SecretString::from(token))
}

/// Configure GitHub remote with URL parsing and token resolution.
fn get_github_remote(
    github_repo: &str,
    github_token: &str,
    dry_run: bool,
) -> Result<RemoteConfig> {
    let repo_url = expand_repo_shorthand(github_repo);

    let parsed = GitUrl::parse(&repo_url).map_err(|e| {
        GitopsError::InvalidRepoUrl(format!("{repo_url}: {e}"))
    })?;

    validate_scheme(parsed.scheme)?;

    let token = resolve_token(
        github_token,
        parsed.token.clone(),
        env::var(GITHUB_TOKEN_VAR).ok(),
    )?;

    let host = parsed
        .host
        .ok_or(eyre!("unable to parse host from github repo"))?;

    let owner = parsed
        .owner
        .ok_or(eyre!("unable to parse owner from github repo"))?;

    let project_path = parsed
        .path
        .trim_end_matches(".git")
        .strip_prefix("/")
        .wrap_err("failed to process project path")?
        .to_string();

    Ok(RemoteConfig {
        host,
        scheme: parsed.scheme.to_string(),
        owner,
        repo: parsed.name,
        path: project_path,
        token,
        dry_run,
    })
}
