//! Entry orchestration: one branch, one edit per service, one pull request.
use chrono::NaiveDate;
use log::*;

use crate::{
    cli::Args,
    command::{
        annotation,
        branch::{branch_name, create_branch, create_pr, pr_title},
        versions::{get_versions, update_versions},
    },
    config::{Action, CHARTS_DIR, RunConfig},
    error::GitopsError,
    forge::{github::Github, manager::ForgeManager, request::PullRequest},
    path_helpers::env_dir,
    result::Result,
};

/// Resolves the remote from `args`, connects to it and runs the selected
/// action stamped with `today`. The token is resolved before anything
/// else so a missing credential always fails. Unrecognized or missing
/// actions log a warning and do nothing.
pub async fn run(args: &Args, today: NaiveDate) -> Result<()> {
    let remote = args.get_remote()?;

    let Some(action) = args.action() else {
        warn!(
            "unrecognized action {:?}: expected one of pause, resume, push; nothing to do",
            args.action.as_deref().unwrap_or_default()
        );
        return Ok(());
    };

    let config = args.run_config(action, today)?;

    if remote.dry_run {
        warn!("dry_run: no changes will be made to {}", remote.path);
    }

    let github = Github::new(remote).await?;
    let forge = ForgeManager::new(Box::new(github));

    execute(&forge, &config).await?;

    Ok(())
}

/// Creates the run's branch, applies the action to every service and opens
/// the pull request.
pub async fn execute(
    forge: &ForgeManager,
    config: &RunConfig,
) -> Result<PullRequest> {
    let target_env = config.target_env.as_str();
    let branch = branch_name(config.action, target_env, &config.today());

    info!(
        "running {} against {target_env} on branch {branch}",
        config.action
    );

    create_branch(forge, &branch).await?;

    match config.action {
        Action::Pause => {
            let services =
                forge.list_subdirectories(&env_dir(target_env)).await?;
            for service in services {
                annotation::pause(forge, target_env, &service, &branch).await?;
            }
        }
        Action::Resume => {
            let services =
                forge.list_subdirectories(&env_dir(target_env)).await?;
            for service in services {
                annotation::resume(forge, target_env, &service, &branch)
                    .await?;
            }
        }
        Action::Push => {
            let source_env = config.source_env.as_deref().ok_or(
                GitopsError::MissingArgument {
                    action: config.action.as_str(),
                    flag: "source-env",
                },
            )?;

            let versions = get_versions(forge, CHARTS_DIR, source_env).await?;
            debug!("versions from {source_env}: {:#?}", versions);

            update_versions(forge, target_env, &versions, &branch).await?;
        }
    }

    create_pr(forge, &branch, pr_title(config.action, target_env)).await
}
