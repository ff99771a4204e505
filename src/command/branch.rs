//! Branch naming, branch creation and pull requests.
use log::*;

use crate::{
    config::Action,
    forge::{
        manager::ForgeManager,
        request::{CreateBranchRequest, CreatePrRequest, PullRequest},
    },
    result::Result,
};

/// Branch that receives every commit of a run. Deterministic for a given
/// action, target environment and date.
pub fn branch_name(action: Action, target_env: &str, today: &str) -> String {
    match action {
        Action::Pause => format!("pause-{target_env}-{today}"),
        Action::Resume => format!("resume-{target_env}-{today}"),
        Action::Push => format!("prod-push-{today}"),
    }
}

/// Fixed pull request title per action.
pub fn pr_title(action: Action, target_env: &str) -> String {
    match action {
        Action::Pause => format!("Freeze the {target_env} environment."),
        Action::Resume => format!("Unfreeze the {target_env} environment."),
        Action::Push => "Production Push.".to_string(),
    }
}

/// Creates `refs/heads/{branch}` at the default branch's head commit.
/// Fails if the branch already exists.
pub async fn create_branch(forge: &ForgeManager, branch: &str) -> Result<()> {
    let default_branch = forge.default_branch();
    let sha = forge.get_branch_sha(&default_branch).await?;

    info!("branching {branch} from {default_branch} at {sha}");

    forge
        .create_branch(CreateBranchRequest {
            branch: branch.to_string(),
            sha,
        })
        .await?;

    println!(
        r#"Created a "{branch}" branch in the "{}" remote repository"#,
        forge.repo_name()
    );

    Ok(())
}

/// Opens a pull request from `branch` into the default branch.
pub async fn create_pr(
    forge: &ForgeManager,
    branch: &str,
    title: String,
) -> Result<PullRequest> {
    let pr = forge
        .create_pr(CreatePrRequest {
            head_branch: branch.to_string(),
            base_branch: forge.default_branch(),
            title,
        })
        .await?;

    if let Some(url) = &pr.url {
        info!("opened pull request #{}: {url}", pr.number);
    }

    println!(
        r#"Created a pull request in the "{}" remote repository"#,
        forge.repo_name()
    );

    Ok(pr)
}
