//! Common functionality shared between workflows
use log::*;

use crate::{
    forge::{
        manager::ForgeManager,
        request::{FileContent, UpdateFileRequest},
    },
    manifest::Application,
    result::Result,
};

/// Commits the rendered manifest over `file` on `branch` and reports the
/// update on stdout.
pub async fn commit_manifest(
    forge: &ForgeManager,
    file: FileContent,
    app: &Application,
    branch: &str,
    message: String,
) -> Result<()> {
    let content = app.render()?;

    debug!("committing {} to {branch}: {message}", file.path);

    forge
        .update_file(UpdateFileRequest {
            path: file.path,
            branch: branch.to_string(),
            message,
            content,
            sha: file.sha,
        })
        .await?;

    println!(
        r#"Updated the "{}" file in the "{branch}" branch of the "{}" remote repository"#,
        app.path(),
        forge.repo_name()
    );

    Ok(())
}
