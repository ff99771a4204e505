//! Pause and resume continuous delivery of a service by toggling the
//! argocd-image-updater ignore-tags annotation on its application manifest.
use log::*;

use crate::{
    command::common::commit_manifest, forge::manager::ForgeManager,
    manifest::Application, path_helpers::manifest_path, result::Result,
};

/// Pause continuous delivery of `service` in `env`: sets the ignore-tags
/// annotation to `*` and commits the manifest onto `branch`.
pub async fn pause(
    forge: &ForgeManager,
    env: &str,
    service: &str,
    branch: &str,
) -> Result<()> {
    let path = manifest_path(env, service);
    let file = forge.load_file(&path).await?;

    let mut app = Application::parse(&path, &file.content)?;
    app.pause(service)?;

    info!("pausing {service} in {env}");

    commit_manifest(
        forge,
        file,
        &app,
        branch,
        format!("Pause {service} in {env}."),
    )
    .await
}

/// Resume continuous delivery of `service` in `env`: removes the
/// ignore-tags annotation, if any, and commits the manifest onto `branch`.
pub async fn resume(
    forge: &ForgeManager,
    env: &str,
    service: &str,
    branch: &str,
) -> Result<()> {
    let path = manifest_path(env, service);
    let file = forge.load_file(&path).await?;

    let mut app = Application::parse(&path, &file.content)?;
    app.resume(service)?;

    info!("resuming {service} in {env}");

    commit_manifest(
        forge,
        file,
        &app,
        branch,
        format!("Resume {service} in {env}."),
    )
    .await
}
