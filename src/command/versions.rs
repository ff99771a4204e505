//! Collect the image tags deployed in one environment and write them into
//! the application manifests of another.
use log::*;
use std::collections::BTreeMap;

use crate::{
    command::common::commit_manifest,
    error::GitopsError,
    forge::manager::ForgeManager,
    manifest::{Application, image_tag_from_source},
    path_helpers::{env_dir, manifest_path, source_tracking_path},
    result::Result,
};

/// Service name to image tag.
pub type Versions = BTreeMap<String, String>;

/// Reads `{dir}/{service}/.argocd-source-{service}-{env}.yaml` for every
/// service directory under `dir` and returns the `image.tag` recorded in
/// each. Fails on the first service missing the file or the parameter.
pub async fn get_versions(
    forge: &ForgeManager,
    dir: &str,
    env: &str,
) -> Result<Versions> {
    let mut versions = Versions::new();

    for service in forge.list_subdirectories(dir).await? {
        let path = source_tracking_path(dir, &service, env);
        let file = forge.load_file(&path).await?;
        let tag = image_tag_from_source(&path, &file.content)?;

        debug!("{service} is running {tag} in {env}");

        versions.insert(service, tag);
    }

    info!("collected {} versions from {env}", versions.len());

    Ok(versions)
}

/// Rewrites the `image.tag` helm parameter of every service under
/// `environments/{env}` with the tag from `versions`, one commit per
/// service onto `branch`. Fails on the first service without a version.
pub async fn update_versions(
    forge: &ForgeManager,
    env: &str,
    versions: &Versions,
    branch: &str,
) -> Result<()> {
    for service in forge.list_subdirectories(&env_dir(env)).await? {
        let tag = versions
            .get(&service)
            .ok_or_else(|| GitopsError::MissingVersion(service.clone()))?;

        let path = manifest_path(env, &service);
        let file = forge.load_file(&path).await?;

        let mut app = Application::parse(&path, &file.content)?;
        app.set_image_tag(tag)?;

        info!("setting {service} to {tag} in {env}");

        commit_manifest(
            forge,
            file,
            &app,
            branch,
            format!("Updated {service} in {env}."),
        )
        .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        forge::request::{GetFileContentRequest, UpdateFileRequest},
        test_helpers::{
            self, application_yaml, file, service_dir, source_tracking_yaml,
        },
    };
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
    };

    type Updates = Arc<Mutex<Vec<UpdateFileRequest>>>;

    /// Mock forge listing `dirs` and serving `files` from the default
    /// branch. Every update is captured.
    fn forge_with(
        dirs: HashMap<String, Vec<String>>,
        files: HashMap<String, String>,
        updates: Updates,
    ) -> ForgeManager {
        let mut mock_forge = test_helpers::mock_forge();
        mock_forge.expect_list_directory().returning(
            move |req: GetFileContentRequest| {
                let names = dirs.get(&req.path).cloned().unwrap_or_default();
                Ok(names
                    .iter()
                    .map(|name| service_dir(&req.path, name))
                    .collect())
            },
        );
        mock_forge.expect_get_file_content().returning(
            move |req: GetFileContentRequest| {
                assert_eq!(req.branch.as_deref(), Some("main"));
                Ok(files.get(&req.path).map(|c| file(&req.path, c)))
            },
        );
        mock_forge.expect_update_file().returning(move |req| {
            updates.lock().unwrap().push(req);
            Ok(())
        });
        ForgeManager::new(Box::new(mock_forge))
    }

    fn dirs(dir: &str, names: &[&str]) -> HashMap<String, Vec<String>> {
        HashMap::from([(
            dir.to_string(),
            names.iter().map(|n| n.to_string()).collect(),
        )])
    }

    fn files(entries: &[(&str, String)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(path, content)| (path.to_string(), content.clone()))
            .collect()
    }

    fn params_of(content: &str) -> Vec<(String, String)> {
        Application::parse("a.yaml", content)
            .unwrap()
            .helm_parameters()
            .unwrap()
            .iter()
            .map(|p| {
                (
                    p["name"].as_str().unwrap().to_string(),
                    p["value"].as_str().unwrap().to_string(),
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn get_versions_reads_image_tag_per_service() {
        let forge = forge_with(
            dirs("helm-charts", &["svc"]),
            files(&[(
                "helm-charts/svc/.argocd-source-svc-dev.yaml",
                source_tracking_yaml(&[("image.tag", "v1.2.3")]),
            )]),
            Arc::default(),
        );

        let versions =
            get_versions(&forge, "helm-charts", "dev").await.unwrap();

        assert_eq!(
            versions,
            Versions::from([("svc".to_string(), "v1.2.3".to_string())])
        );
    }

    #[tokio::test]
    async fn get_versions_covers_every_service() {
        let forge = forge_with(
            dirs("helm-charts", &["api", "web"]),
            files(&[
                (
                    "helm-charts/api/.argocd-source-api-dev.yaml",
                    source_tracking_yaml(&[
                        ("replicas", "2"),
                        ("image.tag", "api-1"),
                    ]),
                ),
                (
                    "helm-charts/web/.argocd-source-web-dev.yaml",
                    source_tracking_yaml(&[("image.tag", "web-7")]),
                ),
            ]),
            Arc::default(),
        );

        let versions =
            get_versions(&forge, "helm-charts", "dev").await.unwrap();

        assert_eq!(versions.len(), 2);
        assert_eq!(versions["api"], "api-1");
        assert_eq!(versions["web"], "web-7");
    }

    #[tokio::test]
    async fn get_versions_fails_when_source_file_missing() {
        let forge = forge_with(
            dirs("helm-charts", &["svc"]),
            HashMap::new(),
            Arc::default(),
        );

        let err = get_versions(&forge, "helm-charts", "dev")
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<GitopsError>(),
            Some(GitopsError::FileNotFound(_))
        ));
    }

    #[tokio::test]
    async fn get_versions_fails_when_image_tag_missing() {
        let forge = forge_with(
            dirs("helm-charts", &["svc"]),
            files(&[(
                "helm-charts/svc/.argocd-source-svc-dev.yaml",
                source_tracking_yaml(&[("replicas", "1")]),
            )]),
            Arc::default(),
        );

        let err = get_versions(&forge, "helm-charts", "dev")
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<GitopsError>(),
            Some(GitopsError::MissingParameter { .. })
        ));
    }

    #[tokio::test]
    async fn update_versions_replaces_image_tag_and_keeps_order() {
        let updates: Updates = Arc::default();
        let forge = forge_with(
            dirs("environments/production", &["svc"]),
            files(&[(
                "environments/production/svc/application.yaml",
                application_yaml(
                    "svc",
                    &[],
                    &[("replicas", "3"), ("image.tag", "v1.0.0")],
                ),
            )]),
            Arc::clone(&updates),
        );
        let versions =
            Versions::from([("svc".to_string(), "v1.2.3".to_string())]);

        update_versions(&forge, "production", &versions, "prod-push-2024-01-01")
            .await
            .unwrap();

        let updates = updates.lock().unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(
            updates[0].path,
            "environments/production/svc/application.yaml"
        );
        assert_eq!(updates[0].branch, "prod-push-2024-01-01");
        assert_eq!(updates[0].message, "Updated svc in production.");
        assert_eq!(
            params_of(&updates[0].content),
            vec![
                ("replicas".to_string(), "3".to_string()),
                ("image.tag".to_string(), "v1.2.3".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn update_versions_leaves_a_single_image_tag() {
        let updates: Updates = Arc::default();
        let forge = forge_with(
            dirs("environments/production", &["svc"]),
            files(&[(
                "environments/production/svc/application.yaml",
                application_yaml(
                    "svc",
                    &[],
                    &[
                        ("image.tag", "a"),
                        ("image.tag", "b"),
                        ("replicas", "1"),
                        ("image.tag", "c"),
                    ],
                ),
            )]),
            Arc::clone(&updates),
        );
        let versions = Versions::from([("svc".to_string(), "d".to_string())]);

        update_versions(&forge, "production", &versions, "b")
            .await
            .unwrap();

        let params = params_of(&updates.lock().unwrap()[0].content);
        let tags = params.iter().filter(|(n, _)| n == "image.tag").count();
        assert_eq!(tags, 1);
        assert_eq!(params.last().unwrap().1, "d");
    }

    #[tokio::test]
    async fn update_versions_fails_for_service_without_version() {
        let updates: Updates = Arc::default();
        let forge = forge_with(
            dirs("environments/production", &["api", "web"]),
            files(&[
                (
                    "environments/production/api/application.yaml",
                    application_yaml("api", &[], &[("image.tag", "1")]),
                ),
                (
                    "environments/production/web/application.yaml",
                    application_yaml("web", &[], &[("image.tag", "1")]),
                ),
            ]),
            Arc::clone(&updates),
        );
        let versions = Versions::from([("api".to_string(), "2".to_string())]);

        let err = update_versions(&forge, "production", &versions, "b")
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<GitopsError>(),
            Some(GitopsError::MissingVersion(s)) if s == "web"
        ));
        // api was committed before web failed
        assert_eq!(updates.lock().unwrap().len(), 1);
    }
}
