//! Common test helper functions shared across test modules.
//!
//! This module provides reusable fixtures for the forge mock so each test
//! only declares the expectations it cares about.
use secrecy::SecretString;

use crate::forge::{
    config::RemoteConfig,
    request::{DirEntry, EntryKind, FileContent},
    traits::MockForge,
};

/// Creates a test RemoteConfig pointing at github.com/test/repo.
pub fn create_test_remote_config() -> RemoteConfig {
    RemoteConfig {
        host: "github.com".to_string(),
        scheme: "https".to_string(),
        owner: "test".to_string(),
        repo: "repo".to_string(),
        path: "test/repo".to_string(),
        token: SecretString::from("test-token".to_string()),
        dry_run: false,
    }
}

/// Creates a MockForge answering the connection level questions: repo
/// name `repo`, default branch `main`, and [`create_test_remote_config`].
///
/// # Example
/// ```ignore
/// let mut mock_forge = mock_forge();
/// mock_forge.expect_update_file().returning(|_| Ok(()));
/// let manager = ForgeManager::new(Box::new(mock_forge));
/// ```
pub fn mock_forge() -> MockForge {
    let mut mock_forge = MockForge::new();
    mock_forge
        .expect_remote_config()
        .returning(create_test_remote_config);
    mock_forge
        .expect_repo_name()
        .returning(|| "repo".to_string());
    mock_forge
        .expect_default_branch()
        .returning(|| "main".to_string());
    mock_forge
}

/// A file as returned by the forge, with a blob sha derived from its path.
pub fn file(path: &str, content: &str) -> FileContent {
    FileContent {
        path: path.to_string(),
        sha: blob_sha(path),
        content: content.to_string(),
    }
}

/// Blob sha that [`file`] assigns to `path`.
pub fn blob_sha(path: &str) -> String {
    format!("sha-of-{path}")
}

/// Directory entry for a service directory under `parent`.
pub fn service_dir(parent: &str, name: &str) -> DirEntry {
    DirEntry {
        name: name.to_string(),
        path: format!("{parent}/{name}"),
        kind: EntryKind::Dir,
    }
}

/// Application manifest with the given annotations and helm parameters.
pub fn application_yaml(
    service: &str,
    annotations: &[(&str, &str)],
    parameters: &[(&str, &str)],
) -> String {
    let mut yaml = format!(
        "apiVersion: argoproj.io/v1alpha1\nkind: Application\nmetadata:\n  name: {service}\n"
    );

    if !annotations.is_empty() {
        yaml.push_str("  annotations:\n");
        for (key, value) in annotations {
            yaml.push_str(&format!("    {key}: \"{value}\"\n"));
        }
    }

    yaml.push_str("spec:\n  source:\n    helm:\n      parameters:\n");
    for (name, value) in parameters {
        yaml.push_str(&format!(
            "        - name: {name}\n          value: \"{value}\"\n"
        ));
    }

    yaml
}

/// Source-tracking file recording the given helm parameters.
pub fn source_tracking_yaml(parameters: &[(&str, &str)]) -> String {
    let mut yaml = "helm:\n  parameters:\n".to_string();
    for (name, value) in parameters {
        yaml.push_str(&format!(
            "    - name: {name}\n      value: \"{value}\"\n"
        ));
    }
    yaml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{Application, image_tag_from_source};

    #[test]
    fn application_yaml_parses() {
        let yaml = application_yaml(
            "svc",
            &[("a", "1")],
            &[("replicas", "3"), ("image.tag", "v1.0.0")],
        );
        let app = Application::parse("a.yaml", &yaml).unwrap();

        assert_eq!(app.annotations().unwrap().len(), 1);
        assert_eq!(app.helm_parameters().unwrap().len(), 2);
    }

    #[test]
    fn source_tracking_yaml_parses() {
        let yaml = source_tracking_yaml(&[("image.tag", "v1.2.3")]);
        assert_eq!(image_tag_from_source("s.yaml", &yaml).unwrap(), "v1.2.3");
    }

    #[test]
    fn file_uses_path_derived_sha() {
        let f = file("a/b.yaml", "x: 1\n");
        assert_eq!(f.sha, "sha-of-a/b.yaml");
    }
}
