use crate::config::{APPLICATION_FILE, ENVIRONMENTS_DIR};

/// Directory holding every service of an environment.
pub fn env_dir(env: &str) -> String {
    join(&[ENVIRONMENTS_DIR, env])
}

/// `environments/{env}/{service}/application.yaml`
pub fn manifest_path(env: &str, service: &str) -> String {
    join(&[ENVIRONMENTS_DIR, env, service, APPLICATION_FILE])
}

/// `{charts_dir}/{service}/.argocd-source-{service}-{env}.yaml`
pub fn source_tracking_path(
    charts_dir: &str,
    service: &str,
    env: &str,
) -> String {
    let file = format!(".argocd-source-{service}-{env}.yaml");
    join(&[charts_dir, service, &file])
}

fn join(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim_matches('/'))
        .filter(|p| !p.is_empty())
        .collect::<Vec<&str>>()
        .join("/")
}
