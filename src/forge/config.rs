//! Configuration for the remote repository connection.
use secrecy::SecretString;

/// Remote repository connection configuration for authenticating and
/// interacting with the forge.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Remote forge host (e.g., "github.com").
    pub host: String,
    /// URL scheme (http or https).
    pub scheme: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Full repository path, `owner/repo`.
    pub path: String,
    /// Access token for authentication. Lives for a single run only.
    pub token: SecretString,
    /// Log remote mutations instead of performing them.
    pub dry_run: bool,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            host: "".to_string(),
            scheme: "".to_string(),
            owner: "".to_string(),
            repo: "".to_string(),
            path: "".to_string(),
            token: SecretString::from("".to_string()),
            dry_run: false,
        }
    }
}

impl RemoteConfig {
    /// Base URI of the REST API. github.com is served from `api.github.com`
    /// while Enterprise hosts serve it under `/api/v3`.
    pub fn api_base_uri(&self) -> String {
        if self.host == "github.com" {
            format!("{}://api.{}", self.scheme, self.host)
        } else {
            format!("{}://{}/api/v3", self.scheme, self.host)
        }
    }
}
