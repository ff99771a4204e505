//! Implements the Forge trait for Github
use async_trait::async_trait;
use color_eyre::eyre::{OptionExt, eyre};
use log::*;
use octocrab::{
    Octocrab,
    models::repos::{Content, ContentItems, Object},
    params::repos::Reference,
};
use reqwest::StatusCode;

use crate::{
    error::GitopsError,
    forge::{
        config::RemoteConfig,
        request::{
            CreateBranchRequest, CreatePrRequest, DirEntry, EntryKind,
            FileContent, GetFileContentRequest, PullRequest,
            UpdateFileRequest,
        },
        traits::Forge,
    },
    result::Result,
};

/// GitHub forge implementation using Octocrab for the contents, git refs
/// and pulls APIs.
pub struct Github {
    config: RemoteConfig,
    instance: Octocrab,
    default_branch: String,
}

impl Github {
    /// Create GitHub client with personal access token authentication and
    /// resolve the repository's default branch.
    pub async fn new(config: RemoteConfig) -> Result<Self> {
        let base_uri = config.api_base_uri();
        let builder = Octocrab::builder()
            .personal_token(config.token.clone())
            .base_uri(base_uri)?;
        let instance = builder.build()?;

        let repo = instance.repos(&config.owner, &config.repo).get().await?;
        let err_msg = format!(
            "failed to find default branch for github repo: {}",
            config.path
        );
        let default_branch = repo.default_branch.ok_or_eyre(err_msg)?;

        debug!(
            "connected to {}: default branch {default_branch}",
            config.path
        );

        Ok(Self {
            config,
            instance,
            default_branch,
        })
    }

    /// Fetches the contents API response for a path. `Ok(None)` on 404.
    async fn get_content_items(
        &self,
        req: &GetFileContentRequest,
    ) -> Result<Option<Vec<Content>>> {
        let repos = self.instance.repos(&self.config.owner, &self.config.repo);
        let mut builder = repos.get_content().path(&req.path);

        if let Some(branch) = &req.branch {
            builder = builder.r#ref(branch);
        }

        let result: octocrab::Result<ContentItems> = builder.send().await;

        match result {
            Err(octocrab::Error::GitHub { source, .. })
                if source.status_code == StatusCode::NOT_FOUND =>
            {
                debug!("no content found for path: {}", req.path);
                Ok(None)
            }
            Err(octocrab::Error::GitHub { source, backtrace }) => {
                let msg = format!(
                    "error getting contents for path: {}, status: {}, backtrace: {backtrace}",
                    req.path, source.status_code
                );
                error!("{msg}");
                Err(GitopsError::forge(msg).into())
            }
            Err(err) => {
                let msg = format!(
                    "encountered error getting contents for path: {}: {err}",
                    req.path
                );
                error!("{msg}");
                Err(GitopsError::forge(msg).into())
            }
            Ok(mut data) => Ok(Some(data.take_items())),
        }
    }
}

#[async_trait]
impl Forge for Github {
    fn repo_name(&self) -> String {
        self.config.repo.clone()
    }

    fn remote_config(&self) -> RemoteConfig {
        self.config.clone()
    }

    fn default_branch(&self) -> String {
        self.default_branch.clone()
    }

    async fn get_file_content(
        &self,
        req: GetFileContentRequest,
    ) -> Result<Option<FileContent>> {
        let Some(items) = self.get_content_items(&req).await? else {
            return Ok(None);
        };

        let Some(item) = items.into_iter().next() else {
            debug!("no file found for path: {}", req.path);
            return Ok(None);
        };

        if item.r#type != "file" {
            return Err(eyre!(
                "expected a file at {} but found a {}",
                req.path,
                item.r#type
            ));
        }

        let content = item
            .decoded_content()
            .ok_or_else(|| GitopsError::UndecodableContent(req.path.clone()))?;

        Ok(Some(FileContent {
            path: item.path,
            sha: item.sha,
            content,
        }))
    }

    async fn list_directory(
        &self,
        req: GetFileContentRequest,
    ) -> Result<Vec<DirEntry>> {
        let items = self
            .get_content_items(&req)
            .await?
            .ok_or_else(|| GitopsError::FileNotFound(req.path.clone()))?;

        // A single file response means the path was not a directory.
        if items.len() == 1 && items[0].path == req.path {
            return Err(eyre!("{} is not a directory", req.path));
        }

        Ok(items
            .into_iter()
            .map(|item| DirEntry {
                kind: EntryKind::from_api_type(&item.r#type),
                name: item.name,
                path: item.path,
            })
            .collect())
    }

    async fn get_branch_sha(&self, branch: String) -> Result<String> {
        let branch_ref = self
            .instance
            .repos(&self.config.owner, &self.config.repo)
            .get_ref(&Reference::Branch(branch.clone()))
            .await?;

        match branch_ref.object {
            Object::Commit { sha, .. } => Ok(sha),
            _ => Err(eyre!("failed to find sha of branch {branch}")),
        }
    }

    async fn create_branch(&self, req: CreateBranchRequest) -> Result<()> {
        let existing = self
            .instance
            .repos(&self.config.owner, &self.config.repo)
            .get_ref(&Reference::Branch(req.branch.clone()))
            .await;

        if existing.is_ok() {
            return Err(GitopsError::BranchExists(req.branch).into());
        }

        info!("creating branch {} at {}", req.branch, req.sha);

        self.instance
            .repos(&self.config.owner, &self.config.repo)
            .create_ref(&Reference::Branch(req.branch), req.sha)
            .await?;

        Ok(())
    }

    async fn update_file(&self, req: UpdateFileRequest) -> Result<()> {
        debug!(
            "updating {} on {} based on blob {}",
            req.path, req.branch, req.sha
        );

        self.instance
            .repos(&self.config.owner, &self.config.repo)
            .update_file(req.path, req.message, req.content, req.sha)
            .branch(req.branch)
            .send()
            .await?;

        Ok(())
    }

    async fn create_pr(&self, req: CreatePrRequest) -> Result<PullRequest> {
        let pr = self
            .instance
            .pulls(&self.config.owner, &self.config.repo)
            .create(req.title, req.head_branch, req.base_branch)
            .send()
            .await?;

        Ok(PullRequest {
            number: pr.number,
            url: pr.html_url.map(|u| u.to_string()),
        })
    }
}
