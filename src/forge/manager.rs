//! Manager that wraps forge implementations
use log::*;

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

pub struct ForgeManager {
    forge: Box<dyn Forge>,
    remote_config: RemoteConfig,
}

impl ForgeManager {
    pub fn new(forge: Box<dyn Forge>) -> Self {
        let remote_config = forge.remote_config();
        Self {
            forge,
            remote_config,
        }
    }

    pub fn repo_name(&self) -> String {
        self.forge.repo_name()
    }

    pub fn remote_config(&self) -> RemoteConfig {
        self.remote_config.clone()
    }

    pub fn default_branch(&self) -> String {
        self.forge.default_branch()
    }

    pub async fn get_file_content(
        &self,
        req: GetFileContentRequest,
    ) -> Result<Option<FileContent>> {
        self.forge.get_file_content(req).await
    }

    /// Loads a file from the default branch, failing if it does not exist.
    pub async fn load_file(&self, path: &str) -> Result<FileContent> {
        debug!("loading {path} from {}", self.default_branch());
        self.get_file_content(GetFileContentRequest {
            branch: Some(self.default_branch()),
            path: path.to_string(),
        })
        .await?
        .ok_or_else(|| GitopsError::FileNotFound(path.to_string()).into())
    }

    /// Names of the immediate sub-directories of `dir` on the default
    /// branch, in the order the forge lists them. Files and other entry
    /// types are skipped.
    pub async fn list_subdirectories(&self, dir: &str) -> Result<Vec<String>> {
        let entries = self
            .forge
            .list_directory(GetFileContentRequest {
                branch: Some(self.default_branch()),
                path: dir.to_string(),
            })
            .await?;

        let names = entries
            .into_iter()
            .filter_map(|entry: DirEntry| {
                if entry.kind == EntryKind::Dir {
                    Some(entry.name)
                } else {
                    debug!("skipping non-directory entry: {}", entry.path);
                    None
                }
            })
            .collect::<Vec<String>>();

        debug!("found {} entries in {dir}: {:?}", names.len(), names);

        Ok(names)
    }

    pub async fn get_branch_sha(&self, branch: &str) -> Result<String> {
        self.forge.get_branch_sha(branch.to_string()).await
    }

    pub async fn create_branch(&self, req: CreateBranchRequest) -> Result<()> {
        if self.remote_config.dry_run {
            warn!("dry_run: would create branch: req: {:#?}", req);
            return Ok(());
        }
        self.forge.create_branch(req).await
    }

    pub async fn update_file(&self, req: UpdateFileRequest) -> Result<()> {
        if self.remote_config.dry_run {
            warn!(
                "dry_run: would commit {} to {}: {}\n{}",
                req.path, req.branch, req.message, req.content
            );
            return Ok(());
        }
        self.forge.update_file(req).await
    }

    pub async fn create_pr(&self, req: CreatePrRequest) -> Result<PullRequest> {
        if self.remote_config.dry_run {
            warn!("dry_run: would create PR: req: {:#?}", req);
            return Ok(PullRequest {
                number: 0,
                url: None,
            });
        }
        self.forge.create_pr(req).await
    }
}
