//! Traits related to remote git forges
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::{
    forge::{
        config::RemoteConfig,
        request::{
            CreateBranchRequest, CreatePrRequest, DirEntry, FileContent,
            GetFileContentRequest, PullRequest, UpdateFileRequest,
        },
    },
    result::Result,
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Forge: Send + Sync {
    fn repo_name(&self) -> String;
    fn remote_config(&self) -> RemoteConfig;
    fn default_branch(&self) -> String;
    /// Returns `None` when nothing exists at the requested path.
    async fn get_file_content(
        &self,
        req: GetFileContentRequest,
    ) -> Result<Option<FileContent>>;
    /// Lists the immediate children of a directory in a single request.
    async fn list_directory(
        &self,
        req: GetFileContentRequest,
    ) -> Result<Vec<DirEntry>>;
    async fn get_branch_sha(&self, branch: String) -> Result<String>;
    async fn create_branch(&self, req: CreateBranchRequest) -> Result<()>;
    async fn update_file(&self, req: UpdateFileRequest) -> Result<()>;
    async fn create_pr(&self, req: CreatePrRequest) -> Result<PullRequest>;
}
