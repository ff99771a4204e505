#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to read a file, or list a directory, at an optional branch.
/// `None` reads from the default branch.
pub struct GetFileContentRequest {
    pub branch: Option<String>,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Decoded file content along with the blob sha required to update it.
pub struct FileContent {
    /// Relative path to the file starting from repo root
    pub path: String,
    pub sha: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Other,
}

impl EntryKind {
    /// Maps the `type` field reported by the contents API.
    pub fn from_api_type(kind: &str) -> Self {
        match kind {
            "file" => Self::File,
            "dir" => Self::Dir,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Immediate child of a remote directory.
pub struct DirEntry {
    pub name: String,
    pub path: String,
    pub kind: EntryKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to create a branch pointing at an existing commit.
pub struct CreateBranchRequest {
    pub branch: String,
    pub sha: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to replace the full content of an existing file, producing one
/// commit on `branch`. `sha` is the blob sha the update is based on; the
/// forge rejects the write if the file changed since it was read.
pub struct UpdateFileRequest {
    pub path: String,
    pub branch: String,
    pub message: String,
    pub content: String,
    pub sha: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to create a new pull request.
pub struct CreatePrRequest {
    pub head_branch: String,
    pub base_branch: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Pull request opened on the forge.
pub struct PullRequest {
    pub number: u64,
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_kind_maps_api_types() {
        assert_eq!(EntryKind::from_api_type("dir"), EntryKind::Dir);
        assert_eq!(EntryKind::from_api_type("file"), EntryKind::File);
        assert_eq!(EntryKind::from_api_type("symlink"), EntryKind::Other);
        assert_eq!(EntryKind::from_api_type("submodule"), EntryKind::Other);
    }
}
