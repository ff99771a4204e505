//! Interface to the Git forge hosting the GitOps repository.
//!
//! Provides token-based authentication, file reads and commits, branch
//! creation and pull requests through a common trait so the workflow can
//! be exercised against a mock.

/// Configuration and authentication for the remote repository.
pub mod config;

/// GitHub API client implementation for GitHub.com and Enterprise.
pub mod github;

/// Dry-run aware wrapper around a forge implementation.
pub mod manager;

/// Request and response types shared by forge implementations.
pub mod request;

/// Common traits for forge platform abstraction.
pub mod traits;
