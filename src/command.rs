//! Workflows executed against the GitOps repository.
//!
//! - **annotation**: pause / resume image updates for one service
//! - **versions**: collect deployed image tags and write them into another
//!   environment
//! - **branch**: branch naming, branch creation and pull requests
//! - **run**: entry orchestration selecting one of the above per `--action`
//!
//! Every workflow follows the same shape: create a dated branch from the
//! default branch, commit one file per service onto it, then open a single
//! pull request. Nothing is retried or rolled back: a failure part way
//! through leaves the branch holding the commits made so far.

/// Pause and resume of argocd-image-updater per service.
pub mod annotation;

/// Branch and pull request helpers.
pub mod branch;

/// Shared helpers for committing edited manifests.
pub mod common;

/// Entry orchestration.
pub mod run;

/// Reading and writing deployed image tags.
pub mod versions;
