//! Result type used throughout the gitops tool.
//!
//! Errors are reported through `color-eyre`, which renders the full chain
//! of `.wrap_err()` contexts when the process exits with a failure. Since
//! nothing in this tool recovers from errors, a single report type is all
//! the call sites need.
//!
//! ```rust,ignore
//! use color_eyre::eyre::WrapErr;
//! use crate::result::Result;
//!
//! fn load(path: &str) -> Result<String> {
//!     let content = std::fs::read_to_string(path)
//!         .wrap_err_with(|| format!("failed to read {path}"))?;
//!     Ok(content)
//! }
//! ```

use color_eyre::eyre::Result as EyreResult;

/// Standard result type: an alias for `color_eyre::eyre::Result<T>`.
pub type Result<T> = EyreResult<T>;
