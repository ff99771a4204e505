pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod forge;
pub mod manifest;
pub mod path_helpers;
pub mod result;

pub use cli::Args;
pub use command::run::{execute, run};
pub use result::Result;

#[cfg(test)]
pub mod test_helpers;
