//! Command implementations

pub mod build;
pub mod clean;
pub mod completions;
pub mod count;
pub mod env;
pub mod install;
pub mod run;
