//! CLI command implementations.

pub mod args;
pub mod output;

pub mod export;
pub mod links;
pub mod report;

pub use args::{Cli, Commands};
pub use output::Output;
