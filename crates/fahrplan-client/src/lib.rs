//! CLI, schedule loading, selection store, terminal output
//!
//! This crate provides the `fahrplan` command-line interface.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod paint;
pub mod selection;
pub mod source;
pub mod terminal;
pub mod when;

pub use cli::Cli;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use source::Schedule;
