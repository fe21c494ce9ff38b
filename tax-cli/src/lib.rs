//! `tax-engine` command-line front end.

pub mod app;
pub mod cli;
pub mod config;
pub mod logging;

pub use app::App;
pub use cli::{Cli, Command};
pub use config::CliConfig;
