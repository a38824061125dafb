//! Command-line front end for `disrupt_core`.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod render;

pub use cli::{Args, Command};
pub use commands::{execute, run};
pub use config::{AppConfig, OutputFormat};
pub use logging::init_logging;
