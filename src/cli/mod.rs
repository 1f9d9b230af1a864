//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod export;
pub mod record;
pub mod shell;

pub use export::{handle_export_command, ExportArgs};
pub use record::{
    default_criteria, handle_categories, handle_list, handle_show, handle_summary, ListArgs,
};
pub use shell::{Shell, ShellOutcome};
