//! Command-line interface for provision.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{CheckArgs, Cli, Commands, CompletionsArgs, ListArgs, OverrideArgs, RunArgs};
pub use commands::{Command, CommandDispatcher, CommandResult, ConfigSource};
