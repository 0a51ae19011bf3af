//! External command execution and platform helpers.

pub mod command;
pub mod platform;

pub use command::{execute, quote_arg, CommandOptions, CommandResult, CommandSpec};
pub use platform::{find_program, is_ci};
