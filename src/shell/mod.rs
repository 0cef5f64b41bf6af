//! Shell module
//!
//! Command grammar, per-command handlers, and the interactive loop.

pub mod commands;
pub mod handlers;
pub mod repl;

pub use commands::{Command, parse_command};
pub use handlers::handle_command;
pub use repl::Shell;
