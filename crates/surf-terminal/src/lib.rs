//! Command interpreter for the surf terminal browser.
//!
//! The terminal is a registry-based dispatch system. Commands implement the
//! `Command` trait and are registered by name. The interpreter tokenizes
//! input lines, resolves the command name (or an alias), and dispatches
//! `execute()` against the browsing session held in the `Environment`.

mod commands;
mod interpreter;

/// Register every session command (and the `go`/`quit` aliases).
pub use commands::register_session_commands;
/// A single executable command trait.
pub use interpreter::Command;
/// Output produced by a command (text, table, page, signals).
pub use interpreter::CommandOutput;
/// Registry of available commands with dispatch.
pub use interpreter::CommandRegistry;
/// Shared mutable environment passed to every command.
pub use interpreter::Environment;
/// Split a command line into arguments.
pub use interpreter::tokenize;
