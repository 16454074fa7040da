//! Mural shell - drives a shared board from line-oriented input.
//!
//! ```text
//! main() -> Args::load_config -> Backend::{Memory, Journaled} -> Shell::run(stdin, stdout)
//! ```

pub mod args;
pub mod commands;
pub mod shell;

pub use args::Args;
pub use commands::{Command, command_help};
pub use shell::{Backend, Outcome, Shell, ShellError, render_board};
