//! CLI module - argument parsing and subcommands

mod args;
pub mod inspect;

pub use args::{Cli, Commands};
