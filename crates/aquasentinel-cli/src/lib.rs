//! AquaSentinel command-line front end
//!
//! Argument parsing and command execution for the `aquasentinel` binary.

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands};
pub use commands::{analyze_batch, run, BatchOutcome};
