//! Plinth CLI
//!
//! Library half of the `plinth` binary: configuration, literal parsing and
//! the subcommands, each rendering its output as a `String` so it can be
//! tested without a terminal.

pub mod commands;
pub mod config;
pub mod error;
pub mod literal;

pub use config::PlinthConfig;
pub use error::CliError;
