//! `sitedesk` command line: evaluates project and sheet snapshots stored as
//! JSON and prints the derived result as JSON.

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, GlobalOpts};
