// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! `runpack` takes no options: the current working directory is the project
//! root and `Runfile` in it is the run script. Parsing still goes through
//! `clap` so `--help` and `--version` behave as expected.

use clap::Parser;

/// Command-line arguments for `runpack`.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "runpack",
    version,
    about = "Package the current directory and its Runfile into a self-extracting executable.",
    long_about = None
)]
pub struct CliArgs {}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
