// src/script.rs

//! `Runfile` parsing.
//!
//! One shell command per line. Empty lines and lines whose first two
//! characters are `//` are ignored; everything else is kept verbatim.

use std::path::Path;

use tracing::debug;

use crate::errors::{Result, RunpackError};
use crate::fs::FileSystem;
use crate::project::RunCommand;

/// File name of the run script in the project root.
pub const RUN_SCRIPT_NAME: &str = "Runfile";

const COMMENT_PREFIX: &str = "//";

/// Read and parse the run script at `path`.
pub fn parse_run_script(
    fs: &dyn FileSystem,
    path: &Path,
    max_commands: usize,
) -> Result<Vec<RunCommand>> {
    if !fs.is_file(path) {
        return Err(RunpackError::MissingRunScript(path.to_path_buf()));
    }

    let bytes = fs.read(path).map_err(|err| RunpackError::Unreadable {
        path: path.to_path_buf(),
        reason: format!("{err:#}"),
    })?;
    let text = String::from_utf8(bytes).map_err(|_| {
        RunpackError::ConfigError(format!("{} is not valid UTF-8", path.display()))
    })?;

    let commands = parse_script_text(&text, max_commands)?;
    debug!(path = %path.display(), count = commands.len(), "parsed run script");
    Ok(commands)
}

/// Parse run-script text into commands, in line order.
pub fn parse_script_text(text: &str, max_commands: usize) -> Result<Vec<RunCommand>> {
    let mut commands = Vec::new();

    for line in text.split('\n') {
        if is_ignored(line) {
            continue;
        }
        if commands.len() >= max_commands {
            return Err(RunpackError::CapacityExceeded {
                kind: "commands",
                limit: max_commands,
            });
        }
        commands.push(RunCommand::new(line));
    }

    Ok(commands)
}

fn is_ignored(line: &str) -> bool {
    line.is_empty() || line.starts_with(COMMENT_PREFIX)
}
