use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// What the collector does with an entry it cannot read.
///
/// - `Skip`: log a warning naming the path and leave it out of the package
///   (default).
/// - `Abort`: stop the packaging run with [`RunpackError::Unreadable`].
///
/// [`RunpackError::Unreadable`]: crate::errors::RunpackError::Unreadable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnreadablePolicy {
    Skip,
    Abort,
}

impl Default for UnreadablePolicy {
    fn default() -> Self {
        UnreadablePolicy::Skip
    }
}

impl FromStr for UnreadablePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "skip" => Ok(UnreadablePolicy::Skip),
            "abort" => Ok(UnreadablePolicy::Abort),
            other => Err(format!(
                "invalid on_unreadable: {other} (expected \"skip\" or \"abort\")"
            )),
        }
    }
}

/// Stages of a packaging run, in the order they are entered.
///
/// `Failed` can follow `Collecting`, `Parsing` or `Compiling`; every other
/// transition happens only after the previous stage succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Collecting,
    Parsing,
    Generating,
    Compiling,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::Collecting => "collecting",
            Stage::Parsing => "parsing",
            Stage::Generating => "generating",
            Stage::Compiling => "compiling",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}
