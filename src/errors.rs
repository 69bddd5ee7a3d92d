// src/errors.rs

//! Crate-wide error type and result alias.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunpackError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Run script not found: {}", .0.display())]
    MissingRunScript(PathBuf),

    #[error("Failed to read {}: {reason}", .path.display())]
    Unreadable { path: PathBuf, reason: String },

    #[error("Too many {kind}: the limit is {limit}")]
    CapacityExceeded { kind: &'static str, limit: usize },

    #[error(
        "Compilation failed ({detail}); inspect the generated source at {}",
        .source_path.display()
    )]
    CompileFailed { source_path: PathBuf, detail: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid exclude pattern: {0}")]
    PatternError(#[from] globset::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, RunpackError>;
