// src/config/validate.rs

use globset::Glob;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, RunpackError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::RunpackError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.limits, raw.collect, raw.compiler))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_limits(cfg)?;
    validate_compiler(cfg)?;
    validate_exclude_patterns(cfg)?;
    Ok(())
}

fn validate_limits(cfg: &RawConfigFile) -> Result<()> {
    if cfg.limits.max_files == 0 {
        return Err(RunpackError::ConfigError(
            "[limits].max_files must be >= 1 (got 0)".to_string(),
        ));
    }
    if cfg.limits.max_commands == 0 {
        return Err(RunpackError::ConfigError(
            "[limits].max_commands must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_compiler(cfg: &RawConfigFile) -> Result<()> {
    if cfg.compiler.program.trim().is_empty() {
        return Err(RunpackError::ConfigError(
            "[compiler].program must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_exclude_patterns(cfg: &RawConfigFile) -> Result<()> {
    for pattern in cfg.collect.exclude.iter() {
        Glob::new(pattern)?;
    }
    Ok(())
}
