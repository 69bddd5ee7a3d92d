// src/config/loader.rs

use std::path::Path;

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;
use crate::fs::FileSystem;

/// Name of the optional configuration file in the project root.
pub const CONFIG_FILE_NAME: &str = "Runpack.toml";

/// Parse configuration text into a `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let contents = fs.read_to_string(path.as_ref())?;
    let config: RawConfigFile = toml::from_str(&contents)?;
    Ok(config)
}

/// Load a configuration file and validate it.
pub fn load_and_validate(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(fs, path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Load `Runpack.toml` from `root`, falling back to defaults when the file
/// does not exist.
pub fn load_for_root(fs: &dyn FileSystem, root: &Path) -> Result<ConfigFile> {
    let path = root.join(CONFIG_FILE_NAME);
    if !fs.exists(&path) {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(ConfigFile::default());
    }
    debug!(path = %path.display(), "loading config file");
    load_and_validate(fs, &path)
}
