// src/config/mod.rs

//! Configuration loading and validation for runpack.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load `Runpack.toml` from the project root, if present (`loader.rs`).
//! - Validate limits, compiler settings and exclude patterns (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{CONFIG_FILE_NAME, load_and_validate, load_from_path, load_for_root};
pub use model::{CollectSection, CompilerSection, ConfigFile, LimitsSection, RawConfigFile};
