// src/config/model.rs

use serde::Deserialize;

use crate::types::UnreadablePolicy;

/// Configuration as read from `Runpack.toml`.
///
/// ```toml
/// [limits]
/// max_files = 1000
/// max_commands = 100
///
/// [collect]
/// exclude = ["target/**", ".git/**"]
/// on_unreadable = "skip"
///
/// [compiler]
/// program = "rustc"
/// opt_flag = "-O"
/// extra_args = ["--edition=2021"]
/// keep_source = false
/// ```
///
/// All sections are optional and have reasonable defaults. A missing file is
/// the same as an empty one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub limits: LimitsSection,

    #[serde(default)]
    pub collect: CollectSection,

    #[serde(default)]
    pub compiler: CompilerSection,
}

/// Validated configuration. Only obtainable through `TryFrom<RawConfigFile>`
/// (see `validate.rs`) or [`ConfigFile::default`].
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub limits: LimitsSection,
    pub collect: CollectSection,
    pub compiler: CompilerSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        limits: LimitsSection,
        collect: CollectSection,
        compiler: CompilerSection,
    ) -> Self {
        Self {
            limits,
            collect,
            compiler,
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new_unchecked(
            LimitsSection::default(),
            CollectSection::default(),
            CompilerSection::default(),
        )
    }
}

/// `[limits]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsSection {
    /// Maximum number of files embedded into one package.
    #[serde(default = "default_max_files")]
    pub max_files: usize,

    /// Maximum number of commands accepted from the run script.
    #[serde(default = "default_max_commands")]
    pub max_commands: usize,
}

fn default_max_files() -> usize {
    1000
}

fn default_max_commands() -> usize {
    100
}

impl Default for LimitsSection {
    fn default() -> Self {
        Self {
            max_files: default_max_files(),
            max_commands: default_max_commands(),
        }
    }
}

/// `[collect]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectSection {
    /// Extra glob patterns, matched against root-relative paths with forward
    /// slashes. These come on top of the built-in exclusions.
    #[serde(default)]
    pub exclude: Vec<String>,

    #[serde(default)]
    pub on_unreadable: UnreadablePolicy,
}

/// `[compiler]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompilerSection {
    #[serde(default = "default_program")]
    pub program: String,

    #[serde(default = "default_opt_flag")]
    pub opt_flag: String,

    /// Passed after `opt_flag` and before the crate name and source file.
    #[serde(default = "default_extra_args")]
    pub extra_args: Vec<String>,

    /// Keep `<project>_packaged.rs` even when compilation succeeds.
    #[serde(default)]
    pub keep_source: bool,
}

fn default_program() -> String {
    "rustc".to_string()
}

fn default_opt_flag() -> String {
    "-O".to_string()
}

fn default_extra_args() -> Vec<String> {
    vec!["--edition=2021".to_string()]
}

impl Default for CompilerSection {
    fn default() -> Self {
        Self {
            program: default_program(),
            opt_flag: default_opt_flag(),
            extra_args: default_extra_args(),
            keep_source: false,
        }
    }
}
