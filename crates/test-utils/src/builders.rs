#![allow(dead_code)]

use runpack::config::{ConfigFile, RawConfigFile};
use runpack::types::UnreadablePolicy;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn max_files(mut self, limit: usize) -> Self {
        self.config.limits.max_files = limit;
        self
    }

    pub fn max_commands(mut self, limit: usize) -> Self {
        self.config.limits.max_commands = limit;
        self
    }

    pub fn exclude(mut self, pattern: &str) -> Self {
        self.config.collect.exclude.push(pattern.to_string());
        self
    }

    pub fn on_unreadable(mut self, policy: UnreadablePolicy) -> Self {
        self.config.collect.on_unreadable = policy;
        self
    }

    pub fn compiler(mut self, program: &str) -> Self {
        self.config.compiler.program = program.to_string();
        self
    }

    pub fn keep_source(mut self, keep: bool) -> Self {
        self.config.compiler.keep_source = keep;
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
