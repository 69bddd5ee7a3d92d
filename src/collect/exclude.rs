// src/collect/exclude.rs

//! Decides which walked files stay out of the package.

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::collect::path_utils::file_name_of;
use crate::errors::Result;

/// Suffix of the generated intermediate source (`<project>_packaged.rs`).
pub const GENERATED_SOURCE_SUFFIX: &str = "_packaged.rs";

/// Any file name containing this is treated as an object file.
pub const OBJECT_FILE_MARKER: &str = ".o";

/// Name of the packaging tool's own binary.
pub const TOOL_BINARY_NAME: &str = env!("CARGO_PKG_NAME");

/// Why a file was left out. Used for debug logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    OutputBinary,
    ToolBinary,
    GeneratedSource,
    ObjectFile,
    Pattern,
}

/// Built-in exclusions plus optional user globs.
#[derive(Debug, Clone)]
pub struct ExcludeFilter {
    output_name: String,
    patterns: GlobSet,
}

impl ExcludeFilter {
    pub fn new(output_name: impl Into<String>, patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(Glob::new(pattern)?);
        }
        Ok(Self {
            output_name: output_name.into(),
            patterns: builder.build()?,
        })
    }

    /// Check a root-relative, forward-slash path.
    ///
    /// The built-in rules look at the file name only, so they apply at any
    /// depth. Globs are matched against the whole relative path.
    pub fn check(&self, relative: &str) -> Option<Exclusion> {
        let name = file_name_of(relative);

        if name == self.output_name {
            return Some(Exclusion::OutputBinary);
        }
        if name == TOOL_BINARY_NAME {
            return Some(Exclusion::ToolBinary);
        }
        if name.contains(GENERATED_SOURCE_SUFFIX) {
            return Some(Exclusion::GeneratedSource);
        }
        if name.contains(OBJECT_FILE_MARKER) {
            return Some(Exclusion::ObjectFile);
        }
        if self.patterns.is_match(relative) {
            return Some(Exclusion::Pattern);
        }
        None
    }

    pub fn is_excluded(&self, relative: &str) -> bool {
        self.check(relative).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(patterns: &[&str]) -> ExcludeFilter {
        let patterns: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        ExcludeFilter::new("demo", &patterns).unwrap()
    }

    #[test]
    fn output_binary_is_excluded_at_any_depth() {
        let f = filter(&[]);
        assert_eq!(f.check("demo"), Some(Exclusion::OutputBinary));
        assert_eq!(f.check("nested/dir/demo"), Some(Exclusion::OutputBinary));
        assert_eq!(f.check("demo.txt"), None);
    }

    #[test]
    fn tool_binary_is_excluded() {
        assert_eq!(filter(&[]).check("runpack"), Some(Exclusion::ToolBinary));
    }

    #[test]
    fn generated_source_is_excluded() {
        let f = filter(&[]);
        assert_eq!(f.check("demo_packaged.rs"), Some(Exclusion::GeneratedSource));
        assert_eq!(f.check("old/other_packaged.rs.bak"), Some(Exclusion::GeneratedSource));
    }

    #[test]
    fn object_marker_matches_anywhere_in_the_name() {
        let f = filter(&[]);
        assert_eq!(f.check("build/main.o"), Some(Exclusion::ObjectFile));
        assert_eq!(f.check("notes.old"), Some(Exclusion::ObjectFile));
        // Directory names are not checked, only the file name.
        assert_eq!(f.check("x.out/readme"), None);
    }

    #[test]
    fn user_globs_match_relative_paths() {
        let f = filter(&["target/**", "*.log"]);
        assert_eq!(f.check("target/debug/app"), Some(Exclusion::Pattern));
        assert_eq!(f.check("run.log"), Some(Exclusion::Pattern));
        assert_eq!(f.check("src/main.rs"), None);
    }

    #[test]
    fn ordinary_files_pass() {
        let f = filter(&[]);
        assert!(!f.is_excluded("Runfile"));
        assert!(!f.is_excluded("app/bin/run.sh"));
    }
}
