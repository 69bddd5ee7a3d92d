// src/lib.rs

pub mod bootstrap;
pub mod build;
pub mod cli;
pub mod collect;
pub mod config;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod project;
pub mod script;
pub mod types;

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{error, info};

use crate::build::{Builder, CompilerBackend, RealCompiler};
use crate::cli::CliArgs;
use crate::collect::{ExcludeFilter, FileCollector};
use crate::config::{ConfigFile, load_for_root};
use crate::fs::{FileSystem, RealFileSystem};
use crate::project::{Project, project_name_for};
use crate::script::{RUN_SCRIPT_NAME, parse_run_script};
use crate::types::Stage;

/// Summary of a successful packaging run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageReport {
    pub project_name: String,
    pub binary: PathBuf,
    pub file_count: usize,
    pub command_count: usize,
    pub total_bytes: usize,
}

/// High-level entry point used by `main.rs`.
///
/// The current working directory is the project root. This wires together:
/// - config loading (`Runpack.toml`, optional)
/// - the real filesystem
/// - the real compiler backend
pub async fn run(_args: CliArgs) -> Result<()> {
    let root = std::env::current_dir()?;
    let fs = RealFileSystem;
    let cfg = load_for_root(&fs, &root)?;
    let mut compiler = RealCompiler::new();

    let report = package(&root, &cfg, &fs, &mut compiler).await?;
    println!(
        "packaged {} files and {} commands into {}",
        report.file_count,
        report.command_count,
        report.binary.display()
    );
    Ok(())
}

/// Package `root` into `<root>/<project>`.
///
/// Stages run strictly in order; the first error ends the run.
pub async fn package(
    root: &Path,
    cfg: &ConfigFile,
    fs: &dyn FileSystem,
    compiler: &mut dyn CompilerBackend,
) -> errors::Result<PackageReport> {
    let project_name = project_name_for(root);
    info!(stage = %Stage::Idle, project = %project_name, root = %root.display(), "packaging run");

    let result = run_stages(root, &project_name, cfg, fs, compiler).await;
    match &result {
        Ok(report) => info!(
            stage = %Stage::Done,
            files = report.file_count,
            commands = report.command_count,
            bytes = report.total_bytes,
            "packaging finished"
        ),
        Err(err) => error!(stage = %Stage::Failed, error = %err, "packaging failed"),
    }
    result
}

async fn run_stages(
    root: &Path,
    project_name: &str,
    cfg: &ConfigFile,
    fs: &dyn FileSystem,
    compiler: &mut dyn CompilerBackend,
) -> errors::Result<PackageReport> {
    info!(stage = %Stage::Collecting, "collecting files");
    let filter = ExcludeFilter::new(project_name, &cfg.collect.exclude)?;
    let collector = FileCollector::new(
        fs,
        filter,
        cfg.limits.max_files,
        cfg.collect.on_unreadable,
    );
    let files = collector.collect(root)?;

    info!(stage = %Stage::Parsing, files = files.len(), "parsing run script");
    let commands = parse_run_script(fs, &root.join(RUN_SCRIPT_NAME), cfg.limits.max_commands)?;

    let project = Project::new(project_name, files, commands);
    let file_count = project.files().len();
    let command_count = project.commands().len();
    let total_bytes = project.total_bytes();

    info!(stage = %Stage::Generating, commands = command_count, "generating bootstrap source");
    let source = bootstrap::generate(project);

    info!(stage = %Stage::Compiling, "compiling packaged executable");
    let mut builder = Builder::new(fs, compiler, &cfg.compiler);
    let binary = builder.build(root, project_name, &source).await?;

    Ok(PackageReport {
        project_name: project_name.to_string(),
        binary,
        file_count,
        command_count,
        total_bytes,
    })
}
