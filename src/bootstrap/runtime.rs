//! Run-time support for packaged executables.
//!
//! This file is compiled into `runpack` and is also pasted unchanged into
//! every generated program as `mod runtime { ... }`, so it may only use `std`
//! and must not refer to anything outside itself.

use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// Mode for directories recreated during extraction.
pub const DIR_MODE: u32 = 0o755;

/// Mode for the staging directory itself.
pub const STAGING_MODE: u32 = 0o700;

/// Mode given to files that should be executable (rwxr-xr-x).
pub const EXECUTABLE_MODE: u32 = 0o755;

const SUFFIX_LEN: usize = 6;
const SUFFIX_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const MAX_STAGING_ATTEMPTS: u32 = 100;

/// One file baked into a packaged executable.
#[derive(Debug, Clone, Copy)]
pub struct Embedded {
    /// Relative path with forward slashes.
    pub path: &'static str,
    pub data: &'static [u8],
    pub size: usize,
    pub executable: bool,
}

/// Whether a relative path gets execute permission after extraction: any
/// file below a `bin` directory, and any `.py` or `.sh` file.
pub fn wants_executable(relative: &str) -> bool {
    if relative.ends_with(".py") || relative.ends_with(".sh") {
        return true;
    }
    let mut segments = relative.split('/');
    segments.next_back();
    segments.any(|segment| segment == "bin")
}

/// Create every missing directory above `path`, outermost first.
///
/// A path without a parent component (`"file.txt"`, `"/"`) needs nothing.
pub fn ensure_parent_dirs(path: &Path) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => return Ok(()),
    };
    if parent.is_dir() {
        return Ok(());
    }

    ensure_parent_dirs(parent)?;
    match make_dir(parent, DIR_MODE) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists && parent.is_dir() => Ok(()),
        Err(err) => Err(err),
    }
}

fn make_dir(dir: &Path, mode: u32) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;
    builder.create(dir)
}

/// Create `<temp_root>/<project>_XXXXXX` where `XXXXXX` is random.
///
/// Creation is atomic: an existing directory is never reused, a collision
/// just draws a new suffix.
pub fn create_staging_dir(temp_root: &Path, project: &str) -> io::Result<PathBuf> {
    for attempt in 0..MAX_STAGING_ATTEMPTS {
        let candidate = temp_root.join(format!("{}_{}", project, random_suffix(attempt)));
        match make_dir(&candidate, STAGING_MODE) {
            Ok(()) => return Ok(candidate),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(err) => return Err(err),
        }
    }
    Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        "no unused staging directory name found",
    ))
}

fn random_suffix(attempt: u32) -> String {
    use std::collections::hash_map::RandomState;
    use std::hash::{BuildHasher, Hasher};
    use std::time::{SystemTime, UNIX_EPOCH};

    let mut hasher = RandomState::new().build_hasher();
    hasher.write_u32(std::process::id());
    hasher.write_u32(attempt);
    if let Ok(elapsed) = SystemTime::now().duration_since(UNIX_EPOCH) {
        hasher.write_u128(elapsed.as_nanos());
    }

    let mut value = hasher.finish();
    let base = SUFFIX_ALPHABET.len() as u64;
    let mut suffix = String::with_capacity(SUFFIX_LEN);
    for _ in 0..SUFFIX_LEN {
        suffix.push(SUFFIX_ALPHABET[(value % base) as usize] as char);
        value /= base;
    }
    suffix
}

/// Write one embedded file below `root`, creating or truncating it.
pub fn extract_file(root: &Path, file: &Embedded) -> io::Result<PathBuf> {
    let target = root.join(file.path);
    ensure_parent_dirs(&target)?;
    fs::write(&target, &file.data[..file.size])?;
    if file.executable {
        mark_executable(&target)?;
    }
    Ok(target)
}

#[cfg(unix)]
pub fn mark_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(EXECUTABLE_MODE))
}

#[cfg(not(unix))]
pub fn mark_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}

/// The command that stopped a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFailure {
    /// 1-based position in the command list.
    pub index: usize,
    pub command: String,
    /// Exit code, when the shell ran and exited normally.
    pub code: Option<i32>,
    pub detail: String,
}

impl fmt::Display for CommandFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "command {} failed ({}): {}", self.index, self.detail, self.command)
    }
}

fn shell(command: &str) -> Command {
    if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(command);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(command);
        c
    }
}

fn describe(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// Run `commands` one at a time in `dir`, stopping at the first failure.
///
/// Returns how many commands ran.
pub fn run_commands(dir: &Path, commands: &[&str]) -> Result<usize, CommandFailure> {
    for (i, command) in commands.iter().enumerate() {
        let failure = |code, detail| CommandFailure {
            index: i + 1,
            command: command.to_string(),
            code,
            detail,
        };
        match shell(command).current_dir(dir).status() {
            Ok(status) if status.success() => {}
            Ok(status) => return Err(failure(status.code(), describe(status))),
            Err(err) => return Err(failure(None, format!("cannot start shell: {}", err))),
        }
    }
    Ok(commands.len())
}

/// Entry point of a packaged executable. Returns the process exit code.
pub fn run(project: &str, files: &[Embedded], commands: &[&str]) -> i32 {
    let staging = match create_staging_dir(&env::temp_dir(), project) {
        Ok(dir) => dir,
        Err(err) => {
            eprintln!("{}: cannot create staging directory: {}", project, err);
            return 1;
        }
    };

    let original_dir = env::current_dir().ok();
    if let Err(err) = env::set_current_dir(&staging) {
        eprintln!("{}: cannot enter {}: {}", project, staging.display(), err);
        let _ = fs::remove_dir_all(&staging);
        return 1;
    }

    for file in files {
        if let Err(err) = extract_file(&staging, file) {
            eprintln!("{}: cannot extract {}: {}", project, file.path, err);
        }
    }

    let exit_code = match run_commands(&staging, commands) {
        Ok(_) => 0,
        Err(failure) => {
            eprintln!("{}: {}", project, failure);
            1
        }
    };

    if let Some(dir) = original_dir {
        let _ = env::set_current_dir(dir);
    }
    let _ = fs::remove_dir_all(&staging);
    exit_code
}
