// src/bootstrap/runtime_tests.rs

use std::fs;
use std::path::Path;

use tempfile::tempdir;

use super::runtime::*;

fn embedded(path: &'static str, data: &'static [u8]) -> Embedded {
    Embedded {
        path,
        data,
        size: data.len(),
        executable: wants_executable(path),
    }
}

#[test]
fn executable_rule_uses_bin_segments_and_suffixes() {
    assert!(wants_executable("app/bin/run.sh"));
    assert!(wants_executable("bin/tool"));
    assert!(wants_executable("a/b/bin/c/d"));
    assert!(wants_executable("setup.py"));
    assert!(wants_executable("deep/dir/start.sh"));

    assert!(!wants_executable("bin"));
    assert!(!wants_executable("sbin/tool"));
    assert!(!wants_executable("cabin/notes.txt"));
    assert!(!wants_executable("README.md"));
    assert!(!wants_executable("script.pyc"));
}

#[test]
fn ensure_parent_dirs_creates_missing_levels() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("a/b/c/file.txt");

    ensure_parent_dirs(&target).unwrap();

    assert!(dir.path().join("a/b/c").is_dir());
    assert!(!target.exists());
    // Second call is a no-op.
    ensure_parent_dirs(&target).unwrap();
}

#[test]
fn ensure_parent_dirs_accepts_bare_names() {
    ensure_parent_dirs(Path::new("file.txt")).unwrap();
    ensure_parent_dirs(Path::new("/")).unwrap();
}

#[test]
fn ensure_parent_dirs_fails_when_a_parent_is_a_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("blocker"), "x").unwrap();
    assert!(ensure_parent_dirs(&dir.path().join("blocker/inner/file")).is_err());
}

#[test]
fn staging_dirs_are_unique_and_prefixed() {
    let dir = tempdir().unwrap();
    let first = create_staging_dir(dir.path(), "demo").unwrap();
    let second = create_staging_dir(dir.path(), "demo").unwrap();

    assert_ne!(first, second);
    for staging in [&first, &second] {
        assert!(staging.is_dir());
        let name = staging.file_name().unwrap().to_str().unwrap();
        let suffix = name.strip_prefix("demo_").unwrap();
        assert_eq!(suffix.len(), 6);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}

#[test]
fn staging_dir_creation_fails_without_a_temp_root() {
    let dir = tempdir().unwrap();
    assert!(create_staging_dir(&dir.path().join("missing"), "demo").is_err());
}

#[test]
fn extract_writes_exact_bytes_and_modes() {
    let dir = tempdir().unwrap();
    let script = embedded("app/bin/run.sh", b"X");
    let data = embedded("data/blob.bin", &[0, 255, 10, 13]);

    let script_path = extract_file(dir.path(), &script).unwrap();
    let data_path = extract_file(dir.path(), &data).unwrap();

    assert_eq!(fs::read(&script_path).unwrap(), b"X");
    assert_eq!(fs::read(&data_path).unwrap(), vec![0, 255, 10, 13]);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&script_path), 0o755);
        assert_eq!(mode(&data_path) & 0o111, 0);
    }
}

#[test]
fn extract_truncates_existing_files() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("note.txt"), "a much longer previous content").unwrap();

    extract_file(dir.path(), &embedded("note.txt", b"new")).unwrap();

    assert_eq!(fs::read(dir.path().join("note.txt")).unwrap(), b"new");
}

#[cfg(unix)]
#[test]
fn commands_run_in_order_inside_the_directory() {
    let dir = tempdir().unwrap();
    let commands = ["echo one > log", "echo two >> log", "pwd >> log"];

    assert_eq!(run_commands(dir.path(), &commands), Ok(3));

    let log = fs::read_to_string(dir.path().join("log")).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(&lines[..2], &["one", "two"]);
    assert_eq!(
        fs::canonicalize(lines[2]).unwrap(),
        fs::canonicalize(dir.path()).unwrap()
    );
}

#[cfg(unix)]
#[test]
fn first_failure_stops_the_sequence() {
    let dir = tempdir().unwrap();
    let commands = ["touch first", "exit 3", "touch third"];

    let failure = run_commands(dir.path(), &commands).unwrap_err();

    assert_eq!(failure.index, 2);
    assert_eq!(failure.command, "exit 3");
    assert_eq!(failure.code, Some(3));
    assert_eq!(failure.to_string(), "command 2 failed (exit status 3): exit 3");
    assert!(dir.path().join("first").exists());
    assert!(!dir.path().join("third").exists());
}

#[cfg(unix)]
#[test]
fn special_characters_reach_the_shell_unchanged() {
    let dir = tempdir().unwrap();
    let command = "printf '%s|%s' \"quoted \\\" mark\" 'back\\slash\ttab' > out";

    run_commands(dir.path(), &[command]).unwrap();

    let out = fs::read_to_string(dir.path().join("out")).unwrap();
    assert_eq!(out, "quoted \" mark|back\\slash\ttab");
}
