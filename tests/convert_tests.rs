#![cfg(unix)]

use convoy::{ConvertError, Converter, ScriptConverter};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write an executable shell script into `dir` and return its path.
fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[test]
fn test_zero_exit_status_is_success() {
    let dir = TempDir::new().unwrap();
    let converter = ScriptConverter::new(script(dir.path(), "ok.sh", "exit 0"));
    assert!(converter.convert(Path::new("anything.mp3")).is_ok());
}

#[test]
fn test_nonzero_exit_status_carries_the_code() {
    let dir = TempDir::new().unwrap();
    let converter = ScriptConverter::new(script(dir.path(), "fail.sh", "exit 3"));
    let err = converter.convert(Path::new("anything.mp3")).unwrap_err();
    assert!(matches!(err, ConvertError::Exit(3)));
}

#[test]
fn test_missing_program_is_a_spawn_error() {
    let converter = ScriptConverter::new("/nonexistent/convert.sh");
    let err = converter.convert(Path::new("anything.mp3")).unwrap_err();
    assert!(matches!(err, ConvertError::Spawn(_)));
}

#[test]
fn test_file_path_is_passed_as_the_only_argument() {
    let dir = TempDir::new().unwrap();
    let witness = dir.path().join("args.txt");
    let body = format!("printf '%s' \"$*\" > {}", witness.display());
    let converter = ScriptConverter::new(script(dir.path(), "record.sh", &body));

    converter.convert(Path::new("media/song.mp3")).unwrap();
    assert_eq!(fs::read_to_string(&witness).unwrap(), "media/song.mp3");
}
