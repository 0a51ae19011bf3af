//! Shared fixtures for unit tests.

use std::fs;
use std::path::{Path, PathBuf};

/// Write a fake package manager script into `dir` and return the command
/// line that runs it.
///
/// The script runs `body` with the tool's arguments in `$@`. It is invoked
/// as `sh <script>`, never exec'd directly (ETXTBSY under parallel tests).
#[cfg(unix)]
pub fn fake_tool(dir: &Path, body: &str) -> String {
    let path = dir.join("fake-pm");
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    format!("sh {}", path.display())
}

/// Write `content` to `requirements.txt` in `dir`.
pub fn write_manifest(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("requirements.txt");
    fs::write(&path, content).unwrap();
    path
}
