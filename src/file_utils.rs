// File utilities for the video transcriber
//
// This module handles the per-request scratch workspace and locating the
// downloaded audio artifact inside it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;
use tempfile::TempDir;

/// File extensions recognized as downloadable audio artifacts
pub const AUDIO_EXTENSIONS: [&str; 6] = ["mp3", "m4a", "wav", "webm", "opus", "ogg"];

/// Create a fresh scratch workspace under the given base directory
///
/// The returned `TempDir` removes the directory and everything inside it when
/// dropped, so every exit path of a request releases the workspace exactly once.
///
/// # Errors
///
/// Returns an IO error if the base directory or the workspace cannot be created
pub fn create_workspace(base_dir: &str) -> io::Result<TempDir> {
    fs::create_dir_all(base_dir)?;
    tempfile::Builder::new()
        .prefix("transcribe-")
        .tempdir_in(base_dir)
}

/// Find the downloaded audio file in a workspace
///
/// One audio file is expected per workspace. Directory listing order is not
/// guaranteed by the filesystem, so entries are sorted by name before the
/// first match is taken; a warning is logged when more than one candidate
/// exists.
pub fn find_audio_file(dir: &Path) -> io::Result<Option<PathBuf>> {
    let mut candidates: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|entry| entry.path())
        .filter(|path| is_audio_file(path))
        .collect();
    candidates.sort();

    if candidates.len() > 1 {
        warn!(
            "Expected one audio file in {}, found {}; using the first by name",
            dir.display(),
            candidates.len()
        );
    }

    Ok(candidates.into_iter().next())
}

/// Check whether a path carries a recognized audio extension
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| AUDIO_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
