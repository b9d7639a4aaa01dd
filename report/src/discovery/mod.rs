//! Input discovery - find the newest EOW export in a directory.
//!
//! Files are matched with the glob `*{token}*.{extension}` (by default
//! `*EOW*.xlsx`) in a single directory, without recursion. Matching is
//! case-sensitive.
//!
//! When several files share the same modification time, the one with the
//! lexicographically greatest file name wins, so the choice is stable across
//! runs.

use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::{DiscoveryError, DiscoveryResult};

/// Default file name token.
pub const DEFAULT_TOKEN: &str = "EOW";

/// Default workbook extension.
pub const DEFAULT_EXTENSION: &str = "xlsx";

/// A matching file with its modification time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// Build the glob pattern for `dir`, escaping the directory part.
pub fn file_pattern(dir: &Path, token: &str, extension: &str) -> String {
    let dir = Pattern::escape(&dir.to_string_lossy());
    let name = format!(
        "*{}*.{}",
        Pattern::escape(token),
        Pattern::escape(extension.trim_start_matches('.'))
    );
    if dir.is_empty() {
        name
    } else {
        Path::new(&dir).join(name).to_string_lossy().into_owned()
    }
}

/// List every matching file, newest first.
pub fn list_candidates(dir: &Path, token: &str, extension: &str) -> DiscoveryResult<Vec<Candidate>> {
    if !dir.is_dir() {
        return Err(DiscoveryError::DirectoryNotFound {
            dir: dir.to_path_buf(),
        });
    }

    let pattern = file_pattern(dir, token, extension);
    let paths = glob::glob(&pattern).map_err(|e| DiscoveryError::Pattern {
        pattern: pattern.clone(),
        message: e.to_string(),
    })?;

    let mut candidates = Vec::new();
    for entry in paths {
        let path = entry.map_err(|e| DiscoveryError::Io {
            path: e.path().to_path_buf(),
            source: e.into_error(),
        })?;

        let metadata = fs::metadata(&path).map_err(|source| DiscoveryError::Io {
            path: path.clone(),
            source,
        })?;
        if !metadata.is_file() {
            continue;
        }

        let modified = metadata.modified().map_err(|source| DiscoveryError::Io {
            path: path.clone(),
            source,
        })?;
        candidates.push(Candidate { path, modified });
    }

    candidates.sort_by(|a, b| {
        b.modified
            .cmp(&a.modified)
            .then_with(|| b.path.file_name().cmp(&a.path.file_name()))
    });

    Ok(candidates)
}

/// Return the most recently modified file matching the pattern.
///
/// Fails with [`DiscoveryError::NotFound`] when nothing matches.
pub fn find_latest_file(dir: &Path, token: &str, extension: &str) -> DiscoveryResult<PathBuf> {
    list_candidates(dir, token, extension)?
        .into_iter()
        .next()
        .map(|c| c.path)
        .ok_or_else(|| DiscoveryError::NotFound {
            pattern: file_pattern(dir, token, extension),
            dir: dir.to_path_buf(),
        })
}
