//! Filesystem helpers for install-size estimation.

use std::path::Path;

use walkdir::WalkDir;

/// Total size in bytes of all regular files under `path`.
///
/// Best effort: unreadable entries are skipped, symlinks are not followed.
/// Returns 0 for paths that do not exist or cannot be walked.
pub fn dir_size(path: &Path) -> u64 {
    if !path.exists() {
        return 0;
    }
    WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|meta| meta.len())
        .sum()
}

/// Format a byte count into a human readable string, e.g. `1.5 MB`.
pub fn format_size(size_bytes: u64) -> String {
    if size_bytes == 0 {
        return "0 B".to_string();
    }
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut size = size_bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", size_bytes)
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}
