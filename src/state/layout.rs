//! State directory layout and whole-file JSON persistence.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{PkgscopeError, Result};

/// Location of all persisted state, passed explicitly to every operation.
///
/// Defaults to `~/.pkgscope`; tests and the `--state-dir` flag point it
/// elsewhere. There is no ambient global.
#[derive(Debug, Clone)]
pub struct StateDir {
    root: PathBuf,
}

impl StateDir {
    /// Use an explicit root, or fall back to the default location.
    pub fn resolve(override_root: Option<PathBuf>) -> Self {
        match override_root {
            Some(root) => Self { root },
            None => Self {
                root: dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("~"))
                    .join(".pkgscope"),
            },
        }
    }

    /// A state dir at an explicit path.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory holding the state files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Last-known collection snapshot.
    pub fn snapshot_file(&self) -> PathBuf {
        self.root.join("snapshot.json")
    }

    /// Identity-keyed verification status map.
    pub fn verification_file(&self) -> PathBuf {
        self.root.join("verification.json")
    }

    /// Append-only removal history log.
    pub fn history_file(&self) -> PathBuf {
        self.root.join("history.json")
    }

    /// Pending dashboard-removal markers.
    pub fn pending_file(&self) -> PathBuf {
        self.root.join("pending.json")
    }

    /// Load a whole JSON document, degrading to the default value.
    ///
    /// A missing file is the empty state; an unreadable or corrupt file is
    /// logged as a warning and also treated as empty. Never fails the run.
    pub fn load_or_default<T: DeserializeOwned + Default>(&self, path: &Path) -> T {
        if !path.exists() {
            return T::default();
        }
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "state file unreadable, starting empty");
                return T::default();
            }
        };
        match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "state file corrupt, starting empty");
                T::default()
            }
        }
    }

    /// Save a whole JSON document using an atomic write.
    ///
    /// Write-to-temp-then-rename so a crash mid-write never leaves a
    /// partially written state file behind.
    pub fn save_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        fs::create_dir_all(&self.root)?;

        let content =
            serde_json::to_string_pretty(value).map_err(|e| PkgscopeError::Persistence {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[test]
    fn resolve_with_override() {
        let state = StateDir::resolve(Some(PathBuf::from("/tmp/custom")));
        assert_eq!(state.root(), Path::new("/tmp/custom"));
    }

    #[test]
    fn resolve_default_ends_with_pkgscope() {
        let state = StateDir::resolve(None);
        assert!(state.root().ends_with(".pkgscope"));
    }

    #[test]
    fn file_paths_live_under_root() {
        let state = StateDir::at("/tmp/s");
        assert_eq!(state.snapshot_file(), PathBuf::from("/tmp/s/snapshot.json"));
        assert_eq!(
            state.verification_file(),
            PathBuf::from("/tmp/s/verification.json")
        );
        assert_eq!(state.history_file(), PathBuf::from("/tmp/s/history.json"));
        assert_eq!(state.pending_file(), PathBuf::from("/tmp/s/pending.json"));
    }

    #[test]
    fn save_and_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let state = StateDir::at(temp.path());

        let mut value = BTreeMap::new();
        value.insert("a".to_string(), 1u32);
        state.save_json(&state.snapshot_file(), &value).unwrap();

        let loaded: BTreeMap<String, u32> = state.load_or_default(&state.snapshot_file());
        assert_eq!(loaded, value);
    }

    #[test]
    fn load_missing_file_returns_default() {
        let temp = TempDir::new().unwrap();
        let state = StateDir::at(temp.path());
        let loaded: Vec<String> = state.load_or_default(&state.history_file());
        assert!(loaded.is_empty());
    }

    #[test]
    fn load_corrupt_file_returns_default() {
        let temp = TempDir::new().unwrap();
        let state = StateDir::at(temp.path());
        std::fs::write(state.snapshot_file(), "{not valid json").unwrap();

        let loaded: BTreeMap<String, u32> = state.load_or_default(&state.snapshot_file());
        assert!(loaded.is_empty());
    }

    #[test]
    fn save_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let state = StateDir::at(temp.path());
        state
            .save_json(&state.pending_file(), &vec!["x".to_string()])
            .unwrap();

        assert!(state.pending_file().exists());
        assert!(!state.pending_file().with_extension("json.tmp").exists());
    }
}
