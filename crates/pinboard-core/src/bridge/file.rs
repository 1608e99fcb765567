//! Filesystem bridge backends for native platforms.

use super::{BoxFuture, BridgeError, BridgeResult, FileSink, FileSource};
use std::fs;
use std::path::{Path, PathBuf};

/// Sink that writes exported files into a directory.
pub struct DirectorySink {
    /// Directory exported files land in.
    base_path: PathBuf,
}

impl DirectorySink {
    /// Create a sink writing into `base_path`.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> BridgeResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                BridgeError::Io(format!("Failed to create export directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Create a sink writing into the user's download directory.
    ///
    /// Falls back to the home directory when no download directory is known.
    pub fn downloads() -> BridgeResult<Self> {
        let base = dirs::download_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| BridgeError::Io("Could not determine download directory".to_string()))?;
        Self::new(base)
    }

    /// Get the path a file name maps to.
    pub fn file_path(&self, filename: &str) -> PathBuf {
        let safe_name: String = filename
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        let safe_name = safe_name.trim_start_matches('.');
        if safe_name.is_empty() {
            self.base_path.join(super::DEFAULT_EXPORT_FILENAME)
        } else {
            self.base_path.join(safe_name)
        }
    }

    /// Get the base path.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl FileSink for DirectorySink {
    fn deliver(&self, filename: &str, contents: &str, _mime_type: &str) -> BridgeResult<()> {
        let path = self.file_path(filename);
        fs::write(&path, contents).map_err(|e| {
            BridgeError::Io(format!("Failed to write {}: {}", path.display(), e))
        })
    }
}

/// Source reading a file chosen by path.
#[derive(Debug, Clone, Default)]
pub struct PathSource {
    /// Chosen file, `None` when nothing was selected.
    path: Option<PathBuf>,
}

impl PathSource {
    /// A source selecting `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// A source with no file selected.
    pub fn none() -> Self {
        Self::default()
    }
}

impl FileSource for PathSource {
    fn read_text(&self) -> BoxFuture<'_, BridgeResult<Option<String>>> {
        Box::pin(async move {
            let Some(path) = &self.path else {
                return Ok(None);
            };
            fs::read_to_string(path).map(Some).map_err(|e| {
                BridgeError::Io(format!("Failed to read {}: {}", path.display(), e))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::{export_json, import_json};
    use crate::snapshot::BoardPatch;
    use crate::store::BoardStore;
    use pollster::block_on;
    use tempfile::tempdir;

    #[test]
    fn test_directory_sink_writes() {
        let dir = tempdir().unwrap();
        let sink = DirectorySink::new(dir.path().to_path_buf()).unwrap();

        sink.deliver("data.json", "{}", "application/json").unwrap();
        let written = fs::read_to_string(dir.path().join("data.json")).unwrap();
        assert_eq!(written, "{}");
    }

    #[test]
    fn test_directory_sink_creates_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("exports").join("boards");
        let sink = DirectorySink::new(nested.clone()).unwrap();

        assert!(nested.is_dir());
        assert_eq!(sink.base_path(), nested.as_path());
    }

    #[test]
    fn test_file_path_sanitized() {
        let dir = tempdir().unwrap();
        let sink = DirectorySink::new(dir.path().to_path_buf()).unwrap();

        assert_eq!(sink.file_path("../../etc/passwd"), dir.path().join("_.._etc_passwd"));
        assert_eq!(sink.file_path("my board.json"), dir.path().join("my_board.json"));
        assert_eq!(sink.file_path(""), dir.path().join("data.json"));
    }

    #[test]
    fn test_path_source_missing_file() {
        let dir = tempdir().unwrap();
        let source = PathSource::new(dir.path().join("missing.json"));

        assert!(matches!(block_on(source.read_text()), Err(BridgeError::Io(_))));
    }

    #[test]
    fn test_path_source_none() {
        assert_eq!(block_on(PathSource::none().read_text()).unwrap(), None);
    }

    #[test]
    fn test_board_round_trip_through_disk() {
        let dir = tempdir().unwrap();
        let sink = DirectorySink::new(dir.path().to_path_buf()).unwrap();

        let mut store = BoardStore::new();
        store.add_text_card();
        store.add_shape_card();
        export_json(&sink, &store.export_data(), "board.json").unwrap();

        let source = PathSource::new(sink.file_path("board.json"));
        let patch: BoardPatch = block_on(import_json(&source)).unwrap().unwrap();

        let mut restored = BoardStore::new();
        restored.import_data(patch).unwrap();
        assert_eq!(restored.cards(), store.cards());
        assert_eq!(restored.next_card_id(), store.next_card_id());
    }
}
