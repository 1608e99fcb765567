//! In-memory file bridge backends.

use super::{BoxFuture, BridgeError, BridgeResult, FileSink, FileSource};
use std::collections::HashMap;
use std::sync::RwLock;

/// A file delivered to a [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub contents: String,
    pub mime_type: String,
}

/// In-memory sink for testing and ephemeral use.
#[derive(Default)]
pub struct MemorySink {
    files: RwLock<HashMap<String, ExportedFile>>,
}

impl MemorySink {
    /// Create a new empty memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a delivered file by name.
    pub fn get(&self, filename: &str) -> Option<ExportedFile> {
        self.files.read().ok()?.get(filename).cloned()
    }

    /// Check if nothing has been delivered.
    pub fn is_empty(&self) -> bool {
        self.files.read().map(|files| files.is_empty()).unwrap_or(true)
    }
}

impl FileSink for MemorySink {
    fn deliver(&self, filename: &str, contents: &str, mime_type: &str) -> BridgeResult<()> {
        let mut files = self
            .files
            .write()
            .map_err(|e| BridgeError::Io(format!("Lock error: {}", e)))?;
        files.insert(
            filename.to_string(),
            ExportedFile {
                contents: contents.to_string(),
                mime_type: mime_type.to_string(),
            },
        );
        Ok(())
    }
}

/// In-memory source standing in for a file picker.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    /// Text of the selected file, `None` when nothing was selected.
    text: Option<String>,
}

impl MemorySource {
    /// A source with no file selected.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A source whose selected file holds `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    /// A source selecting a file previously delivered to `sink`.
    pub fn from_sink(sink: &MemorySink, filename: &str) -> Self {
        Self {
            text: sink.get(filename).map(|file| file.contents),
        }
    }
}

impl FileSource for MemorySource {
    fn read_text(&self) -> BoxFuture<'_, BridgeResult<Option<String>>> {
        let text = self.text.clone();
        Box::pin(async move { Ok(text) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pollster::block_on;

    #[test]
    fn test_deliver_and_get() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());

        sink.deliver("a.json", "{}", "application/json").unwrap();
        let file = sink.get("a.json").unwrap();

        assert_eq!(file.contents, "{}");
        assert!(!sink.is_empty());
        assert!(sink.get("b.json").is_none());
    }

    #[test]
    fn test_deliver_overwrites() {
        let sink = MemorySink::new();
        sink.deliver("a.json", "1", "application/json").unwrap();
        sink.deliver("a.json", "2", "application/json").unwrap();

        assert_eq!(sink.get("a.json").unwrap().contents, "2");
    }

    #[test]
    fn test_source_reads() {
        assert_eq!(block_on(MemorySource::empty().read_text()).unwrap(), None);
        assert_eq!(
            block_on(MemorySource::with_text("[]").read_text()).unwrap(),
            Some("[]".to_string())
        );
    }

    #[test]
    fn test_source_from_missing_file() {
        let sink = MemorySink::new();
        let source = MemorySource::from_sink(&sink, "missing.json");
        assert_eq!(block_on(source.read_text()).unwrap(), None);
    }
}
