//! JSON file bridge: export values to files and import them back.
//!
//! Export serializes a value to pretty-printed JSON and hands it to a
//! [`FileSink`]. Import asks a [`FileSource`] for the text of the file the
//! user picked and parses it.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(target_arch = "wasm32")]
mod browser;

pub use memory::{ExportedFile, MemorySink, MemorySource};

#[cfg(not(target_arch = "wasm32"))]
pub use file::{DirectorySink, PathSource};

#[cfg(target_arch = "wasm32")]
pub use browser::{DownloadSink, InputFileSource};

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// File name used when the caller does not pick one.
pub const DEFAULT_EXPORT_FILENAME: &str = "data.json";

/// MIME type of exported files.
pub const JSON_MIME_TYPE: &str = "application/json";

/// File bridge errors.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Invalid JSON: {0}")]
    Parse(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("File selection cancelled")]
    Cancelled,
    #[error("Platform error: {0}")]
    Platform(String),
}

/// Result type for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Destination for exported files.
#[cfg(not(target_arch = "wasm32"))]
pub trait FileSink: Send + Sync {
    /// Deliver `contents` as a file named `filename`.
    fn deliver(&self, filename: &str, contents: &str, mime_type: &str) -> BridgeResult<()>;
}

/// Destination for exported files (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait FileSink {
    /// Deliver `contents` as a file named `filename`.
    fn deliver(&self, filename: &str, contents: &str, mime_type: &str) -> BridgeResult<()>;
}

/// Origin of imported files.
#[cfg(not(target_arch = "wasm32"))]
pub trait FileSource: Send + Sync {
    /// Read the first selected file as text. `None` if nothing was selected.
    fn read_text(&self) -> BoxFuture<'_, BridgeResult<Option<String>>>;
}

/// Origin of imported files (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait FileSource {
    /// Read the first selected file as text. `None` if nothing was selected.
    fn read_text(&self) -> BoxFuture<'_, BridgeResult<Option<String>>>;
}

/// Serialize a value to JSON with two-space indentation.
pub fn to_pretty_json<T: Serialize + ?Sized>(data: &T) -> BridgeResult<String> {
    serde_json::to_string_pretty(data).map_err(|e| BridgeError::Serialize(e.to_string()))
}

/// Parse JSON text into a value.
pub fn parse_json<T: DeserializeOwned>(text: &str) -> BridgeResult<T> {
    serde_json::from_str(text).map_err(|e| BridgeError::Parse(e.to_string()))
}

/// Export `data` as a pretty-printed JSON file.
///
/// Nothing reaches the sink if serialization fails.
pub fn export_json<T, S>(sink: &S, data: &T, filename: &str) -> BridgeResult<()>
where
    T: Serialize + ?Sized,
    S: FileSink + ?Sized,
{
    let json = to_pretty_json(data)?;
    sink.deliver(filename, &json, JSON_MIME_TYPE)?;
    log::info!("Exported {} ({} bytes)", filename, json.len());
    Ok(())
}

/// Import the file selected in `source` as JSON.
///
/// Returns `Ok(None)` when no file was selected.
pub async fn import_json<T, S>(source: &S) -> BridgeResult<Option<T>>
where
    T: DeserializeOwned,
    S: FileSource + ?Sized,
{
    let Some(text) = source.read_text().await? else {
        log::debug!("Import skipped: no file selected");
        return Ok(None);
    };
    parse_json(&text).map(Some).map_err(|e| {
        log::warn!("Failed to import JSON: {}", e);
        e
    })
}
