//! Native file dialogs as bridge backends.

use pinboard_core::bridge::{BoxFuture, BridgeError, BridgeResult, FileSink, FileSource};

/// Sink that asks where to save through a native save dialog.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialogSink;

impl FileSink for DialogSink {
    fn deliver(&self, filename: &str, contents: &str, _mime_type: &str) -> BridgeResult<()> {
        let dialog = rfd::FileDialog::new()
            .set_title("Export Board")
            .set_file_name(filename)
            .add_filter("Pinboard Board", &["json"]);

        let Some(path) = dialog.save_file() else {
            return Err(BridgeError::Cancelled);
        };
        std::fs::write(&path, contents).map_err(|e| {
            BridgeError::Io(format!("Failed to write {}: {}", path.display(), e))
        })?;
        log::info!("Saved board to: {:?}", path);
        Ok(())
    }
}

/// Source that picks a file through a native open dialog.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialogSource;

impl FileSource for DialogSource {
    fn read_text(&self) -> BoxFuture<'_, BridgeResult<Option<String>>> {
        Box::pin(async move {
            let dialog = rfd::FileDialog::new()
                .set_title("Import Board")
                .add_filter("Pinboard Board", &["json"]);

            let Some(path) = dialog.pick_file() else {
                return Ok(None);
            };
            std::fs::read_to_string(&path).map(Some).map_err(|e| {
                BridgeError::Io(format!("Failed to read {}: {}", path.display(), e))
            })
        })
    }
}
