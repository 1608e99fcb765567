//! Browser bridge backends: blob downloads and `<input type="file">` reads.

use super::{BoxFuture, BridgeError, BridgeResult, FileSink, FileSource};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, HtmlInputElement, Url};

fn platform_error(context: &str, err: JsValue) -> BridgeError {
    BridgeError::Platform(format!("{}: {:?}", context, err))
}

/// Object URL that is revoked when dropped.
struct ObjectUrl(String);

impl ObjectUrl {
    fn for_blob(blob: &Blob) -> BridgeResult<Self> {
        Url::create_object_url_with_blob(blob)
            .map(Self)
            .map_err(|e| platform_error("Failed to create object URL", e))
    }

    fn as_str(&self) -> &str {
        &self.0
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        if let Err(e) = Url::revoke_object_url(&self.0) {
            log::warn!("Failed to revoke object URL: {:?}", e);
        }
    }
}

/// Sink that triggers a browser download.
#[derive(Debug, Clone, Copy, Default)]
pub struct DownloadSink;

impl DownloadSink {
    pub fn new() -> Self {
        Self
    }
}

impl FileSink for DownloadSink {
    fn deliver(&self, filename: &str, contents: &str, mime_type: &str) -> BridgeResult<()> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| BridgeError::Platform("No document".to_string()))?;

        let blob_parts = js_sys::Array::new();
        blob_parts.push(&JsValue::from_str(contents));

        let options = BlobPropertyBag::new();
        options.set_type(mime_type);

        let blob = Blob::new_with_str_sequence_and_options(&blob_parts, &options)
            .map_err(|e| platform_error("Failed to create blob", e))?;

        let url = ObjectUrl::for_blob(&blob)?;

        let anchor = document
            .create_element("a")
            .map_err(|e| platform_error("Failed to create anchor", e))?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|_| BridgeError::Platform("Element is not an anchor".to_string()))?;

        anchor.set_href(url.as_str());
        anchor.set_download(filename);
        anchor.click();

        // `url` drops here, releasing the blob right after the click.
        Ok(())
    }
}

/// Source reading the first file chosen in a file input.
pub struct InputFileSource {
    input: HtmlInputElement,
}

impl InputFileSource {
    pub fn new(input: HtmlInputElement) -> Self {
        Self { input }
    }
}

impl FileSource for InputFileSource {
    fn read_text(&self) -> BoxFuture<'_, BridgeResult<Option<String>>> {
        let file = self.input.files().and_then(|files| files.get(0));
        Box::pin(async move {
            let Some(file) = file else {
                return Ok(None);
            };
            log::debug!("Reading {} ({} bytes)", file.name(), file.size());

            let text = wasm_bindgen_futures::JsFuture::from(file.text())
                .await
                .map_err(|e| BridgeError::Io(format!("Failed to read {}: {:?}", file.name(), e)))?;

            text.as_string()
                .map(Some)
                .ok_or_else(|| BridgeError::Io(format!("{} did not read as text", file.name())))
        })
    }
}
