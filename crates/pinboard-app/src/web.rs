//! WebAssembly entry point and the board API exposed to JavaScript.

use crate::action::{ActionOutcome, ImportOutcome, UiAction};
use crate::app::{App, AppConfig, AppError};
use pinboard_core::bridge::{DownloadSink, InputFileSource, import_json};
use pinboard_core::{BoardPatch, ShapeKind, card_id_from_f64};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

fn to_js_error(err: AppError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_js_value<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value.serialize(&serializer).map_err(JsValue::from)
}

/// Viewport size of the browser window, if it can be read and is non-empty.
fn window_size() -> Option<(f64, f64)> {
    let window = web_sys::window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    (width > 0.0 && height > 0.0).then_some((width, height))
}

/// Board handle owned by the JavaScript UI.
#[wasm_bindgen]
pub struct WebBoard {
    app: Rc<RefCell<App<DownloadSink>>>,
}

impl WebBoard {
    fn dispatch(&self, action: UiAction) -> Result<ActionOutcome, JsValue> {
        self.app.borrow_mut().handle_action(action).map_err(to_js_error)
    }

    /// Ids cross into JavaScript as plain numbers, exact up to `MAX_CARD_ID`.
    fn added(&self, action: UiAction) -> Result<f64, JsValue> {
        match self.dispatch(action)? {
            ActionOutcome::CardAdded(id) => Ok(id as f64),
            other => Err(JsValue::from_str(&format!("Unexpected outcome: {:?}", other))),
        }
    }
}

#[wasm_bindgen]
impl WebBoard {
    /// Create a board. `config` is an optional JSON configuration string.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> Result<WebBoard, JsValue> {
        let mut config = match config {
            Some(json) => AppConfig::from_json(&json).map_err(to_js_error)?,
            None => AppConfig::default(),
        };
        if let Some((width, height)) = window_size() {
            config.viewport_width = width;
            config.viewport_height = height;
        }
        Ok(WebBoard {
            app: Rc::new(RefCell::new(
                App::new(config, DownloadSink::new()).map_err(to_js_error)?,
            )),
        })
    }

    #[wasm_bindgen(js_name = addTextCard)]
    pub fn add_text_card(&self) -> Result<f64, JsValue> {
        self.added(UiAction::AddTextCard)
    }

    /// Add a shape card. `shape` defaults to `"circle"`.
    #[wasm_bindgen(js_name = addShapeCard)]
    pub fn add_shape_card(&self, shape: Option<String>) -> Result<f64, JsValue> {
        let shape = match shape {
            Some(name) => serde_json::from_value::<ShapeKind>(serde_json::Value::String(name))
                .map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => ShapeKind::Circle,
        };
        self.added(UiAction::AddShapeCard(shape))
    }

    /// Delete a card. Returns false if no card had that id.
    #[wasm_bindgen(js_name = deleteCard)]
    pub fn delete_card(&self, id: f64) -> Result<bool, JsValue> {
        let id = card_id_from_f64(id)
            .ok_or_else(|| JsValue::from_str(&format!("Invalid card id: {}", id)))?;
        Ok(matches!(
            self.dispatch(UiAction::DeleteCard(id))?,
            ActionOutcome::CardDeleted(_)
        ))
    }

    #[wasm_bindgen(js_name = toggleDraw)]
    pub fn toggle_draw(&self) -> Result<JsValue, JsValue> {
        self.dispatch(UiAction::ToggleDraw)?;
        self.draw_state()
    }

    #[wasm_bindgen(js_name = toggleErase)]
    pub fn toggle_erase(&self) -> Result<JsValue, JsValue> {
        self.dispatch(UiAction::ToggleErase)?;
        self.draw_state()
    }

    #[wasm_bindgen(js_name = drawState)]
    pub fn draw_state(&self) -> Result<JsValue, JsValue> {
        to_js_value(&self.app.borrow().store().draw_state())
    }

    #[wasm_bindgen(js_name = resizeViewport)]
    pub fn resize_viewport(&self, width: f64, height: f64) -> Result<(), JsValue> {
        self.dispatch(UiAction::ResizeViewport { width, height })?;
        Ok(())
    }

    /// Full board state as a plain object.
    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js_value(self.app.borrow().store().state())
    }

    /// Download the board snapshot. `filename` defaults to the configured name.
    #[wasm_bindgen(js_name = exportToFile)]
    pub fn export_to_file(&self, filename: Option<String>) -> Result<(), JsValue> {
        self.dispatch(UiAction::ExportToFile(filename))?;
        Ok(())
    }

    /// Import the file chosen in `input`.
    ///
    /// Resolves to true when the board was replaced, false when nothing was
    /// selected or a newer import took over; rejects on invalid files.
    #[wasm_bindgen(js_name = importFromInput)]
    pub fn import_from_input(&self, input: web_sys::HtmlInputElement) -> js_sys::Promise {
        let app = Rc::clone(&self.app);
        wasm_bindgen_futures::future_to_promise(async move {
            let ticket = app.borrow_mut().begin_import();
            let source = InputFileSource::new(input);
            let result = import_json::<BoardPatch, _>(&source).await;
            let outcome = app
                .borrow_mut()
                .finish_import(ticket, result)
                .map_err(to_js_error)?;
            Ok(JsValue::from_bool(matches!(
                outcome,
                ImportOutcome::Imported { .. }
            )))
        })
    }
}

/// Initialize logging and panic reporting.
#[wasm_bindgen(start)]
pub fn run_wasm() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&JsValue::from_str(&format!("Logger already set: {}", e)));
    }

    log::info!("Starting Pinboard (WASM)");
}
