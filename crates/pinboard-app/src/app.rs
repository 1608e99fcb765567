//! Core application state and action dispatch.

use crate::action::{ActionOutcome, ImportOutcome, ImportTicket, UiAction};
use pinboard_core::bridge::{
    BridgeError, BridgeResult, DEFAULT_EXPORT_FILENAME, FileSink, FileSource, export_json,
    import_json,
};
use pinboard_core::{BoardPatch, BoardState, BoardStore, SnapshotError};
use serde::Deserialize;
use thiserror::Error;

/// Application errors surfaced to the UI.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Bridge(#[from] BridgeError),
    #[error(transparent)]
    Import(#[from] SnapshotError),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("No card ids left")]
    IdsExhausted,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub title: String,
    /// File name used when an export names none.
    pub export_filename: String,
    pub board_width: f64,
    pub board_height: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
    /// Start the session with the two sample cards.
    pub sample_cards: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let board = BoardState::new();
        Self {
            title: "Pinboard".to_string(),
            export_filename: DEFAULT_EXPORT_FILENAME.to_string(),
            board_width: board.board_width,
            board_height: board.board_height,
            viewport_width: 1280.0,
            viewport_height: 800.0,
            sample_cards: true,
        }
    }
}

impl AppConfig {
    /// Parse a configuration; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| AppError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the board and viewport sizes are finite and positive.
    pub fn validate(&self) -> Result<(), AppError> {
        let size_ok = |v: f64| v.is_finite() && v > 0.0;
        if !size_ok(self.board_width) || !size_ok(self.board_height) {
            return Err(AppError::Config(format!(
                "board size must be positive, got {}x{}",
                self.board_width, self.board_height
            )));
        }
        if !size_ok(self.viewport_width) || !size_ok(self.viewport_height) {
            return Err(AppError::Config(format!(
                "viewport size must be positive, got {}x{}",
                self.viewport_width, self.viewport_height
            )));
        }
        Ok(())
    }

    fn initial_state(&self) -> BoardState {
        let mut state = if self.sample_cards {
            BoardState::with_sample_cards()
        } else {
            BoardState::new()
        };
        state.board_width = self.board_width;
        state.board_height = self.board_height;
        state
    }
}

/// Main application struct: the board store plus the file bridge it exports to.
pub struct App<S: FileSink> {
    config: AppConfig,
    store: BoardStore,
    sink: S,
    /// Generation of the most recently started import.
    import_generation: u64,
}

impl<S: FileSink> App<S> {
    pub fn new(config: AppConfig, sink: S) -> Result<Self, AppError> {
        config.validate()?;
        let mut store = BoardStore::with_state(config.initial_state());
        store.set_viewport_size(config.viewport_width, config.viewport_height);
        log::info!("Starting {}", config.title);
        Ok(Self {
            config,
            store,
            sink,
            import_generation: 0,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &BoardStore {
        &self.store
    }

    /// Handle a UI action.
    ///
    /// Failures are logged and returned so the UI can report them.
    pub fn handle_action(&mut self, action: UiAction) -> Result<ActionOutcome, AppError> {
        let outcome = match action {
            UiAction::AddTextCard => {
                let id = self.store.add_text_card();
                ActionOutcome::CardAdded(id.ok_or(AppError::IdsExhausted)?)
            }
            UiAction::AddShapeCard(shape) => {
                let id = self.store.add_shape_card_of(shape);
                ActionOutcome::CardAdded(id.ok_or(AppError::IdsExhausted)?)
            }
            UiAction::DeleteCard(id) => {
                if self.store.delete_card(id) {
                    ActionOutcome::CardDeleted(id)
                } else {
                    log::debug!("Delete ignored: no card {}", id);
                    ActionOutcome::Unchanged
                }
            }
            UiAction::ToggleDraw => ActionOutcome::ModeChanged(self.store.toggle_draw()),
            UiAction::ToggleErase => ActionOutcome::ModeChanged(self.store.toggle_erase()),
            UiAction::ExportToFile(filename) => {
                let filename = filename.unwrap_or_else(|| self.config.export_filename.clone());
                self.export_to_file(&filename)?;
                ActionOutcome::Exported(filename)
            }
            UiAction::ResizeViewport { width, height } => {
                self.store.set_viewport_size(width, height);
                ActionOutcome::Unchanged
            }
        };
        Ok(outcome)
    }

    /// Export the board snapshot to the sink.
    pub fn export_to_file(&self, filename: &str) -> Result<(), AppError> {
        export_json(&self.sink, &self.store.export_data(), filename).map_err(|e| {
            log::error!("Failed to export {}: {}", filename, e);
            AppError::from(e)
        })
    }

    /// Start an import. Any import started earlier becomes stale.
    pub fn begin_import(&mut self) -> ImportTicket {
        self.import_generation += 1;
        ImportTicket(self.import_generation)
    }

    /// Apply the result of a file read started with [`App::begin_import`].
    ///
    /// The board is only touched when the ticket is the latest one and the
    /// data is valid.
    pub fn finish_import(
        &mut self,
        ticket: ImportTicket,
        result: BridgeResult<Option<BoardPatch>>,
    ) -> Result<ImportOutcome, AppError> {
        if ticket.0 != self.import_generation {
            log::warn!("Discarding stale import {}", ticket.0);
            return Ok(ImportOutcome::Superseded);
        }

        let patch = match result {
            Ok(Some(patch)) => patch,
            Ok(None) => return Ok(ImportOutcome::NoFileSelected),
            Err(e) => {
                log::error!("Failed to import JSON: {}", e);
                return Err(e.into());
            }
        };

        if let Err(e) = self.store.import_data(patch) {
            log::error!("Rejected imported board: {}", e);
            return Err(e.into());
        }
        Ok(ImportOutcome::Imported {
            cards: self.store.cards().len(),
        })
    }

    /// Read, parse and apply a file from `source`.
    pub async fn import_from<F: FileSource + ?Sized>(
        &mut self,
        source: &F,
    ) -> Result<ImportOutcome, AppError> {
        let ticket = self.begin_import();
        let result = import_json::<BoardPatch, _>(source).await;
        self.finish_import(ticket, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinboard_core::bridge::{MemorySink, MemorySource};
    use pinboard_core::{DrawState, MAX_CARD_ID, ShapeKind};
    use pollster::block_on;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn app() -> App<MemorySink> {
        init_logging();
        App::new(AppConfig::default(), MemorySink::new()).unwrap()
    }

    #[test]
    fn test_default_session_has_sample_cards() {
        let app = app();
        assert_eq!(app.store().cards().len(), 2);
        assert_eq!(app.store().next_card_id(), 3);
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{"sampleCards": false, "exportFilename": "b.json"}"#;
        let config = AppConfig::from_json(json).unwrap();
        assert!(!config.sample_cards);
        assert_eq!(config.export_filename, "b.json");
        assert_eq!(config.board_width, 1920.0);

        let app = App::new(config, MemorySink::new()).unwrap();
        assert!(app.store().cards().is_empty());
    }

    #[test]
    fn test_config_rejects_zero_board_width() {
        assert!(matches!(
            AppConfig::from_json(r#"{"boardWidth": 0}"#),
            Err(AppError::Config(_))
        ));
        assert!(AppConfig::from_json(r#"{"viewportHeight": -10}"#).is_err());
    }

    #[test]
    fn test_app_new_rejects_invalid_sizes() {
        let config = AppConfig {
            viewport_width: f64::NAN,
            ..AppConfig::default()
        };
        assert!(matches!(
            App::new(config, MemorySink::new()),
            Err(AppError::Config(_))
        ));

        let config = AppConfig {
            board_height: 0.0,
            ..AppConfig::default()
        };
        assert!(App::new(config, MemorySink::new()).is_err());
    }

    #[test]
    fn test_add_card_when_ids_exhausted() {
        let mut app = app();
        let text = format!(r#"{{"cards": [], "nextCardId": {}}}"#, MAX_CARD_ID);
        block_on(app.import_from(&MemorySource::with_text(text))).unwrap();

        assert!(matches!(
            app.handle_action(UiAction::AddTextCard),
            Err(AppError::IdsExhausted)
        ));
        assert!(matches!(
            app.handle_action(UiAction::AddShapeCard(ShapeKind::Rectangle)),
            Err(AppError::IdsExhausted)
        ));
        assert!(app.store().cards().is_empty());
    }

    #[test]
    fn test_config_invalid() {
        assert!(matches!(
            AppConfig::from_json("{\"boardWidth\": \"wide\"}"),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_add_and_delete_actions() {
        let mut app = app();

        let outcome = app.handle_action(UiAction::AddShapeCard(ShapeKind::Circle)).unwrap();
        assert_eq!(outcome, ActionOutcome::CardAdded(3));

        assert_eq!(
            app.handle_action(UiAction::DeleteCard(3)).unwrap(),
            ActionOutcome::CardDeleted(3)
        );
        assert_eq!(
            app.handle_action(UiAction::DeleteCard(3)).unwrap(),
            ActionOutcome::Unchanged
        );
    }

    #[test]
    fn test_resize_centers_new_cards() {
        let mut app = app();
        app.handle_action(UiAction::ResizeViewport { width: 350.0, height: 350.0 })
            .unwrap();
        let ActionOutcome::CardAdded(id) = app.handle_action(UiAction::AddTextCard).unwrap() else {
            panic!("expected a card");
        };

        let card = app.store().card(id).unwrap();
        assert_eq!((card.x, card.y), (100.0, 100.0));
    }

    #[test]
    fn test_toggle_actions() {
        let mut app = app();
        assert_eq!(
            app.handle_action(UiAction::ToggleDraw).unwrap(),
            ActionOutcome::ModeChanged(DrawState::Draw)
        );
        assert_eq!(
            app.handle_action(UiAction::ToggleErase).unwrap(),
            ActionOutcome::ModeChanged(DrawState::Erase)
        );
        assert_eq!(
            app.handle_action(UiAction::ToggleErase).unwrap(),
            ActionOutcome::ModeChanged(DrawState::None)
        );
    }

    #[test]
    fn test_export_uses_default_filename() {
        let mut app = app();
        let outcome = app.handle_action(UiAction::ExportToFile(None)).unwrap();

        assert_eq!(outcome, ActionOutcome::Exported("data.json".to_string()));
        assert!(app.sink.get("data.json").is_some());
    }

    #[test]
    fn test_export_then_import() {
        let mut app = app();
        app.handle_action(UiAction::AddTextCard).unwrap();
        app.handle_action(UiAction::ExportToFile(Some("board.json".to_string())))
            .unwrap();
        let exported = app.store().export_data();

        app.handle_action(UiAction::DeleteCard(1)).unwrap();
        let source = MemorySource::from_sink(&app.sink, "board.json");
        let outcome = block_on(app.import_from(&source)).unwrap();

        assert_eq!(outcome, ImportOutcome::Imported { cards: 3 });
        assert_eq!(app.store().export_data(), exported);
    }

    #[test]
    fn test_import_invalid_json_leaves_board() {
        let mut app = app();
        let before = app.store().state().clone();

        let result = block_on(app.import_from(&MemorySource::with_text("not json")));
        assert!(matches!(result, Err(AppError::Bridge(BridgeError::Parse(_)))));
        assert_eq!(app.store().state(), &before);
    }

    #[test]
    fn test_import_no_file_selected() {
        let mut app = app();
        let outcome = block_on(app.import_from(&MemorySource::empty())).unwrap();

        assert_eq!(outcome, ImportOutcome::NoFileSelected);
        assert_eq!(app.store().cards().len(), 2);
    }

    #[test]
    fn test_import_rejected_board() {
        let mut app = app();
        let text = concat!(
            r#"{"cards":[{"id":1,"type":"text","x":0,"y":0,"width":-1,"height":10}],"#,
            r#""nextCardId":2}"#
        );

        let result = block_on(app.import_from(&MemorySource::with_text(text)));
        assert!(matches!(
            result,
            Err(AppError::Import(SnapshotError::InvalidGeometry { id: 1 }))
        ));
        assert_eq!(app.store().cards().len(), 2);
    }

    #[test]
    fn test_stale_import_discarded() {
        let mut app = app();
        let first = app.begin_import();
        let second = app.begin_import();

        let empty_board = BoardPatch {
            cards: Some(Vec::new()),
            ..BoardPatch::default()
        };
        let outcome = app.finish_import(first, Ok(Some(empty_board.clone()))).unwrap();
        assert_eq!(outcome, ImportOutcome::Superseded);
        assert_eq!(app.store().cards().len(), 2);

        let outcome = app.finish_import(second, Ok(Some(empty_board))).unwrap();
        assert_eq!(outcome, ImportOutcome::Imported { cards: 0 });
    }
}
