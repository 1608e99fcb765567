//! UI actions the board responds to.

use pinboard_core::{CardId, DrawState, ShapeKind};

/// Actions triggered from the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    /// Add a text card in the middle of the viewport.
    AddTextCard,
    /// Add a shape card in the middle of the viewport.
    AddShapeCard(ShapeKind),
    /// Delete a card.
    DeleteCard(CardId),
    /// Toggle draw mode.
    ToggleDraw,
    /// Toggle erase mode.
    ToggleErase,
    /// Export the board; `None` uses the configured file name.
    ExportToFile(Option<String>),
    /// Viewport was resized.
    ResizeViewport { width: f64, height: f64 },
}

/// What a handled action did.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// A card was added.
    CardAdded(CardId),
    /// A card was deleted.
    CardDeleted(CardId),
    /// The draw mode changed to this value.
    ModeChanged(DrawState),
    /// The board was written to this file name.
    Exported(String),
    /// The action had nothing to act on.
    Unchanged,
}

/// What a finished import did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The board was replaced; it now holds this many cards.
    Imported { cards: usize },
    /// The user selected no file.
    NoFileSelected,
    /// A newer import started before this one finished; its data was dropped.
    Superseded,
}

/// Handle for an import in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportTicket(pub(crate) u64);
