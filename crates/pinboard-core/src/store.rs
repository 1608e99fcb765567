//! Card store: the board state and the actions that mutate it.

use crate::board::BoardState;
use crate::card::{Card, CardId, CardKind, MAX_CARD_ID, ShapeKind};
use crate::mode::DrawState;
use crate::snapshot::{BoardPatch, Snapshot, SnapshotResult};
use kurbo::Size;

/// Default viewport used to center new cards until the UI reports one.
pub const DEFAULT_VIEWPORT: Size = Size::new(1280.0, 800.0);

/// Owns the board state and exposes its mutation actions.
#[derive(Debug, Clone)]
pub struct BoardStore {
    state: BoardState,
    /// Visible area new cards are centered in.
    viewport: Size,
}

impl Default for BoardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardStore {
    /// Create a store holding an empty board.
    pub fn new() -> Self {
        Self::with_state(BoardState::new())
    }

    /// Create a store holding an existing board.
    pub fn with_state(state: BoardState) -> Self {
        Self {
            state,
            viewport: DEFAULT_VIEWPORT,
        }
    }

    /// Set the viewport size.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport = Size::new(width, height);
    }

    pub fn viewport_size(&self) -> Size {
        self.viewport
    }

    /// Full board state.
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// Cards in z-order (back to front).
    pub fn cards(&self) -> &[Card] {
        &self.state.cards
    }

    /// Get a card by id.
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.state.cards.iter().find(|card| card.id == id)
    }

    pub fn next_card_id(&self) -> CardId {
        self.state.next_card_id
    }

    pub fn draw_state(&self) -> DrawState {
        self.state.draw_state
    }

    /// Add a text card centered in the viewport.
    ///
    /// Returns `None` once the id space is used up.
    pub fn add_text_card(&mut self) -> Option<CardId> {
        self.push_card(CardKind::Text)
    }

    /// Add a circle card centered in the viewport.
    pub fn add_shape_card(&mut self) -> Option<CardId> {
        self.add_shape_card_of(ShapeKind::Circle)
    }

    /// Add a shape card of the given kind centered in the viewport.
    pub fn add_shape_card_of(&mut self, shape: ShapeKind) -> Option<CardId> {
        self.push_card(CardKind::Shape { shape })
    }

    fn push_card(&mut self, kind: CardKind) -> Option<CardId> {
        // The counter itself must stay within MAX_CARD_ID after the increment.
        let id = self.state.next_card_id;
        if id >= MAX_CARD_ID {
            log::warn!("Cannot add card: no card ids left (next id {})", id);
            return None;
        }
        self.state.next_card_id = id + 1;
        self.state.cards.push(Card::centered(id, kind, self.viewport));
        log::debug!("Added card {} ({:?})", id, kind);
        Some(id)
    }

    /// Remove a card by id.
    /// Returns true if a card was removed, false if no card had that id.
    pub fn delete_card(&mut self, id: CardId) -> bool {
        let before = self.state.cards.len();
        self.state.cards.retain(|card| card.id != id);
        let removed = self.state.cards.len() != before;
        if removed {
            log::debug!("Deleted card {}", id);
        }
        removed
    }

    /// Toggle draw mode. Returns the new mode.
    pub fn toggle_draw(&mut self) -> DrawState {
        self.toggle_mode(DrawState::Draw)
    }

    /// Toggle erase mode. Returns the new mode.
    pub fn toggle_erase(&mut self) -> DrawState {
        self.toggle_mode(DrawState::Erase)
    }

    fn toggle_mode(&mut self, target: DrawState) -> DrawState {
        self.state.draw_state = self.state.draw_state.toggled(target);
        self.state.draw_state
    }

    /// Merge imported data into the board.
    ///
    /// The board is left untouched when the merged result is invalid.
    pub fn import_data(&mut self, patch: BoardPatch) -> SnapshotResult<()> {
        let merged = patch.merge_into(&self.state)?;
        log::info!(
            "Imported board with {} cards (next id {})",
            merged.cards.len(),
            merged.next_card_id
        );
        self.state = merged;
        Ok(())
    }

    /// Import an arbitrary parsed JSON value.
    pub fn import_value(&mut self, value: serde_json::Value) -> SnapshotResult<()> {
        self.import_data(BoardPatch::from_value(value)?)
    }

    /// Snapshot of the cards and id counter for export.
    pub fn export_data(&self) -> Snapshot {
        Snapshot::from(&self.state)
    }
}
