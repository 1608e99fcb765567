//! Board state aggregate.

use crate::card::{Card, CardId, CardKind, MAX_CARD_ID};
use crate::mode::DrawState;
use crate::snapshot::{SnapshotError, SnapshotResult};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default board width in pixels.
pub const DEFAULT_BOARD_WIDTH: f64 = 1920.0;
/// Default board height in pixels.
pub const DEFAULT_BOARD_HEIGHT: f64 = 919.0;

/// All cards plus board-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardState {
    /// Cards in insertion order (back to front).
    pub cards: Vec<Card>,
    /// Id handed to the next added card.
    pub next_card_id: CardId,
    /// Current pointer mode.
    pub draw_state: DrawState,
    #[serde(rename = "boardW")]
    pub board_width: f64,
    #[serde(rename = "boardH")]
    pub board_height: f64,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardState {
    /// Create an empty board.
    pub fn new() -> Self {
        Self {
            cards: Vec::new(),
            next_card_id: 1,
            draw_state: DrawState::None,
            board_width: DEFAULT_BOARD_WIDTH,
            board_height: DEFAULT_BOARD_HEIGHT,
        }
    }

    /// Create the board a fresh session starts with: two text cards.
    pub fn with_sample_cards() -> Self {
        Self {
            cards: vec![
                Card::new(1, CardKind::Text, Point::new(400.0, 300.0)),
                Card::new(2, CardKind::Text, Point::new(600.0, 400.0)),
            ],
            next_card_id: 3,
            ..Self::new()
        }
    }

    /// Board dimensions.
    pub fn size(&self) -> Size {
        Size::new(self.board_width, self.board_height)
    }

    /// Largest card id on the board.
    pub fn max_card_id(&self) -> Option<CardId> {
        self.cards.iter().map(|card| card.id).max()
    }

    /// Check every invariant the board must hold.
    pub fn validate(&self) -> SnapshotResult<()> {
        let mut seen = HashSet::with_capacity(self.cards.len());
        for card in &self.cards {
            if card.id > MAX_CARD_ID {
                return Err(SnapshotError::IdOutOfRange(card.id));
            }
            if !seen.insert(card.id) {
                return Err(SnapshotError::DuplicateId(card.id));
            }
            if !card.has_valid_geometry() {
                return Err(SnapshotError::InvalidGeometry { id: card.id });
            }
        }

        if self.next_card_id > MAX_CARD_ID {
            return Err(SnapshotError::CounterOutOfRange(self.next_card_id));
        }
        if let Some(max) = self.max_card_id() {
            if self.next_card_id <= max {
                return Err(SnapshotError::CounterTooLow {
                    next: self.next_card_id,
                    max,
                });
            }
        }

        let size_ok = |v: f64| v.is_finite() && v > 0.0;
        if !size_ok(self.board_width) || !size_ok(self.board_height) {
            return Err(SnapshotError::InvalidBoardSize {
                width: self.board_width,
                height: self.board_height,
            });
        }

        Ok(())
    }
}
