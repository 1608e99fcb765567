//! Export snapshots and import patches.

use crate::board::BoardState;
use crate::card::{Card, CardId};
use crate::mode::DrawState;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons an import is rejected.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Malformed board data: {0}")]
    Malformed(String),
    #[error("Duplicate card id: {0}")]
    DuplicateId(CardId),
    #[error("Card {id} has an invalid position or size")]
    InvalidGeometry { id: CardId },
    #[error("Next card id {next} must be greater than the largest card id {max}")]
    CounterTooLow { next: CardId, max: CardId },
    #[error("Card id {0} is out of range")]
    IdOutOfRange(CardId),
    #[error("Next card id {0} leaves no room for new cards")]
    CounterOutOfRange(CardId),
    #[error("Invalid board size: {width}x{height}")]
    InvalidBoardSize { width: f64, height: f64 },
}

/// Result type for snapshot operations.
pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// The exported subset of the board: cards and the id counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub cards: Vec<Card>,
    pub next_card_id: CardId,
}

impl From<&BoardState> for Snapshot {
    fn from(state: &BoardState) -> Self {
        Self {
            cards: state.cards.clone(),
            next_card_id: state.next_card_id,
        }
    }
}

/// Partial board data accepted by import.
///
/// Every present field overwrites the matching board field; absent fields
/// and unknown keys leave the board as it is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cards: Option<Vec<Card>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_card_id: Option<CardId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draw_state: Option<DrawState>,
    #[serde(default, rename = "boardW", skip_serializing_if = "Option::is_none")]
    pub board_width: Option<f64>,
    #[serde(default, rename = "boardH", skip_serializing_if = "Option::is_none")]
    pub board_height: Option<f64>,
}

impl From<Snapshot> for BoardPatch {
    fn from(snapshot: Snapshot) -> Self {
        Self {
            cards: Some(snapshot.cards),
            next_card_id: Some(snapshot.next_card_id),
            ..Self::default()
        }
    }
}

impl BoardPatch {
    /// Interpret an arbitrary parsed JSON value as a patch.
    pub fn from_value(value: serde_json::Value) -> SnapshotResult<Self> {
        if !value.is_object() {
            return Err(SnapshotError::Malformed(
                "expected a JSON object at the root".to_string(),
            ));
        }
        serde_json::from_value(value).map_err(|e| SnapshotError::Malformed(e.to_string()))
    }

    /// Check if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge the patch over `base`, producing a validated board.
    ///
    /// When cards arrive without a counter, the counter is raised past the
    /// largest imported id instead of rejecting the patch.
    pub fn merge_into(self, base: &BoardState) -> SnapshotResult<BoardState> {
        let counter_given = self.next_card_id.is_some();
        let mut merged = base.clone();

        if let Some(cards) = self.cards {
            merged.cards = cards;
        }
        if let Some(next) = self.next_card_id {
            merged.next_card_id = next;
        }
        if let Some(draw_state) = self.draw_state {
            merged.draw_state = draw_state;
        }
        if let Some(width) = self.board_width {
            merged.board_width = width;
        }
        if let Some(height) = self.board_height {
            merged.board_height = height;
        }

        if !counter_given {
            if let Some(max) = merged.max_card_id() {
                if merged.next_card_id <= max {
                    let next = max
                        .checked_add(1)
                        .ok_or(SnapshotError::IdOutOfRange(max))?;
                    log::debug!("Raising next card id from {} to {}", merged.next_card_id, next);
                    merged.next_card_id = next;
                }
            }
        }

        merged.validate()?;
        Ok(merged)
    }
}
