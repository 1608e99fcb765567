//! Draw mode of the board.

use serde::{Deserialize, Serialize};

/// How pointer input on the canvas is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawState {
    /// Pointer input moves and selects cards.
    #[default]
    None,
    /// Pointer input draws strokes.
    Draw,
    /// Pointer input erases strokes.
    Erase,
}

impl DrawState {
    /// Next state after toggling `target`.
    ///
    /// Toggling the active mode returns to `None`; toggling any other mode
    /// switches to it directly.
    pub fn toggled(self, target: DrawState) -> DrawState {
        if self == target {
            DrawState::None
        } else {
            target
        }
    }

    /// Check if drawing is active.
    pub fn is_drawing(self) -> bool {
        self == DrawState::Draw
    }

    /// Check if erasing is active.
    pub fn is_erasing(self) -> bool {
        self == DrawState::Erase
    }
}
