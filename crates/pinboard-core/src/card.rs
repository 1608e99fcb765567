//! Card definitions for the board.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Identifier of a card, unique within a board.
pub type CardId = u64;

/// Largest card id: ids must stay exact as JavaScript numbers.
pub const MAX_CARD_ID: CardId = (1 << 53) - 1;

/// Convert a JavaScript number into a card id.
///
/// Returns `None` for fractional, negative, non-finite or out-of-range values.
pub fn card_id_from_f64(value: f64) -> Option<CardId> {
    let in_range = (0.0..=MAX_CARD_ID as f64).contains(&value);
    if value.is_finite() && value.fract() == 0.0 && in_range {
        Some(value as CardId)
    } else {
        None
    }
}

/// Default edge length of a freshly added card.
pub const DEFAULT_CARD_SIZE: f64 = 150.0;

/// Geometric kind of a shape card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Circle,
    Rectangle,
    Triangle,
}

/// What a card displays.
///
/// Serialized inline with the card as a `"type"` tag, so a shape card
/// reads `{"type": "shape", "shape": "circle", ...}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CardKind {
    /// Free text card.
    Text,
    /// Geometric shape card.
    Shape {
        #[serde(default)]
        shape: ShapeKind,
    },
}

impl CardKind {
    /// Shape kind, if this is a shape card.
    pub fn shape(&self) -> Option<ShapeKind> {
        match self {
            CardKind::Text => None,
            CardKind::Shape { shape } => Some(*shape),
        }
    }
}

/// A positioned rectangular element on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    #[serde(flatten)]
    pub kind: CardKind,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Card {
    /// Create a card at an explicit position with the default size.
    pub fn new(id: CardId, kind: CardKind, origin: Point) -> Self {
        Self {
            id,
            kind,
            x: origin.x,
            y: origin.y,
            width: DEFAULT_CARD_SIZE,
            height: DEFAULT_CARD_SIZE,
        }
    }

    /// Create a default-sized card centered in a viewport.
    pub fn centered(id: CardId, kind: CardKind, viewport: Size) -> Self {
        let origin = Point::new(
            (viewport.width - DEFAULT_CARD_SIZE) / 2.0,
            (viewport.height - DEFAULT_CARD_SIZE) / 2.0,
        );
        Self::new(id, kind, origin)
    }

    /// Top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Bounding rectangle in board coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.origin(), Size::new(self.width, self.height))
    }

    /// Whether position is finite and size is finite and positive.
    pub fn has_valid_geometry(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_card() {
        let card = Card::centered(7, CardKind::Text, Size::new(1000.0, 600.0));
        assert_eq!(card.id, 7);
        assert_eq!(card.x, 425.0);
        assert_eq!(card.y, 225.0);
        assert_eq!(card.width, DEFAULT_CARD_SIZE);
        assert_eq!(card.height, DEFAULT_CARD_SIZE);
    }

    #[test]
    fn test_bounds() {
        let card = Card::new(1, CardKind::Text, Point::new(10.0, 20.0));
        assert_eq!(card.bounds(), Rect::new(10.0, 20.0, 160.0, 170.0));
    }

    #[test]
    fn test_text_card_json_shape() {
        let card = Card::new(1, CardKind::Text, Point::new(10.0, 20.0));
        let value = serde_json::to_value(&card).unwrap();

        assert_eq!(value["id"], 1);
        assert_eq!(value["type"], "text");
        assert!(value.get("shape").is_none());
        assert_eq!(value["x"], 10.0);
        assert_eq!(value["height"], 150.0);
    }

    #[test]
    fn test_shape_card_json_shape() {
        let kind = CardKind::Shape { shape: ShapeKind::Circle };
        let card = Card::new(2, kind, Point::ZERO);
        let value = serde_json::to_value(&card).unwrap();

        assert_eq!(value["type"], "shape");
        assert_eq!(value["shape"], "circle");
    }

    #[test]
    fn test_parse_integer_coordinates() {
        let json = r#"{"id":1,"type":"text","x":10,"y":20,"width":150,"height":150}"#;
        let card: Card = serde_json::from_str(json).unwrap();

        assert_eq!(card.kind, CardKind::Text);
        assert_eq!(card.origin(), Point::new(10.0, 20.0));
    }

    #[test]
    fn test_shape_defaults_to_circle() {
        let json = r#"{"id":4,"type":"shape","x":0,"y":0,"width":50,"height":50}"#;
        let card: Card = serde_json::from_str(json).unwrap();

        assert_eq!(card.kind.shape(), Some(ShapeKind::Circle));
    }

    #[test]
    fn test_unknown_type_rejected() {
        let json = r#"{"id":1,"type":"sticker","x":0,"y":0,"width":1,"height":1}"#;
        assert!(serde_json::from_str::<Card>(json).is_err());
    }

    #[test]
    fn test_card_id_from_f64() {
        assert_eq!(card_id_from_f64(3.0), Some(3));
        assert_eq!(card_id_from_f64(0.0), Some(0));
        assert_eq!(card_id_from_f64(MAX_CARD_ID as f64), Some(MAX_CARD_ID));
        assert_eq!(card_id_from_f64(2.5), None);
        assert_eq!(card_id_from_f64(-1.0), None);
        assert_eq!(card_id_from_f64(f64::NAN), None);
        assert_eq!(card_id_from_f64(f64::INFINITY), None);
        assert_eq!(card_id_from_f64(MAX_CARD_ID as f64 + 1.0), None);
    }

    #[test]
    fn test_geometry_validation() {
        let mut card = Card::new(1, CardKind::Text, Point::ZERO);
        assert!(card.has_valid_geometry());

        card.width = 0.0;
        assert!(!card.has_valid_geometry());

        card.width = 10.0;
        card.x = f64::NAN;
        assert!(!card.has_valid_geometry());
    }
}
