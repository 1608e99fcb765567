//! Pinboard Core Library
//!
//! Platform-agnostic card store and JSON file bridge for the Pinboard whiteboard.

pub mod board;
pub mod bridge;
pub mod card;
pub mod mode;
pub mod snapshot;
pub mod store;

pub use board::BoardState;
pub use bridge::{BridgeError, BridgeResult, FileSink, FileSource, export_json, import_json};
pub use card::{Card, CardId, CardKind, MAX_CARD_ID, ShapeKind, card_id_from_f64};
pub use mode::DrawState;
pub use snapshot::{BoardPatch, Snapshot, SnapshotError};
pub use store::BoardStore;
