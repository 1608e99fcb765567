//! Pinboard Application
//!
//! The application shell: UI action dispatch, configuration and the
//! platform file dialogs around the core card store.

mod action;
mod app;

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
mod dialog;

pub use action::{ActionOutcome, ImportOutcome, ImportTicket, UiAction};
pub use app::{App, AppConfig, AppError};

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
pub use dialog::{DialogSink, DialogSource};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{WebBoard, run_wasm};
