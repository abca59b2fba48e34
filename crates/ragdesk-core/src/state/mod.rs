//! Process-wide shell state.

pub mod model;

pub use model::{AppState, Page};
