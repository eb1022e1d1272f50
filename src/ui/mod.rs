//! Terminal UI components
//!
//! Built with ratatui. State is turned into a [`View`] first, then drawn.
//! Keyboard-first navigation throughout.

pub mod render;
pub mod theme;
pub mod view;

pub use render::draw;
pub use theme::Theme;
pub use view::{CardKind, PosterCard, SuggestionRow, View};
