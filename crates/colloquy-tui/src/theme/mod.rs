//! Theme components for the TUI.

mod colors;

pub use colors::Theme;
