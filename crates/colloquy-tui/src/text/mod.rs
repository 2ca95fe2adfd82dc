//! Text rendering utilities.
//!
//! - [`render_markdown`] - Render markdown to styled ratatui Lines
//! - [`MarkdownStyles`] - Style configuration for markdown elements
//! - [`wrap_text`], [`wrap_lines`] - Width-aware wrapping

mod markdown;
mod styles;
mod wrap;

pub use markdown::render_markdown;
pub use styles::MarkdownStyles;
pub use wrap::{wrap_lines, wrap_text};
