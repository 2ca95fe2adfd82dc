//! Markdown styling configuration.

use ratatui::style::{Modifier, Style};

use crate::theme::Theme;

/// Styles for rendering markdown elements.
#[derive(Debug, Clone)]
pub struct MarkdownStyles {
    /// H1 header style.
    pub h1: Style,
    /// H2 header style.
    pub h2: Style,
    /// H3+ header style.
    pub h3: Style,
    /// Inline code style.
    pub code: Style,
    /// Code block line style.
    pub code_block: Style,
    /// Emphasis (italic) style.
    pub emphasis: Style,
    /// Strong (bold) style.
    pub strong: Style,
    /// Strikethrough style.
    pub strikethrough: Style,
    /// List marker style.
    pub list_marker: Style,
    /// Link text style.
    pub link: Style,
    /// Blockquote style.
    pub blockquote: Style,
    /// Horizontal rule style.
    pub rule: Style,
    /// Normal text style.
    pub text: Style,
}

impl MarkdownStyles {
    /// Create styles from a theme.
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            h1: Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            h2: Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
            h3: Style::default().fg(theme.subtext).add_modifier(Modifier::BOLD),
            code: Style::default().fg(theme.warning).bg(theme.surface),
            code_block: Style::default().fg(theme.subtext).bg(theme.surface),
            emphasis: Style::default().add_modifier(Modifier::ITALIC),
            strong: Style::default().add_modifier(Modifier::BOLD),
            strikethrough: Style::default().add_modifier(Modifier::CROSSED_OUT),
            list_marker: Style::default().fg(theme.primary),
            link: Style::default()
                .fg(theme.environment)
                .add_modifier(Modifier::UNDERLINED),
            blockquote: Style::default().fg(theme.muted).add_modifier(Modifier::ITALIC),
            rule: Style::default().fg(theme.border),
            text: Style::default().fg(theme.text),
        }
    }
}
