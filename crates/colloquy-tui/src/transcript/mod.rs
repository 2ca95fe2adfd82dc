//! Transcript pane: scroll/selection state and the rendering widget.

mod state;
mod widget;

pub use state::{TranscriptState, SCROLL_SPEED};
pub use widget::TranscriptWidget;

use colloquy_core::ChatEvent;

/// Maximum body lines to show for an expanded event.
pub const MAX_EXPANDED_LINES: usize = 10;

/// Lines per collapsed event (header line, summary line).
pub const COLLAPSED_HEIGHT: usize = 2;

/// Display height of an event in lines, given its collapse state.
pub fn display_height(event: &ChatEvent) -> usize {
    if event.collapsed || !event.is_collapsible() {
        COLLAPSED_HEIGHT
    } else {
        // Header line + body lines + optional "[+N more]" line
        let body = event.body_lines().len();
        let shown = body.min(MAX_EXPANDED_LINES);
        let has_more = body > MAX_EXPANDED_LINES;
        1 + shown + usize::from(has_more)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colloquy_core::{EventKind, MessageEvent, Source};

    #[test]
    fn test_display_height_collapsed() {
        let mut event = ChatEvent::new(
            1,
            Source::User,
            EventKind::Message(MessageEvent::new("a\nb\nc")),
        );
        event.collapsed = true;
        assert_eq!(display_height(&event), COLLAPSED_HEIGHT);
    }

    #[test]
    fn test_display_height_expanded() {
        let event = ChatEvent::new(
            1,
            Source::User,
            EventKind::Message(MessageEvent::new("a\nb\nc")),
        );
        assert!(!event.collapsed);
        assert_eq!(display_height(&event), 4); // header + 3 body lines
    }

    #[test]
    fn test_display_height_caps_long_bodies() {
        let body = (0..30).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        let event = ChatEvent::new(1, Source::User, EventKind::Message(MessageEvent::new(body)));
        assert_eq!(display_height(&event), 1 + MAX_EXPANDED_LINES + 1);
    }
}
