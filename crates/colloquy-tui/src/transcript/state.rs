//! Transcript pane state.
//!
//! Handles selection, scrolling, follow mode, and collapse toggling over a
//! loaded transcript. The events themselves are read-only apart from the
//! collapse flag.

use colloquy_core::{ChatEvent, Transcript};

use super::COLLAPSED_HEIGHT;

/// Events scrolled per mouse wheel tick.
pub const SCROLL_SPEED: usize = 3;

/// Transcript pane state.
#[derive(Debug, Default)]
pub struct TranscriptState {
    /// All events in chronological order.
    events: Vec<ChatEvent>,
    /// Session title.
    title: String,
    /// Index of the selected event (if any).
    selected: Option<usize>,
    /// Index of the first visible event.
    scroll_offset: usize,
    /// Whether the view sticks to the newest event.
    follow: bool,
}

impl TranscriptState {
    /// Build pane state from a loaded transcript. Starts in follow mode
    /// with the newest event selected.
    pub fn from_transcript(transcript: Transcript) -> Self {
        let title = transcript.display_title().to_string();
        let selected = transcript.events.len().checked_sub(1);
        Self {
            events: transcript.events,
            title,
            selected,
            scroll_offset: 0,
            follow: true,
        }
    }

    pub fn events(&self) -> &[ChatEvent] {
        &self.events
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// The selected event, if any.
    pub fn selected_event(&self) -> Option<&ChatEvent> {
        self.selected.and_then(|i| self.events.get(i))
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn is_following(&self) -> bool {
        self.follow
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Move selection up. Stops at the first event; disables follow mode.
    pub fn select_prev(&mut self) {
        if self.events.is_empty() {
            return;
        }

        self.follow = false;

        match self.selected {
            Some(0) => {}
            Some(i) => self.selected = Some(i - 1),
            None => self.selected = Some(self.events.len() - 1),
        }
    }

    /// Move selection down. Stops at the last event.
    pub fn select_next(&mut self) {
        if self.events.is_empty() {
            return;
        }

        match self.selected {
            Some(i) if i >= self.events.len() - 1 => {}
            Some(i) => self.selected = Some(i + 1),
            None => self.selected = Some(0),
        }
    }

    /// Jump to the first event. Disables follow mode.
    pub fn jump_to_start(&mut self) {
        if self.events.is_empty() {
            return;
        }

        self.follow = false;
        self.selected = Some(0);
        self.scroll_offset = 0;
    }

    /// Jump to the last event. Re-enables follow mode.
    pub fn jump_to_end(&mut self) {
        if self.events.is_empty() {
            return;
        }

        self.follow = true;
        self.selected = Some(self.events.len() - 1);
    }

    /// Move selection up by a page. Disables follow mode.
    pub fn page_up(&mut self, visible_count: usize) {
        if self.events.is_empty() {
            return;
        }

        self.follow = false;

        let page = visible_count.max(1);
        self.selected = Some(self.selected.map_or(0, |i| i.saturating_sub(page)));
    }

    /// Move selection down by a page.
    pub fn page_down(&mut self, visible_count: usize) {
        if self.events.is_empty() {
            return;
        }

        let page = visible_count.max(1);
        let last = self.events.len() - 1;
        self.selected = Some(self.selected.map_or(page.min(last), |i| (i + page).min(last)));
    }

    /// Scroll up by the given number of events. Disables follow mode.
    pub fn scroll_up(&mut self, amount: usize) {
        self.follow = false;
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
    }

    /// Scroll down by the given number of events.
    pub fn scroll_down(&mut self, amount: usize) {
        let max_offset = self.events.len().saturating_sub(1);
        self.scroll_offset = (self.scroll_offset + amount).min(max_offset);
    }

    /// Toggle follow mode. Enabling it jumps to the newest event.
    pub fn toggle_follow(&mut self) {
        if self.follow {
            self.follow = false;
        } else {
            self.jump_to_end();
        }
    }

    /// Toggle collapse for the selected event. No-op on single-line bodies.
    pub fn toggle_collapse(&mut self) {
        if let Some(idx) = self.selected {
            if let Some(event) = self.events.get_mut(idx) {
                if event.is_collapsible() {
                    event.collapsed = !event.collapsed;
                }
            }
        }
    }

    /// Ensure the selected event is visible, adjusting `scroll_offset`.
    pub fn ensure_selection_visible(&mut self, visible_count: usize) {
        let Some(selected) = self.selected else {
            return;
        };

        if visible_count == 0 {
            return;
        }

        if selected < self.scroll_offset {
            self.scroll_offset = selected;
        }

        let last_visible = self.scroll_offset + visible_count - 1;
        if selected > last_visible {
            self.scroll_offset = selected.saturating_sub(visible_count - 1);
        }
    }

    /// How many events fit in the given height, assuming collapsed height.
    pub fn events_per_page(&self, height: usize) -> usize {
        height / COLLAPSED_HEIGHT
    }

    /// Visible events for the current scroll position, as
    /// `(event_index, &event)` pairs.
    pub fn visible_events(&self, visible_count: usize) -> Vec<(usize, &ChatEvent)> {
        self.events
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(visible_count)
            .collect()
    }
}
