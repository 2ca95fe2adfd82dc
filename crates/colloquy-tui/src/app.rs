//! Application state for the transcript viewer.

use chrono::{DateTime, Utc};

use colloquy_core::Transcript;

use crate::clipboard;
use crate::event::Action;
use crate::theme::Theme;
use crate::transcript::{TranscriptState, SCROLL_SPEED};

/// Ticks of "copied" feedback shown in the status bar (8 ticks at the
/// 250 ms tick rate is about 2 seconds).
const COPY_FLASH_TICKS: u8 = 8;

/// Top-level application state.
pub struct App {
    /// Transcript pane state.
    pub transcript: TranscriptState,
    /// Active color theme.
    pub theme: Theme,
    /// The "now" used for relative timestamp labels. Refreshed on every
    /// tick so labels stay current; formatting itself stays pure.
    pub now: DateTime<Utc>,
    /// Show absolute timestamps instead of relative ones.
    pub show_absolute: bool,
    /// Whether the help overlay is visible.
    pub show_help: bool,
    /// Set when the user asks to exit.
    pub should_quit: bool,
    /// Remaining ticks of "copied" feedback.
    copy_flash: u8,
    /// Last clipboard failure, shown until the next copy attempt.
    copy_error: Option<String>,
    /// Transcript pane height in text rows, updated during draw.
    viewport_rows: usize,
}

impl App {
    /// Create the app for a loaded transcript.
    pub fn new(transcript: Transcript, theme: Theme) -> Self {
        Self {
            transcript: TranscriptState::from_transcript(transcript),
            theme,
            now: Utc::now(),
            show_absolute: false,
            show_help: false,
            should_quit: false,
            copy_flash: 0,
            copy_error: None,
            viewport_rows: 0,
        }
    }

    /// Record the transcript pane height after a draw.
    pub fn set_viewport_rows(&mut self, rows: usize) {
        self.viewport_rows = rows;
    }

    /// Events visible per page at the current viewport size.
    fn page_size(&self) -> usize {
        self.transcript.events_per_page(self.viewport_rows)
    }

    /// Advance time-dependent state by one tick.
    pub fn tick(&mut self) {
        self.now = Utc::now();
        self.copy_flash = self.copy_flash.saturating_sub(1);
    }

    /// Status bar notice: copy feedback or the last clipboard error.
    pub fn notice(&self) -> Option<&str> {
        if self.copy_flash > 0 {
            return Some("copied");
        }
        self.copy_error.as_deref()
    }

    /// Handle a user action.
    pub fn handle_action(&mut self, action: Action) {
        // The help overlay swallows everything except quit
        if self.show_help {
            match action {
                Action::Quit => self.should_quit = true,
                Action::None => {}
                _ => self.show_help = false,
            }
            return;
        }

        match action {
            Action::Quit | Action::Back => self.should_quit = true,
            Action::Help => self.show_help = true,
            Action::Up => {
                self.transcript.select_prev();
                self.ensure_visible();
            }
            Action::Down => {
                self.transcript.select_next();
                self.ensure_visible();
            }
            Action::PageUp => {
                self.transcript.page_up(self.page_size());
                self.ensure_visible();
            }
            Action::PageDown => {
                self.transcript.page_down(self.page_size());
                self.ensure_visible();
            }
            Action::Top => {
                self.transcript.jump_to_start();
            }
            Action::Bottom => {
                self.transcript.jump_to_end();
                self.ensure_visible();
            }
            Action::ToggleCollapse => self.transcript.toggle_collapse(),
            Action::Copy => self.copy_selected(),
            Action::ToggleFollow => {
                self.transcript.toggle_follow();
                self.ensure_visible();
            }
            Action::ToggleAbsolute => self.show_absolute = !self.show_absolute,
            Action::None => {}
        }
    }

    /// Scroll one notch for a mouse wheel event.
    pub fn wheel_scroll(&mut self, up: bool) {
        if up {
            self.transcript.scroll_up(SCROLL_SPEED);
        } else {
            self.transcript.scroll_down(SCROLL_SPEED);
        }
    }

    fn ensure_visible(&mut self) {
        self.transcript.ensure_selection_visible(self.page_size());
    }

    /// Copy the selected event's full content to the clipboard.
    fn copy_selected(&mut self) {
        let Some(event) = self.transcript.selected_event() else {
            return;
        };

        match clipboard::copy_text(&event.copyable_content()) {
            Ok(()) => {
                self.copy_flash = COPY_FLASH_TICKS;
                self.copy_error = None;
            }
            Err(e) => {
                self.copy_flash = 0;
                self.copy_error = Some(format!("copy failed: {e}"));
            }
        }
    }
}
