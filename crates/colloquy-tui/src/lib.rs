//! colloquy-tui: terminal UI for the colloquy conversation viewer
//!
//! This crate renders a loaded transcript:
//! - Transcript pane with per-event headers, relative timestamps, and
//!   response-time annotations
//! - Markdown rendering for message bodies
//! - Collapse/expand, follow mode, clipboard copy
//! - Status bar and help overlay

mod app;
mod clipboard;
mod event;
#[cfg(test)]
pub mod test_utils;
mod text;
mod theme;
mod transcript;
mod widgets;

pub use app::App;
pub use colloquy_core;
pub use event::{key_to_action, Action, Event, EventHandler};
pub use theme::Theme;

use colloquy_core::Transcript;

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Frame, Terminal,
};
use std::io::{self, stdout};

use crate::transcript::TranscriptWidget;
use crate::widgets::{render_help_overlay, KeyHint, StatusBar};

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the transcript viewer.
///
/// Sets up the terminal, runs the event loop, and restores the terminal on
/// exit.
pub async fn run_tui(transcript: Transcript) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(transcript, Theme::default());

    // 4 Hz tick rate keeps relative timestamps and copy feedback fresh
    let mut events = EventHandler::new(250);

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| draw(frame, app))?;

        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => {
                    app.handle_action(key_to_action(key));
                }
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollUp => app.wheel_scroll(true),
                    MouseEventKind::ScrollDown => app.wheel_scroll(false),
                    _ => {}
                },
                Event::Tick => {
                    app.tick();
                }
                Event::Resize(_, _) => {
                    // Redrawn on the next loop pass with the new size
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Draw one frame: transcript pane, status bar, optional help overlay.
fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.area();
    let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);

    // The pane border costs two rows
    app.set_viewport_rows(chunks[0].height.saturating_sub(2) as usize);

    let pane = TranscriptWidget::new(&app.transcript, &app.theme, app.now)
        .focused(!app.show_help)
        .show_absolute(app.show_absolute);
    frame.render_widget(pane, chunks[0]);

    let hints = KeyHint::viewer_hints();
    let bar = StatusBar::new(&hints, &app.theme)
        .position(app.transcript.selected(), app.transcript.len())
        .following(app.transcript.is_following())
        .notice(app.notice());
    frame.render_widget(bar, chunks[1]);

    if app.show_help {
        render_help_overlay(area, frame.buffer_mut(), &app.theme);
    }
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tui_version() {
        let version = tui_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }
}

#[cfg(test)]
mod shell_tests {
    use super::*;
    use crate::test_utils::{buffer_text, fixed_now, test_transcript};
    use ratatui::backend::TestBackend;

    fn test_app() -> App {
        let mut app = App::new(test_transcript(), Theme::default());
        app.now = fixed_now();
        app
    }

    fn render_shell(app: &mut App) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_shell_renders_title_and_events() {
        let mut app = test_app();
        let content = render_shell(&mut app);

        assert!(content.contains("rename flag"));
        assert!(content.contains("Rename the config flag."));
        assert!(content.contains("responded in 5.0s"));
    }

    #[test]
    fn test_shell_renders_status_bar() {
        let mut app = test_app();
        let content = render_shell(&mut app);

        assert!(content.contains("6/6"));
        assert!(content.contains("follow"));
        assert!(content.contains("[q] quit"));
    }

    #[test]
    fn test_shell_viewport_rows_set_by_draw() {
        let mut app = test_app();
        render_shell(&mut app);

        // 24 rows - 1 status bar - 2 border rows
        app.handle_action(Action::PageUp);
        assert!(!app.transcript.is_following());
    }

    #[test]
    fn test_shell_help_overlay_renders_on_top() {
        let mut app = test_app();
        app.handle_action(Action::Help);
        let content = render_shell(&mut app);

        assert!(content.contains("Keys"));
        assert!(content.contains("toggle follow mode"));
    }

    #[test]
    fn test_shell_absolute_timestamps_toggle() {
        let mut app = test_app();
        app.handle_action(Action::ToggleAbsolute);
        let content = render_shell(&mut app);

        assert!(!content.contains("m ago"));
        assert!(content.contains("2024-01"));
    }
}
