//! Test utilities for colloquy-tui rendering and navigation tests.
//!
//! The fixtures pin both the event timestamps and the "now" instant so
//! relative labels and response times render deterministically.

use chrono::{DateTime, TimeZone, Utc};
use ratatui::buffer::Buffer;

use colloquy_core::{
    ActionEvent, ChatEvent, EventKind, MessageEvent, ObservationEvent, Outcome, Source, Transcript,
};

use crate::transcript::TranscriptState;

/// The fixed "now" all rendering tests format against.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
}

fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, h, m, s).unwrap()
}

/// A small transcript with known timestamps relative to [`fixed_now`].
pub fn test_transcript() -> Transcript {
    let events = vec![
        ChatEvent::with_timestamp(
            1,
            Source::User,
            at(11, 55, 0),
            EventKind::Message(MessageEvent::new("Rename the config flag.")),
        ),
        ChatEvent::with_timestamp(
            2,
            Source::Agent,
            at(11, 55, 5),
            EventKind::Message(MessageEvent::new("On it.\n\n- find usages\n- rename them")),
        ),
        ChatEvent::with_timestamp(
            3,
            Source::Agent,
            at(11, 55, 10),
            EventKind::Action(ActionEvent::new("run", "rg old_flag")),
        ),
        ChatEvent::with_timestamp(
            4,
            Source::Environment,
            at(11, 55, 12),
            EventKind::Observation(ObservationEvent::new(
                "src/config.rs:12\nsrc/main.rs:40",
                Outcome::Success,
            )),
        ),
        ChatEvent::with_timestamp(
            5,
            Source::User,
            at(11, 59, 30),
            EventKind::Message(MessageEvent::new("Looks good.")),
        ),
        ChatEvent::with_timestamp(
            6,
            Source::Agent,
            at(11, 59, 35),
            EventKind::Message(MessageEvent::new("Done.")),
        ),
    ];

    Transcript {
        title: Some("rename flag".to_string()),
        events,
    }
}

/// Pane state for [`test_transcript`].
pub fn test_transcript_state() -> TranscriptState {
    TranscriptState::from_transcript(test_transcript())
}

/// Collect a render buffer into a newline-joined string.
pub fn buffer_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buffer.cell((x, y)) {
                out.push_str(cell.symbol());
            }
        }
        out.push('\n');
    }
    out
}
