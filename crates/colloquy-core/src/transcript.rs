//! Transcript container and JSON loading.
//!
//! A transcript file is a JSON object with an optional title and an array
//! of events:
//!
//! ```json
//! {
//!   "title": "fix the login page",
//!   "events": [
//!     { "id": 1, "source": "user", "timestamp": "2024-01-15T12:00:00Z",
//!       "kind": { "type": "message", "data": { "content": "hi" } } }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::event::{
    ActionEvent, ChatEvent, ErrorEvent, EventKind, MessageEvent, ObservationEvent, Outcome, Source,
};

/// Errors from transcript loading.
#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("failed to read transcript {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse transcript JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// An ordered conversation transcript.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    /// Optional human-readable session title.
    #[serde(default)]
    pub title: Option<String>,
    /// Events in chronological order.
    pub events: Vec<ChatEvent>,
}

impl Transcript {
    /// Load a transcript from a JSON file.
    pub fn load(path: &Path) -> Result<Self, TranscriptError> {
        let raw = std::fs::read_to_string(path).map_err(|source| TranscriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = raw.len(), "loaded transcript file");
        Self::from_json(&raw)
    }

    /// Parse a transcript from a JSON string.
    pub fn from_json(raw: &str) -> Result<Self, TranscriptError> {
        let mut transcript: Self = serde_json::from_str(raw)?;
        transcript.normalize();
        Ok(transcript)
    }

    /// Restore invariants after deserialization: events sorted by timestamp
    /// (the resolver assumes an ordered sequence) and collapse flags reset
    /// to their per-kind defaults (`collapsed` is not on the wire).
    fn normalize(&mut self) {
        self.events.sort_by_key(|e| e.timestamp);
        for event in &mut self.events {
            event.reset_collapse();
        }
    }

    /// Title to display, falling back to a fixed default.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("transcript")
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// A small built-in session used by `colloquy demo` and the rendering
    /// tests. Timestamps are laid out relative to the current wall clock so
    /// the relative labels look alive.
    pub fn sample() -> Self {
        let now = Utc::now();
        let at = |secs_ago: i64| now - Duration::seconds(secs_ago);

        let events = vec![
            ChatEvent::with_timestamp(
                1,
                Source::User,
                at(570),
                EventKind::Message(MessageEvent::new(
                    "Add a `--json` flag to the status command.",
                )),
            ),
            ChatEvent::with_timestamp(
                2,
                Source::Agent,
                at(565),
                EventKind::Message(MessageEvent::new(
                    "Sure. I'll look at how `status` renders today, then wire the flag in.\n\n- read the command definition\n- add the flag\n- emit with `serde_json`",
                )),
            ),
            ChatEvent::with_timestamp(
                3,
                Source::Agent,
                at(560),
                EventKind::Action(ActionEvent::with_thought(
                    "read",
                    "src/cli/status.rs",
                    "Need the current output path before touching it.",
                )),
            ),
            ChatEvent::with_timestamp(
                4,
                Source::Environment,
                at(558),
                EventKind::Observation(ObservationEvent::new(
                    "pub fn cmd_status() {\n    println!(\"Status\");\n}",
                    Outcome::Success,
                )),
            ),
            ChatEvent::with_timestamp(
                5,
                Source::Agent,
                at(540),
                EventKind::Action(ActionEvent::new(
                    "edit",
                    "src/cli/status.rs +18 -2",
                )),
            ),
            ChatEvent::with_timestamp(
                6,
                Source::Environment,
                at(538),
                EventKind::Observation(ObservationEvent::new("applied", Outcome::Success)),
            ),
            ChatEvent::with_timestamp(
                7,
                Source::Agent,
                at(520),
                EventKind::Action(ActionEvent::new("run", "cargo test -p cli")),
            ),
            ChatEvent::with_timestamp(
                8,
                Source::Environment,
                at(505),
                EventKind::Observation(ObservationEvent::new(
                    "test result: FAILED. 11 passed; 1 failed\n\n---- status_renders stdout ----\nassertion failed: expected plain output",
                    Outcome::Failure,
                )),
            ),
            ChatEvent::with_timestamp(
                9,
                Source::Agent,
                at(480),
                EventKind::Action(ActionEvent::with_thought(
                    "edit",
                    "tests/status.rs +4 -1",
                    "The old test pinned the plain format; update it to cover both.",
                )),
            ),
            ChatEvent::with_timestamp(
                10,
                Source::Agent,
                at(430),
                EventKind::Action(ActionEvent::new("run", "cargo test -p cli")),
            ),
            ChatEvent::with_timestamp(
                11,
                Source::Environment,
                at(415),
                EventKind::Observation(ObservationEvent::new(
                    "test result: ok. 12 passed; 0 failed",
                    Outcome::Success,
                )),
            ),
            ChatEvent::with_timestamp(
                12,
                Source::User,
                at(120),
                EventKind::Message(MessageEvent::new("Looks good. Anything left?")),
            ),
            ChatEvent::with_timestamp(
                13,
                Source::Agent,
                at(117),
                EventKind::Message(MessageEvent::new(
                    "Done. `status --json` emits the full state as pretty-printed JSON, and the plain output is unchanged.",
                )),
            ),
        ];

        Self {
            title: Some("add --json to status".to_string()),
            events,
        }
    }
}
