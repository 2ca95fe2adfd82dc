//! colloquy-core: headless transcript model for the colloquy viewer
//!
//! This crate provides everything below the terminal UI:
//! - Chat event model (messages, actions, observations, errors)
//! - Timestamp and duration formatting
//! - Response-time resolution
//! - Transcript loading from JSON

pub mod event;
pub mod response;
pub mod timefmt;
pub mod transcript;

// Re-export commonly used types
pub use event::{
    ActionEvent, ChatEvent, ErrorEvent, EventKind, MessageEvent, ObservationEvent, Outcome, Source,
};
pub use response::{response_duration, response_start};
pub use timefmt::{
    absolute_label, format_duration, format_duration_between, format_duration_ms,
    format_timestamp, format_timestamp_at, parse_instant, relative_label, FormattedTimestamp,
    TimeError,
};
pub use transcript::{Transcript, TranscriptError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_version() {
        let version = core_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }
}
