//! Response-time resolution.
//!
//! An agent event's response time is measured from the most recent user
//! event that precedes it in the transcript. Both functions are pure over
//! their inputs; the wall clock is never consulted.

use chrono::{DateTime, Utc};

use crate::event::{ChatEvent, Source};
use crate::timefmt::format_duration_between;

/// Find when the agent started "responding": the timestamp of the nearest
/// user event strictly before `target` in `events`.
///
/// Returns `None` when:
/// - `target` is not agent-sourced (response time is meaningless otherwise)
/// - `target` is not present in `events`
/// - no user event precedes the target
pub fn response_start(target: &ChatEvent, events: &[ChatEvent]) -> Option<DateTime<Utc>> {
    if target.source != Source::Agent {
        return None;
    }

    let index = events.iter().position(|e| e.id == target.id)?;

    // Walk backward from the event just before the target. Events at or
    // after the target's index are never considered.
    events[..index]
        .iter()
        .rev()
        .find(|e| e.source == Source::User)
        .map(|e| e.timestamp)
}

/// Formatted elapsed time from the resolved user event to the target.
///
/// `None` whenever [`response_start`] resolves nothing.
pub fn response_duration(target: &ChatEvent, events: &[ChatEvent]) -> Option<String> {
    response_start(target, events).map(|start| format_duration_between(start, target.timestamp))
}
