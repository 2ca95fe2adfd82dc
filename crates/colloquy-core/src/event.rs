//! Chat event types.
//!
//! A transcript is an ordered sequence of events:
//! - Message events: user or agent turns
//! - Action events: tool invocations made by the agent
//! - Observation events: results returned to the agent
//! - Error events: failures surfaced by the environment

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single event in a conversation transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatEvent {
    /// Unique event ID, assigned by the event source.
    pub id: u64,
    /// Who produced the event.
    pub source: Source,
    /// When the event occurred (UTC).
    pub timestamp: DateTime<Utc>,
    /// Event type and content.
    pub kind: EventKind,
    /// Whether the detail body is collapsed. Presentation state, not part
    /// of the wire format.
    #[serde(skip)]
    pub collapsed: bool,
}

impl ChatEvent {
    /// Create a new event stamped with the current time.
    pub fn new(id: u64, source: Source, kind: EventKind) -> Self {
        Self::with_timestamp(id, source, Utc::now(), kind)
    }

    /// Create an event with a specific timestamp.
    pub fn with_timestamp(
        id: u64,
        source: Source,
        timestamp: DateTime<Utc>,
        kind: EventKind,
    ) -> Self {
        let collapsed = kind.default_collapsed();
        Self {
            id,
            source,
            timestamp,
            kind,
            collapsed,
        }
    }

    /// Reset the collapse flag to the default for this event's kind.
    ///
    /// Used after deserialization, since `collapsed` is skipped on the wire.
    pub fn reset_collapse(&mut self) {
        self.collapsed = self.kind.default_collapsed();
    }

    /// Attribution text for the header line.
    pub fn attribution(&self) -> &'static str {
        match self.source {
            Source::User => "user",
            Source::Agent => "agent",
            Source::Environment => "env",
        }
    }

    /// Speaker symbol for the header line.
    ///
    /// Returns:
    /// - `›` for user events
    /// - `●` for agent events
    /// - `◦` for environment events
    pub fn speaker_symbol(&self) -> &'static str {
        match self.source {
            Source::User => "\u{203a}",        // ›
            Source::Agent => "\u{25cf}",       // ●
            Source::Environment => "\u{25cb}", // ◦
        }
    }

    /// Check if this is a user-authored message.
    pub fn is_user_message(&self) -> bool {
        self.source == Source::User && matches!(self.kind, EventKind::Message(_))
    }

    /// One-line summary shown when the event is collapsed.
    pub fn summary(&self) -> String {
        match &self.kind {
            EventKind::Message(e) => first_line(&e.content),
            EventKind::Action(e) => {
                if e.detail.is_empty() {
                    e.name.clone()
                } else {
                    format!("{} {}", e.name, first_line(&e.detail))
                }
            }
            EventKind::Observation(e) => {
                let icon = match e.outcome {
                    Outcome::Success => "\u{2713}", // ✓
                    Outcome::Failure => "\u{2717}", // ✗
                    Outcome::Unknown => "-",
                };
                format!("{} {}", icon, first_line(&e.content))
            }
            EventKind::Error(e) => first_line(&e.message),
        }
    }

    /// All body lines (for the expanded view).
    pub fn body_lines(&self) -> Vec<&str> {
        match &self.kind {
            EventKind::Message(e) => e.content.lines().collect(),
            EventKind::Action(e) => e.detail.lines().collect(),
            EventKind::Observation(e) => e.content.lines().collect(),
            EventKind::Error(e) => e.message.lines().collect(),
        }
    }

    /// Check if this event can be expanded/collapsed (multi-line body).
    pub fn is_collapsible(&self) -> bool {
        self.body_lines().len() > 1
    }

    /// The agent's reasoning for an action, if it recorded one.
    pub fn thought(&self) -> Option<&str> {
        match &self.kind {
            EventKind::Action(e) => e.thought.as_deref(),
            _ => None,
        }
    }

    /// Full, untruncated content for copying to the clipboard.
    pub fn copyable_content(&self) -> String {
        match &self.kind {
            EventKind::Message(e) => e.content.clone(),
            EventKind::Action(e) => {
                if e.detail.is_empty() {
                    e.name.clone()
                } else {
                    format!("{}\n{}", e.name, e.detail)
                }
            }
            EventKind::Observation(e) => e.content.clone(),
            EventKind::Error(e) => e.message.clone(),
        }
    }
}

/// Who produced an event. Closed set, exhaustively matched everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    User,
    Agent,
    Environment,
}

/// Event type and content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum EventKind {
    /// A conversational turn (user or agent).
    Message(MessageEvent),
    /// A tool invocation made by the agent.
    Action(ActionEvent),
    /// A result returned to the agent.
    Observation(ObservationEvent),
    /// A failure surfaced by the environment.
    Error(ErrorEvent),
}

impl EventKind {
    /// Whether this event type starts out collapsed.
    ///
    /// Messages and errors are always worth reading in full; action and
    /// observation bodies are noise until the reader asks for them.
    fn default_collapsed(&self) -> bool {
        matches!(self, Self::Action(_) | Self::Observation(_))
    }
}

/// A conversational message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEvent {
    /// Markdown message body.
    pub content: String,
}

impl MessageEvent {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// A tool invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionEvent {
    /// Tool or command name (e.g. "run", "read", "edit").
    pub name: String,
    /// Arguments or payload, one logical item per line.
    #[serde(default)]
    pub detail: String,
    /// The agent's stated reasoning, if any.
    #[serde(default)]
    pub thought: Option<String>,
}

impl ActionEvent {
    pub fn new(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            detail: detail.into(),
            thought: None,
        }
    }

    /// Create an action with an attached thought.
    pub fn with_thought(
        name: impl Into<String>,
        detail: impl Into<String>,
        thought: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            detail: detail.into(),
            thought: Some(thought.into()),
        }
    }
}

/// A tool result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationEvent {
    /// Result content (stdout, file contents, etc.).
    pub content: String,
    /// Whether the observed operation succeeded.
    #[serde(default)]
    pub outcome: Outcome,
}

impl ObservationEvent {
    pub fn new(content: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            content: content.into(),
            outcome,
        }
    }
}

/// Outcome of an observed operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failure,
    #[default]
    Unknown,
}

/// An error event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEvent {
    /// Error description.
    pub message: String,
}

impl ErrorEvent {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Get the first line of a string.
fn first_line(s: &str) -> String {
    s.lines().next().unwrap_or("").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message() {
        let event = ChatEvent::new(
            1,
            Source::User,
            EventKind::Message(MessageEvent::new("Add a login page")),
        );
        assert_eq!(event.attribution(), "user");
        assert_eq!(event.summary(), "Add a login page");
        assert!(event.is_user_message());
        assert!(!event.collapsed);
    }

    #[test]
    fn test_agent_message() {
        let event = ChatEvent::new(
            2,
            Source::Agent,
            EventKind::Message(MessageEvent::new("I'll start with the form.")),
        );
        assert_eq!(event.attribution(), "agent");
        assert!(!event.is_user_message());
        assert_eq!(event.speaker_symbol(), "\u{25cf}");
    }

    #[test]
    fn test_action_summary_and_copy() {
        let event = ChatEvent::new(
            3,
            Source::Agent,
            EventKind::Action(ActionEvent::new("run", "cargo test\ncargo clippy")),
        );
        assert_eq!(event.summary(), "run cargo test");
        assert_eq!(event.copyable_content(), "run\ncargo test\ncargo clippy");
        assert!(event.collapsed); // actions default to collapsed
    }

    #[test]
    fn test_action_without_detail() {
        let event = ChatEvent::new(3, Source::Agent, EventKind::Action(ActionEvent::new("think", "")));
        assert_eq!(event.summary(), "think");
        assert_eq!(event.copyable_content(), "think");
    }

    #[test]
    fn test_action_thought() {
        let event = ChatEvent::new(
            4,
            Source::Agent,
            EventKind::Action(ActionEvent::with_thought(
                "edit",
                "src/login.rs",
                "The form needs validation first.",
            )),
        );
        assert_eq!(event.thought(), Some("The form needs validation first."));
    }

    #[test]
    fn test_observation_outcomes() {
        let ok = ChatEvent::new(
            5,
            Source::Environment,
            EventKind::Observation(ObservationEvent::new("2 tests passed", Outcome::Success)),
        );
        assert!(ok.summary().contains('\u{2713}'));

        let failed = ChatEvent::new(
            6,
            Source::Environment,
            EventKind::Observation(ObservationEvent::new("exit code 1", Outcome::Failure)),
        );
        assert!(failed.summary().contains('\u{2717}'));
    }

    #[test]
    fn test_error_event_stays_expanded() {
        let event = ChatEvent::new(
            7,
            Source::Environment,
            EventKind::Error(ErrorEvent::new("tool crashed\nstack trace follows")),
        );
        assert!(!event.collapsed);
        assert_eq!(event.summary(), "tool crashed");
    }

    #[test]
    fn test_collapsible() {
        let single = ChatEvent::new(
            1,
            Source::User,
            EventKind::Message(MessageEvent::new("one line")),
        );
        assert!(!single.is_collapsible());

        let multi = ChatEvent::new(
            2,
            Source::User,
            EventKind::Message(MessageEvent::new("line 1\nline 2\nline 3")),
        );
        assert!(multi.is_collapsible());
        assert_eq!(multi.body_lines().len(), 3);
    }

    #[test]
    fn test_kind_roundtrips_through_json() {
        let event = ChatEvent::new(
            8,
            Source::Agent,
            EventKind::Action(ActionEvent::new("read", "Cargo.toml")),
        );
        let json = serde_json::to_string(&event).unwrap();
        let back: ChatEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, 8);
        assert_eq!(back.source, Source::Agent);
        assert!(matches!(back.kind, EventKind::Action(_)));
        // collapsed is presentation state and is not serialized
        assert!(!back.collapsed);
    }
}
