//! colloquy CLI: view agent conversation transcripts in the terminal

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use colloquy_core::{relative_label, response_duration, Transcript};
use std::path::{Path, PathBuf};

/// Conversation transcript viewer for agent sessions
#[derive(Parser)]
#[command(name = "colloquy")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a transcript file in the viewer
    View {
        /// Path to a transcript JSON file
        file: PathBuf,
    },

    /// Print a transcript to stdout without the TUI
    Dump {
        /// Path to a transcript JSON file
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Open the viewer with a built-in sample session (default)
    Demo,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        None | Some(Commands::Demo) => {
            run_viewer(Transcript::sample());
        }
        Some(Commands::View { file }) => {
            run_viewer(load_or_exit(&file));
        }
        Some(Commands::Dump { file, json }) => {
            cmd_dump(&file, json);
        }
    }
}

fn load_or_exit(path: &Path) -> Transcript {
    match Transcript::load(path) {
        Ok(transcript) => transcript,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn run_viewer(transcript: Transcript) {
    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    if let Err(e) = rt.block_on(colloquy_tui::run_tui(transcript)) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn cmd_dump(path: &Path, json: bool) {
    let transcript = load_or_exit(path);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&transcript).expect("failed to serialize")
        );
        return;
    }

    for line in dump_lines(&transcript, Utc::now()) {
        println!("{line}");
    }
}

/// Plain-text rendering of a transcript, one event block per entry.
fn dump_lines(transcript: &Transcript, now: DateTime<Utc>) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} ({} events)",
        transcript.display_title(),
        transcript.len()
    ));

    for event in &transcript.events {
        lines.push(String::new());

        let mut header = format!(
            "{} {}  {}",
            event.speaker_symbol(),
            event.attribution(),
            relative_label(event.timestamp, now)
        );
        if let Some(elapsed) = response_duration(event, &transcript.events) {
            header.push_str(&format!("  (responded in {elapsed})"));
        }
        lines.push(header);

        if let Some(thought) = event.thought() {
            lines.push(format!("    \u{b7} {thought}"));
        }

        lines.push(format!("    {}", event.summary()));
        for body in event.body_lines().iter().skip(1) {
            lines.push(format!("    {body}"));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use colloquy_core::{
        ActionEvent, ChatEvent, EventKind, MessageEvent, ObservationEvent, Outcome, Source,
    };

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
    }

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, h, m, s).unwrap()
    }

    fn fixture() -> Transcript {
        Transcript {
            title: Some("demo".to_string()),
            events: vec![
                ChatEvent::with_timestamp(
                    1,
                    Source::User,
                    at(11, 55, 0),
                    EventKind::Message(MessageEvent::new("Run the tests.")),
                ),
                ChatEvent::with_timestamp(
                    2,
                    Source::Agent,
                    at(11, 55, 2),
                    EventKind::Action(ActionEvent::with_thought(
                        "run",
                        "cargo test",
                        "Straightforward request.",
                    )),
                ),
                ChatEvent::with_timestamp(
                    3,
                    Source::Environment,
                    at(11, 55, 10),
                    EventKind::Observation(ObservationEvent::new(
                        "test result: ok. 12 passed\n0 failed",
                        Outcome::Success,
                    )),
                ),
                ChatEvent::with_timestamp(
                    4,
                    Source::Agent,
                    at(11, 59, 30),
                    EventKind::Message(MessageEvent::new("All green.")),
                ),
            ],
        }
    }

    #[test]
    fn test_dump_lines_snapshot() {
        let text = dump_lines(&fixture(), fixed_now()).join("\n");
        insta::assert_snapshot!(text, @r"
        demo (4 events)

        › user  5m ago
            Run the tests.

        ● agent  4m ago  (responded in 2.0s)
            · Straightforward request.
            run cargo test

        ○ env  4m ago
            ✓ test result: ok. 12 passed
            0 failed

        ● agent  just now  (responded in 4m 30s)
            All green.
        ");
    }

    #[test]
    fn test_dump_lines_omits_missing_response_times() {
        let transcript = Transcript {
            title: None,
            events: vec![ChatEvent::with_timestamp(
                1,
                Source::Agent,
                at(11, 59, 0),
                EventKind::Message(MessageEvent::new("unprompted")),
            )],
        };
        let text = dump_lines(&transcript, fixed_now()).join("\n");
        assert!(!text.contains("responded in"));
        assert!(text.contains("transcript (1 events)"));
    }

    #[test]
    fn test_cli_parses_subcommands() {
        use clap::CommandFactory;
        Cli::command().debug_assert();

        let cli = Cli::parse_from(["colloquy", "dump", "session.json", "--json"]);
        match cli.command {
            Some(Commands::Dump { file, json }) => {
                assert_eq!(file, PathBuf::from("session.json"));
                assert!(json);
            }
            _ => panic!("expected dump subcommand"),
        }
    }

    #[test]
    fn test_cli_defaults_to_demo() {
        let cli = Cli::parse_from(["colloquy"]);
        assert!(cli.command.is_none());
    }
}
