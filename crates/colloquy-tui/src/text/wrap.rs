//! Width-aware wrapping for ratatui Lines.
//!
//! Wrap points come from textwrap; display width is measured with
//! unicode-width so CJK and emoji don't overflow the pane.

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

/// Wrap a plain text string to the specified width.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    textwrap::wrap(text, width)
        .into_iter()
        .map(std::borrow::Cow::into_owned)
        .collect()
}

/// Wrap styled Lines to fit within the specified width.
///
/// Lines that already fit pass through untouched; longer lines are split
/// with their span styles preserved across the break.
pub fn wrap_lines(lines: Vec<Line<'static>>, width: usize) -> Vec<Line<'static>> {
    if width == 0 {
        return lines;
    }

    let mut result = Vec::new();
    for line in lines {
        result.extend(wrap_line(line, width));
    }
    result
}

/// Display width of a styled line.
fn line_width(line: &Line<'_>) -> usize {
    line.spans.iter().map(|s| s.content.width()).sum()
}

/// Wrap a single Line, preserving span styles.
fn wrap_line(line: Line<'static>, width: usize) -> Vec<Line<'static>> {
    if line_width(&line) <= width {
        return vec![line];
    }

    // Explode the line into styled characters, wrap the plain text, then
    // carve the characters back up along textwrap's break points.
    let styled_chars: Vec<(char, Style)> = line
        .spans
        .iter()
        .flat_map(|span| span.content.chars().map(|ch| (ch, span.style)))
        .collect();
    let plain: String = styled_chars.iter().map(|(ch, _)| ch).collect();

    let mut result = Vec::new();
    let mut idx = 0;

    for piece in textwrap::wrap(&plain, width) {
        // textwrap swallows the whitespace at each break point
        while idx < styled_chars.len()
            && styled_chars[idx].0.is_whitespace()
            && !piece.starts_with(styled_chars[idx].0)
        {
            idx += 1;
        }

        let take = piece.chars().count().min(styled_chars.len() - idx);
        result.push(spans_from_chars(&styled_chars[idx..idx + take]));
        idx += take;
    }

    if result.is_empty() {
        result.push(Line::from(""));
    }
    result
}

/// Rebuild a Line from styled characters, merging runs of equal style.
fn spans_from_chars(chars: &[(char, Style)]) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style: Option<Style> = None;

    for &(ch, style) in chars {
        match run_style {
            Some(s) if s == style => run.push(ch),
            Some(s) => {
                spans.push(Span::styled(std::mem::take(&mut run), s));
                run.push(ch);
                run_style = Some(style);
            }
            None => {
                run.push(ch);
                run_style = Some(style);
            }
        }
    }

    if let Some(s) = run_style {
        if !run.is_empty() {
            spans.push(Span::styled(run, s));
        }
    }

    Line::from(spans)
}
