//! Markdown rendering using pulldown-cmark.
//!
//! Message bodies arrive as markdown. [`render_markdown`] converts them to
//! styled ratatui Lines, wrapped to the available width.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::{
    style::Style,
    text::{Line, Span},
};

use crate::theme::Theme;

use super::styles::MarkdownStyles;
use super::wrap::wrap_lines;

/// Render markdown text to styled, width-wrapped ratatui Lines.
pub fn render_markdown(input: &str, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(input, options);
    let styles = MarkdownStyles::from_theme(theme);

    let mut renderer = MarkdownRenderer::new(styles, width);
    for event in parser {
        renderer.handle_event(event);
    }
    renderer.finish()
}

/// Internal renderer that folds pulldown-cmark events into Lines.
struct MarkdownRenderer {
    lines: Vec<Line<'static>>,
    styles: MarkdownStyles,
    /// Target width for wrapping. Code blocks are exempt.
    width: usize,
    /// Stack of active inline styles.
    style_stack: Vec<Style>,
    /// Spans of the line being built.
    current_spans: Vec<Span<'static>>,
    /// Nesting depth inside lists.
    indent_level: usize,
    in_code_block: bool,
    in_blockquote: bool,
    /// List marker waiting for the item's first text.
    pending_list_marker: Option<String>,
    /// Checkbox state when inside a task-list item.
    task_checkbox: Option<bool>,
}

impl MarkdownRenderer {
    fn new(styles: MarkdownStyles, width: usize) -> Self {
        Self {
            lines: Vec::new(),
            styles,
            width,
            style_stack: Vec::new(),
            current_spans: Vec::new(),
            indent_level: 0,
            in_code_block: false,
            in_blockquote: false,
            pending_list_marker: None,
            task_checkbox: None,
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush_line();
        // Drop a single trailing paragraph gap
        if self.lines.last().is_some_and(|l| l.width() == 0) {
            self.lines.pop();
        }
        self.lines
    }

    fn handle_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                self.flush_line();
                let style = match level {
                    HeadingLevel::H1 => self.styles.h1,
                    HeadingLevel::H2 => self.styles.h2,
                    _ => self.styles.h3,
                };
                self.style_stack.push(style);
            }
            Event::End(TagEnd::Heading(_)) => {
                self.flush_line();
                self.style_stack.pop();
            }

            Event::Start(Tag::Emphasis) => self.style_stack.push(self.styles.emphasis),
            Event::Start(Tag::Strong) => self.style_stack.push(self.styles.strong),
            Event::Start(Tag::Strikethrough) => self.style_stack.push(self.styles.strikethrough),
            Event::Start(Tag::Link { .. }) => self.style_stack.push(self.styles.link),
            Event::End(
                TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link,
            ) => {
                self.style_stack.pop();
            }

            Event::Start(Tag::CodeBlock(_)) => {
                self.flush_line();
                self.in_code_block = true;
            }
            Event::End(TagEnd::CodeBlock) => {
                self.flush_line();
                self.in_code_block = false;
            }

            Event::Start(Tag::List(_)) => {
                self.flush_line();
                self.indent_level += 1;
            }
            Event::End(TagEnd::List(_)) => {
                self.indent_level = self.indent_level.saturating_sub(1);
            }
            Event::Start(Tag::Item) => {
                self.flush_line();
                let indent = "  ".repeat(self.indent_level.saturating_sub(1));
                self.pending_list_marker = Some(format!("{indent}\u{2022} "));
            }
            Event::End(TagEnd::Item) => {
                self.flush_line();
                self.task_checkbox = None;
            }
            Event::TaskListMarker(checked) => {
                self.task_checkbox = Some(checked);
            }

            Event::Start(Tag::BlockQuote) => {
                self.flush_line();
                self.in_blockquote = true;
            }
            Event::End(TagEnd::BlockQuote) => {
                self.flush_line();
                self.in_blockquote = false;
            }

            Event::End(TagEnd::Paragraph) => {
                self.flush_line();
                self.lines.push(Line::from(""));
            }

            Event::Rule => {
                self.flush_line();
                let width = if self.width == 0 { 40 } else { self.width };
                self.lines.push(Line::from(Span::styled(
                    "\u{2500}".repeat(width),
                    self.styles.rule,
                )));
            }

            Event::Text(text) => self.add_text(&text),
            Event::Code(code) => {
                self.current_spans
                    .push(Span::styled(format!("`{code}`"), self.styles.code));
            }

            Event::SoftBreak => self.add_text(" "),
            Event::HardBreak => self.flush_line(),

            // Tables, images, footnotes, raw HTML: not worth rendering in a
            // transcript pane; their text content still arrives as Text events.
            _ => {}
        }
    }

    fn add_text(&mut self, text: &str) {
        if self.in_code_block {
            for line in text.lines() {
                let indent = "  ".repeat(self.indent_level.saturating_sub(1));
                self.current_spans.push(Span::styled(
                    format!("{indent}  {line}"),
                    self.styles.code_block,
                ));
                self.flush_code_line();
            }
            return;
        }

        if let Some(marker) = self.pending_list_marker.take() {
            self.current_spans
                .push(Span::styled(marker, self.styles.list_marker));
            if let Some(checked) = self.task_checkbox.take() {
                let checkbox = if checked { "[x] " } else { "[ ] " };
                self.current_spans
                    .push(Span::styled(checkbox, self.styles.list_marker));
            }
        }

        if self.in_blockquote && self.current_spans.is_empty() {
            self.current_spans
                .push(Span::styled("> ".to_string(), self.styles.blockquote));
        }

        let style = self.current_style();
        self.current_spans.push(Span::styled(text.to_string(), style));
    }

    fn current_style(&self) -> Style {
        let mut style = self.styles.text;
        for s in &self.style_stack {
            style = style.patch(*s);
        }
        style
    }

    /// Flush the current line, wrapping it to the target width.
    fn flush_line(&mut self) {
        if self.current_spans.is_empty() {
            return;
        }
        let line = Line::from(std::mem::take(&mut self.current_spans));
        self.lines.extend(wrap_lines(vec![line], self.width));
    }

    /// Flush a code line without wrapping; code keeps its own layout.
    fn flush_code_line(&mut self) {
        if self.current_spans.is_empty() {
            return;
        }
        self.lines
            .push(Line::from(std::mem::take(&mut self.current_spans)));
    }
}
