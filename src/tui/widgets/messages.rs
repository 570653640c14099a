//! Message list widget with chat bubbles and code boxes

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::StatefulWidget,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::chat::{avatar_badge, ChatMessage, CodeSnippet, MessageBody};
use crate::tui::theme::Theme;

/// Badge plus the space separating it from the bubble
const GUTTER: usize = 3;
/// Horizontal padding inside a bubble
const PAD: usize = 1;

/// State for the message list
#[derive(Debug)]
pub struct MessageListState {
    /// Current scroll offset (in lines)
    pub offset: usize,
    /// Total content height (in lines)
    pub content_height: usize,
    /// Viewport height
    pub viewport_height: usize,
    /// Keep the newest message in view on the next render
    follow: bool,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self {
            offset: 0,
            content_height: 0,
            viewport_height: 0,
            follow: true,
        }
    }
}

impl MessageListState {
    pub fn scroll_up(&mut self, amount: usize) {
        self.offset = self.offset.saturating_sub(amount);
        self.follow = false;
    }

    pub fn scroll_down(&mut self, amount: usize) {
        let max_offset = self.max_offset();
        self.offset = (self.offset + amount).min(max_offset);
        self.follow = self.offset == max_offset;
    }

    /// Snap to the newest message. Applied at the next render, when the
    /// height of freshly appended content is known.
    pub fn scroll_to_bottom(&mut self) {
        self.follow = true;
    }

    pub fn is_following(&self) -> bool {
        self.follow
    }

    fn max_offset(&self) -> usize {
        self.content_height.saturating_sub(self.viewport_height)
    }
}

/// One laid-out row of a bubble, before padding and alignment.
struct Row {
    spans: Vec<Span<'static>>,
    width: usize,
}

impl Row {
    fn text(text: &str, style: Style) -> Self {
        Self {
            width: text.width(),
            spans: vec![Span::styled(text.to_string(), style)],
        }
    }

    fn blank() -> Self {
        Self {
            spans: Vec::new(),
            width: 0,
        }
    }
}

/// Widget for rendering the message list
pub struct MessageList<'a> {
    messages: &'a [ChatMessage],
    theme: &'a Theme,
}

impl<'a> MessageList<'a> {
    pub fn new(messages: &'a [ChatMessage], theme: &'a Theme) -> Self {
        Self { messages, theme }
    }

    /// Lay out every message for the given width, one blank line after each.
    pub fn lines(&self, width: u16) -> Vec<Line<'static>> {
        let width = width as usize;
        let mut lines = Vec::new();
        for msg in self.messages {
            lines.extend(self.bubble(msg, width));
            lines.push(Line::default());
        }
        lines
    }

    fn bubble(&self, msg: &ChatMessage, width: usize) -> Vec<Line<'static>> {
        let theme = self.theme;
        let (bubble_bg, text_fg, time_fg, name_fg) = if msg.is_sent() {
            (
                theme.message_out,
                Theme::ON_ACCENT,
                Theme::ON_ACCENT_MUTED,
                Theme::ON_ACCENT,
            )
        } else {
            (theme.message_in, theme.text, theme.secondary_text, theme.text)
        };
        let max_inner = (width * 4 / 5).saturating_sub(GUTTER + 2 * PAD).max(1);

        let name = Span::styled(
            msg.sender().to_string(),
            Style::default()
                .fg(name_fg)
                .bg(bubble_bg)
                .add_modifier(Modifier::BOLD),
        );
        let time = Span::styled(msg.time().to_string(), Style::default().fg(time_fg).bg(bubble_bg));
        let gap = Span::styled("  ", Style::default().bg(bubble_bg));
        let header_width = msg.sender().width() + msg.time().width() + 2;
        let header = if msg.is_sent() {
            vec![time, gap, name]
        } else {
            vec![name, gap, time]
        };

        let mut rows = vec![Row {
            spans: header,
            width: header_width,
        }];
        let text_style = Style::default().fg(text_fg).bg(bubble_bg);
        match msg.body() {
            MessageBody::Plain(content) => {
                rows.extend(wrap_text(content, max_inner, text_style));
            }
            MessageBody::WithCode(snippet) => {
                let prose = snippet.prose.trim_end_matches(|c: char| c == '\n' || c == '\r');
                if !prose.is_empty() {
                    rows.extend(wrap_text(prose, max_inner, text_style));
                    rows.push(Row::blank());
                }
                rows.extend(self.code_box(&snippet, max_inner));
            }
        }

        let inner = rows.iter().map(|r| r.width).max().unwrap_or(0);
        let bubble_width = inner + 2 * PAD;
        let badge = Span::styled(
            avatar_badge(msg.avatar()),
            Style::default()
                .fg(theme.secondary_text)
                .bg(theme.border)
                .add_modifier(Modifier::BOLD),
        );
        let indent = " ".repeat(width.saturating_sub(GUTTER + bubble_width));

        rows.into_iter()
            .enumerate()
            .map(|(i, row)| {
                let body = pad_row(row, inner, bubble_bg);
                let mut spans = Vec::with_capacity(body.len() + 3);
                if msg.is_sent() {
                    spans.push(Span::raw(indent.clone()));
                    spans.extend(body);
                    spans.push(Span::raw(" "));
                    if i == 0 {
                        spans.push(badge.clone());
                    }
                } else {
                    if i == 0 {
                        spans.push(badge.clone());
                        spans.push(Span::raw(" "));
                    } else {
                        spans.push(Span::raw(" ".repeat(GUTTER)));
                    }
                    spans.extend(body);
                }
                Line::from(spans)
            })
            .collect()
    }

    fn code_box(&self, snippet: &CodeSnippet<'_>, max_inner: usize) -> Vec<Row> {
        let border = Style::default()
            .fg(self.theme.border)
            .bg(self.theme.secondary_background);
        let code = Style::default()
            .fg(self.theme.text)
            .bg(self.theme.secondary_background);
        let label_style = Style::default()
            .fg(self.theme.secondary_text)
            .bg(self.theme.secondary_background);

        let limit = max_inner.saturating_sub(4).max(1);
        let mut code_lines: Vec<String> = snippet
            .body()
            .lines()
            .flat_map(|line| hard_wrap(line, limit))
            .collect();
        if code_lines.is_empty() {
            code_lines.push(String::new());
        }

        let mut label = snippet
            .language()
            .map(|lang| format!(" {lang} "))
            .unwrap_or_default();
        if label.width() + 1 > limit {
            label.clear();
        }
        let content_width = code_lines
            .iter()
            .map(|l| l.width())
            .max()
            .unwrap_or(0)
            .max(label.width() + 1)
            .min(limit);

        let mut rows = Vec::with_capacity(code_lines.len() + 2);
        let dashes = "─".repeat(content_width + 1 - label.width());
        rows.push(Row {
            width: content_width + 4,
            spans: vec![
                Span::styled("┌─", border),
                Span::styled(label, label_style),
                Span::styled(format!("{dashes}┐"), border),
            ],
        });
        for line in code_lines {
            let fill = " ".repeat(content_width.saturating_sub(line.width()));
            rows.push(Row {
                width: content_width + 4,
                spans: vec![
                    Span::styled("│ ", border),
                    Span::styled(format!("{line}{fill}"), code),
                    Span::styled(" │", border),
                ],
            });
        }
        rows.push(Row {
            width: content_width + 4,
            spans: vec![Span::styled(
                format!("└{}┘", "─".repeat(content_width + 2)),
                border,
            )],
        });
        rows
    }
}

impl StatefulWidget for MessageList<'_> {
    type State = MessageListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let lines = self.lines(area.width);

        state.content_height = lines.len();
        state.viewport_height = area.height as usize;
        let max_offset = state.max_offset();
        if state.follow || state.offset > max_offset {
            state.offset = max_offset;
        }

        for (row, line) in lines
            .iter()
            .skip(state.offset)
            .take(area.height as usize)
            .enumerate()
        {
            buf.set_line(area.x, area.y + row as u16, line, area.width);
        }
    }
}

fn wrap_text(text: &str, width: usize, style: Style) -> Vec<Row> {
    textwrap::wrap(text, width)
        .into_iter()
        .map(|line| Row::text(&line, style))
        .collect()
}

fn pad_row(row: Row, inner: usize, bg: Color) -> Vec<Span<'static>> {
    let fill = Style::default().bg(bg);
    let mut spans = Vec::with_capacity(row.spans.len() + 2);
    spans.push(Span::styled(" ".repeat(PAD), fill));
    spans.extend(row.spans);
    spans.push(Span::styled(
        " ".repeat(inner.saturating_sub(row.width) + PAD),
        fill,
    ));
    spans
}

/// Break a code line at exactly `width` display columns.
fn hard_wrap(line: &str, width: usize) -> Vec<String> {
    let line = line.replace('\t', "    ");
    let mut out = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;
    for c in line.chars() {
        let w = c.width().unwrap_or(0);
        if current_width + w > width && !current.is_empty() {
            out.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(c);
        current_width += w;
    }
    out.push(current);
    out
}
