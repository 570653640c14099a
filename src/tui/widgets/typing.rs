//! "Someone is typing" indicator

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::tui::theme::Theme;

const DOTS: usize = 3;

/// Shows `<name> 正在输入` followed by three dots lit one after another.
pub struct TypingIndicator<'a> {
    name: &'a str,
    theme: &'a Theme,
    frame: usize,
}

impl<'a> TypingIndicator<'a> {
    pub fn new(name: &'a str, theme: &'a Theme) -> Self {
        Self {
            name,
            theme,
            frame: 0,
        }
    }

    /// Animation frame, advanced once per UI tick
    pub fn frame(mut self, frame: usize) -> Self {
        self.frame = frame;
        self
    }
}

/// Whether dot `index` is lit on `frame`.
fn dot_lit(frame: usize, index: usize) -> bool {
    frame % DOTS == index
}

impl Widget for TypingIndicator<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let muted = Style::default().fg(self.theme.secondary_text);
        let mut spans = vec![
            Span::raw(" ".repeat(3)),
            Span::styled(format!("{} 正在输入", self.name), muted),
            Span::raw(" "),
        ];
        for index in 0..DOTS {
            let style = if dot_lit(self.frame, index) {
                muted.add_modifier(Modifier::BOLD)
            } else {
                muted.add_modifier(Modifier::DIM)
            };
            spans.push(Span::styled("●", style));
            spans.push(Span::raw(" "));
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}
