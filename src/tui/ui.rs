//! Main UI rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use unicode_width::UnicodeWidthStr;

use super::app::TuiApp;
use crate::chat::Participant;
use crate::tui::widgets::{MessageList, TypingIndicator};

const TITLE: &str = "GitHub Chat";

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &mut TuiApp) {
    let theme = app.theme;
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        frame.area(),
    );

    let typing = app.typing_indicator && app.session.pending_replies() > 0;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),                          // Title bar
            Constraint::Min(0),                             // Messages
            Constraint::Length(if typing { 1 } else { 0 }), // Typing indicator
            Constraint::Length(4),                          // Input
        ])
        .split(frame.area());

    render_title(frame, app, chunks[0]);
    render_messages(frame, app, chunks[1]);
    if typing {
        frame.render_widget(
            TypingIndicator::new(Participant::REMOTE.name, &theme).frame(app.tick),
            chunks[2],
        );
    }
    render_input(frame, app, chunks[3]);

    if app.show_help {
        render_help(frame, app, frame.area());
    }
}

fn render_title(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.secondary_background));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mode_glyph = if app.session.conversation().mode().is_dark() {
        "☀"
    } else {
        "☾"
    };
    let glyph = Span::styled(
        format!("{mode_glyph} "),
        Style::default().fg(theme.secondary_text),
    );
    let mut right = Line::from(glyph.clone());
    if let Some((_, status)) = &app.status {
        let with_status = Line::from(vec![
            Span::styled(status.clone(), Style::default().fg(theme.primary)),
            Span::raw("  "),
            glyph,
        ]);
        // Side columns are symmetric so the title stays centered
        if usize::from(inner.width) >= TITLE.width() + 2 * with_status.width() {
            right = with_status;
        }
    }

    let side = u16::try_from(right.width()).unwrap_or(u16::MAX);
    let [_, middle, right_area] = Layout::horizontal([
        Constraint::Length(side),
        Constraint::Min(0),
        Constraint::Length(side),
    ])
    .areas(inner);

    let title = Paragraph::new(Line::from(Span::styled(
        TITLE,
        Style::default()
            .fg(theme.text)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(title, middle);
    frame.render_widget(
        Paragraph::new(right).alignment(Alignment::Right),
        right_area,
    );
}

fn render_messages(frame: &mut Frame, app: &mut TuiApp, area: Rect) {
    let area = area.inner(ratatui::layout::Margin::new(1, 1));
    let conversation = app.session.conversation();
    let message_list = MessageList::new(conversation.messages(), &app.theme);
    frame.render_stateful_widget(message_list, area, &mut app.message_list_state);
}

fn render_input(frame: &mut Frame, app: &mut TuiApp, area: Rect) {
    let theme = app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.secondary_background))
        .title(Line::from(Span::styled(
            " Message ",
            Style::default().fg(theme.secondary_text),
        )))
        .title(
            Line::from(Span::styled(
                " Enter 发送 ",
                Style::default()
                    .fg(theme.message_out)
                    .add_modifier(Modifier::BOLD),
            ))
            .right_aligned(),
        );

    app.input.set_block(block);
    frame.render_widget(&app.input, area);
}

fn render_help(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let theme = &app.theme;
    let key = Style::default().fg(theme.primary);
    let shortcuts = [
        ("Enter", "Send message"),
        ("Shift+Enter", "New line (Alt+Enter also works)"),
        ("Ctrl+T", "Toggle light/dark mode"),
        ("Ctrl+Y", "Copy latest code snippet"),
        ("Ctrl+V", "Paste"),
        ("↑/↓ PgUp/PgDn", "Scroll messages"),
        ("F1", "Show this help"),
        ("Esc", "Close help"),
        ("Ctrl+Q", "Quit"),
    ];

    let mut help_lines = vec![
        Line::from(Span::styled(
            " Keyboard Shortcuts ",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    help_lines.extend(shortcuts.iter().map(|(combo, action)| {
        Line::from(vec![
            Span::styled(format!(" {combo:<15}"), key),
            Span::raw(*action),
        ])
    }));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().fg(theme.text).bg(theme.secondary_background))
        .title(" Help ");

    let paragraph = Paragraph::new(help_lines)
        .block(block)
        .alignment(Alignment::Left);

    let area = centered_rect(60, 50, area);
    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
