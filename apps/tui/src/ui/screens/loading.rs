use crate::app::App;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use throbber_widgets_tui::{Throbber, WhichUse, BRAILLE_SIX};

pub const LOADING_LABEL: &str = "Consulting Gemini knowledge base...";

pub fn render_loading(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let label_width = u16::try_from(LOADING_LABEL.chars().count() + 2).unwrap_or(u16::MAX);
    let spinner_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(label_width),
            Constraint::Min(0),
        ])
        .split(rows[1])[1];

    let throbber = Throbber::default()
        .label(LOADING_LABEL)
        .style(Style::default().fg(Color::White))
        .throbber_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .throbber_set(BRAILLE_SIX)
        .use_type(WhichUse::Spin);

    let mut throbber_state = app.throbber_state.clone();
    f.render_stateful_widget(throbber, spinner_area, &mut throbber_state);

    let hint = Paragraph::new(TextLine::from(Span::styled(
        "Comparing Egypt, Saudi Arabia, Turkey, Israel and the UAE",
        Style::default().fg(Color::DarkGray),
    )))
    .alignment(Alignment::Center);
    f.render_widget(hint, rows[2]);
}
