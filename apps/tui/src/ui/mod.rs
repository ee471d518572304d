// UI module for mena-energy-tracker
// Handles all UI rendering functions

pub mod screens;
pub mod widgets;

use crate::app::App;
use mena_energy_tracker::LoadState;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header
            Constraint::Min(8),    // Body
            Constraint::Length(3), // Status
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(1, 0)));

    render_header(app, f, main_layout[0]);

    match app.load.state() {
        LoadState::Idle | LoadState::Loading => {
            screens::loading::render_loading(app, f, main_layout[1]);
        }
        LoadState::Error(message) => screens::error::render_error(message, f, main_layout[1]),
        LoadState::Success(result) => {
            screens::dashboard::render_dashboard(app, result, f, main_layout[1]);
        }
    }

    render_status_section(app, f, main_layout[2]);
    render_shortcuts(f, main_layout[3]);

    if app.show_help {
        screens::help::render_help_popup(f, f.area());
    }
}

fn render_header(app: &App, f: &mut Frame<'_>, area: Rect) {
    let header_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let header_inner = header_block.inner(area);
    f.render_widget(header_block, area);

    let header_split = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(header_inner);

    let title = Paragraph::new(Text::from(vec![
        TextLine::from(Span::styled(
            "MENA Energy Tracker",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(Span::styled(
            "Egypt & Neighbors Comparative Analysis",
            Style::default().fg(Color::Gray),
        )),
    ]));
    f.render_widget(title, header_split[0]);

    let powered_by = Paragraph::new(TextLine::from(vec![
        Span::styled("Powered by ", Style::default().fg(Color::Gray)),
        Span::styled(
            app.model.as_str(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Right);
    f.render_widget(powered_by, header_split[1]);
}

fn render_status_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let status_block = Block::default()
        .title(" Status ")
        .title_style(Style::default().fg(Color::Yellow))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let message_style = if app.load.error_message().is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };

    let mut spans = vec![Span::styled(app.status_message.as_str(), message_style)];
    if let Some(updated) = app.last_updated {
        spans.push(Span::styled(
            format!("  Last updated {}", updated.format("%H:%M:%S")),
            Style::default().fg(Color::Gray),
        ));
    }

    let status_paragraph = Paragraph::new(TextLine::from(spans))
        .block(status_block)
        .wrap(Wrap { trim: true });
    f.render_widget(status_paragraph, area);
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(Color::Gray);

    let shortcuts = TextLine::from(vec![
        Span::styled("r", key_style),
        Span::styled(": Refresh | ", text_style),
        Span::styled("Tab", key_style),
        Span::styled(": Chart | ", text_style),
        Span::styled("Left/Right", key_style),
        Span::styled(": Country | ", text_style),
        Span::styled("?", key_style),
        Span::styled(": Help | ", text_style),
        Span::styled("q", key_style),
        Span::styled(": Quit", text_style),
    ]);

    f.render_widget(
        Paragraph::new(shortcuts).alignment(Alignment::Center),
        area,
    );
}
