use crate::app::App;
use crate::event::DISCLAIMER;
use crate::ui::widgets::cards::{
    render_country_card, render_highlight, render_overview, render_verification_note,
};
use crate::ui::widgets::charts::{render_chart_panel, render_chart_tabs};
use mena_energy_tracker::domain::AnalysisResult;
use mena_energy_tracker::presentation::find_highlight;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn render_dashboard(app: &App, result: &AnalysisResult, f: &mut Frame<'_>, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Overview and focus
            Constraint::Length(3), // Verification note
            Constraint::Min(10),   // Charts and country card
            Constraint::Length(1), // Disclaimer
        ])
        .split(area);

    // The focus card only appears when Egypt is in the returned data
    match find_highlight(&result.data) {
        Some(egypt) => {
            let top = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(rows[0]);
            render_overview(result, f, top[0]);
            render_highlight(egypt, f, top[1]);
        }
        None => render_overview(result, f, rows[0]),
    }

    render_verification_note(f, rows[1]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[2]);

    let chart_split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(5)])
        .split(bottom[0]);
    render_chart_tabs(app, f, chart_split[0]);
    render_chart_panel(app, result, f, chart_split[1]);

    match app.selected_record() {
        Some(record) => {
            render_country_card(record, app.selected_country, result.data.len(), f, bottom[1]);
        }
        None => {
            let empty = Paragraph::new("No country selected")
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center);
            f.render_widget(empty, bottom[1]);
        }
    }

    let disclaimer = Paragraph::new(TextLine::from(Span::styled(
        DISCLAIMER,
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )))
    .alignment(Alignment::Center);
    f.render_widget(disclaimer, rows[3]);
}
