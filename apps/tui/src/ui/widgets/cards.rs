use mena_energy_tracker::domain::{AnalysisResult, EnergyRecord, SourceShare};
use mena_energy_tracker::presentation::{
    display_number, leadership, source_color, RENEWABLE_COLOR,
};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Wrap};
use ratatui::Frame;

const SOURCE_BAR_WIDTH: usize = 20;
const SOURCE_NAME_WIDTH: usize = 14;

pub const IEA_URL: &str = "https://www.iea.org/";
pub const EMBER_URL: &str = "https://ember-climate.org/";

pub fn render_overview(result: &AnalysisResult, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Regional Overview ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let lines = vec![
        TextLine::from(result.overview.as_str()),
        TextLine::from(""),
        TextLine::from(vec![
            Span::styled("Data Reference: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("~{}", result.generated_at),
                Style::default().fg(Color::Yellow),
            ),
        ]),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

pub fn render_highlight(egypt: &EnergyRecord, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Egypt Focus ")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    let renewable = egypt.energy_mix.renewable_percentage;
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(RENEWABLE_COLOR).bg(Color::DarkGray))
        .ratio((renewable / 100.0).clamp(0.0, 1.0))
        .label(format!("{}% renewable", display_number(renewable)));
    f.render_widget(gauge, split[0]);

    let label_style = Style::default().fg(Color::Gray);
    let value_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    let lines = vec![
        TextLine::from(vec![
            Span::styled("CO2 Emissions: ", label_style),
            Span::styled(format!("{} Mt", display_number(egypt.co2_emissions_mt)), value_style),
        ]),
        TextLine::from(vec![
            Span::styled("Generation: ", label_style),
            Span::styled(
                format!("{} TWh", display_number(egypt.total_generation_twh)),
                value_style,
            ),
        ]),
        TextLine::from(Span::styled(
            egypt.energy_mix.details.as_str(),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(
        Paragraph::new(Text::from(lines)).wrap(Wrap { trim: true }),
        split[1],
    );
}

pub fn render_country_card(
    record: &EnergyRecord,
    position: usize,
    total: usize,
    f: &mut Frame<'_>,
    area: Rect,
) {
    let badge = leadership(record);

    let block = Block::default()
        .title(format!(" {} ({}/{}) ", record.country, position + 1, total))
        .title_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(badge.color()));

    let mut lines = vec![
        TextLine::from(Span::styled(
            format!("[{}]", badge.label()),
            Style::default()
                .fg(badge.color())
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from(record.analysis.as_str()),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "Top Sources:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];

    if record.energy_mix.top_sources.is_empty() {
        lines.push(TextLine::from(Span::styled(
            "  none reported",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for share in &record.energy_mix.top_sources {
        lines.push(source_line(share));
    }

    lines.push(TextLine::from(""));
    lines.push(TextLine::from(Span::styled(
        format!(
            "Generation: {} TWh | CO2: {} Mt | Renewable: {}%",
            display_number(record.total_generation_twh),
            display_number(record.co2_emissions_mt),
            display_number(record.energy_mix.renewable_percentage)
        ),
        Style::default().fg(Color::Gray),
    )));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn source_line(share: &SourceShare) -> TextLine<'static> {
    let color = source_color(&share.source);
    let filled = source_bar_cells(share.percentage);

    TextLine::from(vec![
        Span::styled(
            format!("  {:<width$}", share.source, width = SOURCE_NAME_WIDTH),
            Style::default().fg(Color::White),
        ),
        Span::styled("█".repeat(filled), Style::default().fg(color)),
        Span::styled(
            "░".repeat(SOURCE_BAR_WIDTH - filled),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!(" {}%", display_number(share.percentage)),
            Style::default().fg(color),
        ),
    ])
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn source_bar_cells(percentage: f64) -> usize {
    let cells = (percentage.clamp(0.0, 100.0) / 100.0 * SOURCE_BAR_WIDTH as f64).round();
    (cells as usize).min(SOURCE_BAR_WIDTH)
}

pub fn render_verification_note(f: &mut Frame<'_>, area: Rect) {
    let link_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::UNDERLINED);

    let note = Paragraph::new(TextLine::from(vec![
        Span::styled("Verify figures: ", Style::default().fg(Color::Gray)),
        Span::styled("IEA ", Style::default().fg(Color::White)),
        Span::styled(IEA_URL, link_style),
        Span::styled("  Ember ", Style::default().fg(Color::White)),
        Span::styled(EMBER_URL, link_style),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .alignment(Alignment::Center);

    f.render_widget(note, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_bar_scales_to_width() {
        assert_eq!(source_bar_cells(50.0), 10);
        assert_eq!(source_bar_cells(0.0), 0);
        assert_eq!(source_bar_cells(140.0), SOURCE_BAR_WIDTH);
        assert_eq!(source_bar_cells(-5.0), 0);
    }

    #[test]
    fn source_line_uses_category_color() {
        let line = source_line(&SourceShare {
            source: "Solar PV".to_string(),
            percentage: 12.0,
        });

        assert_eq!(line.spans[1].style.fg, Some(RENEWABLE_COLOR));
        assert_eq!(line.spans[3].content, " 12%");
    }
}
