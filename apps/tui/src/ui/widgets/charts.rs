use crate::app::{App, ChartTab};
use mena_energy_tracker::domain::{AnalysisResult, EnergyRecord};
use mena_energy_tracker::presentation::{
    display_number, stacked_mix, MixRow, SourceCategory, EMISSIONS_BAR_COLOR,
    GENERATION_BAR_COLOR,
};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Tabs};
use ratatui::Frame;

const BAR_GAP: u16 = 2;
const MIN_BAR_WIDTH: u16 = 3;
const MAX_BAR_WIDTH: u16 = 16;
const COUNTRY_COLUMN: usize = 14;

pub fn render_chart_tabs(app: &App, f: &mut Frame<'_>, area: Rect) {
    let titles = ChartTab::ALL
        .iter()
        .enumerate()
        .map(|(index, tab)| TextLine::from(format!("{} {}", index + 1, tab.label())))
        .collect::<Vec<_>>();

    let tabs = Tabs::new(titles)
        .select(app.chart_tab.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::raw("|"));

    f.render_widget(tabs, area);
}

pub fn render_chart_panel(app: &App, result: &AnalysisResult, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", app.chart_tab.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if result.data.is_empty() {
        let paragraph = Paragraph::new("No country data returned")
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    match app.chart_tab {
        ChartTab::Generation => render_value_bars(
            &result.data,
            |record| record.total_generation_twh,
            GENERATION_BAR_COLOR,
            block,
            f,
            area,
        ),
        ChartTab::Emissions => render_value_bars(
            &result.data,
            |record| record.co2_emissions_mt,
            EMISSIONS_BAR_COLOR,
            block,
            f,
            area,
        ),
        ChartTab::Mix => render_mix(&stacked_mix(&result.data), block, f, area),
    }
}

fn render_value_bars(
    records: &[EnergyRecord],
    value_of: fn(&EnergyRecord) -> f64,
    color: Color,
    block: Block<'_>,
    f: &mut Frame<'_>,
    area: Rect,
) {
    let bars: Vec<Bar<'_>> = records
        .iter()
        .map(|record| {
            let value = value_of(record);
            Bar::default()
                .value(bar_value(value))
                .label(TextLine::from(record.country.as_str()))
                .text_value(display_number(value))
                .style(Style::default().fg(color))
                .value_style(
                    Style::default()
                        .fg(Color::White)
                        .bg(color)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let inner_width = block.inner(area).width;
    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_gap(BAR_GAP)
        .bar_width(bar_width(bars.len(), inner_width));

    f.render_widget(chart, area);
}

fn render_mix(rows: &[MixRow], block: Block<'_>, f: &mut Frame<'_>, area: Rect) {
    let inner = block.inner(area);
    f.render_widget(block, area);

    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(inner);

    let legend = TextLine::from(
        [
            SourceCategory::Renewable,
            SourceCategory::Nuclear,
            SourceCategory::Fossil,
        ]
        .iter()
        .flat_map(|category| {
            [
                Span::styled("■ ", Style::default().fg(category.color())),
                Span::styled(
                    format!("{}  ", category.label()),
                    Style::default().fg(Color::Gray),
                ),
            ]
        })
        .collect::<Vec<_>>(),
    );
    f.render_widget(Paragraph::new(legend), split[0]);

    let bar_area_width = split[1]
        .width
        .saturating_sub(u16::try_from(COUNTRY_COLUMN).unwrap_or(u16::MAX));

    let lines = rows
        .iter()
        .flat_map(|row| {
            let mut spans = vec![Span::styled(
                format!("{:<width$}", truncate(&row.country, COUNTRY_COLUMN - 1), width = COUNTRY_COLUMN),
                Style::default().fg(Color::White),
            )];
            spans.extend(
                segment_widths(row, bar_area_width)
                    .iter()
                    .filter(|(_, width)| *width > 0)
                    .map(|(category, width)| {
                        Span::styled(
                            "█".repeat(usize::from(*width)),
                            Style::default().fg(category.color()),
                        )
                    }),
            );

            let shares = row
                .segments()
                .iter()
                .map(|(category, value)| {
                    format!("{} {}%", category.label(), display_number(*value))
                })
                .collect::<Vec<_>>()
                .join("  ");

            [
                TextLine::from(spans),
                TextLine::from(Span::styled(
                    format!("{:<width$}{shares}", "", width = COUNTRY_COLUMN),
                    Style::default().fg(Color::DarkGray),
                )),
            ]
        })
        .collect::<Vec<_>>();

    f.render_widget(Paragraph::new(Text::from(lines)), split[1]);
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bar_value(value: f64) -> u64 {
    value.max(0.0).round() as u64
}

/// Width of each bar so the whole group fits the chart.
fn bar_width(count: usize, available: u16) -> u16 {
    let Ok(count) = u16::try_from(count) else {
        return MIN_BAR_WIDTH;
    };
    if count == 0 {
        return MIN_BAR_WIDTH;
    }

    let gaps = BAR_GAP.saturating_mul(count.saturating_sub(1));
    (available.saturating_sub(gaps) / count).clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH)
}

/// Cell widths of the stacked segments, in stacking order.
///
/// The cumulative share is capped at 100, so a mix that over-reports never
/// spills past `width`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn segment_widths(row: &MixRow, width: u16) -> [(SourceCategory, u16); 3] {
    let scale = f64::from(width) / 100.0;
    let mut cumulative = 0.0_f64;
    let mut drawn = 0_u16;

    row.segments().map(|(category, value)| {
        cumulative = (cumulative + value.max(0.0)).min(100.0);
        let end = (cumulative * scale).round() as u16;
        let cells = end.saturating_sub(drawn);
        drawn = drawn.max(end);
        (category, cells)
    })
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        text.chars().take(max.saturating_sub(1)).chain(['…']).collect()
    }
}
