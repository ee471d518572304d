use crate::ui::widgets::popup::{centered_rect, ClearWidget};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_error(message: &str, f: &mut Frame<'_>, area: Rect) {
    let popup_area = centered_rect(60, 50, area);
    f.render_widget(ClearWidget, popup_area);

    let block = Block::default()
        .title(" Analysis Failed ")
        .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let lines = vec![
        TextLine::from(""),
        TextLine::from(Span::styled(message, Style::default().fg(Color::White))),
        TextLine::from(""),
        TextLine::from(vec![
            Span::styled(
                "[r]",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" Retry Analysis", Style::default().fg(Color::Gray)),
        ]),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, popup_area);
}
