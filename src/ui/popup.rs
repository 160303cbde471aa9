use crate::ui::layout::centered_rect;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::time::Duration;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub fn draw_loading(f: &mut Frame, elapsed: Duration, tick: usize) {
    let area = centered_rect(40, 30, f.area());
    f.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(
                SPINNER[tick % SPINNER.len()],
                Style::default().fg(Color::Yellow),
            ),
            Span::styled(
                " Loading AI evaluation...",
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!("{}s", elapsed.as_secs()),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let popup = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" AI Evaluation ")
            .title_alignment(Alignment::Center),
    );
    f.render_widget(popup, area);
}

pub fn draw_warning(f: &mut Frame, title: &str, message: &str) {
    let area = centered_rect(60, 30, f.area());
    f.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(message),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to continue",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let popup = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(format!(" {} ", title))
                .title_alignment(Alignment::Center),
        );
    f.render_widget(popup, area);
}
