use crate::session::ReviewSession;
use crate::utils::truncate_string;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw_summary(f: &mut Frame, session: &ReviewSession) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new(format!("Review Summary - {}", session.deck_name))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let mut text = Text::default();
    text.push_line(Line::from(format!(
        "Reviewed {} of {} cards",
        session.reviews.len(),
        session.cards.len()
    )));
    text.push_line(Line::from(""));

    for (i, review) in session.reviews.iter().enumerate() {
        let mut spans = vec![
            Span::from(format!("{}. {}  ", i + 1, truncate_string(&review.prompt, 50))),
            Span::styled(
                review.recorded_ease.label(),
                Style::default()
                    .fg(review.recorded_ease.color())
                    .add_modifier(Modifier::BOLD),
            ),
        ];
        if review.recorded_ease != review.default_ease {
            spans.push(Span::styled(
                format!(" (was {})", review.default_ease.label()),
                Style::default().fg(Color::DarkGray),
            ));
        }
        text.push_line(Line::from(spans));
    }

    let body = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(body, chunks[1]);

    let key = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let help = Paragraph::new(Line::from(vec![
        Span::styled("m", key),
        Span::from(" Main Menu  "),
        Span::styled("q", key),
        Span::from(" Quit"),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::parse_deck;
    use crate::rating::Ease;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_summary_shows_overrides() {
        let cards = parse_deck("Front,Back\nCapital of France?,Paris\nCapital of Peru?,Lima\n");
        let mut session = ReviewSession::new("geo", cards);
        session.record(Ease::Again, Ease::Good);
        session.record(Ease::Hard, Ease::Hard);

        let mut terminal = Terminal::new(TestBackend::new(90, 20)).unwrap();
        terminal.draw(|f| draw_summary(f, &session)).unwrap();
        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();

        assert!(screen.contains("Reviewed 2 of 2 cards"));
        assert!(screen.contains("1. Capital of France?  Good (was Again)"));
        assert!(screen.contains("2. Capital of Peru?  Hard"));
        assert!(!screen.contains("Hard (was"));
    }
}
