use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use std::path::PathBuf;

use crate::config::Config;

pub fn draw_menu(
    f: &mut Frame,
    deck_files: &[PathBuf],
    selected_index: usize,
    config: Option<&Config>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new(format!("Answer Eval v{}", env!("CARGO_PKG_VERSION")))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let items: Vec<ListItem> = if deck_files.is_empty() {
        vec![ListItem::new("No decks found in ./decks").style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        deck_files
            .iter()
            .enumerate()
            .map(|(i, path)| {
                let name = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_default();
                let style = if i == selected_index {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let prefix = if i == selected_index { "> " } else { "  " };
                ListItem::new(format!("{}{}", prefix, name)).style(style)
            })
            .collect()
    };
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Decks"));
    f.render_widget(list, chunks[1]);

    let status = match config {
        Some(config) => {
            let (key_text, key_color) = if config.api_key().is_empty() {
                ("missing", Color::Red)
            } else {
                ("set", Color::Green)
            };
            Line::from(vec![
                Span::from("API key: "),
                Span::styled(key_text, Style::default().fg(key_color)),
                Span::from(format!(
                    "  Model: {}  Field: {}  Temperature: {}",
                    config.model, config.field_name, config.temperature
                )),
            ])
        }
        None => Line::from(Span::styled(
            "Config could not be read; see the log",
            Style::default().fg(Color::Red),
        )),
    };
    let status = Paragraph::new(status)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("AI Evaluation"));
    f.render_widget(status, chunks[2]);

    let key = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let help = Paragraph::new(Line::from(vec![
        Span::styled("↑/↓", key),
        Span::from(" Select  "),
        Span::styled("Enter", key),
        Span::from(" Review  "),
        Span::styled("q", key),
        Span::from(" Quit"),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(deck_files: &[PathBuf], config: Option<&Config>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 20)).unwrap();
        terminal
            .draw(|f| draw_menu(f, deck_files, 1, config))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_menu_lists_decks_and_marks_selection() {
        let decks = vec![PathBuf::from("decks/geo.csv"), PathBuf::from("decks/verbs.csv")];
        let screen = render(&decks, Some(&Config::default()));

        assert!(screen.contains("  geo"));
        assert!(screen.contains("> verbs"));
        assert!(screen.contains("API key: missing"));
        assert!(screen.contains("Model: gpt-4o-mini"));
    }

    #[test]
    fn test_menu_without_decks_or_config() {
        let screen = render(&[], None);
        assert!(screen.contains("No decks found"));
        assert!(screen.contains("Config could not be read"));
    }
}
