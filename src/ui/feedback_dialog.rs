use crate::models::{Evaluation, Mnemonic, ReviewContext, NO_MNEMONIC};
use crate::rating::Ease;
use crate::ui::layout::{calculate_dialog_chunks, centered_rect};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const MNEMONIC_COLOR: Color = Color::Rgb(0x8e, 0x44, 0xad);

/// State of the modal result dialog. Owned by the answered-card handler for
/// the duration of one review.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackDialog {
    pub score: f64,
    pub feedback: String,
    pub expected: String,
    pub mnemonic: Mnemonic,
    pub suggested: Ease,
    pub selected: Ease,
    pub show_expected: bool,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    None,
    CopyFeedback,
    Confirm(Ease),
}

impl FeedbackDialog {
    pub fn new(context: &ReviewContext, evaluation: &Evaluation) -> Self {
        let suggested = evaluation.grade.suggested_ease();
        Self {
            score: evaluation.grade.score,
            feedback: evaluation.grade.feedback.clone(),
            expected: context.expected.clone(),
            mnemonic: evaluation.mnemonic.clone(),
            suggested,
            selected: suggested,
            show_expected: false,
            status: None,
        }
    }

    pub fn percent(&self) -> f64 {
        self.score * 100.0
    }

    pub fn select(&mut self, ease: Ease) {
        self.selected = ease;
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    /// Escape closes the dialog the same way confirming does: the current
    /// selection is what gets recorded.
    pub fn handle_key(&mut self, key: KeyEvent) -> DialogAction {
        match key.code {
            KeyCode::Char(c @ '1'..='4') => {
                if let Some(ease) = c
                    .to_digit(10)
                    .and_then(|d| Ease::from_ordinal(d as u8))
                {
                    self.select(ease);
                }
                DialogAction::None
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.select(self.selected.prev());
                DialogAction::None
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.select(self.selected.next());
                DialogAction::None
            }
            KeyCode::Char('e') => {
                self.show_expected = !self.show_expected;
                DialogAction::None
            }
            KeyCode::Char('c') => DialogAction::CopyFeedback,
            KeyCode::Enter | KeyCode::Esc => DialogAction::Confirm(self.selected),
            _ => DialogAction::None,
        }
    }

    fn content(&self) -> Text<'_> {
        let color = self.suggested.color();
        let mut text = Text::default();

        text.push_line(Line::from(vec![
            Span::styled("Score: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("{:.0}%", self.percent()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]));
        text.push_line(Line::from(vec![
            Span::styled("AI Suggests: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                self.suggested.label(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]));
        text.push_line(Line::from(""));
        text.push_line(Line::from(Span::styled(
            self.feedback.as_str(),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
        text.push_line(Line::from(""));

        let label = Span::styled(
            "Mnemonic: ",
            Style::default()
                .fg(MNEMONIC_COLOR)
                .add_modifier(Modifier::BOLD),
        );
        match self.mnemonic.text() {
            Some(mnemonic) => {
                text.push_line(Line::from(vec![
                    label,
                    Span::styled(mnemonic, Style::default().fg(MNEMONIC_COLOR)),
                ]));
            }
            None => {
                text.push_line(Line::from(vec![
                    label,
                    Span::styled(
                        NO_MNEMONIC,
                        Style::default()
                            .fg(MNEMONIC_COLOR)
                            .add_modifier(Modifier::ITALIC),
                    ),
                ]));
                if let Mnemonic::Failed(error) = &self.mnemonic {
                    text.push_line(Line::from(Span::styled(
                        format!("({})", error),
                        Style::default().fg(Color::DarkGray),
                    )));
                }
            }
        }

        if self.show_expected {
            text.push_line(Line::from(""));
            text.push_line(Line::from(vec![
                Span::styled(
                    "Expected Answer: ",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::from(self.expected.as_str()),
            ]));
        }

        if let Some(status) = &self.status {
            text.push_line(Line::from(""));
            text.push_line(Line::from(Span::styled(
                status.as_str(),
                Style::default().fg(Color::DarkGray),
            )));
        }

        text
    }
}

pub fn draw_feedback_dialog(f: &mut Frame, dialog: &FeedbackDialog) {
    let area = centered_rect(70, 70, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" AI Evaluation ")
        .title_alignment(Alignment::Center);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let layout = calculate_dialog_chunks(inner);

    let content = Paragraph::new(dialog.content())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(content, layout.content_area);

    let button_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(layout.buttons_area);

    for (ease, button_area) in Ease::ALL.iter().zip(button_areas.iter()) {
        let selected = *ease == dialog.selected;
        let block = if selected {
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Thick)
                .border_style(Style::default().fg(Color::White))
        } else {
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
        };
        let mut style = Style::default()
            .bg(ease.color())
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);
        if selected {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        let button = Paragraph::new(format!("{} {}", ease.ordinal(), ease.label()))
            .style(style)
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(button, *button_area);
    }

    let key = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let help = Paragraph::new(Line::from(vec![
        Span::styled("1-4/←→", key),
        Span::from(" Select  "),
        Span::styled("Enter", key),
        Span::from(" Confirm  "),
        Span::styled("e", key),
        Span::from(if dialog.show_expected {
            " Hide Expected Answer  "
        } else {
            " Show Expected Answer  "
        }),
        Span::styled("c", key),
        Span::from(" Copy Feedback"),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(help, layout.help_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GradeResult;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn dialog(score: f64, mnemonic: Mnemonic) -> FeedbackDialog {
        let context = ReviewContext {
            card_id: 1,
            expected: "Paris".to_string(),
            user_answer: "paris".to_string(),
        };
        let evaluation = Evaluation {
            grade: GradeResult {
                score,
                feedback: "Correct apart from capitalization.".to_string(),
            },
            mnemonic,
        };
        FeedbackDialog::new(&context, &evaluation)
    }

    fn render(dialog: &FeedbackDialog) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw_feedback_dialog(f, dialog)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_preselects_suggestion() {
        let dialog = dialog(0.92, Mnemonic::Generated("x".to_string()));
        assert_eq!(dialog.suggested, Ease::Easy);
        assert_eq!(dialog.selected, Ease::Easy);
    }

    #[test]
    fn test_number_keys_select_and_enter_confirms() {
        let mut dialog = dialog(0.92, Mnemonic::Generated("x".to_string()));

        assert_eq!(dialog.handle_key(key(KeyCode::Char('3'))), DialogAction::None);
        assert_eq!(dialog.selected, Ease::Good);
        assert_eq!(dialog.suggested, Ease::Easy);
        assert_eq!(
            dialog.handle_key(key(KeyCode::Enter)),
            DialogAction::Confirm(Ease::Good)
        );
    }

    #[test]
    fn test_arrow_keys_move_selection_and_saturate() {
        let mut dialog = dialog(0.1, Mnemonic::Generated("x".to_string()));
        assert_eq!(dialog.selected, Ease::Again);

        dialog.handle_key(key(KeyCode::Left));
        assert_eq!(dialog.selected, Ease::Again);
        dialog.handle_key(key(KeyCode::Right));
        dialog.handle_key(key(KeyCode::Right));
        assert_eq!(dialog.selected, Ease::Good);
    }

    #[test]
    fn test_escape_records_current_selection() {
        let mut dialog = dialog(0.4, Mnemonic::Generated("x".to_string()));
        assert_eq!(
            dialog.handle_key(key(KeyCode::Esc)),
            DialogAction::Confirm(Ease::Hard)
        );
    }

    #[test]
    fn test_optional_controls() {
        let mut dialog = dialog(0.7, Mnemonic::Generated("x".to_string()));

        assert_eq!(dialog.handle_key(key(KeyCode::Char('e'))), DialogAction::None);
        assert!(dialog.show_expected);
        assert_eq!(
            dialog.handle_key(key(KeyCode::Char('c'))),
            DialogAction::CopyFeedback
        );
        assert_eq!(dialog.handle_key(key(KeyCode::Char('9'))), DialogAction::None);
        assert_eq!(dialog.selected, Ease::Good);
    }

    #[test]
    fn test_render_shows_score_feedback_and_buttons() {
        let dialog = dialog(0.92, Mnemonic::Generated("Paris: the City of Light".to_string()));
        let screen = render(&dialog);

        assert!(screen.contains("AI Evaluation"));
        assert!(screen.contains("Score: 92%"));
        assert!(screen.contains("AI Suggests: Easy"));
        assert!(screen.contains("Correct apart from capitalization."));
        assert!(screen.contains("Mnemonic: Paris: the City of Light"));
        for label in ["1 Again", "2 Hard", "3 Good", "4 Easy"] {
            assert!(screen.contains(label), "missing button {}", label);
        }
        assert!(!screen.contains("Expected Answer: Paris"));
    }

    #[test]
    fn test_render_failed_mnemonic_and_expected_answer() {
        let mut dialog = dialog(
            0.0,
            Mnemonic::Failed("No OpenAI API key configured.".to_string()),
        );
        dialog.show_expected = true;
        let screen = render(&dialog);

        assert!(screen.contains("No mnemonic available."));
        assert!(screen.contains("(No OpenAI API key configured.)"));
        assert!(screen.contains("Expected Answer: Paris"));
        assert!(screen.contains("AI Suggests: Again"));
    }
}
