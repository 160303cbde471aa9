use crate::deck::render_cloze;
use crate::host::NoteKind;
use crate::rating::Ease;
use crate::session::ReviewSession;
use crate::ui::layout::calculate_review_chunks;
use crate::utils::{cursor_column, horizontal_scroll};
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw_review(f: &mut Frame, session: &ReviewSession) {
    let layout = calculate_review_chunks(f.area());
    let Some(card) = session.current_card() else {
        return;
    };

    let progress = format!(
        "Card {} / {} - {}",
        session.current_index + 1,
        session.cards.len(),
        session.deck_name
    );
    let header = Paragraph::new(progress)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let cloze = card.kind == NoteKind::Cloze;
    let prompt = render_cloze(card.front(), session.showing_answer && cloze);
    let question = Paragraph::new(prompt)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Question"));
    f.render_widget(question, layout.question_area);

    if session.showing_answer {
        let mut text = Text::default();
        for (name, value) in card.back_fields() {
            if value.is_empty() {
                continue;
            }
            text.push_line(Line::from(Span::styled(
                format!("{}:", name),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )));
            text.push_line(Line::from(render_cloze(value, true)));
            text.push_line(Line::from(""));
        }
        text.push_line(Line::from(Span::styled(
            "Your Answer:",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        match &session.typed_answer {
            Some(answer) => text.push_line(Line::from(answer.as_str())),
            None => text.push_line(Line::from(Span::styled(
                "(nothing typed)",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))),
        }

        let answer = Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Answer"));
        f.render_widget(answer, layout.answer_area);
    } else {
        let inner_width = layout.answer_area.width.saturating_sub(2) as usize;
        let column = cursor_column(&session.input_buffer, session.cursor_position);
        let scroll = horizontal_scroll(column, inner_width);

        let input = if session.input_buffer.is_empty() {
            Paragraph::new(Span::styled(
                "[Type your answer here...]",
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Paragraph::new(session.input_buffer.as_str()).scroll((0, scroll as u16))
        };
        f.render_widget(
            input.block(Block::default().borders(Borders::ALL).title("Your Answer")),
            layout.answer_area,
        );

        let cursor_x = layout.answer_area.x + 1 + (column - scroll) as u16;
        f.set_cursor_position((cursor_x, layout.answer_area.y + 1));
    }

    let key = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut spans = Vec::new();
    if session.showing_answer {
        for ease in Ease::ALL {
            spans.push(Span::styled(ease.ordinal().to_string(), key));
            spans.push(Span::styled(
                format!(" {}  ", ease.label()),
                Style::default().fg(ease.color()),
            ));
        }
    } else {
        spans.push(Span::styled("Enter", key));
        spans.push(Span::from(" Show Answer  "));
    }
    spans.push(Span::styled("Esc", key));
    spans.push(Span::from(" End Review"));

    let help = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}
