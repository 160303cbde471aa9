use crate::deck::DeckCard;
use crate::host::Reviewer;
use crate::rating::Ease;
use crossterm::event::{KeyCode, KeyEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Menu,
    Review,
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    None,
    /// The user answered the revealed card with this default ease.
    Answer(Ease),
    Quit,
}

/// One answered card, as the reviewer recorded it.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRecord {
    pub card_id: i64,
    pub prompt: String,
    pub typed_answer: Option<String>,
    pub default_ease: Ease,
    pub recorded_ease: Ease,
}

#[derive(Debug)]
pub struct ReviewSession {
    pub cards: Vec<DeckCard>,
    pub current_index: usize,
    pub deck_name: String,
    pub showing_answer: bool,
    pub input_buffer: String,
    /// Byte offset into `input_buffer`, always on a char boundary.
    pub cursor_position: usize,
    pub typed_answer: Option<String>,
    pub reviews: Vec<ReviewRecord>,
}

impl ReviewSession {
    pub fn new(deck_name: impl Into<String>, cards: Vec<DeckCard>) -> Self {
        Self {
            cards,
            current_index: 0,
            deck_name: deck_name.into(),
            showing_answer: false,
            input_buffer: String::new(),
            cursor_position: 0,
            typed_answer: None,
            reviews: Vec::new(),
        }
    }

    pub fn current_card(&self) -> Option<&DeckCard> {
        self.cards.get(self.current_index)
    }

    pub fn is_finished(&self) -> bool {
        self.current_index >= self.cards.len()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ReviewAction {
        if key.code == KeyCode::Esc {
            return ReviewAction::Quit;
        }
        if self.is_finished() {
            return ReviewAction::None;
        }

        if self.showing_answer {
            return match key.code {
                KeyCode::Char(c @ '1'..='4') => c
                    .to_digit(10)
                    .and_then(|d| Ease::from_ordinal(d as u8))
                    .map(ReviewAction::Answer)
                    .unwrap_or(ReviewAction::None),
                KeyCode::Enter | KeyCode::Char(' ') => ReviewAction::Answer(Ease::Good),
                _ => ReviewAction::None,
            };
        }

        match key.code {
            KeyCode::Enter => {
                let typed = self.input_buffer.trim();
                self.typed_answer = if typed.is_empty() {
                    None
                } else {
                    Some(typed.to_string())
                };
                self.showing_answer = true;
            }
            KeyCode::Left => {
                if let Some((idx, _)) = self.input_buffer[..self.cursor_position]
                    .char_indices()
                    .next_back()
                {
                    self.cursor_position = idx;
                }
            }
            KeyCode::Right => {
                if let Some(c) = self.input_buffer[self.cursor_position..].chars().next() {
                    self.cursor_position += c.len_utf8();
                }
            }
            KeyCode::Backspace => {
                if let Some((idx, _)) = self.input_buffer[..self.cursor_position]
                    .char_indices()
                    .next_back()
                {
                    self.input_buffer.remove(idx);
                    self.cursor_position = idx;
                }
            }
            KeyCode::Char(c) => {
                self.input_buffer.insert(self.cursor_position, c);
                self.cursor_position += c.len_utf8();
            }
            _ => {}
        }
        ReviewAction::None
    }

    /// Stores the review the way the hooks left it and moves to the next card.
    pub fn record(&mut self, default_ease: Ease, recorded_ease: Ease) {
        if let Some(card) = self.current_card() {
            let record = ReviewRecord {
                card_id: card.id,
                prompt: card.front().to_string(),
                typed_answer: self.typed_answer.clone(),
                default_ease,
                recorded_ease,
            };
            self.reviews.push(record);
        }

        self.current_index += 1;
        self.showing_answer = false;
        self.input_buffer.clear();
        self.cursor_position = 0;
        self.typed_answer = None;
    }
}

impl Reviewer for ReviewSession {
    fn typed_answer(&self) -> Option<&str> {
        self.typed_answer.as_deref()
    }
}
