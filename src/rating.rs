use ratatui::style::Color;
use std::fmt;

/// Recall-quality rating the host records for a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Ease {
    Again = 1,
    Hard = 2,
    Good = 3,
    Easy = 4,
}

impl Ease {
    pub const ALL: [Ease; 4] = [Ease::Again, Ease::Hard, Ease::Good, Ease::Easy];

    /// Buckets are closed on the low end: 0.30, 0.60 and 0.85 belong to the
    /// higher rating. NaN falls through to `Again`.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.85 {
            Ease::Easy
        } else if score >= 0.6 {
            Ease::Good
        } else if score >= 0.3 {
            Ease::Hard
        } else {
            Ease::Again
        }
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            1 => Some(Ease::Again),
            2 => Some(Ease::Hard),
            3 => Some(Ease::Good),
            4 => Some(Ease::Easy),
            _ => None,
        }
    }

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Ease::Again => "Again",
            Ease::Hard => "Hard",
            Ease::Good => "Good",
            Ease::Easy => "Easy",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Ease::Again => Color::Rgb(0xe7, 0x4c, 0x3c),
            Ease::Hard => Color::Rgb(0xf3, 0x9c, 0x12),
            Ease::Good => Color::Rgb(0x27, 0xae, 0x60),
            Ease::Easy => Color::Rgb(0x29, 0x80, 0xb9),
        }
    }

    pub fn prev(self) -> Self {
        Ease::from_ordinal(self.ordinal().saturating_sub(1)).unwrap_or(self)
    }

    pub fn next(self) -> Self {
        Ease::from_ordinal(self.ordinal() + 1).unwrap_or(self)
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
