use crate::host::{Card, NoteKind};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// One row of a deck file. Field names come from the deck's header line.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckCard {
    pub id: i64,
    pub fields: Vec<(String, String)>,
    pub kind: NoteKind,
}

impl DeckCard {
    /// The first field, shown as the prompt.
    pub fn front(&self) -> &str {
        self.fields.first().map(|(_, v)| v.as_str()).unwrap_or("")
    }

    /// Every field after the first, shown once the answer is revealed.
    pub fn back_fields(&self) -> &[(String, String)] {
        self.fields.get(1..).unwrap_or(&[])
    }
}

impl Card for DeckCard {
    fn id(&self) -> i64 {
        self.id
    }

    fn note_field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    fn note_kind(&self) -> NoteKind {
        self.kind
    }
}

fn cloze_regex() -> &'static Regex {
    static CLOZE: OnceLock<Regex> = OnceLock::new();
    CLOZE.get_or_init(|| {
        Regex::new(r"\{\{c\d+::(.*?)(?:::(.*?))?\}\}").expect("cloze pattern is valid")
    })
}

pub fn is_cloze(text: &str) -> bool {
    cloze_regex().is_match(text)
}

/// Blanks out cloze deletions (showing the hint if there is one), or reveals
/// them.
pub fn render_cloze(text: &str, reveal: bool) -> String {
    cloze_regex()
        .replace_all(text, |caps: &regex::Captures| {
            if reveal {
                caps[1].to_string()
            } else {
                match caps.get(2) {
                    Some(hint) => format!("[{}]", hint.as_str()),
                    None => "[...]".to_string(),
                }
            }
        })
        .into_owned()
}

pub fn get_deck_files() -> Vec<PathBuf> {
    let decks_dir = PathBuf::from("decks");
    let mut files = Vec::new();

    if decks_dir.is_dir()
        && let Ok(entries) = fs::read_dir(&decks_dir)
    {
        for entry in entries.flatten() {
            if let Some(ext) = entry.path().extension()
                && ext == "csv"
            {
                files.push(entry.path());
            }
        }
    }

    files.sort();
    files
}

pub fn load_deck(path: &Path) -> std::io::Result<Vec<DeckCard>> {
    let content = fs::read_to_string(path)?;
    Ok(parse_deck(&content))
}

/// Parses a deck: a header line naming the fields, then one card per line.
/// Short rows are padded with empty fields; blank rows are skipped.
pub fn parse_deck(content: &str) -> Vec<DeckCard> {
    let mut lines = content.lines().filter(|line| !line.trim().is_empty());
    let Some(header) = lines.next() else {
        return Vec::new();
    };
    let names: Vec<String> = parse_csv_line(header)
        .into_iter()
        .map(|name| name.trim().to_string())
        .collect();

    let mut cards = Vec::new();
    for line in lines {
        let mut values = parse_csv_line(line);
        if values.iter().all(|v| v.trim().is_empty()) {
            continue;
        }
        values.resize(names.len(), String::new());

        let fields: Vec<(String, String)> = names
            .iter()
            .cloned()
            .zip(values.into_iter().map(|v| v.trim().to_string()))
            .collect();
        let kind = if fields.iter().any(|(_, v)| is_cloze(v)) {
            NoteKind::Cloze
        } else {
            NoteKind::Standard
        };

        cards.push(DeckCard {
            id: cards.len() as i64 + 1,
            fields,
            kind,
        });
    }

    cards
}

pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                current.push('"');
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields
}
