//! The review application's side of the plugin boundary.
//!
//! The plugin only ever asks the host for the typed answer, the card's note
//! fields and its note type, and it only ever writes back one thing: the ease
//! about to be recorded.

use crate::rating::Ease;
use crate::ui::ReviewUi;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteKind {
    Standard,
    Cloze,
}

pub trait Reviewer {
    /// What the user typed into the answer box, if the card had one.
    fn typed_answer(&self) -> Option<&str>;
}

pub trait Card {
    fn id(&self) -> i64;
    fn note_field(&self, name: &str) -> Option<&str>;
    fn note_kind(&self) -> NoteKind;
}

/// Callback for the host's "card answered" event.
///
/// `ease` is the rating the host is about to persist; a hook may overwrite it.
pub trait AnswerHook {
    fn reviewer_did_answer_card(
        &self,
        ui: &mut dyn ReviewUi,
        reviewer: &dyn Reviewer,
        card: &dyn Card,
        ease: &mut Ease,
    );
}

#[derive(Default)]
pub struct HookRegistry {
    answer_hooks: Vec<Box<dyn AnswerHook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_answer_hook(&mut self, hook: Box<dyn AnswerHook>) {
        self.answer_hooks.push(hook);
    }

    pub fn answer_hook_count(&self) -> usize {
        self.answer_hooks.len()
    }

    /// Runs every answer hook in registration order and returns the ease the
    /// host should record.
    pub fn fire_answer(
        &self,
        ui: &mut dyn ReviewUi,
        reviewer: &dyn Reviewer,
        card: &dyn Card,
        ease: Ease,
    ) -> Ease {
        let mut ease = ease;
        for hook in &self.answer_hooks {
            hook.reviewer_did_answer_card(ui, reviewer, card, &mut ease);
        }
        ease
    }
}
