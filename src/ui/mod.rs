pub mod feedback_dialog;
pub mod layout;
mod menu;
pub mod popup;
mod review;
mod summary;
pub mod terminal;

use crate::rating::Ease;
use std::io;

pub use feedback_dialog::{draw_feedback_dialog, DialogAction, FeedbackDialog};
pub use layout::{calculate_dialog_chunks, calculate_review_chunks, centered_rect};
pub use menu::draw_menu;
pub use review::draw_review;
pub use summary::draw_summary;
pub use terminal::{
    Clipboard, CrosstermEvents, EventSource, Osc52Clipboard, Phase, TerminalUi, PUMP_INTERVAL,
};

/// Presentation surface the answered-card handler drives.
///
/// The handler calls these strictly in order: `show_loading`, any number of
/// `pump_events` while the worker runs, `close_loading`, then
/// `run_feedback_dialog`. `show_warning` can come at any point after a failure.
pub trait ReviewUi {
    fn show_loading(&mut self) -> io::Result<()>;

    /// Keeps the interface alive for one short interval while waiting.
    fn pump_events(&mut self) -> io::Result<()>;

    fn close_loading(&mut self) -> io::Result<()>;

    /// Shows the modal result dialog and returns the confirmed rating.
    fn run_feedback_dialog(&mut self, dialog: &mut FeedbackDialog) -> io::Result<Ease>;

    fn show_warning(&mut self, title: &str, message: &str) -> io::Result<()>;
}
