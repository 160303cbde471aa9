use crate::rating::Ease;
use crate::ui::feedback_dialog::{draw_feedback_dialog, DialogAction, FeedbackDialog};
use crate::ui::popup::{draw_loading, draw_warning};
use crate::ui::ReviewUi;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    style::Print,
};
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::{Duration, Instant};

/// How long the UI thread waits for input before redrawing.
pub const PUMP_INTERVAL: Duration = Duration::from_millis(50);

pub trait EventSource {
    /// Waits up to `timeout` for a key press.
    fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>>;

    /// Waits up to `timeout`, discarding whatever input arrives.
    fn idle(&mut self, timeout: Duration) -> io::Result<()>;
}

pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>> {
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            return Ok(Some(key));
        }
        Ok(None)
    }

    fn idle(&mut self, timeout: Duration) -> io::Result<()> {
        if event::poll(timeout)? {
            let _ = event::read()?;
        }
        Ok(())
    }
}

pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> io::Result<()>;
}

/// Copies through the terminal with an OSC 52 escape sequence.
pub struct Osc52Clipboard;

impl Clipboard for Osc52Clipboard {
    fn set_text(&mut self, text: &str) -> io::Result<()> {
        let sequence = format!("\x1b]52;c;{}\x07", STANDARD.encode(text));
        execute!(io::stdout(), Print(sequence))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Result,
}

/// [`ReviewUi`] on a ratatui terminal.
pub struct TerminalUi<B: Backend, E: EventSource, C: Clipboard> {
    terminal: Terminal<B>,
    events: E,
    clipboard: C,
    phase: Phase,
    loading_started: Option<Instant>,
    tick: usize,
}

impl<B: Backend, E: EventSource, C: Clipboard> TerminalUi<B, E, C> {
    pub fn new(terminal: Terminal<B>, events: E, clipboard: C) -> Self {
        Self {
            terminal,
            events,
            clipboard,
            phase: Phase::Idle,
            loading_started: None,
            tick: 0,
        }
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn draw_loading(&mut self) -> io::Result<()> {
        let elapsed = self
            .loading_started
            .map(|started| started.elapsed())
            .unwrap_or_default();
        let tick = self.tick;
        self.terminal.draw(|f| draw_loading(f, elapsed, tick))?;
        Ok(())
    }
}

impl<B: Backend, E: EventSource, C: Clipboard> ReviewUi for TerminalUi<B, E, C> {
    fn show_loading(&mut self) -> io::Result<()> {
        self.phase = Phase::Loading;
        self.loading_started = Some(Instant::now());
        self.tick = 0;
        self.draw_loading()
    }

    fn pump_events(&mut self) -> io::Result<()> {
        self.tick = self.tick.wrapping_add(1);
        self.draw_loading()?;
        self.events.idle(PUMP_INTERVAL)
    }

    fn close_loading(&mut self) -> io::Result<()> {
        self.phase = Phase::Result;
        self.loading_started = None;
        self.terminal.clear()
    }

    fn run_feedback_dialog(&mut self, dialog: &mut FeedbackDialog) -> io::Result<Ease> {
        self.phase = Phase::Result;
        loop {
            self.terminal.draw(|f| draw_feedback_dialog(f, dialog))?;

            let Some(key) = self.events.poll_key(PUMP_INTERVAL)? else {
                continue;
            };
            match dialog.handle_key(key) {
                DialogAction::Confirm(ease) => {
                    self.phase = Phase::Idle;
                    self.terminal.clear()?;
                    return Ok(ease);
                }
                DialogAction::CopyFeedback => match self.clipboard.set_text(&dialog.feedback) {
                    Ok(()) => dialog.set_status("Feedback copied to clipboard."),
                    Err(e) => dialog.set_status(format!("Copy failed: {}", e)),
                },
                DialogAction::None => {}
            }
        }
    }

    fn show_warning(&mut self, title: &str, message: &str) -> io::Result<()> {
        self.phase = Phase::Idle;
        self.loading_started = None;
        loop {
            self.terminal.draw(|f| draw_warning(f, title, message))?;
            if self.events.poll_key(PUMP_INTERVAL)?.is_some() {
                break;
            }
        }
        self.terminal.clear()
    }
}
