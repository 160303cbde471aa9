use answer_eval::deck::{get_deck_files, load_deck};
use answer_eval::ui::{
    draw_menu, draw_review, draw_summary, Clipboard, CrosstermEvents, EventSource,
    Osc52Clipboard,
};
use answer_eval::{
    default_config_path, AnswerEvaluator, AppState, CompletionBackend, Config, EvalLog,
    HookRegistry, OpenAiClient, ReviewAction, ReviewSession, TerminalUi,
};
use crossterm::{
    event::{KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::seq::SliceRandom;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

fn main() -> io::Result<()> {
    let config_path = default_config_path();
    let log = EvalLog::beside(&config_path);

    let client = OpenAiClient::new().map_err(|e| io::Error::other(e.to_string()))?;
    log.log(&format!("Grading via {}", client.endpoint()));
    let backend: Arc<dyn CompletionBackend> = Arc::new(client);
    let mut hooks = HookRegistry::new();
    hooks.register_answer_hook(Box::new(AnswerEvaluator::new(
        config_path.clone(),
        log.clone(),
        backend,
    )));
    log.log(&format!("{} answer hook(s) registered", hooks.answer_hook_count()));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    let mut ui = TerminalUi::new(terminal, CrosstermEvents, Osc52Clipboard);

    let result = run_app(&mut ui, &hooks, &config_path, &log);

    disable_raw_mode()?;
    execute!(ui.terminal_mut().backend_mut(), LeaveAlternateScreen)?;
    ui.terminal_mut().show_cursor()?;

    result
}

fn read_config(config_path: &Path, log: &EvalLog) -> Option<Config> {
    match Config::load(config_path) {
        Ok(config) => Some(config),
        Err(e) => {
            log.log(&format!("Failed to read config: {}", e));
            None
        }
    }
}

fn run_app<B: Backend, E: EventSource, C: Clipboard>(
    ui: &mut TerminalUi<B, E, C>,
    hooks: &HookRegistry,
    config_path: &Path,
    log: &EvalLog,
) -> io::Result<()> {
    let mut app_state = AppState::Menu;
    let deck_files = get_deck_files();
    let mut selected_index: usize = 0;
    let mut session: Option<ReviewSession> = None;
    let mut config = read_config(config_path, log);

    loop {
        ui.terminal_mut().draw(|f| match app_state {
            AppState::Menu => draw_menu(f, &deck_files, selected_index, config.as_ref()),
            AppState::Review => {
                if let Some(session) = &session {
                    draw_review(f, session);
                }
            }
            AppState::Summary => {
                if let Some(session) = &session {
                    draw_summary(f, session);
                }
            }
        })?;

        let Some(key) = ui.events_mut().poll_key(Duration::from_millis(250))? else {
            continue;
        };
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            break;
        }

        match app_state {
            AppState::Menu => match key.code {
                KeyCode::Up => {
                    selected_index = selected_index.saturating_sub(1);
                }
                KeyCode::Down => {
                    if selected_index < deck_files.len().saturating_sub(1) {
                        selected_index += 1;
                    }
                }
                KeyCode::Enter => {
                    if let Some(path) = deck_files.get(selected_index) {
                        match load_deck(path) {
                            Ok(mut cards) if !cards.is_empty() => {
                                cards.shuffle(&mut rand::thread_rng());
                                let deck_name = path
                                    .file_stem()
                                    .map(|s| s.to_string_lossy().to_string())
                                    .unwrap_or_default();
                                session = Some(ReviewSession::new(deck_name, cards));
                                app_state = AppState::Review;
                            }
                            Ok(_) => log.log(&format!("Deck {} has no cards", path.display())),
                            Err(e) => {
                                log.log(&format!("Failed to load deck {}: {}", path.display(), e))
                            }
                        }
                    }
                }
                KeyCode::Char('q') | KeyCode::Esc => break,
                _ => {}
            },
            AppState::Review => {
                let Some(review) = session.as_mut() else {
                    app_state = AppState::Menu;
                    continue;
                };
                match review.handle_key(key) {
                    ReviewAction::Answer(default_ease) => {
                        let recorded = match review.current_card() {
                            Some(card) => hooks.fire_answer(ui, &*review, card, default_ease),
                            None => default_ease,
                        };
                        review.record(default_ease, recorded);
                        if review.is_finished() {
                            app_state = AppState::Summary;
                        }
                    }
                    ReviewAction::Quit => app_state = AppState::Summary,
                    ReviewAction::None => {}
                }
            }
            AppState::Summary => match key.code {
                KeyCode::Char('m') => {
                    session = None;
                    config = read_config(config_path, log);
                    app_state = AppState::Menu;
                }
                KeyCode::Char('q') | KeyCode::Esc => break,
                _ => {}
            },
        }
    }

    Ok(())
}
