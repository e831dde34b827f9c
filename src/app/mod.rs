//! Application runtime, event loop, and keyboard handling.

pub mod editor;
pub mod events;
pub mod state;

use crate::app::events::{WorkerMessage, spawn_load_file, spawn_pick_file};
use crate::app::state::AppState;
use crate::diff::DiffOptions;
use crate::domain::{FileSide, ViewMode};
use crate::ui;
use anyhow::Context;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::collections::VecDeque;
use std::io::{Stdout, stdout};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Runtime configuration resolved from CLI flags and the config file.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub old: Option<PathBuf>,
    pub new: Option<PathBuf>,
    pub mode: ViewMode,
    pub options: DiffOptions,
}

/// Loads and pickers still to run. Only one runs at a time.
#[derive(Debug, Default)]
struct PendingLoads {
    queue: VecDeque<PendingLoad>,
}

#[derive(Debug)]
enum PendingLoad {
    Path(FileSide, PathBuf),
    Pick(FileSide),
}

/// Runs the interactive TUI application.
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<WorkerMessage>();
    let mut state = AppState::new(config.mode, config.options);

    let mut pending = PendingLoads::default();
    for (side, path) in [(FileSide::Old, config.old), (FileSide::New, config.new)] {
        pending.queue.push_back(match path {
            Some(path) => PendingLoad::Path(side, path),
            None => PendingLoad::Pick(side),
        });
    }
    start_next_load(&mut state, &mut pending, &tx);

    let mut terminal = setup_terminal()?;
    let result = run_event_loop(&mut terminal, &mut state, &mut pending, &tx, &mut rx).await;

    restore_terminal(&mut terminal)?;
    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut AppState,
    pending: &mut PendingLoads,
    tx: &UnboundedSender<WorkerMessage>,
    rx: &mut UnboundedReceiver<WorkerMessage>,
) -> anyhow::Result<()> {
    loop {
        state.advance_spinner();

        while let Ok(message) = rx.try_recv() {
            process_worker_message(state, message);
            start_next_load(state, pending, tx);
        }

        terminal.draw(|frame| ui::render(frame, state))?;

        if state.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(60))? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind == KeyEventKind::Press {
                    handle_key_event(state, pending, tx, key_event);
                }
            }
        }
    }

    Ok(())
}

fn start_next_load(
    state: &mut AppState,
    pending: &mut PendingLoads,
    tx: &UnboundedSender<WorkerMessage>,
) {
    if state.is_busy() {
        return;
    }
    let Some(load) = pending.queue.pop_front() else {
        return;
    };

    match load {
        PendingLoad::Path(side, path) => {
            state.begin_operation(format!("Reading {}", path.display()));
            spawn_load_file(tx.clone(), side, path);
        }
        PendingLoad::Pick(side) => {
            state.begin_operation(format!("Choosing {side} file"));
            spawn_pick_file(tx.clone(), side);
        }
    }
}

fn process_worker_message(state: &mut AppState, message: WorkerMessage) {
    match message {
        WorkerMessage::FileLoaded { side, result } => {
            state.end_operation();

            match result {
                Ok(Some(file)) => {
                    log::info!("loaded {side} file {}", file.path.display());
                    state.error_message = None;
                    state.set_file(side, file);
                }
                Ok(None) => {}
                Err(error) => {
                    state.error_message = Some(error);
                }
            }
        }
    }
}

fn handle_key_event(
    state: &mut AppState,
    pending: &mut PendingLoads,
    tx: &UnboundedSender<WorkerMessage>,
    key: KeyEvent,
) {
    if state.search.is_focused() {
        handle_search_key_event(state, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            state.should_quit = true;
        }
        KeyCode::Down | KeyCode::Char('j') => state.move_down(),
        KeyCode::Up | KeyCode::Char('k') => state.move_up(),
        KeyCode::PageDown => state.page_down(),
        KeyCode::PageUp => state.page_up(),
        KeyCode::Home | KeyCode::Char('g') => state.move_to_top(),
        KeyCode::End | KeyCode::Char('G') => state.move_to_bottom(),
        KeyCode::Tab => state.toggle_mode(),
        KeyCode::Char('n') => {
            if !state.next_change() {
                state.error_message = Some("no further changes".to_owned());
            }
        }
        KeyCode::Char('N') => {
            if !state.prev_change() {
                state.error_message = Some("no earlier changes".to_owned());
            }
        }
        KeyCode::Char('/') => {
            state.error_message = None;
            state.begin_search();
        }
        KeyCode::Char(']') => {
            state.next_match();
        }
        KeyCode::Char('[') => {
            state.prev_match();
        }
        KeyCode::Char('w') => state.toggle_ignore_whitespace(),
        KeyCode::Char('i') => state.toggle_ignore_case(),
        KeyCode::Char('o') => request_pick(state, pending, tx, FileSide::Old),
        KeyCode::Char('O') => request_pick(state, pending, tx, FileSide::New),
        _ => {}
    }
}

fn handle_search_key_event(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => state.cancel_search(),
        KeyCode::Enter => state.commit_search(),
        KeyCode::Backspace => state.search.backspace(),
        KeyCode::Char(ch) => {
            if !ch.is_control() {
                state.search.push_char(ch);
            }
        }
        _ => {}
    }
}

fn request_pick(
    state: &mut AppState,
    pending: &mut PendingLoads,
    tx: &UnboundedSender<WorkerMessage>,
    side: FileSide,
) {
    // One dialog at a time; the picker itself has no guard.
    if state.is_busy() {
        return;
    }

    state.error_message = None;
    pending.queue.push_back(PendingLoad::Pick(side));
    start_next_load(state, pending, tx);
}

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("failed to enable raw mode")?;

    let mut out = stdout();
    execute!(out, EnterAlternateScreen, EnableMouseCapture)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(out);
    let terminal = Terminal::new(backend).context("failed to create ratatui terminal")?;

    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;

    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("failed to leave alternate screen")?;

    terminal.show_cursor().context("failed to show cursor")?;
    Ok(())
}
