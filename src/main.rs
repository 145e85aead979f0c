mod app;
mod components;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::state::app_settings::AppSettings;
use crate::state::messages::{PersistRequest, PersistResponse, UiEvent};
use crate::state::persist::{PersistHandle, PersistWorker, SaveState};
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use kickoff_core::kv::{FileStore, KeyValueStore, MemoryStore};
use log::{error, info};
use std::io::Stdout;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tokio::time::Duration;
use tui::{Terminal, backend::CrosstermBackend};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);
const INPUT_POLL: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Some(settings) = handle_cli_args() else {
        return Ok(());
    };

    better_panic::install();

    let store: Arc<dyn KeyValueStore> = if settings.ephemeral {
        Arc::new(MemoryStore::new())
    } else {
        std::fs::create_dir_all(&settings.data_dir)?;
        Arc::new(FileStore::new(settings.data_dir.clone()))
    };

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal()?;

    tui_logger::init_logger(log::LevelFilter::Info)?;
    tui_logger::set_default_level(log::LevelFilter::Info);

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (persist_req_tx, persist_req_rx) = mpsc::channel::<PersistRequest>(100);
    let (persist_resp_tx, persist_resp_rx) = mpsc::channel::<PersistResponse>(100);

    let app = Arc::new(Mutex::new(App::new(
        settings,
        Box::new(PersistHandle::new(persist_req_tx.clone())),
    )));

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Persistence thread
    let persist_worker = PersistWorker::new(store.clone(), persist_req_rx, persist_resp_tx);
    let persist_task = tokio::spawn(persist_worker.run());

    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, store, ui_event_rx, persist_resp_rx).await;

    input_handler.abort();
    let _ = persist_req_tx.send(PersistRequest::Shutdown).await;
    if tokio::time::timeout(SHUTDOWN_GRACE, persist_task).await.is_err() {
        error!("pending writes did not finish before exit");
    }

    cleanup_terminal()?;
    Ok(())
}

/// Returns the settings to run with, or None when the process should exit.
fn handle_cli_args() -> Option<AppSettings> {
    let mut settings = AppSettings::load();
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return Some(settings);
    };
    if let Some(extra) = args.next() {
        eprintln!("Unexpected argument: {extra}\n\n{}", usage_text());
        std::process::exit(2);
    }

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            None
        }
        "-V" | "--version" => {
            println!("kickoff {}", env!("CARGO_PKG_VERSION"));
            None
        }
        "--memory" => {
            settings.ephemeral = true;
            Some(settings)
        }
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> &'static str {
    "kickoff - local football tournament manager

Usage:
  kickoff
  kickoff --memory     keep everything in memory, write nothing
  kickoff --help
  kickoff --version

Environment:
  KICKOFF_DATA_DIR     Directory holding the stored documents
                       (default $XDG_CONFIG_HOME/kickoff or ~/.config/kickoff)
  KICKOFF_LOG_LEVEL    error, warn, info, debug or trace"
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    store: Arc<dyn KeyValueStore>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    mut persist_responses: mpsc::Receiver<PersistResponse>,
) {
    let mut save = SaveState::default();

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                handle_ui_event(ui_event, &app, store.as_ref()).await;
                let mut app_guard = app.lock().await;
                if app_guard.state.should_quit {
                    break;
                }
                draw::draw(&mut terminal, &mut app_guard, save);
            }

            Some(response) = persist_responses.recv() => {
                handle_persist_response(response, &app, &mut save).await;
                let mut app_guard = app.lock().await;
                draw::draw(&mut terminal, &mut app_guard, save);
            }

            else => break,
        }
    }
}

async fn handle_ui_event(ui_event: UiEvent, app: &Arc<Mutex<App>>, store: &dyn KeyValueStore) {
    match ui_event {
        UiEvent::AppStarted => {
            let mut guard = app.lock().await;
            guard.load(store);
            info!("kickoff {} ready", env!("CARGO_PKG_VERSION"));
        }
        UiEvent::KeyPressed(key_event) => keys::handle_key_bindings(key_event, app).await,
        UiEvent::Resize => {}
    }
}

async fn handle_persist_response(response: PersistResponse, app: &Arc<Mutex<App>>, save: &mut SaveState) {
    match response {
        PersistResponse::SaveStateChanged { save_state } => *save = save_state,
        PersistResponse::Error { message } => {
            error!("Save failed: {message}");
            let mut guard = app.lock().await;
            guard.on_error(format!("Save failed: {message}"));
        }
    }
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    while !ui_events.is_closed() {
        match crossterm_event::poll(INPUT_POLL) {
            Ok(true) => {}
            Ok(false) => {
                tokio::task::yield_now().await;
                continue;
            }
            Err(e) => {
                error!("input error: {e}");
                break;
            }
        }
        let Ok(event) = crossterm_event::read() else {
            continue;
        };

        let ui_event = match event {
            Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
            Event::Resize(_, _) => Some(UiEvent::Resize),
            _ => None,
        };

        if let Some(ui_event) = ui_event
            && ui_events.send(ui_event).await.is_err()
        {
            break;
        }
    }
}

fn setup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide)?;
    execute!(stdout, terminal::EnterAlternateScreen)?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    terminal::enable_raw_mode()
}

pub fn cleanup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::MoveTo(0, 0))?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    execute!(stdout, terminal::LeaveAlternateScreen)?;
    execute!(stdout, cursor::Show)?;
    terminal::disable_raw_mode()
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        let _ = cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
