use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::error::Error;
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use blackjack::Table;
use carousel_store::{CoinStore, FileStorage, ScoreStore, ThemeStore};

mod app;
use app::App;

mod config;
use config::Cli;

mod registry;
use registry::GameRegistry;

mod sound;
use sound::TerminalSound;

mod tui_logger;
use tui_logger::TuiLogger;

mod ui;

/// Longest wait before the loop redraws when no step is due
const FRAME: Duration = Duration::from_millis(50);

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let (logger, log_buffer) = TuiLogger::new(cli.log_level);
    log::set_boxed_logger(Box::new(logger)).map(|()| log::set_max_level(cli.log_level))?;

    let storage = FileStorage::open(cli.data_dir.clone())?;
    let rules = cli.table_rules();
    let shoe = cli.shoe(&rules);
    log::info!(
        "Table ready: {} deck(s), {} ms pace, data in {}",
        rules.num_decks,
        rules.pace_ms,
        storage.dir().display()
    );

    let table = Table::new(
        rules,
        shoe,
        CoinStore::load(storage.clone()),
        TerminalSound::new(cli.bell),
    );
    let app = App::new(
        GameRegistry::with_defaults(),
        table,
        ScoreStore::load(storage.clone()),
        ThemeStore::load(storage),
        log_buffer,
    );

    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app).await;

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}")
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    mut app: App<FileStorage>,
) -> Result<(), Box<dyn Error>> {
    let (tx, mut keys) = mpsc::unbounded_channel();
    let input = tokio::task::spawn_blocking(move || read_keys(tx));

    loop {
        app.tick(Instant::now());
        app.sync_logs();

        terminal.draw(|f| ui::ui(f, &app))?;

        let frame = Instant::now() + FRAME;
        let wake = app.next_step_at().map_or(frame, |due| due.min(frame));
        tokio::select! {
            key = keys.recv() => match key {
                Some(code) => app.handle_key(code),
                None => {
                    app.shutdown();
                    input.await??;
                    return Ok(());
                }
            },
            () = tokio::time::sleep_until(wake.into()) => {}
        }

        if app.should_quit {
            app.shutdown();
            drop(keys);
            input.await??;
            return Ok(());
        }
    }
}

/// Forward key presses until the receiving loop goes away
fn read_keys(tx: mpsc::UnboundedSender<KeyCode>) -> io::Result<()> {
    while !tx.is_closed() {
        if !event::poll(FRAME)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && tx.send(key.code).is_err() {
                break;
            }
        }
    }
    Ok(())
}
