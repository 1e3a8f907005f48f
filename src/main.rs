// src/main.rs
mod app;
mod clipboard;
mod config;
mod error;
mod greetings;
mod history;
mod i18n;
mod input;
mod models;
mod selection;
mod share;
mod storage;
mod theme;
mod ui;

use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tokio::runtime::Runtime;
use tracing_appender::non_blocking::WorkerGuard;

use app::{App, AppOptions};
use clipboard::SystemClipboard;
use config::Settings;
use greetings::{GreetingPool, Recipient, Tone};
use history::HistoryLog;
use i18n::{DictionarySource, I18n, env_locale, startup_language};
use selection::SelectionState;
use storage::{FileStore, KeyValueStore, LANGUAGE_KEY, MemoryStore};

#[derive(Parser)]
#[command(
    name = "seollal",
    version,
    about = "🧧 Seollal greeting generator for the terminal"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Extra config file layered over the defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start in this language (ko, en, ja, ...).
    #[arg(long)]
    lang: Option<String>,

    /// Keep history and preferences in memory only.
    #[arg(long)]
    ephemeral: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print greetings without opening the UI.
    Generate {
        #[arg(short, long)]
        recipient: String,
        #[arg(short, long)]
        tone: String,
        /// Number of batches; later batches avoid earlier picks.
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },
    /// Show or clear recently copied greetings.
    History {
        #[arg(long)]
        clear: bool,
    },
    /// Resolve label keys in the active language.
    Labels {
        keys: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::new(cli.config.as_deref()).context("failed to load settings")?;
    let data_dir = settings.data_dir();
    let _log_guard = init_logging(&data_dir)?;

    let rt = Runtime::new()?;

    let mut store: Box<dyn KeyValueStore> = if cli.ephemeral {
        Box::new(MemoryStore::new())
    } else {
        Box::new(FileStore::open(data_dir.join("state.json")))
    };

    let pools = GreetingPool::load(settings.greetings_path().as_deref())
        .context("failed to load greetings")?;

    let lang = startup_language(
        cli.lang.as_deref().or(settings.lang.as_deref()),
        store.get(LANGUAGE_KEY).as_deref(),
        env_locale().as_deref(),
    );
    let i18n = I18n::new(
        DictionarySource::parse(&settings.locales),
        &lang,
        rt.handle().clone(),
    );
    tracing::info!(%lang, data_dir = %data_dir.display(), "starting");

    match cli.command {
        Some(Commands::Generate { recipient, tone, count }) => {
            let recipient: Recipient = recipient.parse()?;
            let tone: Tone = tone.parse()?;
            let mut selection = SelectionState::new();
            let mut rng = rand::rng();
            for batch in 0..count {
                if batch > 0 {
                    println!();
                }
                let picked = selection.next_batch(&pools, recipient, tone, &mut rng);
                for (i, text) in picked.iter().enumerate() {
                    println!("{}. {}", i + 1, text);
                }
            }
        }
        Some(Commands::History { clear }) => {
            let mut history = HistoryLog::load(store.as_ref());
            if clear {
                history.clear(store.as_mut());
            } else {
                for text in history.entries() {
                    println!("{text}");
                }
            }
        }
        Some(Commands::Labels { keys }) => {
            rt.block_on(i18n.set_language_and_wait(&lang))?;
            for key in keys {
                println!("{key} = {}", i18n.t(&key));
            }
        }
        None => {
            i18n.set_language(&lang)?;
            let app = App::new(
                pools,
                store,
                Box::new(SystemClipboard::new()),
                i18n,
                AppOptions::from_settings(&settings),
            );
            run_tui(app)?;
        }
    }

    Ok(())
}

/// Logs go to `<data_dir>/seollal.log` so they never draw over the UI.
fn init_logging(data_dir: &Path) -> anyhow::Result<WorkerGuard> {
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("failed to create {}", data_dir.display()))?;
    let appender = tracing_appender::rolling::never(data_dir, "seollal.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}

fn run_tui(mut app: App) -> anyhow::Result<()> {
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    // restore the terminal even when the loop failed
    terminal::disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> anyhow::Result<()> {
    loop {
        app.tick(Instant::now());
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(Duration::from_millis(200))? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind != KeyEventKind::Press {
                    continue;
                }
                if !input::handle_key(app, key_event.code) {
                    break;
                }
            }
        }
    }
    Ok(())
}
