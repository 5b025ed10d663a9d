use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use devocional_core::{validate_catalogs, Config, ResearchEngine};

mod app;
mod cli;
mod handler;
mod tui;
mod ui;

use app::App;
use tui::{EventHandler, Tui};

#[derive(Parser)]
#[command(name = "devocional", version)]
#[command(about = "Daily devotions, scripture finder, and Bible research in the terminal")]
struct Cli {
    /// Resolve research queries immediately instead of simulating a search
    #[arg(long, global = true)]
    no_delay: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive interface (default)
    Tui,
    /// Show the devotion for today or a given date
    Devotion {
        /// Date as YYYY-MM-DD
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// List verse topics
    Topics,
    /// Show the verses for a topic
    Topic {
        /// Topic key, e.g. "peace"
        name: String,
    },
    /// Search verse text, references and books
    Search {
        /// Search query
        query: String,
    },
    /// Show one random verse
    Random,
    /// Look up a research summary for a Bible topic
    Research {
        /// Topic to research, e.g. "Sermon on the Mount"
        term: String,
    },
    /// List suggested research topics
    Suggested,
}

/// Logs go to a file while the TUI owns the terminal, stderr otherwise.
/// Verbosity comes from `RUST_LOG`.
fn init_logging(to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    if to_file {
        let dir = Config::config_dir()?;
        fs::create_dir_all(&dir)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("devocional.log"))?;

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    init_logging(matches!(command, Commands::Tui))?;
    validate_catalogs()?;

    let config = Config::load().unwrap_or_else(|e| {
        warn!(error = %e, "falling back to default config");
        Config::new()
    });
    let engine = if cli.no_delay {
        ResearchEngine::instant()
    } else {
        ResearchEngine::new(config.research_delay())
    };

    match command {
        Commands::Tui => run_tui(&config, engine).await?,
        Commands::Devotion { date } => cli::show_devotion(date),
        Commands::Topics => cli::list_topics(),
        Commands::Topic { name } => cli::show_topic(&name),
        Commands::Search { query } => cli::search_verses(&query),
        Commands::Random => cli::random_verse(),
        Commands::Research { term } => cli::research(&engine, &term).await,
        Commands::Suggested => cli::list_suggested(),
    }

    Ok(())
}

async fn run_tui(config: &Config, engine: ResearchEngine) -> Result<()> {
    info!(delay_ms = engine.delay().as_millis() as u64, "starting tui");

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut app = App::new(config, engine);
    let mut events = EventHandler::new(tui::TICK_RATE);

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    app.shutdown();
    tui::restore()?;
    result
}

async fn run_loop(terminal: &mut Tui, app: &mut App, events: &mut EventHandler) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event).await?,
            None => break,
        }
    }
    Ok(())
}
