use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;

use memtune::app::{App, POLL_INTERVAL_MS};
use memtune::config::{self, load_config, load_config_from_path};
use memtune::event::{Event, EventHandler};
use memtune::logging;
use memtune::stats::provider::{SharedProvider, SystemProvider};
use memtune::ui;

#[derive(Parser)]
#[command(
    name = "memtune",
    about = "TUI dashboard for memory and cache statistics with background optimization"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Theme: dark, light, colorblind, vivid
    #[arg(long)]
    theme: Option<String>,

    /// Color support: auto, 256, truecolor, mono
    #[arg(long)]
    color: Option<String>,

    /// Log file path (defaults to the user state directory)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref())?;
    let config = load_config_for_cli(&cli);

    // Provider construction failure is fatal: nothing to display without it.
    let provider: SharedProvider = Arc::new(Mutex::new(SystemProvider::new()?));

    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = run(&mut terminal, config, provider).await;

    ratatui::restore();

    result
}

async fn run(
    terminal: &mut ratatui::DefaultTerminal,
    config: config::Config,
    provider: SharedProvider,
) -> Result<()> {
    let mut events = EventHandler::new(Duration::from_millis(POLL_INTERVAL_MS));
    let mut app = App::new(config, provider, events.sender());

    // Initial update so the first frame has data
    app.poll_tick();
    terminal.draw(|frame| ui::draw(frame, &mut app))?;

    while app.running {
        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => {
                    if key.kind == crossterm::event::KeyEventKind::Press {
                        let action = app.map_key(key);
                        app.dispatch(action);
                    }
                }
                Event::Tick => app.poll_tick(),
                Event::Task(task_event) => app.on_task_event(task_event),
                Event::Resize => {}
            }
            terminal.draw(|frame| ui::draw(frame, &mut app))?;
        }
    }

    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> config::Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(ref theme) = cli.theme {
        config.general.theme = theme.clone();
    }
    if let Some(ref support) = cli.color {
        config.general.color_support = support.clone();
    }

    config
}
