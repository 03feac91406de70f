use std::{
    error::Error,
    fs::{self, OpenOptions},
    io::{self, stdin},
    path::Path,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use breathe::{
    app::App,
    app_dirs::AppDirs,
    config::{ConfigStore, FileConfigStore},
    feedback::{Feedback, Silent, TerminalBell},
    palette,
    runtime::{AppEvent, CrosstermEventSource, EventSource, FixedTicker, Runner, Ticker},
    session::{BreathPattern, SessionConfig, SessionEntry},
    ui::screen::current_screen,
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "BREATHE_LOG";
const DEFAULT_LOG_FILTER: &str = "breathe=info";

/// calm guided-breathing tui
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A calm guided-breathing TUI: pick a preset or build your own inhale/hold/exhale pattern and follow the animated figure."
)]
pub struct Cli {
    /// start the named timer straight away (e.g. "Box Breathing")
    #[clap(short = 't', long, conflicts_with = "pattern")]
    timer: Option<String>,

    /// start an ad-hoc pattern, given as inhale-hold-exhale seconds (e.g. 4-7-8)
    #[clap(short = 'p', long)]
    pattern: Option<BreathPattern>,

    /// number of cycles for --pattern
    #[clap(short = 'c', long, default_value_t = 4, requires = "pattern")]
    cycles: u32,

    /// session title for --pattern
    #[clap(short = 'n', long, default_value = "Custom Pattern", requires = "pattern")]
    name: String,

    /// disable the terminal bell cues
    #[clap(long)]
    no_haptics: bool,

    /// show the introduction pages again
    #[clap(long)]
    reset_onboarding: bool,

    /// animation frame interval in milliseconds
    #[clap(long, default_value_t = 50, value_parser = clap::value_parser!(u64).range(10..=1000))]
    frame_ms: u64,
}

impl Cli {
    /// Session requested on the command line, if any.
    fn pattern_entry(&self) -> Option<Result<SessionEntry, breathe::error::ConfigError>> {
        self.pattern.map(|pattern| {
            SessionConfig::from_pattern(pattern, self.cycles, palette::CUSTOM_TIMER).map(
                |config| SessionEntry {
                    name: self.name.clone(),
                    config,
                },
            )
        })
    }
}

/// Route `tracing` output to a log file; the TUI owns stdout. Logging stays
/// off when the file cannot be opened.
fn init_logging(path: Option<&Path>) {
    let Some(path) = path else {
        return;
    };
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    init_logging(AppDirs::log_path().as_deref());
    info!(version = env!("CARGO_PKG_VERSION"), "starting");

    let store = FileConfigStore::new();
    let haptics = !cli.no_haptics && store.load().haptics;
    let feedback: Arc<dyn Feedback> = if haptics {
        Arc::new(TerminalBell::stdout())
    } else {
        Arc::new(Silent)
    };

    let mut app = App::new(Box::new(store), feedback);
    if cli.reset_onboarding {
        app.reset_onboarding();
    }

    if let Some(name) = &cli.timer {
        let Some(timer) = app.library.find_by_name(name).cloned() else {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::InvalidValue, format!("no timer named '{name}'"))
                .exit();
        };
        if let Err(err) = app.open_timer(&timer) {
            Cli::command().error(ErrorKind::InvalidValue, err).exit();
        }
    } else if let Some(entry) = cli.pattern_entry() {
        match entry {
            Ok(entry) => app.open_entry(entry),
            Err(err) => Cli::command().error(ErrorKind::InvalidValue, err).exit(),
        }
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(cli.frame_ms)),
    );
    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        warn!(%err, "exited with error");
    }
    info!("bye");
    result
}

fn start_tui<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    let size = terminal.size()?;
    app.resize(size.width, size.height);
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|f| current_screen(&app.screen).render(app, f))?;

        let event = runner.step();
        let now = Instant::now();
        app.on_frame(now.duration_since(last_frame));
        last_frame = now;

        match event {
            AppEvent::Key(key) => {
                if !app.on_key(key) {
                    break;
                }
            }
            AppEvent::Resize => {
                let size = terminal.size()?;
                app.resize(size.width, size.height);
            }
            AppEvent::Frame => {}
        }
    }

    Ok(())
}
