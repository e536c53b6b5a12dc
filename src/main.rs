use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use multab::{
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    runtime::{CrosstermEventSource, DrillEventSource, Flow, Runner},
    setup::{Configuration, QuestionCount, TablesMax},
    ui, App,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    panic,
    path::PathBuf,
};

/// times-table drill in your terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Practice multiplication tables: pick how far up the tables go and how many questions to answer, then get instant feedback and a running score."
)]
pub struct Cli {
    /// highest times table to practice (2-12)
    #[clap(short = 't', long, value_parser = clap::value_parser!(u8).range(2..=12))]
    tables_max: Option<u8>,

    /// number of questions per game (5, 10 or 20)
    #[clap(short = 'q', long)]
    questions: Option<QuestionCount>,

    /// read starting values from this config file instead of the default location
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// write logs to this file (filter with MULTAB_LOG)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Flags win over the config file
    fn initial_configuration(&self, cfg: &Config) -> Configuration {
        let mut configuration = Configuration::from(cfg);
        if let Some(tm) = self.tables_max {
            configuration.tables_max = TablesMax::clamped(tm);
        }
        if let Some(qc) = self.questions {
            configuration.question_count = qc;
        }
        configuration
    }

    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = &cli.log_file {
        logging::init_file_logging(path)?;
    }

    let store = cli.config_store();
    let initial = cli.initial_configuration(&store.load());
    tracing::info!(config = %store.path().display(), ?initial, "starting");

    install_panic_hook();
    let guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let mut app = App::new(initial);
    let mut runner = Runner::new(CrosstermEventSource);
    let result = start_tui(&mut terminal, &mut app, &mut runner);

    drop(guard);
    result
}

/// Puts the terminal back the way the shell expects it. Safe to call more than once.
fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
}

/// Raw mode plus alternate screen for as long as it lives; also undone on early return or panic
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        // built before the second step so a failure there still disables raw mode
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

/// Restore before the default hook prints, otherwise the message lands on the alternate screen
fn install_panic_hook() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        restore_terminal();
        default_hook(info);
    }));
}

fn start_tui<B: Backend, E: DrillEventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &mut Runner<E>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui::draw(app, f))?;

    loop {
        match runner.step(app) {
            Flow::Quit => break,
            Flow::Redraw => {
                terminal.draw(|f| ui::draw(app, f))?;
            }
            Flow::Idle => {}
        }
    }

    tracing::info!("quit");
    Ok(())
}
