use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, Command};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use planner::{ui, Planner, PlannerConfig};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let matches = Command::new("planner")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Terminal daily planner")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("JSON config file (defaults to $PLANNER_CONFIG)"),
        )
        .arg(
            Arg::new("log")
                .long("log")
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Write logs to this file"),
        )
        .arg(
            Arg::new("no-splash")
                .long("no-splash")
                .action(ArgAction::SetTrue)
                .help("Skip the splash screen"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Increase log verbosity"),
        )
        .get_matches();

    if let Some(path) = matches.get_one::<PathBuf>("log") {
        init_tracing(path, matches.get_count("verbose"))?;
    }

    let config = PlannerConfig::discover(matches.get_one::<PathBuf>("config").cloned())?;
    debug!(?config, "config loaded");
    let splash = if matches.get_flag("no-splash") {
        std::time::Duration::ZERO
    } else {
        config.splash_delay()
    };

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut planner = Planner::new().category_required(config.require_category);

    let result = ui::show_splash(&mut terminal, splash)
        .and_then(|()| ui::run_app(&mut terminal, &mut planner, config.show_calendar));

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!(tasks = planner.tasks().len(), "planner closed");

    if let Err(err) = result {
        eprintln!("{:?}", err);
    }
    Ok(())
}

fn init_tracing(path: &Path, verbose: u8) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_env("PLANNER_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .init();
    Ok(())
}
