// algoTTY: step-by-step sorting and path-search visualizer

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};

use algotty::config::Config;
use algotty::engine::adapters::{Algorithm, GridBfs};
use algotty::engine::errors::EngineError;
use algotty::engine::scheduler::{RunOutcome, Session};
use algotty::model::element::Element;
use algotty::model::grid::{Grid, NodeType};
use algotty::ui::App;
use algotty::ui::app::Mode;

#[derive(Debug, Parser)]
#[command(name = "algotty", version, about = "Watch sorting and path-search algorithms run one step at a time")]
struct Cli {
    /// Algorithm to start with: bubble, selection, insertion, merge, quick or bfs
    #[arg(default_value = "bubble")]
    algorithm: Algorithm,

    /// Number of elements in the random input array
    #[arg(long)]
    size: Option<usize>,

    /// Delay after every step, in milliseconds
    #[arg(long, value_name = "MS")]
    delay: Option<u64>,

    /// Seed for the random input array
    #[arg(long)]
    seed: Option<u64>,

    /// TOML configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write log output to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Run once without the TUI and print the result
    #[arg(long)]
    headless: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    // Command-line flags win over the file
    if let Some(size) = cli.size {
        config.array.size = size;
    }
    if let Some(delay) = cli.delay {
        config.run.delay_ms = delay;
    }
    if cli.seed.is_some() {
        config.array.seed = cli.seed;
    }
    if cli.log_file.is_some() {
        config.log_file = cli.log_file.clone();
    }

    init_logging(config.log_file.as_deref())?;
    match &cli.config {
        Some(path) => info!("loaded config from {}", path.display()),
        None => info!("using default config"),
    }
    config.validate()?;

    if cli.headless {
        run_headless(&config, cli.algorithm)?;
        return Ok(());
    }

    let mut app = App::new(config, Mode::from(cli.algorithm))?;

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

/// Install `env_logger`, honoring `RUST_LOG` (default `warn`)
fn init_logging(log_file: Option<&Path>) -> io::Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(path) = log_file {
        let file = File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

/// Drive one run to completion at the configured pace and print what happened
fn run_headless(config: &Config, algorithm: Algorithm) -> Result<(), EngineError> {
    let options = config.run_options();

    match algorithm {
        Algorithm::Sort(sort) => {
            let mut rng = config.rng();
            let mut session = Session::new(config.build_array(&mut rng)?);
            println!("input:   {:?}", session.input().values());

            let run = session.start(sort.adapter(), options);
            let outcome = run.drive(&mut |_step: usize, _snapshot: &Vec<Element>| {})?;

            print_outcome(algorithm, outcome);
            println!("output:  {:?}", run.model().values());
        }
        Algorithm::GridBfs => {
            let mut session = Session::new(config.build_grid()?);
            let run = session.start(Box::new(GridBfs), options);
            let outcome = run.drive(&mut |_step: usize, _snapshot: &Grid| {})?;

            print_outcome(algorithm, outcome);
            let grid = run.model();
            println!("visited: {}", grid.count(NodeType::Visited));
            println!("path:    {}", grid.count(NodeType::Path));
        }
    }

    Ok(())
}

fn print_outcome(algorithm: Algorithm, outcome: RunOutcome) {
    println!("{}: {} after {} step(s)", algorithm, outcome.state, outcome.steps);
}
