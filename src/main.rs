use anyhow::Result;
use clap::{Parser, Subcommand};
use crewclock::config::{config_file, get_config_dir, init_local_dir, load_config, save_config, Config};
use crewclock::console::{write_shifts, Console};
use crewclock::{ticker, Workday};
use std::io;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "crewclock")]
#[command(about = "Task timers, shift reservations and clock-in tracking", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .crewclock directory with a default config
    Init,
    /// Print my shifts and open shifts, then exit
    Shifts {
        /// Whose shifts to show. Defaults to the configured identity.
        #[arg(short, long)]
        who: Option<String>,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr so console output stays readable
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("crewclock=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let current_dir = std::env::current_dir()?;
            let dir = init_local_dir(&current_dir)?;
            save_config(config_file(&dir), &Config::default())?;
            println!("Initialized crewclock directory: {}", dir.display());
            println!("Edit {} to set your name and roster.", config_file(&dir).display());
            Ok(())
        }
        Some(Commands::Shifts { who }) => {
            let config = load()?;
            let mut day = build_workday(config);
            if let Some(who) = who {
                day.identity = who;
            }
            let now = chrono::Local::now().naive_local();
            write_shifts(&mut io::stdout().lock(), &day, now)
        }
        None => run_console(),
    }
}

fn load() -> Result<Config> {
    let dir = get_config_dir()?;
    info!(dir = %dir.display(), "Using config directory");
    load_config(config_file(&dir))
}

fn build_workday(config: Config) -> Workday {
    let today = chrono::Local::now().date_naive();
    let roster = config.roster_or_sample(today);
    Workday::new(roster, config.identity, config.require_clock_in)
}

fn run_console() -> Result<()> {
    let config = load()?;
    let tick = ticker::tick_duration(Some(config.tick_ms));
    let mut day = build_workday(config);

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout(), tick);
    let result = console.run(&mut day);

    // Session state is not kept; report where the day ended
    let snapshot = day.snapshot(chrono::Local::now());
    info!(
        session_id = %day.session_id,
        completed = snapshot.completed_count,
        running = snapshot.running.len(),
        "Session ended"
    );

    result
}
