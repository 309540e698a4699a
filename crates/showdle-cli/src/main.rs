use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "showdle-cli", version, about = "Showdle CLI")]
struct Cli {
    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    /// Run as if the current time were this RFC 3339 instant
    #[arg(long, global = true, hide = true)]
    now: Option<DateTime<Utc>>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// User accounts
    User {
        #[command(subcommand)]
        action: commands::user::UserAction,
    },
    /// Daily play: check and record modes
    Play {
        #[command(subcommand)]
        action: commands::play::PlayAction,
    },
    /// Streaks, history and leaderboard
    Score {
        #[command(subcommand)]
        action: commands::score::ScoreAction,
    },
    /// Character catalog and daily answers
    Character {
        #[command(subcommand)]
        action: commands::character::CharacterAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init();

    let ctx = commands::Context {
        json: cli.json,
        now: cli.now,
    };
    let result = match cli.command {
        Commands::User { action } => commands::user::run(&ctx, action),
        Commands::Play { action } => commands::play::run(&ctx, action),
        Commands::Score { action } => commands::score::run(&ctx, action),
        Commands::Character { action } => commands::character::run(&ctx, action),
        Commands::Config { action } => commands::config::run(&ctx, action),
    };

    if let Err(e) = result {
        tracing::debug!("command failed: {e:?}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
