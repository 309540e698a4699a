use clap::Subcommand;
use showdle_core::{Config, Database};

use super::{format_slots, Context};

#[derive(Subcommand)]
pub enum ScoreAction {
    /// Current streak and today's scores
    Show {
        /// User name or id
        user: String,
    },
    /// Recently completed days, newest first
    Recent {
        /// User name or id
        user: String,
        /// Number of days (defaults to history.recent_limit)
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Users ranked by current streak
    Leaderboard {
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
}

pub fn run(ctx: &Context, action: ScoreAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        ScoreAction::Show { user } => {
            let user = db.resolve_user(&user)?;
            let mut service = ctx.service(&Config::load()?)?;
            let status = service.status(user.id)?;
            ctx.emit(&status, |s| {
                println!("{}: streak {} (longest {})", user.name, s.streak, s.longest_streak);
                println!("  {}: {}", s.day, format_slots(s.scores.slots()));
            })?;
        }
        ScoreAction::Recent { user, limit } => {
            let user = db.resolve_user(&user)?;
            let limit = match limit {
                Some(limit) => limit,
                None => Config::load()?.history.recent_limit,
            };
            let history = db.recent_scores(user.id, limit)?;
            ctx.emit(&history, |entries| {
                if entries.is_empty() {
                    println!("No completed days for {}.", user.name);
                }
                for e in entries {
                    println!(
                        "{}  {}  streak {}",
                        e.played_on,
                        format_slots(e.scores.slots()),
                        e.streak
                    );
                }
            })?;
        }
        ScoreAction::Leaderboard { limit } => {
            let board = db.leaderboard(limit)?;
            ctx.emit(&board, |entries| {
                for (rank, e) in entries.iter().enumerate() {
                    println!(
                        "{:>3}. {:<20} {:>4} (longest {})",
                        rank + 1,
                        e.name,
                        e.streak,
                        e.longest_streak
                    );
                }
            })?;
        }
    }
    Ok(())
}
