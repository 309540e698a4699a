use clap::Subcommand;
use serde::Serialize;
use showdle_core::{CommitDecision, Config, DayRollover, GameMode};

use super::{format_slots, Context};

#[derive(Subcommand)]
pub enum PlayAction {
    /// Today's progress for every mode
    Status {
        /// User name or id
        user: String,
    },
    /// Check whether a mode was already played today
    Check {
        /// User name or id
        user: String,
        /// Mode name (classic, quote, image) or index
        mode: GameMode,
    },
    /// Record a solved mode
    Record {
        /// User name or id
        user: String,
        /// Mode name (classic, quote, image) or index
        mode: GameMode,
        /// Incorrect guesses made before the correct one
        #[arg(long, default_value_t = 0)]
        incorrect: u32,
    },
}

#[derive(Serialize)]
struct CheckReport {
    mode: GameMode,
    played: bool,
}

#[derive(Serialize)]
struct RecordReport<'a> {
    mode: GameMode,
    rollover: Option<DayRollover>,
    #[serde(flatten)]
    decision: &'a CommitDecision,
}

pub fn run(ctx: &Context, action: PlayAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut service = ctx.service(&config)?;

    match action {
        PlayAction::Status { user } => {
            let user = service.db().resolve_user(&user)?;
            let status = service.status(user.id)?;
            ctx.emit(&status, |s| {
                println!("{} on {} ({})", user.name, s.day, service.zone());
                for (mode, played) in &s.played {
                    let mark = if *played { "done" } else { "open" };
                    println!("  {mode:<8} {mark}");
                }
                println!("  streak   {} (longest {})", s.streak, s.longest_streak);
            })?;
        }
        PlayAction::Check { user, mode } => {
            let user = service.db().resolve_user(&user)?;
            let played = service.check(user.id, mode)?;
            ctx.emit(&CheckReport { mode, played }, |r| {
                if r.played {
                    println!("{} already played {} today", user.name, r.mode);
                } else {
                    println!("{} can play {} today", user.name, r.mode);
                }
            })?;
        }
        PlayAction::Record {
            user,
            mode,
            incorrect,
        } => {
            let user = service.db().resolve_user(&user)?;
            let outcome = service.record(user.id, mode, incorrect)?;
            let report = RecordReport {
                mode: outcome.mode,
                rollover: outcome.rollover,
                decision: &outcome.decision,
            };
            ctx.emit(&report, |r| match r.decision {
                CommitDecision::Partial(commit) => {
                    println!("Recorded {} for {}", r.mode, user.name);
                    println!("  today: {}", format_slots(commit.daily_score.slots()));
                }
                CommitDecision::Full(commit) => {
                    println!("Day complete for {}!", user.name);
                    println!("  today:  {}", format_slots(commit.recent_scores.slots()));
                    println!(
                        "  streak: {} (longest {})",
                        commit.streak, commit.longest_streak
                    );
                }
            })?;
        }
    }
    Ok(())
}
