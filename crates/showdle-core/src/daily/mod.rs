//! Daily session state machine.
//!
//! Per user and per reference-zone day a session moves
//! `NotStarted -> InProgress(k of N) -> Completed`. The move back to
//! `NotStarted` happens lazily on the next day's first access, never from a
//! timer. All functions here are pure: they take a state and return a new
//! one, and the caller decides what to persist.

mod commit;
mod state;
mod streak;
mod tracker;

pub use commit::{record_attempt, AttemptOutcome, CommitDecision, FullCommit, PartialCommit};
pub use state::{DailyProgress, DailyScore, UserScoreState};
pub use streak::{evaluate_streak, StreakUpdate};
pub use tracker::{has_played_today, DayRollover, SessionCheck};
