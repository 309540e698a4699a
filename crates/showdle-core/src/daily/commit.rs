//! Recording a mode attempt and deciding what must be persisted.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::state::{DailyScore, UserScoreState};
use super::streak::evaluate_streak;
use super::tracker::{has_played_today, DayRollover};
use crate::calendar::ReferenceZone;
use crate::error::DailyError;
use crate::mode::GameMode;

/// Daily-progress write for a non-final mode of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialCommit {
    pub user_id: Uuid,
    pub daily_score: DailyScore,
    pub day: NaiveDate,
}

/// Full score write issued when the last mode of the day is completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullCommit {
    pub user_id: Uuid,
    pub streak: u32,
    pub longest_streak: u32,
    pub recent_scores: DailyScore,
    pub last_played: DateTime<Utc>,
    pub day: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommitDecision {
    Partial(PartialCommit),
    Full(FullCommit),
}

impl CommitDecision {
    pub fn is_full(&self) -> bool {
        matches!(self, CommitDecision::Full(_))
    }
}

/// Everything produced by [`record_attempt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptOutcome {
    pub mode: GameMode,
    /// New state; not durable until `decision` has been saved.
    pub state: UserScoreState,
    /// The one write the caller has to perform.
    pub decision: CommitDecision,
    /// Set when recording this attempt also started a new day.
    pub rollover: Option<DayRollover>,
}

/// Record a solved mode with `incorrect_guesses` wrong guesses before it.
///
/// A mode that already has a score today is rejected with
/// [`DailyError::DuplicateAttempt`] and nothing changes.
pub fn record_attempt(
    state: &UserScoreState,
    mode_index: usize,
    incorrect_guesses: u32,
    zone: &ReferenceZone,
    now: DateTime<Utc>,
) -> Result<AttemptOutcome, DailyError> {
    let check = has_played_today(state, mode_index, zone, now)?;
    if check.played {
        return Err(DailyError::DuplicateAttempt {
            mode: check.mode.to_string(),
        });
    }
    let slot = incorrect_guesses
        .checked_add(1)
        .ok_or(DailyError::InvalidGuessCount {
            count: incorrect_guesses,
        })?;

    let mode = check.mode;
    let day = zone.today(now);
    let mut next = check.state;
    next.daily_score.set(mode, slot);

    let decision = if next.daily_score.is_complete() {
        // Streak must see the previous last_played, so evaluate before overwriting it.
        let update = evaluate_streak(&next, zone, now);
        next.streak = update.streak;
        next.longest_streak = update.longest_streak;
        next.last_played = Some(now);

        CommitDecision::Full(FullCommit {
            user_id: next.user_id,
            streak: next.streak,
            longest_streak: next.longest_streak,
            recent_scores: next.daily_score,
            last_played: now,
            day,
        })
    } else {
        CommitDecision::Partial(PartialCommit {
            user_id: next.user_id,
            daily_score: next.daily_score,
            day,
        })
    };

    Ok(AttemptOutcome {
        mode,
        state: next,
        decision,
        rollover: check.rollover,
    })
}
