//! Daily play gate and lazy day rollover.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::state::{DailyScore, UserScoreState};
use crate::calendar::ReferenceZone;
use crate::error::DailyError;
use crate::mode::GameMode;

/// Why the daily score vector was reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayRollover {
    /// No completed day on record.
    NeverPlayed,
    /// The last completed day is before today.
    NewDay,
    /// The last completed day is after today.
    ClockAnomaly,
}

/// Result of [`has_played_today`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCheck {
    pub mode: GameMode,
    pub played: bool,
    /// State after any reset. Equal to the input when `rollover` is `None`.
    pub state: UserScoreState,
    /// Set when the reset must be persisted.
    pub rollover: Option<DayRollover>,
}

/// Has `mode_index` already been played on the reference-zone day of `now`?
///
/// The first check of a new day zeroes `daily_score` and stamps it with
/// today's date. Later checks on the same day see that stamp and leave
/// earlier slots alone.
pub fn has_played_today(
    state: &UserScoreState,
    mode_index: usize,
    zone: &ReferenceZone,
    now: DateTime<Utc>,
) -> Result<SessionCheck, DailyError> {
    let mode = GameMode::from_index(mode_index)?;
    let today = zone.today(now);
    let last_day = state.last_played.map(|ts| zone.calendar_date(ts));

    if last_day == Some(today) || state.progress_day == Some(today) {
        return Ok(SessionCheck {
            mode,
            played: state.daily_score.slot(mode) > 0,
            state: state.clone(),
            rollover: None,
        });
    }

    let rollover = match last_day {
        None => DayRollover::NeverPlayed,
        Some(day) if day > today => {
            tracing::warn!(
                user_id = %state.user_id,
                last_played = %day,
                today = %today,
                "last_played is ahead of the reference clock, starting a new day"
            );
            DayRollover::ClockAnomaly
        }
        Some(_) => DayRollover::NewDay,
    };
    tracing::debug!(user_id = %state.user_id, ?rollover, %today, "resetting daily score");

    let mut next = state.clone();
    next.daily_score = DailyScore::zeroed();
    next.progress_day = Some(today);

    Ok(SessionCheck {
        mode,
        played: false,
        state: next,
        rollover: Some(rollover),
    })
}
