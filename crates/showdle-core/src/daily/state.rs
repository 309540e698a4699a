use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::mode::GameMode;

/// Per-mode scores for one day. `0` means not attempted; otherwise the value
/// is the number of incorrect guesses plus one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyScore([u32; GameMode::COUNT]);

impl DailyScore {
    pub fn new(slots: [u32; GameMode::COUNT]) -> Self {
        Self(slots)
    }

    pub fn zeroed() -> Self {
        Self::default()
    }

    pub fn slot(&self, mode: GameMode) -> u32 {
        self.0[mode.index()]
    }

    pub(crate) fn set(&mut self, mode: GameMode, value: u32) {
        self.0[mode.index()] = value;
    }

    pub fn slots(&self) -> [u32; GameMode::COUNT] {
        self.0
    }

    pub fn completed_count(&self) -> usize {
        self.0.iter().filter(|&&v| v > 0).count()
    }

    pub fn is_complete(&self) -> bool {
        self.completed_count() == GameMode::COUNT
    }

    pub fn is_empty(&self) -> bool {
        self.completed_count() == 0
    }
}

/// Score record of one user as owned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserScoreState {
    pub user_id: Uuid,
    pub streak: u32,
    pub longest_streak: u32,
    /// Moment the last mode of a day was completed. Only full commits move it.
    pub last_played: Option<DateTime<Utc>>,
    pub daily_score: DailyScore,
    /// Reference-zone day `daily_score` belongs to.
    pub progress_day: Option<NaiveDate>,
}

impl UserScoreState {
    /// Zeroed state for a freshly created account.
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            streak: 0,
            longest_streak: 0,
            last_played: None,
            daily_score: DailyScore::zeroed(),
            progress_day: None,
        }
    }

    /// Where this state stands on `today`.
    pub fn progress_on(&self, today: NaiveDate) -> DailyProgress {
        if self.progress_day != Some(today) {
            return DailyProgress::NotStarted;
        }
        match self.daily_score.completed_count() {
            0 => DailyProgress::NotStarted,
            n if n == GameMode::COUNT => DailyProgress::Completed,
            n => DailyProgress::InProgress {
                completed: n,
                total: GameMode::COUNT,
            },
        }
    }
}

/// Per-day, per-user session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DailyProgress {
    NotStarted,
    InProgress { completed: usize, total: usize },
    Completed,
}
