//! Daily session orchestration over the database.
//!
//! Each operation is one read-modify-write of a user's score record inside
//! a `BEGIN IMMEDIATE` transaction. Nothing computed here is reported back
//! until the transaction has committed.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::calendar::{Clock, ReferenceZone, SystemClock};
use crate::daily::{
    has_played_today, record_attempt, AttemptOutcome, CommitDecision, DailyProgress,
    DailyScore, PartialCommit, UserScoreState,
};
use crate::error::{DatabaseError, Result};
use crate::mode::GameMode;
use crate::storage::{Database, ScoreStore};

/// Snapshot of a user's day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyStatus {
    pub user_id: Uuid,
    pub day: chrono::NaiveDate,
    pub progress: DailyProgress,
    pub played: Vec<(GameMode, bool)>,
    /// Today's slots. Zero for every mode until played on `day`.
    pub scores: DailyScore,
    pub streak: u32,
    pub longest_streak: u32,
    pub last_played: Option<DateTime<Utc>>,
}

pub struct DailyService {
    db: Database,
    zone: ReferenceZone,
    clock: Box<dyn Clock>,
}

impl DailyService {
    pub fn new(db: Database, zone: ReferenceZone) -> Self {
        Self::with_clock(db, zone, Box::new(SystemClock))
    }

    pub fn with_clock(db: Database, zone: ReferenceZone, clock: Box<dyn Clock>) -> Self {
        Self { db, zone, clock }
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn into_database(self) -> Database {
        self.db
    }

    pub fn zone(&self) -> &ReferenceZone {
        &self.zone
    }

    pub fn today(&self) -> chrono::NaiveDate {
        self.zone.today(self.clock.now())
    }

    /// Has `mode` been played today? Persists the daily reset if one is due.
    pub fn check(&mut self, user_id: Uuid, mode: GameMode) -> Result<bool> {
        let now = self.clock.now();
        let zone = self.zone;
        let tx = self.db.begin_immediate()?;

        let state = tx.load_score(user_id)?;
        let check = has_played_today(&state, mode.index(), &zone, now)?;
        if check.rollover.is_some() {
            persist_reset(&*tx, &check.state, &zone, now)?;
        }

        tx.commit().map_err(DatabaseError::from)?;
        Ok(check.played)
    }

    /// Status of every mode for today, normalizing the record on a new day.
    pub fn status(&mut self, user_id: Uuid) -> Result<DailyStatus> {
        let now = self.clock.now();
        let zone = self.zone;
        let tx = self.db.begin_immediate()?;

        let mut state = tx.load_score(user_id)?;
        let mut played = Vec::with_capacity(GameMode::COUNT);
        let mut reset = false;
        for mode in GameMode::ALL {
            let check = has_played_today(&state, mode.index(), &zone, now)?;
            reset |= check.rollover.is_some();
            played.push((mode, check.played));
            state = check.state;
        }
        if reset {
            persist_reset(&*tx, &state, &zone, now)?;
        }
        tx.commit().map_err(DatabaseError::from)?;

        let day = zone.today(now);
        Ok(DailyStatus {
            user_id,
            day,
            progress: state.progress_on(day),
            played,
            scores: state.daily_score,
            streak: state.streak,
            longest_streak: state.longest_streak,
            last_played: state.last_played,
        })
    }

    /// Record that `mode` was solved after `incorrect_guesses` wrong guesses.
    ///
    /// # Errors
    ///
    /// Contract violations (`InvalidModeIndex`, `DuplicateAttempt`) leave the
    /// stored record untouched. Storage failures roll the transaction back
    /// and are returned unchanged.
    pub fn record(
        &mut self,
        user_id: Uuid,
        mode: GameMode,
        incorrect_guesses: u32,
    ) -> Result<AttemptOutcome> {
        let now = self.clock.now();
        let zone = self.zone;
        let tx = self.db.begin_immediate()?;

        let state = tx.load_score(user_id)?;
        let outcome = record_attempt(&state, mode.index(), incorrect_guesses, &zone, now)?;
        match &outcome.decision {
            CommitDecision::Partial(commit) => tx.save_partial(commit)?,
            CommitDecision::Full(commit) => tx.save_full(commit)?,
        }

        tx.commit().map_err(DatabaseError::from)?;
        Ok(outcome)
    }

    pub fn score(&self, user_id: Uuid) -> Result<UserScoreState> {
        Ok(self.db.load_score(user_id)?)
    }
}

fn persist_reset(
    store: &impl ScoreStore,
    state: &UserScoreState,
    zone: &ReferenceZone,
    now: chrono::DateTime<chrono::Utc>,
) -> Result<(), DatabaseError> {
    store.save_partial(&PartialCommit {
        user_id: state.user_id,
        daily_score: state.daily_score,
        day: zone.today(now),
    })
}
