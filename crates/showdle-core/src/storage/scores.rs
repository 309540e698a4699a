//! Score records: the persistence side of the daily session.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::database::Database;
use crate::daily::{DailyScore, FullCommit, PartialCommit, UserScoreState};
use crate::error::DatabaseError;

/// Persistence collaborator for [`UserScoreState`].
///
/// Implemented for [`Connection`], so it works the same on a plain
/// connection and inside a `rusqlite::Transaction`.
pub trait ScoreStore {
    fn load_score(&self, user_id: Uuid) -> Result<UserScoreState, DatabaseError>;
    fn save_partial(&self, commit: &PartialCommit) -> Result<(), DatabaseError>;
    fn save_full(&self, commit: &FullCommit) -> Result<(), DatabaseError>;
}

/// One completed day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub played_on: NaiveDate,
    pub scores: DailyScore,
    pub streak: u32,
    pub committed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user_id: Uuid,
    pub name: String,
    pub streak: u32,
    pub longest_streak: u32,
    pub last_played: Option<DateTime<Utc>>,
}

impl ScoreStore for Connection {
    fn load_score(&self, user_id: Uuid) -> Result<UserScoreState, DatabaseError> {
        let row = self
            .query_row(
                "SELECT streak, longest_streak, last_played, daily_score, progress_day
                 FROM scores WHERE user_id = ?1",
                params![user_id.to_string()],
                |row| {
                    Ok((
                        row.get::<_, u32>(0)?,
                        row.get::<_, u32>(1)?,
                        row.get::<_, Option<String>>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, Option<String>>(4)?,
                    ))
                },
            )
            .optional()?;

        let (streak, longest_streak, last_played, daily_score, progress_day) =
            row.ok_or_else(|| DatabaseError::NotFound {
                entity: "score",
                key: user_id.to_string(),
            })?;

        Ok(UserScoreState {
            user_id,
            streak,
            longest_streak,
            last_played: last_played.and_then(|raw| parse_timestamp(user_id, &raw)),
            daily_score: parse_daily_score(user_id, &daily_score),
            progress_day: progress_day.and_then(|raw| parse_day(user_id, &raw)),
        })
    }

    fn save_partial(&self, commit: &PartialCommit) -> Result<(), DatabaseError> {
        let changed = self.execute(
            "UPDATE scores SET daily_score = ?1, progress_day = ?2 WHERE user_id = ?3",
            params![
                encode_scores(&commit.daily_score)?,
                commit.day.to_string(),
                commit.user_id.to_string(),
            ],
        )?;
        ensure_updated(changed, commit.user_id)?;
        tracing::debug!(user_id = %commit.user_id, scores = ?commit.daily_score.slots(), "saved daily progress");
        Ok(())
    }

    fn save_full(&self, commit: &FullCommit) -> Result<(), DatabaseError> {
        let scores = encode_scores(&commit.recent_scores)?;
        let changed = self.execute(
            "UPDATE scores
             SET streak = ?1, longest_streak = ?2, last_played = ?3,
                 daily_score = ?4, progress_day = ?5
             WHERE user_id = ?6",
            params![
                commit.streak,
                commit.longest_streak,
                commit.last_played.to_rfc3339(),
                scores,
                commit.day.to_string(),
                commit.user_id.to_string(),
            ],
        )?;
        ensure_updated(changed, commit.user_id)?;

        self.execute(
            "INSERT INTO score_history (user_id, played_on, scores, streak, committed_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                commit.user_id.to_string(),
                commit.day.to_string(),
                scores,
                commit.streak,
                commit.last_played.to_rfc3339(),
            ],
        )?;
        tracing::info!(
            user_id = %commit.user_id,
            streak = commit.streak,
            longest_streak = commit.longest_streak,
            day = %commit.day,
            "completed daily session"
        );
        Ok(())
    }
}

impl ScoreStore for Database {
    fn load_score(&self, user_id: Uuid) -> Result<UserScoreState, DatabaseError> {
        self.conn.load_score(user_id)
    }

    fn save_partial(&self, commit: &PartialCommit) -> Result<(), DatabaseError> {
        self.conn.save_partial(commit)
    }

    fn save_full(&self, commit: &FullCommit) -> Result<(), DatabaseError> {
        self.conn.save_full(commit)
    }
}

impl Database {
    /// Completed days for a user, newest first.
    pub fn recent_scores(
        &self,
        user_id: Uuid,
        limit: u32,
    ) -> Result<Vec<HistoryEntry>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT played_on, scores, streak, committed_at
             FROM score_history
             WHERE user_id = ?1
             ORDER BY played_on DESC, id DESC
             LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![user_id.to_string(), limit], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, u32>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (played_on, scores, streak, committed_at) = row?;
            let (Some(played_on), Some(committed_at)) = (
                parse_day(user_id, &played_on),
                parse_timestamp(user_id, &committed_at),
            ) else {
                continue;
            };
            entries.push(HistoryEntry {
                played_on,
                scores: parse_daily_score(user_id, &scores),
                streak,
                committed_at,
            });
        }
        Ok(entries)
    }

    /// Users ranked by current streak, then longest streak, then name.
    pub fn leaderboard(&self, limit: u32) -> Result<Vec<LeaderboardEntry>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT u.id, u.name, s.streak, s.longest_streak, s.last_played
             FROM users u JOIN scores s ON s.user_id = u.id
             ORDER BY s.streak DESC, s.longest_streak DESC, u.name ASC
             LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, u32>(2)?,
                row.get::<_, u32>(3)?,
                row.get::<_, Option<String>>(4)?,
            ))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (id, name, streak, longest_streak, last_played) = row?;
            let Ok(user_id) = Uuid::parse_str(&id) else {
                tracing::warn!(id = %id, "skipping user with malformed id");
                continue;
            };
            entries.push(LeaderboardEntry {
                user_id,
                name,
                streak,
                longest_streak,
                last_played: last_played.and_then(|raw| parse_timestamp(user_id, &raw)),
            });
        }
        Ok(entries)
    }
}

fn ensure_updated(changed: usize, user_id: Uuid) -> Result<(), DatabaseError> {
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity: "score",
            key: user_id.to_string(),
        });
    }
    Ok(())
}

fn encode_scores(scores: &DailyScore) -> Result<String, DatabaseError> {
    Ok(serde_json::to_string(scores)?)
}

// Malformed stored values read as absent rather than failing the whole load.

fn parse_timestamp(user_id: Uuid, raw: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(e) => {
            tracing::warn!(%user_id, value = raw, "ignoring malformed timestamp: {e}");
            None
        }
    }
}

fn parse_day(user_id: Uuid, raw: &str) -> Option<NaiveDate> {
    match raw.parse::<NaiveDate>() {
        Ok(day) => Some(day),
        Err(e) => {
            tracing::warn!(%user_id, value = raw, "ignoring malformed date: {e}");
            None
        }
    }
}

fn parse_daily_score(user_id: Uuid, raw: &str) -> DailyScore {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        tracing::warn!(%user_id, value = raw, "resetting malformed daily score: {e}");
        DailyScore::zeroed()
    })
}
