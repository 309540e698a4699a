//! SQLite-backed storage for users and their score records.
//!
//! Provides persistent storage for:
//! - User accounts, each created together with a zeroed score record
//! - Daily progress, streaks and the history of completed days
//! - The character catalog used for daily selection

use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{data_dir, migrations};
use crate::daily::DailyScore;
use crate::error::{DatabaseError, Result, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// SQLite database holding all game state.
pub struct Database {
    pub(super) conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `<data dir>/showdle.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory or the database cannot be
    /// opened, or if migrating fails.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("showdle.db");
        Ok(Self::open_at(&path)?)
    }

    /// Open (or create) the database file at `path`.
    pub fn open_at(path: &Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::init(conn)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self, DatabaseError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, DatabaseError> {
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.pragma_update(None, "foreign_keys", true)?;
        migrations::migrate(&conn).map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Start a write transaction that takes the database write lock up front.
    ///
    /// Concurrent read-modify-write cycles on a user's score serialize here:
    /// a second writer waits (up to the busy timeout) instead of reading a
    /// state the first one is about to replace.
    pub fn begin_immediate(&mut self) -> Result<Transaction<'_>, DatabaseError> {
        Ok(self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?)
    }

    /// Create a user together with a zeroed score record.
    pub fn create_user(&self, name: &str) -> Result<UserRecord> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "name".into(),
                message: "user name must not be empty".into(),
            }
            .into());
        }

        let user = UserRecord {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: Utc::now(),
        };

        let tx = self.conn.unchecked_transaction().map_err(DatabaseError::from)?;
        tx.execute(
            "INSERT INTO users (id, name, created_at) VALUES (?1, ?2, ?3)",
            params![user.id.to_string(), user.name, user.created_at.to_rfc3339()],
        )
        .map_err(|e| match DatabaseError::from(e) {
            DatabaseError::Conflict(_) => {
                DatabaseError::Conflict(format!("user name '{name}' is already taken"))
            }
            other => other,
        })?;
        tx.execute(
            "INSERT INTO scores (user_id, daily_score) VALUES (?1, ?2)",
            params![
                user.id.to_string(),
                serde_json::to_string(&DailyScore::zeroed())?
            ],
        )
        .map_err(DatabaseError::from)?;
        tx.commit().map_err(DatabaseError::from)?;

        tracing::info!(user_id = %user.id, name = %user.name, "created user");
        Ok(user)
    }

    pub fn get_user(&self, id: Uuid) -> Result<UserRecord, DatabaseError> {
        self.conn
            .query_row(
                "SELECT id, name, created_at FROM users WHERE id = ?1",
                params![id.to_string()],
                row_to_user,
            )
            .optional()?
            .ok_or_else(|| DatabaseError::NotFound {
                entity: "user",
                key: id.to_string(),
            })
    }

    pub fn find_user(&self, name: &str) -> Result<UserRecord, DatabaseError> {
        self.conn
            .query_row(
                "SELECT id, name, created_at FROM users WHERE name = ?1",
                params![name.trim()],
                row_to_user,
            )
            .optional()?
            .ok_or_else(|| DatabaseError::NotFound {
                entity: "user",
                key: name.to_string(),
            })
    }

    /// Resolve a user by UUID or, failing that, by name.
    pub fn resolve_user(&self, key: &str) -> Result<UserRecord, DatabaseError> {
        match Uuid::parse_str(key.trim()) {
            Ok(id) => self.get_user(id),
            Err(_) => self.find_user(key),
        }
    }

    pub fn list_users(&self) -> Result<Vec<UserRecord>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, created_at FROM users ORDER BY name")?;
        let users = stmt
            .query_map([], row_to_user)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }

    /// Delete a user; the score record and history go with it.
    pub fn delete_user(&self, id: Uuid) -> Result<(), DatabaseError> {
        let changed = self
            .conn
            .execute("DELETE FROM users WHERE id = ?1", params![id.to_string()])?;
        if changed == 0 {
            return Err(DatabaseError::NotFound {
                entity: "user",
                key: id.to_string(),
            });
        }
        tracing::info!(user_id = %id, "deleted user");
        Ok(())
    }
}

fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<UserRecord> {
    let id: String = row.get(0)?;
    let created_at: String = row.get(2)?;
    Ok(UserRecord {
        id: Uuid::parse_str(&id).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?,
        name: row.get(1)?,
        created_at: DateTime::parse_from_rfc3339(&created_at)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    2,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn create_and_find_user() {
        let db = Database::open_memory().unwrap();
        let user = db.create_user("  rory ").unwrap();
        assert_eq!(user.name, "rory");
        assert_eq!(db.find_user("rory").unwrap(), user);
        assert_eq!(db.get_user(user.id).unwrap(), user);
        assert_eq!(db.resolve_user(&user.id.to_string()).unwrap(), user);
    }

    #[test]
    fn duplicate_name_is_conflict() {
        let db = Database::open_memory().unwrap();
        db.create_user("lorelai").unwrap();
        let err = db.create_user("lorelai").unwrap_err();
        assert!(matches!(err, CoreError::Database(DatabaseError::Conflict(_))));
        assert_eq!(db.list_users().unwrap().len(), 1);
    }

    #[test]
    fn empty_name_is_rejected() {
        let db = Database::open_memory().unwrap();
        assert!(matches!(
            db.create_user("   ").unwrap_err(),
            CoreError::Validation(_)
        ));
    }

    #[test]
    fn unknown_user_is_not_found() {
        let db = Database::open_memory().unwrap();
        assert!(matches!(
            db.find_user("nobody"),
            Err(DatabaseError::NotFound { entity: "user", .. })
        ));
        assert!(matches!(
            db.delete_user(Uuid::new_v4()),
            Err(DatabaseError::NotFound { .. })
        ));
    }

    #[test]
    fn open_at_creates_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("game.db");
        {
            let db = Database::open_at(&path).unwrap();
            db.create_user("luke").unwrap();
        }
        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.find_user("luke").unwrap().name, "luke");
    }
}
