//! Character catalog used for the daily puzzles.

use chrono::NaiveDate;
use rusqlite::params;
use serde::{Deserialize, Serialize};

use super::database::Database;
use crate::error::{DatabaseError, Result, ValidationError};
use crate::mode::GameMode;
use crate::puzzle::daily_pick;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: i64,
    pub name: String,
    pub quote: Option<String>,
    pub image: Option<String>,
}

impl Character {
    /// Whether this character can be the answer for `mode`.
    pub fn playable_in(&self, mode: GameMode) -> bool {
        match mode {
            GameMode::Classic => true,
            GameMode::Quote => self.quote.is_some(),
            GameMode::Image => self.image.is_some(),
        }
    }
}

impl Database {
    pub fn add_character(
        &self,
        name: &str,
        quote: Option<&str>,
        image: Option<&str>,
    ) -> Result<Character> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "name".into(),
                message: "character name must not be empty".into(),
            }
            .into());
        }
        let quote = quote.map(str::trim).filter(|q| !q.is_empty());
        let image = image.map(str::trim).filter(|i| !i.is_empty());

        self.conn
            .execute(
                "INSERT INTO characters (name, quote, image) VALUES (?1, ?2, ?3)",
                params![name, quote, image],
            )
            .map_err(DatabaseError::from)?;

        Ok(Character {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
            quote: quote.map(String::from),
            image: image.map(String::from),
        })
    }

    pub fn list_characters(&self) -> Result<Vec<Character>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, quote, image FROM characters ORDER BY id")?;
        let characters = stmt
            .query_map([], |row| {
                Ok(Character {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    quote: row.get(2)?,
                    image: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(characters)
    }

    pub fn remove_character(&self, id: i64) -> Result<(), DatabaseError> {
        let changed = self
            .conn
            .execute("DELETE FROM characters WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(DatabaseError::NotFound {
                entity: "character",
                key: id.to_string(),
            });
        }
        Ok(())
    }

    /// The answer for `mode` on `day`, chosen among characters playable in that mode.
    pub fn daily_character(
        &self,
        day: NaiveDate,
        mode: GameMode,
    ) -> Result<Option<Character>, DatabaseError> {
        let mut pool: Vec<Character> = self
            .list_characters()?
            .into_iter()
            .filter(|c| c.playable_in(mode))
            .collect();
        Ok(daily_pick(day, mode, pool.len()).map(|i| pool.swap_remove(i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_list_characters() {
        let db = Database::open_memory().unwrap();
        let a = db
            .add_character("Emily", Some("I'm a Gilmore."), None)
            .unwrap();
        let b = db.add_character("Richard", None, Some("richard.png")).unwrap();
        assert_eq!(db.list_characters().unwrap(), vec![a, b]);
    }

    #[test]
    fn blank_optional_fields_are_stored_as_none() {
        let db = Database::open_memory().unwrap();
        let c = db.add_character("Sookie", Some("  "), Some("")).unwrap();
        assert_eq!(c.quote, None);
        assert_eq!(c.image, None);
    }

    #[test]
    fn daily_character_respects_mode_requirements() {
        let db = Database::open_memory().unwrap();
        db.add_character("Kirk", None, None).unwrap();
        let day: NaiveDate = "2024-05-05".parse().unwrap();

        assert_eq!(db.daily_character(day, GameMode::Classic).unwrap().unwrap().name, "Kirk");
        assert!(db.daily_character(day, GameMode::Quote).unwrap().is_none());

        db.add_character("Luke", Some("No cell phones."), None).unwrap();
        let quote = db.daily_character(day, GameMode::Quote).unwrap().unwrap();
        assert_eq!(quote.name, "Luke");
    }

    #[test]
    fn remove_unknown_character_is_not_found() {
        let db = Database::open_memory().unwrap();
        assert!(matches!(
            db.remove_character(42),
            Err(DatabaseError::NotFound { entity: "character", .. })
        ));
    }
}
