pub mod character;
pub mod config;
pub mod play;
pub mod score;
pub mod user;

use std::error::Error;

use chrono::{DateTime, Utc};
use serde::Serialize;
use showdle_core::{Clock, Config, DailyService, Database, FixedClock, SystemClock};

/// Options shared by every command.
pub struct Context {
    pub json: bool,
    pub now: Option<DateTime<Utc>>,
}

impl Context {
    pub fn clock(&self) -> Box<dyn Clock> {
        match self.now {
            Some(at) => Box::new(FixedClock(at)),
            None => Box::new(SystemClock),
        }
    }

    pub fn service(&self, config: &Config) -> Result<DailyService, Box<dyn Error>> {
        let zone = config.zone()?;
        let db = Database::open()?;
        Ok(DailyService::with_clock(db, zone, self.clock()))
    }

    /// Print `value` as JSON with `--json`, otherwise run `human`.
    pub fn emit<T: Serialize>(
        &self,
        value: &T,
        human: impl FnOnce(&T),
    ) -> Result<(), Box<dyn Error>> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            human(value);
        }
        Ok(())
    }
}

pub fn format_slots(slots: [u32; showdle_core::GameMode::COUNT]) -> String {
    showdle_core::GameMode::ALL
        .iter()
        .zip(slots)
        .map(|(mode, v)| match v {
            0 => format!("{mode}: -"),
            v => format!("{mode}: {v}"),
        })
        .collect::<Vec<_>>()
        .join("  ")
}
