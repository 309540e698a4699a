//! # Showdle Core Library
//!
//! Business logic for Showdle, a daily character-guessing game with three
//! modes (classic, quote, image) that resets for everyone at midnight in a
//! single reference time zone.
//!
//! ## Architecture
//!
//! - **Daily session** ([`daily`]): pure state machine deciding whether a
//!   mode was already played today, when the per-day scores reset, how the
//!   streak moves, and whether an attempt needs a partial or full write
//! - **Storage**: SQLite score records, history and character catalog, plus
//!   TOML configuration
//! - **Service**: transactional read-modify-write of one user's record
//!
//! ## Key Components
//!
//! - [`DailyService`]: entry point used by hosts
//! - [`Database`]: persistence
//! - [`Config`]: application configuration management
//! - [`ReferenceZone`]: the zone that defines "today"

pub mod calendar;
pub mod daily;
pub mod error;
pub mod mode;
pub mod puzzle;
pub mod service;
pub mod storage;

pub use calendar::{Clock, FixedClock, ReferenceZone, SystemClock};
pub use daily::{
    AttemptOutcome, CommitDecision, DailyProgress, DailyScore, DayRollover, FullCommit,
    PartialCommit, UserScoreState,
};
pub use error::{ConfigError, CoreError, DailyError, DatabaseError, ValidationError};
pub use mode::GameMode;
pub use service::{DailyService, DailyStatus};
pub use storage::{Character, Config, Database, HistoryEntry, LeaderboardEntry, ScoreStore, UserRecord};
