//! Reference-zone calendar arithmetic.
//!
//! Every player shares one "day", defined by a single named time zone. All
//! day comparisons go through [`ReferenceZone::calendar_date`], which does a
//! proper zoned conversion of a UTC instant instead of formatting and
//! re-parsing strings.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Days, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::ConfigError;

/// Zone used when the configuration does not name one.
pub const DEFAULT_REFERENCE_ZONE: &str = "America/New_York";

/// The single time zone that defines the game's day boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceZone {
    tz: Tz,
}

impl ReferenceZone {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Parse an IANA zone name such as `Europe/London`.
    pub fn parse(name: &str) -> Result<Self, ConfigError> {
        Tz::from_str(name.trim())
            .map(Self::new)
            .map_err(|e| ConfigError::InvalidValue {
                key: "game.reference_zone".into(),
                message: format!("'{name}' is not a known time zone: {e}"),
            })
    }

    pub fn name(&self) -> &'static str {
        self.tz.name()
    }

    /// Calendar date of `ts` as seen in the reference zone.
    pub fn calendar_date(&self, ts: DateTime<Utc>) -> NaiveDate {
        ts.with_timezone(&self.tz).date_naive()
    }

    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        self.calendar_date(now)
    }

    /// The day before `today(now)`. `None` only at the minimum representable date.
    pub fn yesterday(&self, now: DateTime<Utc>) -> Option<NaiveDate> {
        self.today(now).checked_sub_days(Days::new(1))
    }

    /// First instant of `day` in the reference zone.
    ///
    /// Zones that skip local midnight on a DST change start the day at the
    /// first valid local time after it.
    pub fn start_of_day(&self, day: NaiveDate) -> DateTime<Utc> {
        let midnight = day.and_time(NaiveTime::MIN);
        self.tz
            .from_local_datetime(&midnight)
            .earliest()
            .or_else(|| {
                self.tz
                    .from_local_datetime(&(midnight + Duration::hours(1)))
                    .earliest()
            })
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
    }
}

impl Default for ReferenceZone {
    fn default() -> Self {
        Self::new(chrono_tz::America::New_York)
    }
}

impl fmt::Display for ReferenceZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant, for tests and replaying a given moment.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
