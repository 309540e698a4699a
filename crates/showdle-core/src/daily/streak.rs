//! Consecutive-day streak arithmetic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::state::UserScoreState;
use crate::calendar::ReferenceZone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakUpdate {
    pub streak: u32,
    pub longest_streak: u32,
}

/// Streak values after completing the last mode of the day at `now`.
///
/// `state` must still hold the previous `last_played`. Days are compared as
/// reference-zone calendar dates, so playing at 00:05 after a 23:55 finish
/// still continues the streak.
pub fn evaluate_streak(
    state: &UserScoreState,
    zone: &ReferenceZone,
    now: DateTime<Utc>,
) -> StreakUpdate {
    let previous = state.last_played.map(|ts| zone.calendar_date(ts));
    let continues = previous.is_some() && previous == zone.yesterday(now);

    let streak = if continues {
        state.streak.saturating_add(1)
    } else {
        1
    };

    StreakUpdate {
        streak,
        longest_streak: state.longest_streak.max(streak),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;
    use uuid::Uuid;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn state(streak: u32, longest: u32, last: Option<DateTime<Utc>>) -> UserScoreState {
        let mut s = UserScoreState::new(Uuid::new_v4());
        s.streak = streak;
        s.longest_streak = longest;
        s.last_played = last;
        s
    }

    #[test]
    fn yesterday_continues_streak() {
        let zone = ReferenceZone::default();
        let now = utc("2024-06-05T18:00:00Z");
        let update = evaluate_streak(&state(4, 4, Some(now - Duration::days(1))), &zone, now);
        assert_eq!(
            update,
            StreakUpdate {
                streak: 5,
                longest_streak: 5
            }
        );
    }

    #[test]
    fn continuation_below_longest_keeps_longest() {
        let zone = ReferenceZone::default();
        let now = utc("2024-06-05T18:00:00Z");
        let update = evaluate_streak(&state(4, 9, Some(now - Duration::days(1))), &zone, now);
        assert_eq!(update.streak, 5);
        assert_eq!(update.longest_streak, 9);
    }

    #[test]
    fn gap_resets_streak_to_one() {
        let zone = ReferenceZone::default();
        let now = utc("2024-06-05T18:00:00Z");
        let update = evaluate_streak(&state(7, 7, Some(now - Duration::days(3))), &zone, now);
        assert_eq!(update.streak, 1);
        assert_eq!(update.longest_streak, 7);
    }

    #[test]
    fn first_completion_starts_at_one() {
        let zone = ReferenceZone::default();
        let update = evaluate_streak(&state(0, 0, None), &zone, utc("2024-06-05T18:00:00Z"));
        assert_eq!(update.streak, 1);
        assert_eq!(update.longest_streak, 1);
    }

    #[test]
    fn adjacency_is_by_calendar_date_not_elapsed_hours() {
        let zone = ReferenceZone::default();
        // 23:55 and 00:05 New York time on consecutive days: ten minutes apart.
        let last = utc("2024-06-05T03:55:00Z");
        let now = utc("2024-06-05T04:05:00Z");
        assert_eq!(evaluate_streak(&state(3, 3, Some(last)), &zone, now).streak, 4);

        // 00:05 and 23:55 on consecutive days: almost 48 hours apart.
        let last = utc("2024-06-04T04:05:00Z");
        let now = utc("2024-06-06T03:55:00Z");
        assert_eq!(evaluate_streak(&state(3, 3, Some(last)), &zone, now).streak, 4);
    }

    #[test]
    fn future_last_played_resets_streak() {
        let zone = ReferenceZone::default();
        let now = utc("2024-06-05T18:00:00Z");
        let update = evaluate_streak(&state(6, 6, Some(now + Duration::days(2))), &zone, now);
        assert_eq!(update.streak, 1);
        assert_eq!(update.longest_streak, 6);
    }

    proptest! {
        #[test]
        fn longest_never_decreases_and_bounds_streak(
            streak in 0u32..10_000,
            extra in 0u32..10_000,
            days_ago in 0i64..400,
            seconds in 0i64..86_400,
        ) {
            let zone = ReferenceZone::default();
            let now = utc("2024-06-05T12:00:00Z") + Duration::seconds(seconds);
            let longest = streak + extra;
            let before = state(streak, longest, Some(now - Duration::days(days_ago)));
            let update = evaluate_streak(&before, &zone, now);

            prop_assert!(update.longest_streak >= longest);
            prop_assert!(update.streak <= update.longest_streak);
            prop_assert!(update.streak == 1 || update.streak == streak + 1);
        }
    }
}
