//! Fixed-timezone calendar-day bucketing.
//!
//! The audience and the catalog share one timezone, so day keys are computed
//! in a configured fixed offset rather than the host locale. Bucketing in
//! UTC would move anything released after 21:00 in Brasília onto the next
//! day.

use crate::error::{PoolError, Result};
use crate::types::{ImportableItem, Track};
use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use std::fmt;

/// UTC offset of Brasília time (no DST since 2019)
pub const BRASILIA_OFFSET_SECONDS: i32 = -3 * 3600;

/// Anything that can be placed on a calendar day
pub trait Dated {
    /// Timestamp used for grouping; `None` sends the item to the no-date group
    fn group_date(&self) -> Option<DateTime<Utc>>;
}

impl<T: Dated + ?Sized> Dated for &T {
    fn group_date(&self) -> Option<DateTime<Utc>> {
        (**self).group_date()
    }
}

impl Dated for ImportableItem {
    fn group_date(&self) -> Option<DateTime<Utc>> {
        self.draft.release_date.or(Some(self.file.last_modified))
    }
}

impl Dated for Track {
    fn group_date(&self) -> Option<DateTime<Utc>> {
        self.release_date.or(Some(self.created_at))
    }
}

/// Fixed timezone used for all day bucketing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeZoneConfig {
    offset: FixedOffset,
}

impl TimeZoneConfig {
    /// Brasília time (UTC-03:00)
    pub fn brasilia() -> Self {
        Self::from_offset_seconds(BRASILIA_OFFSET_SECONDS).unwrap_or_else(|_| Self::utc())
    }

    /// UTC
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Build from an offset east of UTC, in seconds.
    ///
    /// # Errors
    /// Returns `InvalidInput` when the offset is not within ±24h.
    pub fn from_offset_seconds(seconds: i32) -> Result<Self> {
        FixedOffset::east_opt(seconds)
            .map(|offset| Self { offset })
            .ok_or_else(|| PoolError::invalid_input(format!("UTC offset out of range: {seconds}s")))
    }

    /// Build from an offset east of UTC, in minutes
    pub fn from_offset_minutes(minutes: i32) -> Result<Self> {
        Self::from_offset_seconds(minutes.saturating_mul(60))
    }

    /// The underlying offset
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Calendar day of a timestamp in this zone
    pub fn local_date(&self, timestamp: DateTime<Utc>) -> NaiveDate {
        timestamp.with_timezone(&self.offset).date_naive()
    }

    /// Day key of a timestamp relative to `now`
    pub fn day_key(&self, timestamp: Option<DateTime<Utc>>, now: DateTime<Utc>) -> DayKey {
        let Some(timestamp) = timestamp else {
            return DayKey::NoDate;
        };

        let date = self.local_date(timestamp);
        if date > self.local_date(now) {
            DayKey::Future
        } else {
            DayKey::Date(date)
        }
    }
}

impl Default for TimeZoneConfig {
    fn default() -> Self {
        Self::brasilia()
    }
}

/// Identity of one calendar-day group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DayKey {
    /// Any day after today
    Future,
    /// A specific day, today or earlier
    Date(NaiveDate),
    /// Item has no usable date
    NoDate,
}

/// Where a day sits relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DayRelation {
    Future,
    Today,
    Yesterday,
    Earlier,
    NoDate,
}

impl DayKey {
    /// Classify this key relative to `today`
    pub fn relation(&self, today: NaiveDate) -> DayRelation {
        match self {
            DayKey::Future => DayRelation::Future,
            DayKey::Date(date) if *date > today => DayRelation::Future,
            DayKey::Date(date) if *date == today => DayRelation::Today,
            DayKey::Date(date) if Some(*date) == today.pred_opt() => DayRelation::Yesterday,
            DayKey::Date(_) => DayRelation::Earlier,
            DayKey::NoDate => DayRelation::NoDate,
        }
    }

    /// Display order: future, today, yesterday, then most recent first, no-date last
    pub fn display_cmp(&self, other: &Self, today: NaiveDate) -> Ordering {
        let rank = |key: &Self| (key.relation(today), Reverse(key.date()));
        rank(self).cmp(&rank(other))
    }

    /// The day this key denotes, if any
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            DayKey::Date(date) => Some(*date),
            DayKey::Future | DayKey::NoDate => None,
        }
    }

    /// Human-readable group label
    pub fn label(&self, today: NaiveDate) -> String {
        match self.relation(today) {
            DayRelation::Future => "Coming Soon".to_string(),
            DayRelation::Today => "Today".to_string(),
            DayRelation::NoDate => "No date".to_string(),
            DayRelation::Yesterday | DayRelation::Earlier => match self.date() {
                Some(date) => date.format("%A, %d/%m/%Y").to_string(),
                None => "No date".to_string(),
            },
        }
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayKey::Future => f.write_str("future"),
            DayKey::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            DayKey::NoDate => f.write_str("no-date"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_brasilia_offset() {
        let zone = TimeZoneConfig::brasilia();
        assert_eq!(zone.offset().local_minus_utc(), -3 * 3600);
    }

    #[test]
    fn test_late_evening_stays_on_local_day() {
        let zone = TimeZoneConfig::brasilia();
        // 23:30 in Brasília on March 9th is 02:30 UTC on March 10th
        let ts = Utc.with_ymd_and_hms(2024, 3, 10, 2, 30, 0).unwrap();
        assert_eq!(zone.local_date(ts), ymd(2024, 3, 9));

        let utc = TimeZoneConfig::utc();
        assert_eq!(utc.local_date(ts), ymd(2024, 3, 10));
    }

    #[test]
    fn test_day_key_future_and_no_date() {
        let zone = TimeZoneConfig::brasilia();
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 15, 0, 0).unwrap();
        let tomorrow = Utc.with_ymd_and_hms(2024, 3, 11, 15, 0, 0).unwrap();
        let next_month = Utc.with_ymd_and_hms(2024, 4, 11, 15, 0, 0).unwrap();

        assert_eq!(zone.day_key(Some(tomorrow), now), DayKey::Future);
        assert_eq!(zone.day_key(Some(next_month), now), DayKey::Future);
        assert_eq!(zone.day_key(None, now), DayKey::NoDate);
        assert_eq!(zone.day_key(Some(now), now), DayKey::Date(ymd(2024, 3, 10)));
    }

    #[test]
    fn test_display_order() {
        let today = ymd(2024, 3, 10);
        let mut keys = vec![
            DayKey::NoDate,
            DayKey::Date(ymd(2024, 1, 1)),
            DayKey::Date(ymd(2024, 3, 9)),
            DayKey::Date(ymd(2024, 2, 1)),
            DayKey::Future,
            DayKey::Date(today),
        ];
        keys.sort_by(|a, b| a.display_cmp(b, today));

        assert_eq!(
            keys,
            vec![
                DayKey::Future,
                DayKey::Date(today),
                DayKey::Date(ymd(2024, 3, 9)),
                DayKey::Date(ymd(2024, 2, 1)),
                DayKey::Date(ymd(2024, 1, 1)),
                DayKey::NoDate,
            ]
        );
    }

    #[test]
    fn test_labels() {
        let today = ymd(2024, 3, 10);
        assert_eq!(DayKey::Future.label(today), "Coming Soon");
        assert_eq!(DayKey::Date(today).label(today), "Today");
        assert_eq!(DayKey::Date(ymd(2024, 3, 8)).label(today), "Friday, 08/03/2024");
        assert_eq!(DayKey::NoDate.label(today), "No date");
    }

    #[test]
    fn test_key_strings() {
        assert_eq!(DayKey::Future.to_string(), "future");
        assert_eq!(DayKey::NoDate.to_string(), "no-date");
        assert_eq!(DayKey::Date(ymd(2024, 3, 1)).to_string(), "2024-03-01");
    }

    #[test]
    fn test_offset_out_of_range() {
        assert!(TimeZoneConfig::from_offset_minutes(25 * 60).is_err());
        assert!(TimeZoneConfig::from_offset_minutes(-180).is_ok());
    }
}
