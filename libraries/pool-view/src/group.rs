//! Calendar-day grouping
//!
//! Items are bucketed by the day of their [`Dated::group_date`] in one fixed
//! timezone. Groups are ordered future, today, yesterday, then most recent
//! first, with the no-date group last. Inside a group items keep the order
//! they had in the source collection.

use chrono::{DateTime, NaiveDate, Utc};
use pool_core::{DayKey, Dated, TimeZoneConfig};
use std::collections::HashMap;

/// All items that fall on one calendar day
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup<T> {
    /// Group identity
    pub key: DayKey,

    /// Display label ("Today", "Coming Soon", "Friday, 08/03/2024", ...)
    pub label: String,

    /// Local date of the first item placed in the group
    pub date: Option<NaiveDate>,

    /// Items in source order
    pub items: Vec<T>,
}

/// Items grouped by day, in display order
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedView<T> {
    pub groups: Vec<DayGroup<T>>,
}

impl<T> Default for GroupedView<T> {
    fn default() -> Self {
        Self { groups: Vec::new() }
    }
}

impl<T> GroupedView<T> {
    /// Total number of items across all groups
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|g| g.items.is_empty())
    }

    /// Group keys in display order
    pub fn keys(&self) -> Vec<DayKey> {
        self.groups.iter().map(|g| g.key).collect()
    }

    /// Items flattened in display order
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.groups.iter().flat_map(|g| g.items.iter())
    }

    /// Find a group by key
    pub fn group(&self, key: DayKey) -> Option<&DayGroup<T>> {
        self.groups.iter().find(|g| g.key == key)
    }
}

impl<T: Clone> GroupedView<T> {
    /// Flat range `[start, end)` of the display order, regrouped.
    ///
    /// A group that straddles a boundary is split; both halves keep the
    /// group's key and label.
    pub fn slice(&self, start: usize, end: usize) -> GroupedView<T> {
        let mut groups = Vec::new();
        let mut offset = 0;

        for group in &self.groups {
            let len = group.items.len();
            let from = start.max(offset);
            let to = end.min(offset + len);

            if from < to {
                groups.push(DayGroup {
                    key: group.key,
                    label: group.label.clone(),
                    date: group.date,
                    items: group.items[from - offset..to - offset].to_vec(),
                });
            }

            offset += len;
            if offset >= end {
                break;
            }
        }

        GroupedView { groups }
    }
}

/// Groups items by calendar day relative to a fixed "now"
#[derive(Debug, Clone, Copy)]
pub struct DayGrouper {
    zone: TimeZoneConfig,
    now: DateTime<Utc>,
}

impl DayGrouper {
    pub fn new(zone: TimeZoneConfig, now: DateTime<Utc>) -> Self {
        Self { zone, now }
    }

    /// Grouper anchored at the current time
    pub fn now(zone: TimeZoneConfig) -> Self {
        Self::new(zone, Utc::now())
    }

    /// Today's date in the configured zone
    pub fn today(&self) -> NaiveDate {
        self.zone.local_date(self.now)
    }

    /// Group items by day.
    ///
    /// Every item lands in exactly one group.
    pub fn group_by_day<T, I>(&self, items: I) -> GroupedView<T>
    where
        T: Dated,
        I: IntoIterator<Item = T>,
    {
        let today = self.today();
        let mut slots: HashMap<DayKey, usize> = HashMap::new();
        let mut groups: Vec<DayGroup<T>> = Vec::new();

        for item in items {
            let timestamp = item.group_date();
            let key = self.zone.day_key(timestamp, self.now);

            let slot = *slots.entry(key).or_insert_with(|| {
                groups.push(DayGroup {
                    key,
                    label: key.label(today),
                    date: timestamp.map(|ts| self.zone.local_date(ts)),
                    items: Vec::new(),
                });
                groups.len() - 1
            });
            groups[slot].items.push(item);
        }

        groups.sort_by(|a, b| a.key.display_cmp(&b.key, today));
        GroupedView { groups }
    }
}
