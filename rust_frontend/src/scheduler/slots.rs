//! Half-hour slot generation for the day grid.

use std::iter::FusedIterator;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::time::{format_hhmm, minutes_between, venue_datetime};

/// First slot of the displayed day starts at this hour.
pub const DAY_START_HOUR: u32 = 9;

/// Slot length in minutes.
pub const SLOT_MINUTES: i64 = 30;

/// 09:00 up to and including 23:30.
pub const SLOTS_PER_DAY: usize = 30;

pub fn slot_duration() -> Duration {
    Duration::minutes(SLOT_MINUTES)
}

/// Half-open `[start, end)` interval of the displayed day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    #[serde(with = "venue_datetime")]
    pub start: NaiveDateTime,
    #[serde(with = "venue_datetime")]
    pub end: NaiveDateTime,
}

impl TimeSlot {
    pub fn starting_at(start: NaiveDateTime) -> Self {
        Self {
            start,
            end: start + slot_duration(),
        }
    }

    /// Half-open interval intersection with `[start, end)`.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        start < self.end && end > self.start
    }

    /// Whether `instant` lies in `[self.start, self.end)`.
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Minutes of the slot covered by `[start, end)`.
    pub fn covered_minutes(&self, start: NaiveDateTime, end: NaiveDateTime) -> f64 {
        let from = start.max(self.start);
        let to = end.min(self.end);
        minutes_between(from, to).max(0.0)
    }

    /// `"09:00"`
    pub fn label(&self) -> String {
        format_hhmm(&self.start)
    }

    /// `"09:00 – 09:30"`
    pub fn range_label(&self) -> String {
        format!("{} – {}", format_hhmm(&self.start), format_hhmm(&self.end))
    }
}

/// Slots of one day, in ascending order. Consumed once; call
/// [`generate_slots`] again for a fresh pass.
#[derive(Debug)]
pub struct SlotIter {
    day_start: NaiveDateTime,
    next: usize,
}

impl Iterator for SlotIter {
    type Item = TimeSlot;

    fn next(&mut self) -> Option<TimeSlot> {
        if self.next >= SLOTS_PER_DAY {
            return None;
        }
        let offset = Duration::minutes(SLOT_MINUTES * self.next as i64);
        self.next += 1;
        Some(TimeSlot::starting_at(self.day_start + offset))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = SLOTS_PER_DAY - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SlotIter {}

impl FusedIterator for SlotIter {}

/// The 30 half-hour slots of `date`, 09:00 through 23:30.
pub fn generate_slots(date: NaiveDate) -> SlotIter {
    SlotIter {
        day_start: date.and_time(day_start_time()),
        next: 0,
    }
}

fn day_start_time() -> NaiveTime {
    NaiveTime::MIN + Duration::hours(i64::from(DAY_START_HOUR))
}

/// `HH:MM` options offered by the reservation editor, one per slot start.
pub fn time_options() -> Vec<NaiveTime> {
    (0..SLOTS_PER_DAY)
        .map(|i| day_start_time() + Duration::minutes(SLOT_MINUTES * i as i64))
        .collect()
}
