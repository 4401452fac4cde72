//! Display blocks and the cleaning period that follows every reservation.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::slots::{slot_duration, SLOT_MINUTES};
use crate::api::ReservationId;
use crate::models::time::{minutes_between, venue_datetime};
use crate::models::{Reservation, Rubles};

/// Status label carried by synthesized cleaning blocks.
pub const CLEANING_STATUS: &str = "cleaning";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Reservation,
    Cleaning,
}

/// Something drawn on a bath's column: a reservation or the cleaning after it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayBlock {
    pub kind: BlockKind,
    /// The reservation itself, or the one this cleaning follows.
    pub reservation_id: ReservationId,
    #[serde(with = "venue_datetime")]
    pub start: NaiveDateTime,
    #[serde(with = "venue_datetime")]
    pub end: NaiveDateTime,
    pub client_name: Option<String>,
    pub notes: Option<String>,
    /// `None` for cleaning.
    pub total_cost: Option<Rubles>,
    pub status: String,
}

impl DisplayBlock {
    pub fn from_reservation(reservation: &Reservation) -> Self {
        Self {
            kind: BlockKind::Reservation,
            reservation_id: reservation.reservation_id,
            start: reservation.start,
            end: reservation.end,
            client_name: Some(reservation.client_name.clone()),
            notes: reservation.notes.clone(),
            total_cost: Some(reservation.total_cost),
            status: reservation.status.clone(),
        }
    }

    pub fn is_cleaning(&self) -> bool {
        self.kind == BlockKind::Cleaning
    }

    pub fn duration_minutes(&self) -> f64 {
        minutes_between(self.start, self.end)
    }

    /// Height of the merged element drawn from the block's first slot, in
    /// percent of one slot.
    pub fn span_percent(&self) -> f64 {
        self.duration_minutes() / SLOT_MINUTES as f64 * 100.0
    }

    pub fn overlaps(&self, other: &DisplayBlock) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// The 30-minute cleaning block after `reservation`, or `None` when it would
/// start on a different day than `date`.
pub fn synthesize_cleaning(reservation: &Reservation, date: NaiveDate) -> Option<DisplayBlock> {
    let start = reservation.end;
    if start.date() != date {
        return None;
    }

    Some(DisplayBlock {
        kind: BlockKind::Cleaning,
        reservation_id: reservation.reservation_id,
        start,
        end: start + slot_duration(),
        client_name: None,
        notes: None,
        total_cost: None,
        status: CLEANING_STATUS.to_string(),
    })
}

/// Blocks for one bath: each reservation followed by its cleaning block.
pub fn blocks_with_cleaning(reservations: &[&Reservation], date: NaiveDate) -> Vec<DisplayBlock> {
    let mut blocks = Vec::with_capacity(reservations.len() * 2);
    for reservation in reservations {
        blocks.push(DisplayBlock::from_reservation(reservation));
        if let Some(cleaning) = synthesize_cleaning(reservation, date) {
            blocks.push(cleaning);
        }
    }
    blocks
}
