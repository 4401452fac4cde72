//! The assembled day grid.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::binder::bind_reservations;
use super::cleaning::{blocks_with_cleaning, DisplayBlock};
use super::overlap::{find_conflicts, resolve_slot, OverlapConflict, SlotState};
use super::slots::{generate_slots, TimeSlot};
use crate::api::{BathId, ReservationId};
use crate::models::time::venue_date;
use crate::models::{Bath, Reservation};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotCell {
    pub slot: TimeSlot,
    #[serde(flatten)]
    pub state: SlotState,
}

/// One column of the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BathSchedule {
    pub bath_id: BathId,
    pub bath_name: String,
    pub has_bookings: bool,
    pub blocks: Vec<DisplayBlock>,
    pub slots: Vec<SlotCell>,
}

impl BathSchedule {
    pub fn block(&self, index: usize) -> Option<&DisplayBlock> {
        self.blocks.get(index)
    }

    pub fn free_slots(&self) -> impl Iterator<Item = &TimeSlot> {
        self.slots
            .iter()
            .filter(|cell| cell.state.is_free())
            .map(|cell| &cell.slot)
    }
}

/// Everything a rendering layer needs to draw one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridModel {
    #[serde(with = "venue_date")]
    pub date: NaiveDate,
    pub time_slots: Vec<TimeSlot>,
    pub baths: Vec<BathSchedule>,
    pub conflicts: Vec<OverlapConflict>,
}

impl GridModel {
    pub fn bath(&self, bath_id: BathId) -> Option<&BathSchedule> {
        self.baths.iter().find(|b| b.bath_id == bath_id)
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    /// Number of real reservations drawn on the grid.
    pub fn reservation_count(&self) -> usize {
        self.baths
            .iter()
            .flat_map(|b| &b.blocks)
            .filter(|b| !b.is_cleaning())
            .count()
    }

    pub fn contains_reservation(&self, id: ReservationId) -> bool {
        self.baths
            .iter()
            .flat_map(|b| &b.blocks)
            .any(|b| !b.is_cleaning() && b.reservation_id == id)
    }
}

/// Build the grid for `date`. Pure: the same input always yields the same
/// model.
pub fn build_grid(baths: &[Bath], reservations: &[Reservation], date: NaiveDate) -> GridModel {
    let time_slots: Vec<TimeSlot> = generate_slots(date).collect();
    let mut conflicts = Vec::new();

    let schedules = bind_reservations(baths, reservations, date)
        .into_iter()
        .map(|bound| {
            let blocks = blocks_with_cleaning(&bound.reservations, date);
            conflicts.extend(find_conflicts(bound.bath.bath_id, &blocks));

            let slots = time_slots
                .iter()
                .map(|slot| SlotCell {
                    slot: *slot,
                    state: resolve_slot(&blocks, slot),
                })
                .collect();

            BathSchedule {
                bath_id: bound.bath.bath_id,
                bath_name: bound.bath.display_name().to_string(),
                has_bookings: bound.has_reservations(),
                blocks,
                slots,
            }
        })
        .collect();

    GridModel {
        date,
        time_slots,
        baths: schedules,
        conflicts,
    }
}
