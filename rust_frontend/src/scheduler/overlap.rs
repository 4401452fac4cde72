//! Decides what each slot of a bath's column shows.

use chrono::NaiveDateTime;
use log::warn;
use serde::{Deserialize, Serialize};

use super::cleaning::{BlockKind, DisplayBlock};
use super::slots::TimeSlot;
use crate::api::{BathId, ReservationId};
use crate::models::time::{minutes_between, venue_datetime};

/// Placement of the active block within one slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockPlacement {
    pub reservation_id: ReservationId,
    /// Index into the bath's block list.
    pub block_index: usize,
    /// The block starts inside this slot; the merged element is drawn here.
    pub is_first_slot: bool,
    /// Share of this slot covered by the block, 0-100.
    pub height_percent: f64,
    /// Height of the merged element in slot units times 100.
    pub span_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SlotState {
    Free,
    Occupied(BlockPlacement),
    Cleaning(BlockPlacement),
}

impl SlotState {
    pub fn is_free(&self) -> bool {
        matches!(self, SlotState::Free)
    }

    pub fn placement(&self) -> Option<&BlockPlacement> {
        match self {
            SlotState::Free => None,
            SlotState::Occupied(p) | SlotState::Cleaning(p) => Some(p),
        }
    }

    /// Whether the slot is where a block's merged element is drawn.
    pub fn starts_block(&self) -> bool {
        self.placement().is_some_and(|p| p.is_first_slot)
    }
}

/// Two blocks of the same bath whose intervals intersect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlapConflict {
    pub bath_id: BathId,
    pub first: ReservationId,
    pub first_kind: BlockKind,
    pub second: ReservationId,
    pub second_kind: BlockKind,
    #[serde(with = "venue_datetime")]
    pub overlap_start: NaiveDateTime,
    #[serde(with = "venue_datetime")]
    pub overlap_end: NaiveDateTime,
}

/// State of `slot` given a bath's blocks. The first block in list order that
/// intersects the slot wins.
pub fn resolve_slot(blocks: &[DisplayBlock], slot: &TimeSlot) -> SlotState {
    let Some((block_index, block)) = blocks
        .iter()
        .enumerate()
        .find(|(_, b)| slot.overlaps(b.start, b.end))
    else {
        return SlotState::Free;
    };

    let covered = slot.covered_minutes(block.start, block.end);
    let slot_minutes = minutes_between(slot.start, slot.end);
    let placement = BlockPlacement {
        reservation_id: block.reservation_id,
        block_index,
        is_first_slot: slot.contains(block.start),
        height_percent: covered / slot_minutes * 100.0,
        span_percent: block.span_percent(),
    };

    match block.kind {
        BlockKind::Reservation => SlotState::Occupied(placement),
        BlockKind::Cleaning => SlotState::Cleaning(placement),
    }
}

/// Every pair of intersecting blocks on one bath, in list order.
pub fn find_conflicts(bath_id: BathId, blocks: &[DisplayBlock]) -> Vec<OverlapConflict> {
    let mut conflicts = Vec::new();
    for (i, a) in blocks.iter().enumerate() {
        for b in &blocks[i + 1..] {
            if !a.overlaps(b) {
                continue;
            }
            let conflict = OverlapConflict {
                bath_id,
                first: a.reservation_id,
                first_kind: a.kind,
                second: b.reservation_id,
                second_kind: b.kind,
                overlap_start: a.start.max(b.start),
                overlap_end: a.end.min(b.end),
            };
            warn!(
                "Overlap on bath {}: {:?} {} and {:?} {} share {} - {}",
                bath_id,
                conflict.first_kind,
                conflict.first,
                conflict.second_kind,
                conflict.second,
                conflict.overlap_start,
                conflict.overlap_end
            );
            conflicts.push(conflict);
        }
    }
    conflicts
}
