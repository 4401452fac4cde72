//! Day schedule grid.
//!
//! Turns the baths and reservations of one day into a [`GridModel`]: thirty
//! half-hour slots per bath, each either free, occupied by a reservation, or
//! taken by the cleaning period that follows one.
//!
//! The pipeline is split in four stages, each usable on its own:
//! [`generate_slots`], [`bind_reservations`], [`blocks_with_cleaning`] and
//! [`resolve_slot`]. [`build_grid`] runs them all.

pub mod binder;
pub mod cleaning;
pub mod grid;
pub mod overlap;
pub mod slots;

pub use binder::{bind_reservations, BoundBath};
pub use cleaning::{blocks_with_cleaning, synthesize_cleaning, BlockKind, DisplayBlock};
pub use grid::{build_grid, BathSchedule, GridModel, SlotCell};
pub use overlap::{find_conflicts, resolve_slot, BlockPlacement, OverlapConflict, SlotState};
pub use slots::{generate_slots, time_options, SlotIter, TimeSlot, SLOTS_PER_DAY, SLOT_MINUTES};

#[cfg(test)]
mod tests;
