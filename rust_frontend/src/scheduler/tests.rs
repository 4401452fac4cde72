//! Whole-grid behavior for a single day.

use super::*;
use crate::api::{BathId, ReservationId};
use crate::test_support::{at, bath, day, reservation};

fn cell<'a>(schedule: &'a BathSchedule, label: &str) -> &'a SlotCell {
    schedule
        .slots
        .iter()
        .find(|c| c.slot.label() == label)
        .unwrap()
}

#[test]
fn test_ninety_minute_reservation() {
    let baths = vec![bath(1)];
    let reservations = vec![reservation(1, 1, "2024-06-01 10:00", "2024-06-01 11:30")];
    let grid = build_grid(&baths, &reservations, day(2024, 6, 1));
    let column = grid.bath(BathId::new(1)).unwrap();

    for (label, first) in [("10:00", true), ("10:30", false), ("11:00", false)] {
        match cell(column, label).state {
            SlotState::Occupied(p) => {
                assert_eq!(p.reservation_id, ReservationId::new(1));
                assert_eq!(p.is_first_slot, first, "slot {label}");
                assert_eq!(p.height_percent, 100.0);
                assert_eq!(p.span_percent, 300.0);
            }
            other => panic!("slot {label} should be occupied, got {other:?}"),
        }
    }

    match cell(column, "11:30").state {
        SlotState::Cleaning(p) => {
            assert!(p.is_first_slot);
            assert_eq!(p.reservation_id, ReservationId::new(1));
            assert_eq!(p.span_percent, 100.0);
        }
        other => panic!("11:30 should be cleaning, got {other:?}"),
    }

    assert!(cell(column, "12:00").state.is_free());
    assert!(cell(column, "09:30").state.is_free());
    assert!(!grid.has_conflicts());
}

#[test]
fn test_reservation_crossing_midnight_has_no_cleaning() {
    let baths = vec![bath(1)];
    let reservations = vec![reservation(1, 1, "2024-06-01 23:45", "2024-06-02 00:15")];
    let grid = build_grid(&baths, &reservations, day(2024, 6, 1));
    let column = &grid.baths[0];

    assert_eq!(column.blocks.len(), 1);
    assert!(!column.blocks[0].is_cleaning());
    match cell(column, "23:30").state {
        SlotState::Occupied(p) => {
            assert!(p.is_first_slot);
            assert_eq!(p.height_percent, 50.0);
        }
        other => panic!("23:30 should be occupied, got {other:?}"),
    }
}

#[test]
fn test_grid_is_idempotent() {
    let baths = vec![bath(1), bath(2)];
    let reservations = vec![
        reservation(1, 1, "2024-06-01 10:00", "2024-06-01 12:00"),
        reservation(2, 2, "2024-06-01 18:00", "2024-06-01 19:30"),
        reservation(3, 1, "2024-06-02 10:00", "2024-06-02 12:00"),
    ];
    let first = build_grid(&baths, &reservations, day(2024, 6, 1));
    let second = build_grid(&baths, &reservations, day(2024, 6, 1));
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_every_bath_appears() {
    let baths = vec![bath(1), bath(2), bath(3)];
    let reservations = vec![reservation(1, 2, "2024-06-01 10:00", "2024-06-01 11:00")];
    let grid = build_grid(&baths, &reservations, day(2024, 6, 1));

    assert_eq!(grid.baths.len(), 3);
    let flags: Vec<_> = grid.baths.iter().map(|b| b.has_bookings).collect();
    assert_eq!(flags, vec![false, true, false]);
    assert_eq!(grid.baths[0].free_slots().count(), SLOTS_PER_DAY);
    assert_eq!(grid.reservation_count(), 1);
}

#[test]
fn test_overlapping_reservations_surface_conflict() {
    let baths = vec![bath(1)];
    let reservations = vec![
        reservation(1, 1, "2024-06-01 10:00", "2024-06-01 11:00"),
        reservation(2, 1, "2024-06-01 10:30", "2024-06-01 12:00"),
    ];
    let grid = build_grid(&baths, &reservations, day(2024, 6, 1));

    assert!(grid.has_conflicts());
    assert_eq!(grid.conflicts[0].bath_id, BathId::new(1));
    // First-match rendering stays stable.
    match cell(&grid.baths[0], "10:30").state {
        SlotState::Occupied(p) => assert_eq!(p.reservation_id, ReservationId::new(1)),
        other => panic!("10:30 should be occupied, got {other:?}"),
    }
    // 11:00 is covered first by reservation 1's cleaning.
    assert!(matches!(cell(&grid.baths[0], "11:00").state, SlotState::Cleaning(_)));
}

#[test]
fn test_time_slots_cover_day() {
    let grid = build_grid(&[], &[], day(2024, 6, 1));
    assert_eq!(grid.time_slots.len(), SLOTS_PER_DAY);
    assert_eq!(grid.time_slots[0].start, at("2024-06-01 09:00"));
    assert_eq!(grid.time_slots[29].end, at("2024-06-02 00:00"));
    for pair in grid.time_slots.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }
}

#[test]
fn test_grid_serializes_slot_state_inline() {
    let baths = vec![bath(1)];
    let reservations = vec![reservation(1, 1, "2024-06-01 09:00", "2024-06-01 09:30")];
    let grid = build_grid(&baths, &reservations, day(2024, 6, 1));
    let json = serde_json::to_value(&grid).unwrap();

    assert_eq!(json["date"], "2024-06-01");
    let first = &json["baths"][0]["slots"][0];
    assert_eq!(first["state"], "occupied");
    assert_eq!(first["is_first_slot"], true);
    assert_eq!(first["slot"]["start"], "2024-06-01T09:00:00");
    assert_eq!(json["baths"][0]["slots"][1]["state"], "cleaning");
}
