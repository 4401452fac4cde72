//! Reservation board over the in-memory API.

mod support;

use std::sync::Arc;

use banya_frontend::api::ReservationId;
use banya_frontend::client::{LocalApi, Session};
use banya_frontend::services::{ApplyOutcome, LoadState, ReservationBoard};
use support::{date, payload, seeded_api};

fn board(api: &LocalApi, session: Session) -> ReservationBoard {
    ReservationBoard::new(Arc::new(api.clone()), session, date(2024, 6, 1))
}

#[tokio::test]
async fn test_late_result_for_previous_date_is_dropped() {
    let (api, session, bath) = seeded_api();
    let board = board(&api, session.clone());
    board
        .create(&payload(bath.bath_id, "2024-06-01 10:00", "2024-06-01 11:00"))
        .await
        .unwrap();

    // A load for 1 June is still in flight when the user picks 2 June.
    let slow = board.begin_fetch();
    let slow_result = board.fetch_day(slow.date).await;

    assert_eq!(board.select_date(date(2024, 6, 2)).await, ApplyOutcome::Applied);
    assert_eq!(board.apply(slow, slow_result), ApplyOutcome::Stale);

    let state = board.snapshot();
    let grid = state.grid().unwrap();
    assert_eq!(grid.date, date(2024, 6, 2));
    assert_eq!(grid.reservation_count(), 0);
    assert_eq!(board.date(), date(2024, 6, 2));
}

#[tokio::test]
async fn test_failed_load_reports_date_and_message() {
    let (api, session, _) = seeded_api();
    api.set_available(false);
    let board = board(&api, session);

    assert_eq!(board.refresh().await, ApplyOutcome::Applied);
    match board.snapshot() {
        LoadState::Failed { date: failed, message } => {
            assert_eq!(failed, date(2024, 6, 1));
            assert_eq!(message, "Local API is unavailable");
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_successful_mutation_reloads_grid() {
    let (api, session, bath) = seeded_api();
    let board = board(&api, session);
    board.refresh().await;
    assert_eq!(board.snapshot().grid().unwrap().reservation_count(), 0);

    let created = board
        .create(&payload(bath.bath_id, "2024-06-01 12:00", "2024-06-01 14:00"))
        .await
        .unwrap();
    assert!(board
        .snapshot()
        .grid()
        .unwrap()
        .contains_reservation(created.reservation_id));

    board.delete(created.reservation_id).await.unwrap();
    assert_eq!(board.snapshot().grid().unwrap().reservation_count(), 0);
}

#[tokio::test]
async fn test_rejected_mutation_leaves_state_untouched() {
    let (api, session, bath) = seeded_api();
    let board = board(&api, session);
    board
        .create(&payload(bath.bath_id, "2024-06-01 10:00", "2024-06-01 11:00"))
        .await
        .unwrap();
    let before = board.snapshot();

    let alert = board
        .create(&payload(bath.bath_id, "2024-06-01 11:00", "2024-06-01 12:00"))
        .await
        .unwrap_err();
    assert_eq!(alert.message, "Reservation overlaps an existing one");
    assert_eq!(board.snapshot(), before);

    let alert = board
        .update(
            ReservationId::new(404),
            &payload(bath.bath_id, "2024-06-01 15:00", "2024-06-01 16:00"),
        )
        .await
        .unwrap_err();
    assert!(!alert.to_string().is_empty());
    assert_eq!(board.snapshot(), before);
    assert_eq!(api.reservation_count(), 1);
}

#[tokio::test]
async fn test_anonymous_board_cannot_load() {
    let (api, _, _) = seeded_api();
    let board = board(&api, Session::anonymous());
    board.refresh().await;
    assert!(matches!(board.snapshot(), LoadState::Failed { .. }));
    assert!(board.snapshot().grid().is_none());
}
