use super::*;
use crate::test_support::{bath, line, reservation};

fn sauna() -> Bath {
    let mut b = bath(1);
    b.cost = 1000;
    b.base_guests = 4;
    b.extra_guest_price = 300;
    b
}

#[test]
fn test_receipt_splits_server_total() {
    let mut r = reservation(1, 1, "2024-06-01 10:00", "2024-06-01 14:00");
    r.total_cost = 5000;
    r.guests = 6;
    r.brooms = vec![line(1, "Oak", 200, 2)];

    let receipt = compute_receipt(&r, Some(&sauna()));

    assert_eq!(receipt.extra_guests, 2);
    assert_eq!(receipt.extra_guest_surcharge, 600);
    assert_eq!(receipt.brooms.subtotal, 400);
    assert_eq!(receipt.brooms.lines[0].amount, 400);
    assert!(receipt.massages.is_empty());
    assert_eq!(receipt.add_ons_total, 400);
    assert_eq!(receipt.base_venue_cost, 4600);
    // 4h * 1000 + 600
    assert_eq!(receipt.expected_venue_cost, Some(4600));
    assert!(receipt.is_reconciled());
}

#[test]
fn test_receipt_reconciles_second_level_timestamps() {
    let mut b = sauna();
    b.cost = 6000;
    let mut r = reservation(1, 1, "2024-06-01 10:00", "2024-06-01 11:00");
    r.end = r.end + chrono::Duration::seconds(59);
    r.guests = 2;
    // trunc(6000 * 3659 / 3600)
    r.total_cost = 6098;

    let receipt = compute_receipt(&r, Some(&b));

    assert_eq!(receipt.expected_venue_cost, Some(6098));
    assert_eq!(receipt.venue_discrepancy, Some(0));
    assert!(receipt.is_reconciled());
}

#[test]
fn test_receipt_flags_absorbed_difference() {
    let mut r = reservation(1, 1, "2024-06-01 10:00", "2024-06-01 12:00");
    r.total_cost = 2500;
    r.guests = 2;

    let receipt = compute_receipt(&r, Some(&sauna()));

    assert_eq!(receipt.expected_venue_cost, Some(2000));
    assert_eq!(receipt.venue_discrepancy, Some(500));
    assert!(!receipt.is_reconciled());
}

#[test]
fn test_receipt_without_bath() {
    let mut r = reservation(1, 9, "2024-06-01 10:00", "2024-06-01 12:00");
    r.total_cost = 3000;
    r.guests = 10;
    r.massages = vec![line(4, "Classic", 1500, 1)];

    let receipt = compute_receipt(&r, None);

    assert_eq!(receipt.extra_guests, 0);
    assert_eq!(receipt.extra_guest_surcharge, 0);
    assert_eq!(receipt.base_venue_cost, 1500);
    assert_eq!(receipt.expected_venue_cost, None);
    assert!(receipt.is_reconciled());
}

#[test]
fn test_guests_below_base_have_no_surcharge() {
    let mut r = reservation(1, 1, "2024-06-01 10:00", "2024-06-01 11:00");
    r.guests = 1;
    r.total_cost = 1000;
    let receipt = compute_receipt(&r, Some(&sauna()));
    assert_eq!(receipt.extra_guests, 0);
    assert_eq!(receipt.extra_guest_surcharge, 0);
}

#[test]
fn test_all_categories_summed() {
    let mut r = reservation(1, 1, "2024-06-01 10:00", "2024-06-01 11:30");
    r.total_cost = 4000;
    r.brooms = vec![line(1, "Oak", 200, 1), line(2, "Birch", 150, 2)];
    r.massages = vec![line(4, "Classic", 1000, 1)];
    r.menu_items = vec![line(9, "Tea", 150, 3)];

    let receipt = compute_receipt(&r, Some(&sauna()));

    assert_eq!(receipt.brooms.subtotal, 500);
    assert_eq!(receipt.massages.subtotal, 1000);
    assert_eq!(receipt.menu_items.subtotal, 450);
    assert_eq!(receipt.add_ons_total, 1950);
    assert_eq!(receipt.base_venue_cost, 2050);
    // trunc(1000 * 1.5)
    assert_eq!(receipt.expected_venue_cost, Some(1500));
    assert_eq!(receipt.venue_discrepancy, Some(550));
}

#[test]
fn test_expected_cost_truncates_fractional_hours() {
    let mut b = sauna();
    b.cost = 1001;
    // 50 minutes at 1001/h = 834.17
    assert_eq!(expected_venue_cost(&b, 50.0, 2), 834);
}
