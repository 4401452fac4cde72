use super::*;
use crate::test_support::{at, day, line, reservation};

fn filled_form() -> BookingForm {
    BookingForm {
        date: Some(day(2024, 6, 1)),
        bath_id: Some(BathId::new(2)),
        duration_hours: 3,
        guests: 4,
        name: "  Anna ".to_string(),
        phone: "+7 900 123-45-67".to_string(),
        email: String::new(),
        notes: String::new(),
    }
}

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

// ===== Booking form =====

#[test]
fn test_valid_form_builds_request() {
    let request = filled_form().validate().unwrap();
    assert_eq!(request.bath_id, BathId::new(2));
    assert_eq!(request.name, "Anna");
    assert_eq!(request.duration_hours, 3);
    assert_eq!(request.email, None);
    assert_eq!(request.notes, None);
}

#[test]
fn test_empty_form_reports_every_required_field() {
    let errors = BookingForm::default().validate().unwrap_err();
    assert!(errors.get(BookingField::Date).is_some());
    assert!(errors.get(BookingField::BathId).is_some());
    assert!(errors.get(BookingField::Name).is_some());
    assert!(errors.get(BookingField::Phone).is_some());
    assert!(errors.get(BookingField::Guests).is_none());
    assert_eq!(errors.errors.len(), 4);
}

#[test]
fn test_zero_guests_rejected() {
    let mut form = filled_form();
    form.guests = 0;
    let errors = form.validate().unwrap_err();
    assert_eq!(errors.errors.keys().copied().collect::<Vec<_>>(), vec![BookingField::Guests]);
}

#[test]
fn test_email_shape() {
    assert!(looks_like_email("anna@example.com"));
    assert!(looks_like_email("a@b.c"));
    assert!(!looks_like_email("anna@example"));
    assert!(!looks_like_email("@example.com"));
    assert!(!looks_like_email("anna@.com"));
    assert!(!looks_like_email("anna@example."));
    assert!(!looks_like_email("anna @example.com"));

    let mut form = filled_form();
    form.email = "not-an-email".to_string();
    assert!(form.validate().unwrap_err().get(BookingField::Email).is_some());

    form.email = "anna@example.com".to_string();
    assert_eq!(form.validate().unwrap().email.as_deref(), Some("anna@example.com"));
}

#[test]
fn test_notes_limit_counts_characters() {
    let mut form = filled_form();
    form.notes = "я".repeat(MAX_NOTES_LENGTH);
    assert!(form.validate().is_ok());

    form.notes.push('!');
    assert!(form.validate().unwrap_err().get(BookingField::Notes).is_some());
}

// ===== Reservation draft =====

#[test]
fn test_new_draft_defaults() {
    let draft = ReservationDraft::new(day(2024, 6, 1));
    assert_eq!(draft.start_time, hm(9, 0));
    assert_eq!(draft.end_time, hm(10, 0));
    assert_eq!(draft.guests, 1);
    assert_eq!(draft.to_payload(), Err(DraftError::MissingRequired));
}

#[test]
fn test_draft_builds_payload() {
    let mut draft = ReservationDraft::new(day(2024, 6, 1));
    draft.bath_id = Some(BathId::new(1));
    draft.client_name = "Ivan".to_string();
    draft.start_time = hm(18, 0);
    draft.end_time = hm(20, 30);

    let payload = draft.to_payload().unwrap();
    assert_eq!(payload.start_datetime, at("2024-06-01 18:00"));
    assert_eq!(payload.end_datetime, at("2024-06-01 20:30"));
    assert_eq!(payload.client_email, None);
}

#[test]
fn test_draft_rejects_inverted_and_off_grid_times() {
    let mut draft = ReservationDraft::new(day(2024, 6, 1));
    draft.bath_id = Some(BathId::new(1));
    draft.client_name = "Ivan".to_string();

    draft.end_time = hm(9, 0);
    assert_eq!(draft.to_payload(), Err(DraftError::EndNotAfterStart));

    draft.end_time = hm(10, 15);
    assert_eq!(draft.to_payload(), Err(DraftError::OffGrid(hm(10, 15))));
}

#[test]
fn test_quantity_editing() {
    let mut draft = ReservationDraft::new(day(2024, 6, 1));
    draft.set_broom(BroomId::new(1), 1);
    draft.set_broom(BroomId::new(2), 3);
    draft.set_broom(BroomId::new(1), 2);
    assert_eq!(
        draft.brooms,
        vec![
            BroomOrder::with_quantity(BroomId::new(1), 2),
            BroomOrder::with_quantity(BroomId::new(2), 3)
        ]
    );

    draft.set_broom(BroomId::new(1), 0);
    assert_eq!(draft.brooms.len(), 1);
    assert_eq!(draft.brooms[0].broom_id, BroomId::new(2));

    draft.set_massage(MassageId::new(4), -1);
    assert!(draft.massages.is_empty());

    draft.set_menu_item(MenuItemId::new(9), 5);
    assert_eq!(draft.menu_items[0].quantity, 5);
}

#[test]
fn test_draft_from_reservation() {
    let mut r = reservation(5, 3, "2024-06-01 12:00", "2024-06-01 14:00");
    r.brooms = vec![line(1, "Oak", 200, 2)];
    r.client_email = Some("ivan@example.com".to_string());

    let draft = ReservationDraft::from_reservation(&r, StatusId::new(2));
    assert_eq!(draft.bath_id, Some(BathId::new(3)));
    assert_eq!(draft.start_time, hm(12, 0));
    assert_eq!(draft.brooms, vec![BroomOrder::with_quantity(BroomId::new(1), 2)]);

    let payload = draft.to_payload().unwrap();
    assert_eq!(payload.status_id, StatusId::new(2));
    assert_eq!(payload.client_email.as_deref(), Some("ivan@example.com"));
    assert_eq!(payload.guests, 2);
}
