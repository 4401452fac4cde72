//! Fixtures shared by the unit tests.

use chrono::{NaiveDate, NaiveDateTime};

use crate::api::{BathId, ReservationId, StatusId};
use crate::models::{AddOnLine, Bath, BathInput, Reservation, ReservationPayload};

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// `"2024-06-01 10:00"`
pub fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
}

pub fn bath(id: i64) -> Bath {
    Bath {
        bath_id: BathId::new(id),
        name: format!("Bath {id}"),
        title: String::new(),
        cost: 2000,
        description: None,
        base_guests: 4,
        extra_guest_price: 300,
        photos: vec![],
        features: vec![],
    }
}

pub fn reservation(id: i64, bath_id: i64, start: &str, end: &str) -> Reservation {
    Reservation {
        reservation_id: ReservationId::new(id),
        bath_id: BathId::new(bath_id),
        start: at(start),
        end: at(end),
        client_name: format!("Client {id}"),
        client_phone: "+7 900 000-00-00".to_string(),
        client_email: None,
        notes: None,
        guests: 2,
        total_cost: 0,
        status: "confirmed".to_string(),
        brooms: vec![],
        massages: vec![],
        menu_items: vec![],
    }
}

pub fn line(id: i64, name: &str, unit_price: i64, quantity: u32) -> AddOnLine {
    AddOnLine {
        id,
        name: name.to_string(),
        unit_price,
        quantity,
    }
}

pub fn bath_input(name: &str) -> BathInput {
    BathInput {
        name: name.to_string(),
        cost: 2000,
        base_guests: 4,
        extra_guest_price: 300,
        ..BathInput::default()
    }
}

pub fn payload(bath_id: BathId, start: &str, end: &str) -> ReservationPayload {
    ReservationPayload {
        bath_id,
        start_datetime: at(start),
        end_datetime: at(end),
        client_name: "Ivan".to_string(),
        client_phone: "+7 900 000-00-00".to_string(),
        client_email: None,
        notes: None,
        guests: 2,
        status_id: StatusId::new(1),
        brooms: vec![],
        menu_items: vec![],
        massages: vec![],
    }
}
