//! Reservations as served by `/admin/reservations/`.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::money::{deserialize_rubles, Rubles};
use super::time::{minutes_between, venue_datetime};
use crate::api::{BathId, BroomId, MassageId, MenuItemId, ReservationId, StatusId};

/// One itemized add-on on a reservation (broom, massage or dish).
///
/// The API names the id and price keys differently per category
/// (`broom_id`/`price`, `massage_id`/`cost`, `menu_item_id`/`price`); they all
/// land in the same shape here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOnLine {
    #[serde(alias = "broom_id", alias = "massage_id", alias = "menu_item_id")]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(alias = "price", alias = "cost", deserialize_with = "deserialize_rubles")]
    pub unit_price: Rubles,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl AddOnLine {
    pub fn amount(&self) -> Rubles {
        self.unit_price * Rubles::from(self.quantity)
    }
}

/// A booked time range for one bath.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(alias = "id")]
    pub reservation_id: ReservationId,
    pub bath_id: BathId,
    #[serde(rename = "start_datetime", with = "venue_datetime")]
    pub start: NaiveDateTime,
    #[serde(rename = "end_datetime", with = "venue_datetime")]
    pub end: NaiveDateTime,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub client_phone: String,
    #[serde(default)]
    pub client_email: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default = "default_guests")]
    pub guests: u32,
    /// Server-computed total; the receipt reconciles against it.
    #[serde(default, deserialize_with = "deserialize_rubles")]
    pub total_cost: Rubles,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub brooms: Vec<AddOnLine>,
    #[serde(default)]
    pub massages: Vec<AddOnLine>,
    #[serde(default)]
    pub menu_items: Vec<AddOnLine>,
}

fn default_guests() -> u32 {
    1
}

impl Reservation {
    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn duration_minutes(&self) -> f64 {
        minutes_between(self.start, self.end)
    }

    /// `end > start`; anything else cannot be drawn on the grid.
    pub fn is_valid_interval(&self) -> bool {
        self.end > self.start
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroomOrder {
    pub broom_id: BroomId,
    pub quantity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MassageOrder {
    pub massage_id: MassageId,
    pub quantity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItemOrder {
    pub menu_item_id: MenuItemId,
    pub quantity: u32,
}

/// Body of `POST /admin/reservations/` and `PUT /admin/reservations/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationPayload {
    pub bath_id: BathId,
    #[serde(with = "venue_datetime")]
    pub start_datetime: NaiveDateTime,
    #[serde(with = "venue_datetime")]
    pub end_datetime: NaiveDateTime,
    pub client_name: String,
    pub client_phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub guests: u32,
    pub status_id: StatusId,
    #[serde(default)]
    pub brooms: Vec<BroomOrder>,
    #[serde(default)]
    pub menu_items: Vec<MenuItemOrder>,
    #[serde(default)]
    pub massages: Vec<MassageOrder>,
}
