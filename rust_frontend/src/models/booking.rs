//! Booking requests submitted from the public site.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::time::{venue_date, venue_datetime};
use crate::api::{BathId, BookingId};

/// Body of `POST /bookings/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub bath_id: BathId,
    #[serde(with = "venue_date")]
    pub date: NaiveDate,
    pub duration_hours: u32,
    pub guests: u32,
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A booking request as listed in the admin inbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    #[serde(alias = "id")]
    pub booking_id: BookingId,
    pub bath_id: BathId,
    #[serde(with = "venue_date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub duration_hours: u32,
    #[serde(default)]
    pub guests: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(with = "venue_datetime")]
    pub created_at: NaiveDateTime,
}

impl BookingRecord {
    pub fn is_unread(&self) -> bool {
        !self.is_read
    }
}
