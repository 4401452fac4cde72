//! Data Transfer Objects for the gateway.
//!
//! Views that already derive `Serialize` (the grid, receipts, the kitchen
//! menu) are returned as they are and re-exported here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::BathId;
use crate::services::BookingForm;

pub use crate::client::{LoginCredentials, TokenResponse};
pub use crate::models::BookingRecord;
pub use crate::scheduler::GridModel;
pub use crate::services::{KitchenMenu, ReceiptBreakdown};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// "ok" when the backend answered a catalog call
    pub backend: String,
}

/// `?date=YYYY-MM-DD`; today when absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateQuery {
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Body of `POST /v1/bookings`, as the public form submits it.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingFormRequest {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub bath_id: Option<BathId>,
    #[serde(default = "default_one")]
    pub duration_hours: u32,
    #[serde(default = "default_one")]
    pub guests: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub notes: String,
}

fn default_one() -> u32 {
    1
}

impl From<BookingFormRequest> for BookingForm {
    fn from(request: BookingFormRequest) -> Self {
        BookingForm {
            date: request.date,
            bath_id: request.bath_id,
            duration_hours: request.duration_hours,
            guests: request.guests,
            name: request.name,
            phone: request.phone,
            email: request.email,
            notes: request.notes,
        }
    }
}
