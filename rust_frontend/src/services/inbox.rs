//! Booking request inbox.

use log::debug;
use serde::Serialize;

use crate::api::BookingId;
use crate::client::{AdminApi, ClientResult, Session};
use crate::models::BookingRecord;
use crate::services::board::MutationAlert;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inbox {
    pub bookings: Vec<BookingRecord>,
}

impl Inbox {
    pub async fn load(api: &dyn AdminApi, session: &Session) -> ClientResult<Self> {
        let bookings = api.list_bookings(session).await?;
        debug!("Loaded {} booking requests", bookings.len());
        Ok(Self { bookings })
    }

    pub fn unread_count(&self) -> usize {
        self.bookings.iter().filter(|b| b.is_unread()).count()
    }

    pub fn unread(&self) -> impl Iterator<Item = &BookingRecord> {
        self.bookings.iter().filter(|b| b.is_unread())
    }

    /// Mark a booking read on the server and replace the local copy with the
    /// server's answer. The inbox is untouched on failure.
    pub async fn mark_read(
        &mut self,
        api: &dyn AdminApi,
        session: &Session,
        id: BookingId,
    ) -> Result<(), MutationAlert> {
        let updated = api.mark_booking_read(session, id).await?;
        if let Some(existing) = self.bookings.iter_mut().find(|b| b.booking_id == id) {
            *existing = updated;
        }
        Ok(())
    }
}
