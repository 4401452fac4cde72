//! Client-side form rules: the public booking request and the admin
//! reservation editor.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use thiserror::Error;

use crate::api::{BathId, BroomId, MassageId, MenuItemId, StatusId};
use crate::models::time::at_time;
use crate::models::{
    BookingRequest, BroomOrder, MassageOrder, MenuItemOrder, Reservation, ReservationPayload,
};
use crate::scheduler::time_options;

pub const MAX_NOTES_LENGTH: usize = 300;

// ===== Booking request =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingField {
    Date,
    BathId,
    Guests,
    Name,
    Phone,
    Email,
    Notes,
}

impl fmt::Display for BookingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Date => "date",
            Self::BathId => "bath_id",
            Self::Guests => "guests",
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Notes => "notes",
        };
        f.write_str(name)
    }
}

/// Per-field messages of a rejected booking form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[error("booking form has {} invalid field(s)", .errors.len())]
pub struct FormErrors {
    pub errors: BTreeMap<BookingField, String>,
}

impl FormErrors {
    fn add(&mut self, field: BookingField, message: &str) {
        self.errors.insert(field, message.to_string());
    }

    pub fn get(&self, field: BookingField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// The public booking form as typed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingForm {
    pub date: Option<NaiveDate>,
    pub bath_id: Option<BathId>,
    pub duration_hours: u32,
    pub guests: u32,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub notes: String,
}

impl Default for BookingForm {
    fn default() -> Self {
        Self {
            date: None,
            bath_id: None,
            duration_hours: 1,
            guests: 1,
            name: String::new(),
            phone: String::new(),
            email: String::new(),
            notes: String::new(),
        }
    }
}

impl BookingForm {
    /// Check every field and build the request, or return all field errors
    /// at once.
    pub fn validate(&self) -> Result<BookingRequest, FormErrors> {
        let mut errors = FormErrors::default();

        if self.date.is_none() {
            errors.add(BookingField::Date, "Date is required");
        }
        if self.bath_id.is_none() {
            errors.add(BookingField::BathId, "Choose a bath");
        }
        if self.guests < 1 {
            errors.add(BookingField::Guests, "At least one guest");
        }
        if self.name.trim().is_empty() {
            errors.add(BookingField::Name, "Name is required");
        }
        if self.phone.trim().is_empty() {
            errors.add(BookingField::Phone, "Phone is required");
        }
        if !self.email.is_empty() && !looks_like_email(&self.email) {
            errors.add(BookingField::Email, "Invalid email");
        }
        if self.notes.chars().count() > MAX_NOTES_LENGTH {
            errors.add(BookingField::Notes, "Notes are limited to 300 characters");
        }

        match (self.date, self.bath_id) {
            (Some(date), Some(bath_id)) if errors.is_empty() => Ok(BookingRequest {
                bath_id,
                date,
                duration_hours: self.duration_hours.max(1),
                guests: self.guests,
                name: self.name.trim().to_string(),
                phone: self.phone.trim().to_string(),
                email: non_blank(&self.email),
                notes: non_blank(&self.notes),
            }),
            _ => Err(errors),
        }
    }
}

/// `something@host.tld` somewhere in the text, no whitespace inside.
pub fn looks_like_email(text: &str) -> bool {
    text.split_whitespace().any(|token| {
        token.char_indices().any(|(i, c)| {
            if c != '@' || i == 0 {
                return false;
            }
            let domain = &token[i + 1..];
            domain
                .char_indices()
                .any(|(j, d)| d == '.' && j > 0 && j + 1 < domain.len())
        })
    })
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// ===== Reservation draft =====

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Fill in the required fields: bath, client name")]
    MissingRequired,
    #[error("End time must be after start time")]
    EndNotAfterStart,
    #[error("{0} is not one of the half-hour options")]
    OffGrid(NaiveTime),
}

/// An add-on order line whose quantity the editor adjusts.
pub trait OrderLine {
    type Id: Copy + PartialEq;

    fn line_id(&self) -> Self::Id;
    fn with_quantity(id: Self::Id, quantity: u32) -> Self;
    fn quantity_mut(&mut self) -> &mut u32;
}

impl OrderLine for BroomOrder {
    type Id = BroomId;

    fn line_id(&self) -> BroomId {
        self.broom_id
    }

    fn with_quantity(broom_id: BroomId, quantity: u32) -> Self {
        Self { broom_id, quantity }
    }

    fn quantity_mut(&mut self) -> &mut u32 {
        &mut self.quantity
    }
}

impl OrderLine for MassageOrder {
    type Id = MassageId;

    fn line_id(&self) -> MassageId {
        self.massage_id
    }

    fn with_quantity(massage_id: MassageId, quantity: u32) -> Self {
        Self {
            massage_id,
            quantity,
        }
    }

    fn quantity_mut(&mut self) -> &mut u32 {
        &mut self.quantity
    }
}

impl OrderLine for MenuItemOrder {
    type Id = MenuItemId;

    fn line_id(&self) -> MenuItemId {
        self.menu_item_id
    }

    fn with_quantity(menu_item_id: MenuItemId, quantity: u32) -> Self {
        Self {
            menu_item_id,
            quantity,
        }
    }

    fn quantity_mut(&mut self) -> &mut u32 {
        &mut self.quantity
    }
}

/// Set the quantity of `id`: zero or less removes the line, an existing line
/// is updated in place, otherwise a line is appended.
pub fn set_quantity<L: OrderLine>(lines: &mut Vec<L>, id: L::Id, quantity: i64) {
    if quantity <= 0 {
        lines.retain(|l| l.line_id() != id);
        return;
    }
    let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
    match lines.iter_mut().find(|l| l.line_id() == id) {
        Some(line) => *line.quantity_mut() = quantity,
        None => lines.push(L::with_quantity(id, quantity)),
    }
}

/// State of the admin add/edit reservation editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationDraft {
    pub bath_id: Option<BathId>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub client_name: String,
    pub client_phone: String,
    pub client_email: String,
    pub notes: String,
    pub guests: u32,
    pub status_id: StatusId,
    pub brooms: Vec<BroomOrder>,
    pub massages: Vec<MassageOrder>,
    pub menu_items: Vec<MenuItemOrder>,
}

impl ReservationDraft {
    /// Empty draft for `date`, 09:00 to 10:00.
    pub fn new(date: NaiveDate) -> Self {
        let options = time_options();
        Self {
            bath_id: None,
            date,
            start_time: options[0],
            end_time: options[2],
            client_name: String::new(),
            client_phone: String::new(),
            client_email: String::new(),
            notes: String::new(),
            guests: 1,
            status_id: StatusId::new(1),
            brooms: Vec::new(),
            massages: Vec::new(),
            menu_items: Vec::new(),
        }
    }

    /// Draft pre-filled from an existing reservation.
    pub fn from_reservation(reservation: &Reservation, status_id: StatusId) -> Self {
        Self {
            bath_id: Some(reservation.bath_id),
            date: reservation.start.date(),
            start_time: reservation.start.time(),
            end_time: reservation.end.time(),
            client_name: reservation.client_name.clone(),
            client_phone: reservation.client_phone.clone(),
            client_email: reservation.client_email.clone().unwrap_or_default(),
            notes: reservation.notes.clone().unwrap_or_default(),
            guests: reservation.guests,
            status_id,
            brooms: reservation
                .brooms
                .iter()
                .map(|l| BroomOrder::with_quantity(BroomId::new(l.id), l.quantity))
                .collect(),
            massages: reservation
                .massages
                .iter()
                .map(|l| MassageOrder::with_quantity(MassageId::new(l.id), l.quantity))
                .collect(),
            menu_items: reservation
                .menu_items
                .iter()
                .map(|l| MenuItemOrder::with_quantity(MenuItemId::new(l.id), l.quantity))
                .collect(),
        }
    }

    pub fn set_broom(&mut self, id: BroomId, quantity: i64) {
        set_quantity(&mut self.brooms, id, quantity);
    }

    pub fn set_massage(&mut self, id: MassageId, quantity: i64) {
        set_quantity(&mut self.massages, id, quantity);
    }

    pub fn set_menu_item(&mut self, id: MenuItemId, quantity: i64) {
        set_quantity(&mut self.menu_items, id, quantity);
    }

    /// Payload for create/update, once the draft is complete.
    pub fn to_payload(&self) -> Result<ReservationPayload, DraftError> {
        let bath_id = match self.bath_id {
            Some(id) if !self.client_name.trim().is_empty() => id,
            _ => return Err(DraftError::MissingRequired),
        };

        let options = time_options();
        for time in [self.start_time, self.end_time] {
            if !options.contains(&time) {
                return Err(DraftError::OffGrid(time));
            }
        }
        if self.start_time >= self.end_time {
            return Err(DraftError::EndNotAfterStart);
        }

        Ok(ReservationPayload {
            bath_id,
            start_datetime: at_time(self.date, self.start_time),
            end_datetime: at_time(self.date, self.end_time),
            client_name: self.client_name.trim().to_string(),
            client_phone: self.client_phone.trim().to_string(),
            client_email: non_blank(&self.client_email),
            notes: non_blank(&self.notes),
            guests: self.guests.max(1),
            status_id: self.status_id,
            brooms: self.brooms.clone(),
            menu_items: self.menu_items.clone(),
            massages: self.massages.clone(),
        })
    }
}

#[cfg(test)]
#[path = "forms_tests.rs"]
mod forms_tests;
