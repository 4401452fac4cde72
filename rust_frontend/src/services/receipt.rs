//! Itemized receipt for one reservation.
//!
//! The server only stores a reservation's grand total. The receipt splits it
//! back into the venue rental, the extra-guest surcharge and the add-ons, and
//! when the bath's hourly rate is known, checks the rental against the rate.

use serde::{Deserialize, Serialize};

use crate::api::ReservationId;
use crate::models::{AddOnLine, Bath, Reservation, Rubles};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub name: String,
    pub unit_price: Rubles,
    pub quantity: u32,
    pub amount: Rubles,
}

impl From<&AddOnLine> for ReceiptLine {
    fn from(line: &AddOnLine) -> Self {
        Self {
            name: line.name.clone(),
            unit_price: line.unit_price,
            quantity: line.quantity,
            amount: line.amount(),
        }
    }
}

/// Add-ons of one category with their sum.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySubtotal {
    pub lines: Vec<ReceiptLine>,
    pub subtotal: Rubles,
}

impl CategorySubtotal {
    pub fn from_lines(lines: &[AddOnLine]) -> Self {
        let lines: Vec<ReceiptLine> = lines.iter().map(ReceiptLine::from).collect();
        let subtotal = lines.iter().map(|l| l.amount).sum();
        Self { lines, subtotal }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptBreakdown {
    pub reservation_id: ReservationId,
    pub guests: u32,
    /// Guests above the bath's base capacity.
    pub extra_guests: u32,
    pub extra_guest_price: Rubles,
    pub extra_guest_surcharge: Rubles,
    pub brooms: CategorySubtotal,
    pub massages: CategorySubtotal,
    pub menu_items: CategorySubtotal,
    pub add_ons_total: Rubles,
    /// Server total minus all add-ons. Includes the surcharge.
    pub base_venue_cost: Rubles,
    pub total_cost: Rubles,
    /// Rental the hourly rate implies; `None` without a bath.
    pub expected_venue_cost: Option<Rubles>,
    /// `base_venue_cost - expected_venue_cost`; nonzero means the server total
    /// absorbed something the rate does not explain.
    pub venue_discrepancy: Option<Rubles>,
}

impl ReceiptBreakdown {
    pub fn is_reconciled(&self) -> bool {
        self.venue_discrepancy.map_or(true, |d| d == 0)
    }
}

/// Venue rental as the server bills it: `trunc(cost * hours)` plus the
/// extra-guest surcharge.
pub fn expected_venue_cost(bath: &Bath, duration_minutes: f64, guests: u32) -> Rubles {
    let hours = duration_minutes / 60.0;
    let rental = (bath.cost as f64 * hours).trunc() as Rubles;
    rental + extra_guest_surcharge(bath, guests)
}

fn extra_guests(bath: &Bath, guests: u32) -> u32 {
    guests.saturating_sub(bath.base_guests)
}

fn extra_guest_surcharge(bath: &Bath, guests: u32) -> Rubles {
    Rubles::from(extra_guests(bath, guests)) * bath.extra_guest_price
}

/// Break down `reservation`'s total. Without `bath` the surcharge is zero
/// and nothing is reconciled.
pub fn compute_receipt(reservation: &Reservation, bath: Option<&Bath>) -> ReceiptBreakdown {
    let brooms = CategorySubtotal::from_lines(&reservation.brooms);
    let massages = CategorySubtotal::from_lines(&reservation.massages);
    let menu_items = CategorySubtotal::from_lines(&reservation.menu_items);
    let add_ons_total = brooms.subtotal + massages.subtotal + menu_items.subtotal;
    let base_venue_cost = reservation.total_cost - add_ons_total;

    let (extra_guests, extra_guest_price, extra_guest_surcharge) = match bath {
        Some(bath) => (
            extra_guests(bath, reservation.guests),
            bath.extra_guest_price,
            extra_guest_surcharge(bath, reservation.guests),
        ),
        None => (0, 0, 0),
    };

    let expected =
        bath.map(|b| expected_venue_cost(b, reservation.duration_minutes(), reservation.guests));

    ReceiptBreakdown {
        reservation_id: reservation.reservation_id,
        guests: reservation.guests,
        extra_guests,
        extra_guest_price,
        extra_guest_surcharge,
        brooms,
        massages,
        menu_items,
        add_ons_total,
        base_venue_cost,
        total_cost: reservation.total_cost,
        expected_venue_cost: expected,
        venue_discrepancy: expected.map(|e| base_venue_cost - e),
    }
}

#[cfg(test)]
#[path = "receipt_tests.rs"]
mod receipt_tests;
