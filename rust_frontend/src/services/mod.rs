//! Service layer for the views.
//!
//! Services sit between the API client and whatever renders the data: they
//! combine client calls with the pure scheduler and receipt logic and hold
//! the little view state the screens need.

pub mod board;
pub mod forms;
pub mod inbox;
pub mod kitchen;
pub mod receipt;

pub use board::{
    fetch_day, ApplyOutcome, DayData, FetchTicket, LoadState, MutationAlert, ReservationBoard,
};
pub use forms::{BookingField, BookingForm, DraftError, FormErrors, ReservationDraft};
pub use inbox::Inbox;
pub use kitchen::{DefaultCategoryPolicy, KitchenMenu, MenuTab};
pub use receipt::{compute_receipt, CategorySubtotal, ReceiptBreakdown, ReceiptLine};
