//! Public API surface for the front-end core.
//!
//! This file consolidates the identifier newtypes and the view-model types a
//! rendering layer consumes. All types derive Serialize/Deserialize for JSON
//! serialization.

pub use crate::models::{
    AddOnLine, Bath, BookingRecord, BookingRequest, Broom, CategoryRef, Massage, MenuCategory,
    MenuItem, Reservation, ReservationPayload, ReservationStatus, Rubles,
};
pub use crate::scheduler::{
    BathSchedule, BlockKind, DisplayBlock, GridModel, OverlapConflict, SlotCell, SlotState,
    TimeSlot,
};
pub use crate::services::kitchen::KitchenMenu;
pub use crate::services::receipt::{CategorySubtotal, ReceiptBreakdown, ReceiptLine};

crate::define_id_type!(i64, BathId);
crate::define_id_type!(i64, ReservationId);
crate::define_id_type!(i64, BroomId);
crate::define_id_type!(i64, MassageId);
crate::define_id_type!(i64, MenuCategoryId);
crate::define_id_type!(i64, MenuItemId);
crate::define_id_type!(i64, BookingId);
crate::define_id_type!(i64, StatusId);
