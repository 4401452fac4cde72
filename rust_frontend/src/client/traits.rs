//! API client traits.
//!
//! The REST API is split by audience:
//!
//! - [`CatalogApi`]: public reads and the public booking request
//! - [`AdminApi`]: login, the reservation calendar and the booking inbox
//! - [`CatalogAdminApi`]: CRUD behind the admin catalog screens
//!
//! Every call takes the caller's [`Session`]; implementations never keep
//! their own token.
//!
//! ```ignore
//! async fn day<A: FullApi + ?Sized>(api: &A, session: &Session, date: NaiveDate) -> ClientResult<GridModel> {
//!     let (baths, reservations) = tokio::try_join!(
//!         api.list_baths(session),
//!         api.list_reservations(session, &ReservationFilter::for_date(date)),
//!     )?;
//!     Ok(build_grid(&baths, &reservations, date))
//! }
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;

use super::error::ClientResult;
use super::session::{LoginCredentials, Session};
use crate::api::{
    BathId, BookingId, BroomId, MassageId, MenuCategoryId, MenuItemId, ReservationId,
};
use crate::models::{
    Bath, BathInput, BookingRecord, BookingRequest, Broom, BroomInput, Massage, MassageInput,
    MenuCategory, MenuCategoryInput, MenuItem, MenuItemInput, Reservation, ReservationPayload,
    ReservationStatus,
};

/// Query of `GET /admin/reservations/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationFilter {
    pub date: NaiveDate,
    pub bath_id: Option<BathId>,
}

impl ReservationFilter {
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            date,
            bath_id: None,
        }
    }

    pub fn with_bath(mut self, bath_id: BathId) -> Self {
        self.bath_id = Some(bath_id);
        self
    }
}

/// Public endpoints.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_baths(&self, session: &Session) -> ClientResult<Vec<Bath>>;

    async fn get_bath(&self, session: &Session, id: BathId) -> ClientResult<Bath>;

    async fn list_massages(&self, session: &Session) -> ClientResult<Vec<Massage>>;

    async fn get_massage(&self, session: &Session, id: MassageId) -> ClientResult<Massage>;

    async fn list_brooms(&self, session: &Session) -> ClientResult<Vec<Broom>>;

    async fn get_broom(&self, session: &Session, id: BroomId) -> ClientResult<Broom>;

    /// All dishes, each with its category.
    async fn list_menu_items(&self, session: &Session) -> ClientResult<Vec<MenuItem>>;

    async fn list_menu_categories(&self, session: &Session) -> ClientResult<Vec<MenuCategory>>;

    /// Submit a booking request from the public form.
    async fn create_booking(
        &self,
        session: &Session,
        request: &BookingRequest,
    ) -> ClientResult<BookingRecord>;
}

/// Back-office endpoints. All but `login` need a bearer session.
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// Exchange credentials for a bearer session.
    async fn login(&self, credentials: &LoginCredentials) -> ClientResult<Session>;

    /// Reservations starting and ending on `filter.date`.
    async fn list_reservations(
        &self,
        session: &Session,
        filter: &ReservationFilter,
    ) -> ClientResult<Vec<Reservation>>;

    async fn create_reservation(
        &self,
        session: &Session,
        payload: &ReservationPayload,
    ) -> ClientResult<Reservation>;

    async fn update_reservation(
        &self,
        session: &Session,
        id: ReservationId,
        payload: &ReservationPayload,
    ) -> ClientResult<Reservation>;

    async fn delete_reservation(&self, session: &Session, id: ReservationId) -> ClientResult<()>;

    async fn list_reservation_statuses(
        &self,
        session: &Session,
    ) -> ClientResult<Vec<ReservationStatus>>;

    async fn list_bookings(&self, session: &Session) -> ClientResult<Vec<BookingRecord>>;

    async fn mark_booking_read(
        &self,
        session: &Session,
        id: BookingId,
    ) -> ClientResult<BookingRecord>;
}

/// Catalog maintenance endpoints.
#[async_trait]
pub trait CatalogAdminApi: Send + Sync {
    async fn create_bath(&self, session: &Session, input: &BathInput) -> ClientResult<Bath>;

    async fn update_bath(
        &self,
        session: &Session,
        id: BathId,
        input: &BathInput,
    ) -> ClientResult<Bath>;

    async fn delete_bath(&self, session: &Session, id: BathId) -> ClientResult<()>;

    async fn create_massage(
        &self,
        session: &Session,
        input: &MassageInput,
    ) -> ClientResult<Massage>;

    async fn update_massage(
        &self,
        session: &Session,
        id: MassageId,
        input: &MassageInput,
    ) -> ClientResult<Massage>;

    async fn delete_massage(&self, session: &Session, id: MassageId) -> ClientResult<()>;

    async fn create_broom(&self, session: &Session, input: &BroomInput) -> ClientResult<Broom>;

    async fn update_broom(
        &self,
        session: &Session,
        id: BroomId,
        input: &BroomInput,
    ) -> ClientResult<Broom>;

    async fn delete_broom(&self, session: &Session, id: BroomId) -> ClientResult<()>;

    async fn create_menu_item(
        &self,
        session: &Session,
        input: &MenuItemInput,
    ) -> ClientResult<MenuItem>;

    async fn update_menu_item(
        &self,
        session: &Session,
        id: MenuItemId,
        input: &MenuItemInput,
    ) -> ClientResult<MenuItem>;

    async fn delete_menu_item(&self, session: &Session, id: MenuItemId) -> ClientResult<()>;

    async fn create_menu_category(
        &self,
        session: &Session,
        input: &MenuCategoryInput,
    ) -> ClientResult<MenuCategory>;

    async fn update_menu_category(
        &self,
        session: &Session,
        id: MenuCategoryId,
        input: &MenuCategoryInput,
    ) -> ClientResult<MenuCategory>;

    async fn delete_menu_category(
        &self,
        session: &Session,
        id: MenuCategoryId,
    ) -> ClientResult<()>;
}

/// Composite bound for a client that serves every screen.
pub trait FullApi: CatalogApi + AdminApi + CatalogAdminApi {}

impl<T> FullApi for T where T: CatalogApi + AdminApi + CatalogAdminApi {}
