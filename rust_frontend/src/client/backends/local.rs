//! In-memory API implementation.
//!
//! Keeps every collection in memory and applies the same rules the REST API
//! applies: reservation overlap checks that include the cleaning tail,
//! server-side totals, and bearer tokens on back-office calls. Suitable for
//! tests and for running the gateway without a backend.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use log::debug;
use parking_lot::RwLock;

use crate::api::{
    BathId, BookingId, BroomId, MassageId, MenuCategoryId, MenuItemId, ReservationId, StatusId,
};
use crate::client::error::{ClientError, ClientResult, ErrorContext};
use crate::client::session::{LoginCredentials, Session};
use crate::client::traits::{AdminApi, CatalogAdminApi, CatalogApi, ReservationFilter};
use crate::models::{
    AddOnLine, Bath, BathFeature, BathInput, BookingRecord, BookingRequest, Broom, BroomInput,
    CategoryRef, Massage, MassageInput, MenuCategory, MenuCategoryInput, MenuItem, MenuItemInput,
    Photo, Reservation, ReservationPayload, ReservationStatus,
};
use crate::models::time::minutes_between;
use crate::scheduler::slots::slot_duration;
use crate::services::receipt::expected_venue_cost;

/// In-memory API.
///
/// ```
/// use banya_frontend::client::LocalApi;
///
/// let api = LocalApi::new().with_admin("admin", "secret");
/// let session = api.issue_session();
/// assert!(session.is_authenticated());
/// ```
#[derive(Clone)]
pub struct LocalApi {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    baths: BTreeMap<BathId, Bath>,
    massages: BTreeMap<MassageId, Massage>,
    brooms: BTreeMap<BroomId, Broom>,
    categories: BTreeMap<MenuCategoryId, MenuCategory>,
    menu_items: BTreeMap<MenuItemId, MenuItem>,
    statuses: Vec<ReservationStatus>,
    reservations: BTreeMap<ReservationId, Reservation>,
    bookings: BTreeMap<BookingId, BookingRecord>,

    admins: HashMap<String, String>,
    tokens: HashSet<String>,

    next_id: i64,
    is_available: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            baths: BTreeMap::new(),
            massages: BTreeMap::new(),
            brooms: BTreeMap::new(),
            categories: BTreeMap::new(),
            menu_items: BTreeMap::new(),
            statuses: default_statuses(),
            reservations: BTreeMap::new(),
            bookings: BTreeMap::new(),
            admins: HashMap::new(),
            tokens: HashSet::new(),
            next_id: 1,
            is_available: true,
        }
    }
}

fn default_statuses() -> Vec<ReservationStatus> {
    ["confirmed", "pending", "cancelled"]
        .iter()
        .zip(1..)
        .map(|(name, id)| ReservationStatus {
            id: StatusId::new(id),
            status_name: name.to_string(),
        })
        .collect()
}

impl LocalData {
    fn next_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn check_available(&self, operation: &str) -> ClientResult<()> {
        if self.is_available {
            Ok(())
        } else {
            Err(ClientError::Connection {
                message: "Local API is unavailable".to_string(),
                context: ErrorContext::new(operation),
            })
        }
    }

    fn check_session(&self, session: &Session, operation: &str) -> ClientResult<()> {
        self.check_available(operation)?;
        match session.token() {
            Some(token) if self.tokens.contains(token) => Ok(()),
            Some(_) => Err(ClientError::unauthorized("Invalid token").with_operation(operation)),
            None => Err(ClientError::unauthorized("Not authenticated").with_operation(operation)),
        }
    }

    /// First reservation on the bath whose `[start, end + cleaning)`
    /// intersects `[start, end)`.
    fn find_overlap(
        &self,
        bath_id: BathId,
        start: NaiveDateTime,
        end: NaiveDateTime,
        exclude: Option<ReservationId>,
    ) -> Option<&Reservation> {
        self.reservations.values().find(|r| {
            r.bath_id == bath_id
                && Some(r.reservation_id) != exclude
                && r.start < end
                && r.end + slot_duration() > start
        })
    }

    fn build_reservation(
        &self,
        reservation_id: ReservationId,
        payload: &ReservationPayload,
    ) -> ClientResult<Reservation> {
        let bath = self.baths.get(&payload.bath_id).ok_or_else(|| {
            ClientError::not_found("Bath not found").with_entity("bath", payload.bath_id)
        })?;
        let status = self
            .statuses
            .iter()
            .find(|s| s.id == payload.status_id)
            .ok_or_else(|| {
                ClientError::validation(format!("Status {} not found", payload.status_id))
            })?;

        if payload.start_datetime >= payload.end_datetime {
            return Err(ClientError::validation("End time must be after start time"));
        }
        if let Some(existing) = self.find_overlap(
            payload.bath_id,
            payload.start_datetime,
            payload.end_datetime,
            Some(reservation_id),
        ) {
            debug!(
                "Reservation on bath {} overlaps reservation {}",
                payload.bath_id, existing.reservation_id
            );
            return Err(ClientError::validation("Reservation overlaps an existing one"));
        }

        let brooms = payload
            .brooms
            .iter()
            .map(|order| -> ClientResult<AddOnLine> {
                let broom = self.brooms.get(&order.broom_id).ok_or_else(|| {
                    ClientError::validation(format!("Broom {} not found", order.broom_id))
                })?;
                Ok(AddOnLine {
                    id: broom.id.value(),
                    name: broom.name.clone(),
                    unit_price: broom.price,
                    quantity: order.quantity,
                })
            })
            .collect::<ClientResult<Vec<_>>>()?;

        let menu_items = payload
            .menu_items
            .iter()
            .map(|order| -> ClientResult<AddOnLine> {
                let item = self.menu_items.get(&order.menu_item_id).ok_or_else(|| {
                    ClientError::validation(format!("Menu item {} not found", order.menu_item_id))
                })?;
                Ok(AddOnLine {
                    id: item.id.value(),
                    name: item.name.clone(),
                    unit_price: item.price,
                    quantity: order.quantity,
                })
            })
            .collect::<ClientResult<Vec<_>>>()?;

        let massages = payload
            .massages
            .iter()
            .map(|order| -> ClientResult<AddOnLine> {
                let massage = self.massages.get(&order.massage_id).ok_or_else(|| {
                    ClientError::validation(format!("Massage {} not found", order.massage_id))
                })?;
                Ok(AddOnLine {
                    id: massage.massage_id.value(),
                    name: massage.name.clone(),
                    unit_price: massage.cost,
                    quantity: order.quantity,
                })
            })
            .collect::<ClientResult<Vec<_>>>()?;

        let duration = minutes_between(payload.start_datetime, payload.end_datetime);
        let add_ons: i64 = brooms
            .iter()
            .chain(&menu_items)
            .chain(&massages)
            .map(AddOnLine::amount)
            .sum();
        let total_cost = expected_venue_cost(bath, duration, payload.guests) + add_ons;

        Ok(Reservation {
            reservation_id,
            bath_id: payload.bath_id,
            start: payload.start_datetime,
            end: payload.end_datetime,
            client_name: payload.client_name.clone(),
            client_phone: payload.client_phone.clone(),
            client_email: payload.client_email.clone(),
            notes: payload.notes.clone(),
            guests: payload.guests,
            total_cost,
            status: status.status_name.clone(),
            brooms,
            massages,
            menu_items,
        })
    }

    fn bath_from_input(&self, bath_id: BathId, input: &BathInput) -> Bath {
        Bath {
            bath_id,
            name: input.name.clone(),
            title: input.title.clone(),
            cost: input.cost,
            description: input.description.clone(),
            base_guests: input.base_guests,
            extra_guest_price: input.extra_guest_price,
            photos: input
                .photo_urls
                .iter()
                .map(|url| Photo {
                    photo_id: None,
                    image_url: url.clone(),
                })
                .collect(),
            features: input
                .features
                .iter()
                .map(|f| BathFeature {
                    feature_id: None,
                    key: f.key.clone(),
                    value: f.value.clone(),
                })
                .collect(),
        }
    }

    fn menu_item_from_input(&self, id: MenuItemId, input: &MenuItemInput) -> ClientResult<MenuItem> {
        let category = self.categories.get(&input.category_id).ok_or_else(|| {
            ClientError::validation(format!("Category {} not found", input.category_id))
        })?;
        Ok(MenuItem {
            id,
            name: input.name.clone(),
            price: input.price,
            description: input.description.clone(),
            category: Some(CategoryRef::Full(category.clone())),
        })
    }
}

impl LocalApi {
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Register an administrator account.
    pub fn with_admin(self, username: &str, password: &str) -> Self {
        self.data
            .write()
            .admins
            .insert(username.to_string(), password.to_string());
        self
    }

    /// A valid bearer session without going through `login`.
    pub fn issue_session(&self) -> Session {
        let mut data = self.data.write();
        let token = format!("local-token-{}", data.next_id());
        data.tokens.insert(token.clone());
        Session::bearer(token)
    }

    /// Simulate the API going down (every call fails with a connection
    /// error) or coming back.
    pub fn set_available(&self, available: bool) {
        self.data.write().is_available = available;
    }

    pub fn add_bath(&self, input: &BathInput) -> Bath {
        let mut data = self.data.write();
        let id = BathId::new(data.next_id());
        let bath = data.bath_from_input(id, input);
        data.baths.insert(id, bath.clone());
        bath
    }

    pub fn add_broom(&self, input: &BroomInput) -> Broom {
        let mut data = self.data.write();
        let broom = Broom {
            id: BroomId::new(data.next_id()),
            name: input.name.clone(),
            price: input.price,
            quantity: input.quantity,
        };
        data.brooms.insert(broom.id, broom.clone());
        broom
    }

    pub fn add_massage(&self, input: &MassageInput) -> Massage {
        let mut data = self.data.write();
        let massage = Massage {
            massage_id: MassageId::new(data.next_id()),
            name: input.name.clone(),
            description: input.description.clone(),
            cost: input.cost,
        };
        data.massages.insert(massage.massage_id, massage.clone());
        massage
    }

    pub fn add_menu_category(&self, input: &MenuCategoryInput) -> MenuCategory {
        let mut data = self.data.write();
        let category = MenuCategory {
            id: MenuCategoryId::new(data.next_id()),
            slug: input.slug.clone(),
            name: input.name.clone(),
            order: input.order,
        };
        data.categories.insert(category.id, category.clone());
        category
    }

    pub fn add_menu_item(&self, input: &MenuItemInput) -> ClientResult<MenuItem> {
        let mut data = self.data.write();
        let id = MenuItemId::new(data.next_id());
        let item = data.menu_item_from_input(id, input)?;
        data.menu_items.insert(id, item.clone());
        Ok(item)
    }

    /// Store a reservation as-is, bypassing overlap checks and totals.
    pub fn insert_reservation(&self, reservation: Reservation) {
        let mut data = self.data.write();
        data.next_id = data.next_id.max(reservation.reservation_id.value() + 1);
        data.reservations
            .insert(reservation.reservation_id, reservation);
    }

    pub fn reservation_count(&self) -> usize {
        self.data.read().reservations.len()
    }
}

impl Default for LocalApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogApi for LocalApi {
    async fn list_baths(&self, _session: &Session) -> ClientResult<Vec<Bath>> {
        let data = self.data.read();
        data.check_available("list_baths")?;
        Ok(data.baths.values().cloned().collect())
    }

    async fn get_bath(&self, _session: &Session, id: BathId) -> ClientResult<Bath> {
        let data = self.data.read();
        data.check_available("get_bath")?;
        data.baths.get(&id).cloned().ok_or_else(|| {
            ClientError::not_found_with_context(
                "Bath not found",
                ErrorContext::new("get_bath")
                    .with_entity("bath")
                    .with_entity_id(id),
            )
        })
    }

    async fn list_massages(&self, _session: &Session) -> ClientResult<Vec<Massage>> {
        let data = self.data.read();
        data.check_available("list_massages")?;
        Ok(data.massages.values().cloned().collect())
    }

    async fn get_massage(&self, _session: &Session, id: MassageId) -> ClientResult<Massage> {
        let data = self.data.read();
        data.check_available("get_massage")?;
        data.massages.get(&id).cloned().ok_or_else(|| {
            ClientError::not_found("Massage not found")
                .with_operation("get_massage")
                .with_entity("massage", id)
        })
    }

    async fn list_brooms(&self, _session: &Session) -> ClientResult<Vec<Broom>> {
        let data = self.data.read();
        data.check_available("list_brooms")?;
        Ok(data.brooms.values().cloned().collect())
    }

    async fn get_broom(&self, _session: &Session, id: BroomId) -> ClientResult<Broom> {
        let data = self.data.read();
        data.check_available("get_broom")?;
        data.brooms.get(&id).cloned().ok_or_else(|| {
            ClientError::not_found("Broom not found")
                .with_operation("get_broom")
                .with_entity("broom", id)
        })
    }

    async fn list_menu_items(&self, _session: &Session) -> ClientResult<Vec<MenuItem>> {
        let data = self.data.read();
        data.check_available("list_menu_items")?;
        Ok(data.menu_items.values().cloned().collect())
    }

    async fn list_menu_categories(&self, _session: &Session) -> ClientResult<Vec<MenuCategory>> {
        let data = self.data.read();
        data.check_available("list_menu_categories")?;
        let mut categories: Vec<MenuCategory> = data.categories.values().cloned().collect();
        categories.sort_by_key(|c| c.order);
        Ok(categories)
    }

    async fn create_booking(
        &self,
        _session: &Session,
        request: &BookingRequest,
    ) -> ClientResult<BookingRecord> {
        let mut data = self.data.write();
        data.check_available("create_booking")?;
        if !data.baths.contains_key(&request.bath_id) {
            return Err(ClientError::not_found("Bath not found")
                .with_operation("create_booking")
                .with_entity("bath", request.bath_id));
        }

        let record = BookingRecord {
            booking_id: BookingId::new(data.next_id()),
            bath_id: request.bath_id,
            date: request.date,
            duration_hours: request.duration_hours,
            guests: request.guests,
            name: request.name.clone(),
            phone: request.phone.clone(),
            email: request.email.clone(),
            notes: request.notes.clone(),
            is_read: false,
            created_at: Local::now().naive_local(),
        };
        data.bookings.insert(record.booking_id, record.clone());
        Ok(record)
    }
}

#[async_trait]
impl AdminApi for LocalApi {
    async fn login(&self, credentials: &LoginCredentials) -> ClientResult<Session> {
        let known = {
            let data = self.data.read();
            data.check_available("login")?;
            data.admins
                .get(&credentials.username)
                .is_some_and(|p| p == &credentials.password)
        };
        if !known {
            return Err(
                ClientError::unauthorized("Incorrect username or password").with_operation("login")
            );
        }
        Ok(self.issue_session())
    }

    async fn list_reservations(
        &self,
        session: &Session,
        filter: &ReservationFilter,
    ) -> ClientResult<Vec<Reservation>> {
        let data = self.data.read();
        data.check_session(session, "list_reservations")?;
        Ok(data
            .reservations
            .values()
            .filter(|r| r.start.date() == filter.date && r.end.date() == filter.date)
            .filter(|r| filter.bath_id.map_or(true, |id| r.bath_id == id))
            .cloned()
            .collect())
    }

    async fn create_reservation(
        &self,
        session: &Session,
        payload: &ReservationPayload,
    ) -> ClientResult<Reservation> {
        let mut data = self.data.write();
        data.check_session(session, "create_reservation")?;
        let id = ReservationId::new(data.next_id);
        let reservation = data
            .build_reservation(id, payload)
            .map_err(|e| e.with_operation("create_reservation"))?;
        data.next_id();
        data.reservations.insert(id, reservation.clone());
        Ok(reservation)
    }

    async fn update_reservation(
        &self,
        session: &Session,
        id: ReservationId,
        payload: &ReservationPayload,
    ) -> ClientResult<Reservation> {
        let mut data = self.data.write();
        data.check_session(session, "update_reservation")?;
        if !data.reservations.contains_key(&id) {
            return Err(ClientError::not_found("Reservation not found")
                .with_operation("update_reservation")
                .with_entity("reservation", id));
        }
        let reservation = data
            .build_reservation(id, payload)
            .map_err(|e| e.with_operation("update_reservation"))?;
        data.reservations.insert(id, reservation.clone());
        Ok(reservation)
    }

    async fn delete_reservation(&self, session: &Session, id: ReservationId) -> ClientResult<()> {
        let mut data = self.data.write();
        data.check_session(session, "delete_reservation")?;
        data.reservations.remove(&id).map(|_| ()).ok_or_else(|| {
            ClientError::not_found("Reservation not found")
                .with_operation("delete_reservation")
                .with_entity("reservation", id)
        })
    }

    async fn list_reservation_statuses(
        &self,
        session: &Session,
    ) -> ClientResult<Vec<ReservationStatus>> {
        let data = self.data.read();
        data.check_session(session, "list_reservation_statuses")?;
        Ok(data.statuses.clone())
    }

    async fn list_bookings(&self, session: &Session) -> ClientResult<Vec<BookingRecord>> {
        let data = self.data.read();
        data.check_session(session, "list_bookings")?;
        // Newest first.
        Ok(data.bookings.values().rev().cloned().collect())
    }

    async fn mark_booking_read(
        &self,
        session: &Session,
        id: BookingId,
    ) -> ClientResult<BookingRecord> {
        let mut data = self.data.write();
        data.check_session(session, "mark_booking_read")?;
        let booking = data.bookings.get_mut(&id).ok_or_else(|| {
            ClientError::not_found("Booking not found")
                .with_operation("mark_booking_read")
                .with_entity("booking", id)
        })?;
        booking.is_read = true;
        Ok(booking.clone())
    }
}

#[async_trait]
impl CatalogAdminApi for LocalApi {
    async fn create_bath(&self, session: &Session, input: &BathInput) -> ClientResult<Bath> {
        self.data.read().check_session(session, "create_bath")?;
        Ok(self.add_bath(input))
    }

    async fn update_bath(
        &self,
        session: &Session,
        id: BathId,
        input: &BathInput,
    ) -> ClientResult<Bath> {
        let mut data = self.data.write();
        data.check_session(session, "update_bath")?;
        if !data.baths.contains_key(&id) {
            return Err(ClientError::not_found("Bath not found")
                .with_operation("update_bath")
                .with_entity("bath", id));
        }
        let bath = data.bath_from_input(id, input);
        data.baths.insert(id, bath.clone());
        Ok(bath)
    }

    async fn delete_bath(&self, session: &Session, id: BathId) -> ClientResult<()> {
        let mut data = self.data.write();
        data.check_session(session, "delete_bath")?;
        data.baths.remove(&id).map(|_| ()).ok_or_else(|| {
            ClientError::not_found("Bath not found")
                .with_operation("delete_bath")
                .with_entity("bath", id)
        })
    }

    async fn create_massage(
        &self,
        session: &Session,
        input: &MassageInput,
    ) -> ClientResult<Massage> {
        self.data.read().check_session(session, "create_massage")?;
        Ok(self.add_massage(input))
    }

    async fn update_massage(
        &self,
        session: &Session,
        id: MassageId,
        input: &MassageInput,
    ) -> ClientResult<Massage> {
        let mut data = self.data.write();
        data.check_session(session, "update_massage")?;
        let massage = data.massages.get_mut(&id).ok_or_else(|| {
            ClientError::not_found("Massage not found")
                .with_operation("update_massage")
                .with_entity("massage", id)
        })?;
        massage.name = input.name.clone();
        massage.description = input.description.clone();
        massage.cost = input.cost;
        Ok(massage.clone())
    }

    async fn delete_massage(&self, session: &Session, id: MassageId) -> ClientResult<()> {
        let mut data = self.data.write();
        data.check_session(session, "delete_massage")?;
        data.massages.remove(&id).map(|_| ()).ok_or_else(|| {
            ClientError::not_found("Massage not found")
                .with_operation("delete_massage")
                .with_entity("massage", id)
        })
    }

    async fn create_broom(&self, session: &Session, input: &BroomInput) -> ClientResult<Broom> {
        self.data.read().check_session(session, "create_broom")?;
        Ok(self.add_broom(input))
    }

    async fn update_broom(
        &self,
        session: &Session,
        id: BroomId,
        input: &BroomInput,
    ) -> ClientResult<Broom> {
        let mut data = self.data.write();
        data.check_session(session, "update_broom")?;
        let broom = data.brooms.get_mut(&id).ok_or_else(|| {
            ClientError::not_found("Broom not found")
                .with_operation("update_broom")
                .with_entity("broom", id)
        })?;
        broom.name = input.name.clone();
        broom.price = input.price;
        broom.quantity = input.quantity;
        Ok(broom.clone())
    }

    async fn delete_broom(&self, session: &Session, id: BroomId) -> ClientResult<()> {
        let mut data = self.data.write();
        data.check_session(session, "delete_broom")?;
        data.brooms.remove(&id).map(|_| ()).ok_or_else(|| {
            ClientError::not_found("Broom not found")
                .with_operation("delete_broom")
                .with_entity("broom", id)
        })
    }

    async fn create_menu_item(
        &self,
        session: &Session,
        input: &MenuItemInput,
    ) -> ClientResult<MenuItem> {
        self.data.read().check_session(session, "create_menu_item")?;
        self.add_menu_item(input)
            .map_err(|e| e.with_operation("create_menu_item"))
    }

    async fn update_menu_item(
        &self,
        session: &Session,
        id: MenuItemId,
        input: &MenuItemInput,
    ) -> ClientResult<MenuItem> {
        let mut data = self.data.write();
        data.check_session(session, "update_menu_item")?;
        if !data.menu_items.contains_key(&id) {
            return Err(ClientError::not_found("Menu item not found")
                .with_operation("update_menu_item")
                .with_entity("menu_item", id));
        }
        let item = data
            .menu_item_from_input(id, input)
            .map_err(|e| e.with_operation("update_menu_item"))?;
        data.menu_items.insert(id, item.clone());
        Ok(item)
    }

    async fn delete_menu_item(&self, session: &Session, id: MenuItemId) -> ClientResult<()> {
        let mut data = self.data.write();
        data.check_session(session, "delete_menu_item")?;
        data.menu_items.remove(&id).map(|_| ()).ok_or_else(|| {
            ClientError::not_found("Menu item not found")
                .with_operation("delete_menu_item")
                .with_entity("menu_item", id)
        })
    }

    async fn create_menu_category(
        &self,
        session: &Session,
        input: &MenuCategoryInput,
    ) -> ClientResult<MenuCategory> {
        self.data.read().check_session(session, "create_menu_category")?;
        Ok(self.add_menu_category(input))
    }

    async fn update_menu_category(
        &self,
        session: &Session,
        id: MenuCategoryId,
        input: &MenuCategoryInput,
    ) -> ClientResult<MenuCategory> {
        let mut data = self.data.write();
        data.check_session(session, "update_menu_category")?;
        let category = data.categories.get_mut(&id).ok_or_else(|| {
            ClientError::not_found("Category not found")
                .with_operation("update_menu_category")
                .with_entity("menu_category", id)
        })?;
        category.slug = input.slug.clone();
        category.name = input.name.clone();
        category.order = input.order;
        Ok(category.clone())
    }

    async fn delete_menu_category(
        &self,
        session: &Session,
        id: MenuCategoryId,
    ) -> ClientResult<()> {
        let mut data = self.data.write();
        data.check_session(session, "delete_menu_category")?;
        data.categories.remove(&id).map(|_| ()).ok_or_else(|| {
            ClientError::not_found("Category not found")
                .with_operation("delete_menu_category")
                .with_entity("menu_category", id)
        })
    }
}

#[cfg(test)]
#[path = "local_tests.rs"]
mod local_tests;
