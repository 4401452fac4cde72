//! REST API client over `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::api::{
    BathId, BookingId, BroomId, MassageId, MenuCategoryId, MenuItemId, ReservationId,
};
use crate::client::error::{ClientError, ClientResult, ErrorContext};
use crate::client::session::{LoginCredentials, Session, TokenResponse};
use crate::client::traits::{AdminApi, CatalogAdminApi, CatalogApi, ReservationFilter};
use crate::models::time::VENUE_DATE_FORMAT;
use crate::models::{
    Bath, BathInput, BookingRecord, BookingRequest, Broom, BroomInput, Massage, MassageInput,
    MenuCategory, MenuCategoryInput, MenuItem, MenuItemInput, Reservation, ReservationPayload,
    ReservationStatus,
};

/// Client for the venue's REST API.
///
/// ```ignore
/// let api = HttpApiClient::new("http://127.0.0.1:8000/api", Duration::from_secs(10))?;
/// let baths = api.list_baths(&Session::anonymous()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let mut normalized = base_url.trim().to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let base_url = Url::parse(&normalized).map_err(|e| {
            ClientError::Configuration {
                message: format!("Invalid API base URL: {}", e),
                context: ErrorContext::new("create_client").with_details(base_url.to_string()),
            }
        })?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> ClientResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::configuration(format!("Invalid path '{}': {}", path, e)))
    }

    /// Request with the session's bearer header, when it has one.
    fn request(&self, method: Method, path: &str, session: &Session) -> ClientResult<RequestBuilder> {
        let url = self.url(path)?;
        debug!("{} {}", method, url);
        let builder = self.http.request(method, url);
        Ok(match session.authorization_header() {
            Some(header) => builder.header(reqwest::header::AUTHORIZATION, header),
            None => builder,
        })
    }

    async fn execute(builder: RequestBuilder, operation: &str) -> ClientResult<Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::from(e).with_operation(operation))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_detail(&body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());
        debug!("{} failed with {}: {}", operation, status, message);
        Err(ClientError::from_status(status.as_u16(), message).with_operation(operation))
    }

    async fn fetch<T: DeserializeOwned>(builder: RequestBuilder, operation: &str) -> ClientResult<T> {
        let response = Self::execute(builder, operation).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::decode(e.to_string()).with_operation(operation))
    }

    /// Decode a list element by element, skipping records that do not fit.
    async fn fetch_list<T: DeserializeOwned>(
        builder: RequestBuilder,
        operation: &str,
    ) -> ClientResult<Vec<T>> {
        let value: Value = Self::fetch(builder, operation).await?;
        decode_list(value, operation)
    }

    async fn fetch_empty(builder: RequestBuilder, operation: &str) -> ClientResult<()> {
        Self::execute(builder, operation).await.map(|_| ())
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        session: &Session,
        path: &str,
        operation: &str,
    ) -> ClientResult<Vec<T>> {
        Self::fetch_list(self.request(Method::GET, path, session)?, operation).await
    }

    async fn get_one<T: DeserializeOwned>(
        &self,
        session: &Session,
        path: &str,
        operation: &str,
    ) -> ClientResult<T> {
        Self::fetch(self.request(Method::GET, path, session)?, operation).await
    }

    async fn send_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        method: Method,
        session: &Session,
        path: &str,
        body: &B,
        operation: &str,
    ) -> ClientResult<T> {
        Self::fetch(self.request(method, path, session)?.json(body), operation).await
    }

    async fn delete(&self, session: &Session, path: &str, operation: &str) -> ClientResult<()> {
        Self::fetch_empty(self.request(Method::DELETE, path, session)?, operation).await
    }
}

/// Elements of a JSON array that decode as `T`; the rest are logged and
/// dropped. Anything but an array is a decode error.
pub(crate) fn decode_list<T: DeserializeOwned>(value: Value, operation: &str) -> ClientResult<Vec<T>> {
    let Value::Array(items) = value else {
        return Err(ClientError::Decode {
            message: "expected a JSON array".to_string(),
            context: ErrorContext::new(operation),
        });
    };

    let total = items.len();
    let decoded: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<T>(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("{}: skipping malformed record #{}: {}", operation, index, e);
                None
            }
        })
        .collect();

    if decoded.len() < total {
        debug!("{}: kept {} of {} records", operation, decoded.len(), total);
    }
    Ok(decoded)
}

/// The `detail` of an error body: a string, or the messages of a
/// validation error list.
pub(crate) fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(detail) => Some(detail.clone()),
        Value::Array(entries) => {
            let messages: Vec<&str> = entries
                .iter()
                .filter_map(|e| e.get("msg").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}

#[async_trait]
impl CatalogApi for HttpApiClient {
    async fn list_baths(&self, session: &Session) -> ClientResult<Vec<Bath>> {
        self.get_list(session, "baths/", "list_baths").await
    }

    async fn get_bath(&self, session: &Session, id: BathId) -> ClientResult<Bath> {
        self.get_one(session, &format!("baths/{}", id), "get_bath")
            .await
            .map_err(|e| e.with_entity("bath", id))
    }

    async fn list_massages(&self, session: &Session) -> ClientResult<Vec<Massage>> {
        self.get_list(session, "massages", "list_massages").await
    }

    async fn get_massage(&self, session: &Session, id: MassageId) -> ClientResult<Massage> {
        self.get_one(session, &format!("massages/{}", id), "get_massage")
            .await
            .map_err(|e| e.with_entity("massage", id))
    }

    async fn list_brooms(&self, session: &Session) -> ClientResult<Vec<Broom>> {
        self.get_list(session, "brooms/", "list_brooms").await
    }

    async fn get_broom(&self, session: &Session, id: BroomId) -> ClientResult<Broom> {
        self.get_one(session, &format!("brooms/{}", id), "get_broom")
            .await
            .map_err(|e| e.with_entity("broom", id))
    }

    async fn list_menu_items(&self, session: &Session) -> ClientResult<Vec<MenuItem>> {
        self.get_list(session, "kitchen/", "list_menu_items").await
    }

    async fn list_menu_categories(&self, session: &Session) -> ClientResult<Vec<MenuCategory>> {
        self.get_list(session, "kitchen/categories", "list_menu_categories")
            .await
    }

    async fn create_booking(
        &self,
        session: &Session,
        request: &BookingRequest,
    ) -> ClientResult<BookingRecord> {
        self.send_json(Method::POST, session, "bookings/", request, "create_booking")
            .await
    }
}

#[async_trait]
impl AdminApi for HttpApiClient {
    async fn login(&self, credentials: &LoginCredentials) -> ClientResult<Session> {
        let form = reqwest::multipart::Form::new()
            .text("username", credentials.username.clone())
            .text("password", credentials.password.clone());
        let builder = self
            .request(Method::POST, "admin/login", &Session::anonymous())?
            .multipart(form);
        let token: TokenResponse = Self::fetch(builder, "login").await?;
        Ok(Session::bearer(token.access_token))
    }

    async fn list_reservations(
        &self,
        session: &Session,
        filter: &ReservationFilter,
    ) -> ClientResult<Vec<Reservation>> {
        let mut query = vec![("date", filter.date.format(VENUE_DATE_FORMAT).to_string())];
        if let Some(bath_id) = filter.bath_id {
            query.push(("bath_id", bath_id.to_string()));
        }
        let builder = self
            .request(Method::GET, "admin/reservations/", session)?
            .query(&query);
        Self::fetch_list(builder, "list_reservations").await
    }

    async fn create_reservation(
        &self,
        session: &Session,
        payload: &ReservationPayload,
    ) -> ClientResult<Reservation> {
        self.send_json(
            Method::POST,
            session,
            "admin/reservations/",
            payload,
            "create_reservation",
        )
        .await
    }

    async fn update_reservation(
        &self,
        session: &Session,
        id: ReservationId,
        payload: &ReservationPayload,
    ) -> ClientResult<Reservation> {
        self.send_json(
            Method::PUT,
            session,
            &format!("admin/reservations/{}", id),
            payload,
            "update_reservation",
        )
        .await
        .map_err(|e| e.with_entity("reservation", id))
    }

    async fn delete_reservation(&self, session: &Session, id: ReservationId) -> ClientResult<()> {
        self.delete(session, &format!("admin/reservations/{}", id), "delete_reservation")
            .await
            .map_err(|e| e.with_entity("reservation", id))
    }

    async fn list_reservation_statuses(
        &self,
        session: &Session,
    ) -> ClientResult<Vec<ReservationStatus>> {
        self.get_list(session, "admin/reservation-status/", "list_reservation_statuses")
            .await
    }

    async fn list_bookings(&self, session: &Session) -> ClientResult<Vec<BookingRecord>> {
        self.get_list(session, "bookings/", "list_bookings").await
    }

    async fn mark_booking_read(
        &self,
        session: &Session,
        id: BookingId,
    ) -> ClientResult<BookingRecord> {
        Self::fetch(
            self.request(Method::PUT, &format!("bookings/{}/mark-read", id), session)?,
            "mark_booking_read",
        )
        .await
        .map_err(|e| e.with_entity("booking", id))
    }
}

#[async_trait]
impl CatalogAdminApi for HttpApiClient {
    async fn create_bath(&self, session: &Session, input: &BathInput) -> ClientResult<Bath> {
        self.send_json(Method::POST, session, "baths/", input, "create_bath")
            .await
    }

    async fn update_bath(
        &self,
        session: &Session,
        id: BathId,
        input: &BathInput,
    ) -> ClientResult<Bath> {
        self.send_json(Method::PUT, session, &format!("baths/{}", id), input, "update_bath")
            .await
            .map_err(|e| e.with_entity("bath", id))
    }

    async fn delete_bath(&self, session: &Session, id: BathId) -> ClientResult<()> {
        self.delete(session, &format!("baths/{}", id), "delete_bath")
            .await
            .map_err(|e| e.with_entity("bath", id))
    }

    async fn create_massage(
        &self,
        session: &Session,
        input: &MassageInput,
    ) -> ClientResult<Massage> {
        self.send_json(Method::POST, session, "massages/", input, "create_massage")
            .await
    }

    async fn update_massage(
        &self,
        session: &Session,
        id: MassageId,
        input: &MassageInput,
    ) -> ClientResult<Massage> {
        self.send_json(
            Method::PUT,
            session,
            &format!("massages/{}", id),
            input,
            "update_massage",
        )
        .await
        .map_err(|e| e.with_entity("massage", id))
    }

    async fn delete_massage(&self, session: &Session, id: MassageId) -> ClientResult<()> {
        self.delete(session, &format!("massages/{}", id), "delete_massage")
            .await
            .map_err(|e| e.with_entity("massage", id))
    }

    async fn create_broom(&self, session: &Session, input: &BroomInput) -> ClientResult<Broom> {
        self.send_json(Method::POST, session, "brooms/", input, "create_broom")
            .await
    }

    async fn update_broom(
        &self,
        session: &Session,
        id: BroomId,
        input: &BroomInput,
    ) -> ClientResult<Broom> {
        self.send_json(Method::PUT, session, &format!("brooms/{}", id), input, "update_broom")
            .await
            .map_err(|e| e.with_entity("broom", id))
    }

    async fn delete_broom(&self, session: &Session, id: BroomId) -> ClientResult<()> {
        self.delete(session, &format!("brooms/{}", id), "delete_broom")
            .await
            .map_err(|e| e.with_entity("broom", id))
    }

    async fn create_menu_item(
        &self,
        session: &Session,
        input: &MenuItemInput,
    ) -> ClientResult<MenuItem> {
        self.send_json(Method::POST, session, "kitchen/", input, "create_menu_item")
            .await
    }

    async fn update_menu_item(
        &self,
        session: &Session,
        id: MenuItemId,
        input: &MenuItemInput,
    ) -> ClientResult<MenuItem> {
        self.send_json(
            Method::PUT,
            session,
            &format!("kitchen/{}", id),
            input,
            "update_menu_item",
        )
        .await
        .map_err(|e| e.with_entity("menu_item", id))
    }

    async fn delete_menu_item(&self, session: &Session, id: MenuItemId) -> ClientResult<()> {
        self.delete(session, &format!("kitchen/{}", id), "delete_menu_item")
            .await
            .map_err(|e| e.with_entity("menu_item", id))
    }

    async fn create_menu_category(
        &self,
        session: &Session,
        input: &MenuCategoryInput,
    ) -> ClientResult<MenuCategory> {
        self.send_json(
            Method::POST,
            session,
            "kitchen/categories",
            input,
            "create_menu_category",
        )
        .await
    }

    async fn update_menu_category(
        &self,
        session: &Session,
        id: MenuCategoryId,
        input: &MenuCategoryInput,
    ) -> ClientResult<MenuCategory> {
        self.send_json(
            Method::PUT,
            session,
            &format!("kitchen/categories/{}", id),
            input,
            "update_menu_category",
        )
        .await
        .map_err(|e| e.with_entity("menu_category", id))
    }

    async fn delete_menu_category(
        &self,
        session: &Session,
        id: MenuCategoryId,
    ) -> ClientResult<()> {
        self.delete(
            session,
            &format!("kitchen/categories/{}", id),
            "delete_menu_category",
        )
        .await
        .map_err(|e| e.with_entity("menu_category", id))
    }
}
