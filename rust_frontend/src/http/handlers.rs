//! HTTP handlers for the gateway.
//!
//! Each handler turns the request into a [`Session`] plus typed arguments,
//! calls the backend through [`FullApi`](crate::client::FullApi) and returns
//! the computed view.

use axum::{
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    Json,
};
use chrono::{Local, NaiveDate};

use super::dto::{
    BookingFormRequest, BookingRecord, DateQuery, GridModel, HealthResponse, KitchenMenu,
    LoginCredentials, ReceiptBreakdown, TokenResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::ReservationId;
use crate::client::{AdminApi, CatalogApi, Session};
use crate::scheduler::build_grid;
use crate::services::board::{fetch_day, find_bath};
use crate::services::{compute_receipt, BookingForm};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// The caller's bearer token, or an anonymous session.
pub fn session_from_headers(headers: &HeaderMap) -> Session {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(Session::from_authorization)
        .unwrap_or_default()
}

fn date_or_today(query: &DateQuery) -> NaiveDate {
    query.date.unwrap_or_else(|| Local::now().date_naive())
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let backend = match state.api.list_baths(&Session::anonymous()).await {
        Ok(_) => "ok".to_string(),
        Err(e) => format!("error: {}", e.message()),
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        backend,
    })
}

// =============================================================================
// Reservation board
// =============================================================================

/// GET /v1/schedule?date=YYYY-MM-DD
///
/// Day grid for every bath. Needs an admin session.
pub async fn get_schedule(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DateQuery>,
) -> HandlerResult<GridModel> {
    let session = session_from_headers(&headers);
    let date = date_or_today(&query);
    let day = fetch_day(state.api.as_ref(), &session, date).await?;
    Ok(Json(build_grid(&day.baths, &day.reservations, date)))
}

/// GET /v1/reservations/{id}/receipt?date=YYYY-MM-DD
///
/// `date` is the day the reservation is listed under.
pub async fn get_receipt(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(reservation_id): Path<i64>,
    Query(query): Query<DateQuery>,
) -> HandlerResult<ReceiptBreakdown> {
    let session = session_from_headers(&headers);
    let date = date_or_today(&query);
    let id = ReservationId::new(reservation_id);

    let day = fetch_day(state.api.as_ref(), &session, date).await?;
    let reservation = day
        .reservations
        .iter()
        .find(|r| r.reservation_id == id)
        .ok_or_else(|| {
            AppError::NotFound(format!("Reservation {} not found on {}", id, date))
        })?;

    Ok(Json(compute_receipt(
        reservation,
        find_bath(&day.baths, reservation.bath_id),
    )))
}

// =============================================================================
// Public pages
// =============================================================================

/// GET /v1/kitchen
pub async fn get_kitchen(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> HandlerResult<KitchenMenu> {
    let session = session_from_headers(&headers);
    let (categories, items) = tokio::try_join!(
        state.api.list_menu_categories(&session),
        state.api.list_menu_items(&session),
    )?;
    Ok(Json(KitchenMenu::build(
        categories,
        items,
        &state.kitchen.default_category,
    )))
}

/// POST /v1/bookings
///
/// Validates the public booking form, then forwards it.
pub async fn create_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<BookingFormRequest>,
) -> Result<(StatusCode, Json<BookingRecord>), AppError> {
    let session = session_from_headers(&headers);
    let booking = BookingForm::from(request).validate()?;
    let record = state.api.create_booking(&session, &booking).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// POST /v1/login
pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<LoginCredentials>,
) -> HandlerResult<TokenResponse> {
    if credentials.username.trim().is_empty() {
        return Err(AppError::BadRequest("Username is required".to_string()));
    }

    let session = state.api.login(&credentials).await?;
    let access_token = session
        .token()
        .map(str::to_string)
        .ok_or_else(|| AppError::BadRequest("Backend returned no token".to_string()))?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: Some("bearer".to_string()),
    }))
}
