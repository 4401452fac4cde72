//! `HttpApiClient` against a stub REST API served on a local port.

mod support;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use banya_frontend::api::{BathId, ReservationId};
use banya_frontend::client::{
    AdminApi, CatalogApi, ClientError, HttpApiClient, LoginCredentials, ReservationFilter, Session,
};
use banya_frontend::services::ReservationBoard;
use serde_json::{json, Value};
use support::{date, payload};

#[derive(Clone, Default)]
struct Upstream {
    /// `Authorization` header of every request, in order
    auth: Arc<Mutex<Vec<Option<String>>>>,
    /// Query strings seen by the reservations endpoint
    queries: Arc<Mutex<Vec<Vec<(String, String)>>>>,
}

impl Upstream {
    fn record(&self, headers: &HeaderMap) {
        let value = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.auth.lock().unwrap().push(value);
    }

    fn auth_headers(&self) -> Vec<Option<String>> {
        self.auth.lock().unwrap().clone()
    }
}

async fn list_baths(State(up): State<Upstream>, headers: HeaderMap) -> Json<Value> {
    up.record(&headers);
    Json(json!([
        {"bath_id": 1, "name": "Russian", "cost": 2000, "base_guests": 4, "extra_guest_price": 300},
        {"bath_id": "not-a-number", "name": "Broken"},
        {"id": 2, "name": "Finnish", "cost": 1500.0}
    ]))
}

async fn list_reservations(
    State(up): State<Upstream>,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
) -> impl IntoResponse {
    up.record(&headers);
    up.queries.lock().unwrap().push(query);
    if !headers.contains_key("authorization") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Not authenticated"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!([
            {
                "reservation_id": 10,
                "bath_id": 1,
                "start_datetime": "2024-06-01T10:00:00",
                "end_datetime": "2024-06-01T11:30:00",
                "client_name": "Ivan",
                "guests": 2,
                "total_cost": 3000,
                "status": "confirmed"
            },
            {"reservation_id": 11, "bath_id": 1, "start_datetime": "yesterday"}
        ])),
    )
}

async fn create_reservation(State(up): State<Upstream>, headers: HeaderMap) -> impl IntoResponse {
    up.record(&headers);
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"detail": "Time overlaps an existing reservation"})),
    )
}

async fn update_reservation(State(up): State<Upstream>, headers: HeaderMap) -> impl IntoResponse {
    up.record(&headers);
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({"detail": [
            {"loc": ["body", "guests"], "msg": "field required"},
            {"loc": ["body", "bath_id"], "msg": "value is not a valid integer"}
        ]})),
    )
}

async fn login(State(up): State<Upstream>, headers: HeaderMap, body: Bytes) -> impl IntoResponse {
    up.record(&headers);
    let text = String::from_utf8_lossy(&body);
    if text.contains("name=\"username\"") && text.contains("secret") {
        (
            StatusCode::OK,
            Json(json!({"access_token": "tok-123", "token_type": "bearer"})),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Incorrect username or password"})),
        )
    }
}

async fn not_json(State(up): State<Upstream>, headers: HeaderMap) -> &'static str {
    up.record(&headers);
    "<html>maintenance</html>"
}

/// Serve the stub and return a client pointed at it.
async fn start_upstream() -> (HttpApiClient, Upstream) {
    let upstream = Upstream::default();
    let app = Router::new()
        .route("/api/baths/", get(list_baths))
        .route(
            "/api/admin/reservations/",
            get(list_reservations).post(create_reservation),
        )
        .route("/api/admin/reservations/{id}", put(update_reservation))
        .route("/api/admin/login", post(login))
        .route("/api/kitchen/", get(not_json))
        .with_state(upstream.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = HttpApiClient::new(&format!("http://{}/api", addr), Duration::from_secs(5)).unwrap();
    (client, upstream)
}

#[tokio::test]
async fn test_anonymous_requests_carry_no_authorization() {
    let (client, upstream) = start_upstream().await;

    client.list_baths(&Session::anonymous()).await.unwrap();
    client.list_baths(&Session::bearer("abc")).await.unwrap();

    assert_eq!(
        upstream.auth_headers(),
        vec![None, Some("Bearer abc".to_string())]
    );
}

#[tokio::test]
async fn test_malformed_records_are_skipped() {
    let (client, _) = start_upstream().await;

    let baths = client.list_baths(&Session::anonymous()).await.unwrap();
    let ids: Vec<BathId> = baths.iter().map(|b| b.bath_id).collect();
    assert_eq!(ids, vec![BathId::new(1), BathId::new(2)]);
    assert_eq!(baths[1].cost, 1500);
}

#[tokio::test]
async fn test_reservation_query_and_lenient_list() {
    let (client, upstream) = start_upstream().await;
    let session = Session::bearer("tok-123");

    let filter = ReservationFilter::for_date(date(2024, 6, 1)).with_bath(BathId::new(1));
    let reservations = client.list_reservations(&session, &filter).await.unwrap();
    assert_eq!(reservations.len(), 1);
    assert_eq!(reservations[0].reservation_id, ReservationId::new(10));

    let queries = upstream.queries.lock().unwrap().clone();
    assert_eq!(
        queries[0],
        vec![
            ("date".to_string(), "2024-06-01".to_string()),
            ("bath_id".to_string(), "1".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_status_codes_map_to_error_kinds() {
    let (client, _) = start_upstream().await;
    let filter = ReservationFilter::for_date(date(2024, 6, 1));

    let err = client
        .list_reservations(&Session::anonymous(), &filter)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized { .. }));
    assert_eq!(err.message(), "Not authenticated");
    assert_eq!(err.context().operation.as_deref(), Some("list_reservations"));
}

#[tokio::test]
async fn test_error_detail_is_surfaced() {
    let (client, _) = start_upstream().await;
    let session = Session::bearer("tok-123");
    let body = payload(BathId::new(1), "2024-06-01 10:00", "2024-06-01 11:00");

    let err = client.create_reservation(&session, &body).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation { .. }));
    assert_eq!(err.message(), "Time overlaps an existing reservation");

    let err = client
        .update_reservation(&session, ReservationId::new(10), &body)
        .await
        .unwrap_err();
    assert_eq!(
        err.message(),
        "field required; value is not a valid integer"
    );
    assert_eq!(err.context().entity_id.as_deref(), Some("10"));
}

#[tokio::test]
async fn test_login_posts_form_and_returns_session() {
    let (client, upstream) = start_upstream().await;

    let session = client
        .login(&LoginCredentials::new("admin", "secret"))
        .await
        .unwrap();
    assert_eq!(session.token(), Some("tok-123"));
    assert_eq!(upstream.auth_headers(), vec![None]);

    let err = client
        .login(&LoginCredentials::new("admin", "nope"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized { .. }));
}

#[tokio::test]
async fn test_non_json_body_is_decode_error() {
    let (client, _) = start_upstream().await;
    let err = client
        .list_menu_items(&Session::anonymous())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Decode { .. }));
}

#[tokio::test]
async fn test_unreachable_api_is_connection_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpApiClient::new(&format!("http://{}/api", addr), Duration::from_secs(2)).unwrap();
    let err = client.list_baths(&Session::anonymous()).await.unwrap_err();
    assert!(matches!(err, ClientError::Connection { .. }));
}

#[tokio::test]
async fn test_board_over_http_builds_grid() {
    let (client, _) = start_upstream().await;
    let board = ReservationBoard::new(
        Arc::new(client),
        Session::bearer("tok-123"),
        date(2024, 6, 1),
    );

    board.refresh().await;
    let state = board.snapshot();
    let grid = state.grid().unwrap();
    assert_eq!(grid.baths.len(), 2);
    assert!(grid.contains_reservation(ReservationId::new(10)));
    assert_eq!(grid.baths[0].blocks.len(), 2);
    assert!(grid.baths[0].blocks[1].is_cleaning());
}
