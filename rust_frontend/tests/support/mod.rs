//! Helpers shared by the integration suites.
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use banya_frontend::api::{BathId, StatusId};
use banya_frontend::client::{LocalApi, Session};
use banya_frontend::models::{Bath, BathInput, ReservationPayload};
use chrono::{NaiveDate, NaiveDateTime};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Restores the variables on unwind and serializes access to the process
/// environment across parallel tests.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// `"2024-06-01 10:00"`
pub fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
}

/// In-memory API with admin `admin`/`secret`, a session for it and one bath
/// at 2000/h for four guests, 300 per extra guest.
pub fn seeded_api() -> (LocalApi, Session, Bath) {
    let api = LocalApi::new().with_admin("admin", "secret");
    let session = api.issue_session();
    let bath = api.add_bath(&BathInput {
        name: "Russian".to_string(),
        title: "Russian banya".to_string(),
        cost: 2000,
        base_guests: 4,
        extra_guest_price: 300,
        ..BathInput::default()
    });
    (api, session, bath)
}

pub fn payload(bath_id: BathId, start: &str, end: &str) -> ReservationPayload {
    ReservationPayload {
        bath_id,
        start_datetime: at(start),
        end_datetime: at(end),
        client_name: "Ivan".to_string(),
        client_phone: "+7 900 000-00-00".to_string(),
        client_email: None,
        notes: None,
        guests: 2,
        status_id: StatusId::new(1),
        brooms: vec![],
        menu_items: vec![],
        massages: vec![],
    }
}
