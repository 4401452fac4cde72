//! Reservation board: the admin day view.
//!
//! Holds the selected date and the last successful load behind a shared
//! lock. Every fetch is tagged with a [`FetchTicket`]; a response whose
//! ticket is no longer current is dropped, so a slow load for a previous
//! date never overwrites the grid for the date now selected.

use std::sync::Arc;

use chrono::NaiveDate;
use log::{debug, warn};
use parking_lot::RwLock;
use serde::Serialize;

use crate::api::{BathId, ReservationId};
use crate::client::{
    AdminApi, CatalogApi, ClientError, ClientResult, FullApi, ReservationFilter, Session,
};
use crate::models::{Bath, Reservation, ReservationPayload};
use crate::scheduler::{build_grid, GridModel};
use crate::services::receipt::{compute_receipt, ReceiptBreakdown};

/// Identifies one load of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// A newer fetch was started after this one; the result was dropped.
    Stale,
}

/// Baths and reservations for one day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayData {
    pub baths: Vec<Bath>,
    pub reservations: Vec<Reservation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadState {
    Idle,
    Loading {
        date: NaiveDate,
    },
    Loaded {
        grid: GridModel,
        #[serde(skip)]
        data: DayData,
    },
    Failed {
        date: NaiveDate,
        message: String,
    },
}

impl LoadState {
    pub fn grid(&self) -> Option<&GridModel> {
        match self {
            Self::Loaded { grid, .. } => Some(grid),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}

/// Message shown when a create, update or delete is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct MutationAlert {
    pub message: String,
}

impl From<ClientError> for MutationAlert {
    fn from(err: ClientError) -> Self {
        Self {
            message: err.message().to_string(),
        }
    }
}

struct BoardState {
    date: NaiveDate,
    generation: u64,
    load: LoadState,
}

/// Admin reservation board for one session.
#[derive(Clone)]
pub struct ReservationBoard {
    api: Arc<dyn FullApi>,
    session: Session,
    state: Arc<RwLock<BoardState>>,
}

impl ReservationBoard {
    pub fn new(api: Arc<dyn FullApi>, session: Session, date: NaiveDate) -> Self {
        Self {
            api,
            session,
            state: Arc::new(RwLock::new(BoardState {
                date,
                generation: 0,
                load: LoadState::Idle,
            })),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.state.read().date
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Current load state.
    pub fn snapshot(&self) -> LoadState {
        self.state.read().load.clone()
    }

    /// Start a new load of the selected date, invalidating any in flight.
    pub fn begin_fetch(&self) -> FetchTicket {
        let mut state = self.state.write();
        state.generation += 1;
        state.load = LoadState::Loading { date: state.date };
        FetchTicket {
            generation: state.generation,
            date: state.date,
        }
    }

    /// Store the result of a fetch unless a newer one has been started.
    pub fn apply(&self, ticket: FetchTicket, result: ClientResult<DayData>) -> ApplyOutcome {
        let mut state = self.state.write();
        if ticket.generation != state.generation {
            debug!(
                "Dropping board load for {} (generation {}, current {})",
                ticket.date, ticket.generation, state.generation
            );
            return ApplyOutcome::Stale;
        }

        state.load = match result {
            Ok(data) => {
                let grid = build_grid(&data.baths, &data.reservations, ticket.date);
                LoadState::Loaded { grid, data }
            }
            Err(err) => {
                warn!("Failed to load reservations for {}: {}", ticket.date, err);
                LoadState::Failed {
                    date: ticket.date,
                    message: err.message().to_string(),
                }
            }
        };
        ApplyOutcome::Applied
    }

    pub async fn fetch_day(&self, date: NaiveDate) -> ClientResult<DayData> {
        fetch_day(self.api.as_ref(), &self.session, date).await
    }

    pub async fn refresh(&self) -> ApplyOutcome {
        let ticket = self.begin_fetch();
        let result = self.fetch_day(ticket.date).await;
        self.apply(ticket, result)
    }

    pub async fn select_date(&self, date: NaiveDate) -> ApplyOutcome {
        self.state.write().date = date;
        self.refresh().await
    }

    /// Receipt for a reservation on the loaded day.
    pub fn receipt(&self, id: ReservationId) -> Option<ReceiptBreakdown> {
        let state = self.state.read();
        let LoadState::Loaded { data, .. } = &state.load else {
            return None;
        };
        let reservation = data.reservations.iter().find(|r| r.reservation_id == id)?;
        Some(compute_receipt(
            reservation,
            find_bath(&data.baths, reservation.bath_id),
        ))
    }

    pub async fn create(&self, payload: &ReservationPayload) -> Result<Reservation, MutationAlert> {
        let created = self.api.create_reservation(&self.session, payload).await?;
        self.refresh().await;
        Ok(created)
    }

    pub async fn update(
        &self,
        id: ReservationId,
        payload: &ReservationPayload,
    ) -> Result<Reservation, MutationAlert> {
        let updated = self
            .api
            .update_reservation(&self.session, id, payload)
            .await?;
        self.refresh().await;
        Ok(updated)
    }

    pub async fn delete(&self, id: ReservationId) -> Result<(), MutationAlert> {
        self.api.delete_reservation(&self.session, id).await?;
        self.refresh().await;
        Ok(())
    }
}

/// Baths and reservations for `date`, fetched concurrently. Fails as a
/// whole if either call fails.
pub async fn fetch_day(api: &dyn FullApi, session: &Session, date: NaiveDate) -> ClientResult<DayData> {
    let filter = ReservationFilter::for_date(date);
    let (baths, reservations) = tokio::try_join!(
        api.list_baths(session),
        api.list_reservations(session, &filter),
    )?;
    debug!(
        "Fetched {} baths and {} reservations for {}",
        baths.len(),
        reservations.len(),
        date
    );
    Ok(DayData {
        baths,
        reservations,
    })
}

pub fn find_bath(baths: &[Bath], bath_id: BathId) -> Option<&Bath> {
    baths.iter().find(|b| b.bath_id == bath_id)
}
