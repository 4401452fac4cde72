//! HTTP gateway for the banya front-end core.
//!
//! A thin axum service that serves the computed views (day grid, receipts,
//! kitchen menu) as JSON and forwards public bookings and logins to the
//! configured API backend. It keeps no session state: the caller's
//! `Authorization: Bearer` header becomes the [`Session`] of each request.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Query parsing, Authorization -> Session                │
//! │  - CORS, compression, tracing, error mapping              │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Views (scheduler, services)                              │
//! │  - build_grid, compute_receipt, KitchenMenu, BookingForm  │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  API client (client/)                                     │
//! │  - HttpApiClient / LocalApi behind FullApi                │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! [`Session`]: crate::client::Session

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
