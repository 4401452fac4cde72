//! # Banya front-end core
//!
//! View logic for a bathhouse booking front-end: the admin day schedule
//! grid, per-reservation receipts, the kitchen menu and the public booking
//! form, plus a typed client for the bathhouse REST API.
//!
//! ## Features
//!
//! - **Schedule grid**: half-hour slots from 09:00 to midnight, reservations
//!   bound to baths, synthesized cleaning blocks, overlap reporting
//! - **Receipts**: add-ons by category, extra-guest surcharge, venue cost
//!   reconciled against the bath's hourly rate
//! - **API client**: explicit sessions, lenient list decoding, an in-memory
//!   backend that applies the server's booking rules
//! - **HTTP gateway**: the computed views served as JSON (feature
//!   `http-server`)
//!
//! ## Architecture
//!
//! - [`api`]: identifier newtypes and the public view-model types
//! - [`models`]: wire types of the REST API
//! - [`scheduler`]: pure grid construction
//! - [`services`]: receipts, forms, kitchen menu, reservation board, inbox
//! - [`client`]: API traits, HTTP and in-memory backends, configuration
//! - [`http`]: axum gateway and request handlers

// ClientError carries a context struct in every variant.
#![allow(clippy::result_large_err)]

pub mod api;
pub mod client;
pub mod models;
pub mod scheduler;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;

#[cfg(test)]
mod test_support;
