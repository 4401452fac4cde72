//! API client layer.
//!
//! Every screen is a thin view over the venue's REST API. This module
//! abstracts that API behind async traits so views can run against the real
//! server or an in-memory copy.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Views (services::board, http gateway)                   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │  &Session on every call
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Client traits (traits.rs)                               │
//! │  CatalogApi / AdminApi / CatalogAdminApi => FullApi      │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴───────────────┐
//!     │ HttpApiClient │   LocalApi    │
//!     │  (reqwest)    │  (in-memory)  │
//!     └───────────────┴───────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use banya_frontend::client::{ApiFactory, LoginCredentials, Session};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = ApiFactory::from_env()?;
//!     let session = api.login(&LoginCredentials::new("admin", "secret")).await?;
//!     let statuses = api.list_reservation_statuses(&session).await?;
//!     Ok(())
//! }
//! ```

pub mod backends;
pub mod config;
pub mod error;
pub mod factory;
pub mod session;
pub mod traits;

pub use backends::{HttpApiClient, LocalApi};
pub use config::{ApiSettings, ConfigError, FrontendConfig, GatewaySettings, KitchenSettings};
pub use error::{ClientError, ClientResult, ErrorContext};
pub use factory::{ApiBackend, ApiFactory};
pub use session::{LoginCredentials, Session, TokenResponse};
pub use traits::{AdminApi, CatalogAdminApi, CatalogApi, FullApi, ReservationFilter};
