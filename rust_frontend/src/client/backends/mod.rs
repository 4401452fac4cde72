//! API client implementations.

pub mod http;
pub mod local;

pub use http::HttpApiClient;
pub use local::LocalApi;
