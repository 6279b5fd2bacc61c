//! Schedule fetching.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  ScheduleCache / ScheduleCoordinator                     │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │ FetchRequest
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  FetchClient trait (client.rs)                           │
//! └───────────────────┬─────────────────────────────────────┘
//!          ┌──────────┴───────────┐
//!   HttpFetchClient         LocalFetchClient
//!   (remote API)            (in-memory)
//! ```
//!
//! - `request`: fetch identity and query parameters
//! - `config`: TOML / environment configuration
//! - `factory`: builds the configured client

pub mod client;
pub mod clients;
pub mod config;
pub mod error;
pub mod factory;
pub mod request;

pub use client::FetchClient;
#[cfg(feature = "http-client")]
pub use clients::HttpFetchClient;
pub use clients::LocalFetchClient;
pub use config::{ClientConfig, ClientSettings, HttpSettings};
pub use error::{ErrorContext, FetchError, FetchResult};
pub use factory::{ClientFactory, ClientType};
pub use request::{FetchKey, FetchRequest};
