//! Fetch client implementations.

#[cfg(feature = "http-client")]
pub mod http;
pub mod local;

#[cfg(feature = "http-client")]
pub use http::HttpFetchClient;
pub use local::LocalFetchClient;
