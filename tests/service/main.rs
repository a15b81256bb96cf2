//! Document service integration tests.
//!
//! - `basic`: request-level dispatch through `DocumentService` without a server.
//! - `transport_http`: full axum round trips driven by a reqwest client.

#[cfg(feature = "http")]
mod transport_http;
