//! reqwest-backed implementation of [`ApiClient`](crate::ApiClient).

pub mod client;
pub mod error;

pub use client::HttpApiClient;
