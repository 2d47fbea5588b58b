//! HTTP layer shared by the IP fetcher and the notifier.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])

mod client;
mod error;
mod types;

#[cfg(test)]
mod types_tests;

pub use client::ReqwestClient;
pub use error::HttpError;
pub use types::{HttpClient, HttpRequest, HttpResponse};
