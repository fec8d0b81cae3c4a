//! HTTP client module for the Velora backend.
//!
//! This module provides the `ApiClient` for the login and refresh
//! endpoints and for authenticated JSON requests. Authentication uses
//! bearer tokens minted by `POST /api/login` and renewed through
//! `POST /api/refresh`.

pub mod client;
pub mod error;

pub use client::{ApiClient, LoginResponse, RefreshResponse};
pub use error::ApiError;
