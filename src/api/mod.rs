//! Typed client for the laboratory REST backend.

pub mod client;

pub use client::{ApiClient, LoginResponse};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Cannot reach backend at {0}")]
    Connection(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Backend returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Not authenticated")]
    Unauthorized,

    #[error("Failed to decode response: {0}")]
    Decode(String),
}
