//! Error types for quorumvault

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // === Client Errors ===
    #[error("Invalid or missing POST body")]
    InvalidInput(String),

    #[error("Client would make value decrease from {current} to {proposed}")]
    Regression { current: u64, proposed: u64 },

    // === Vault Errors ===
    #[error("Vault {vault} unreachable: {reason}")]
    VaultUnreachable { vault: String, reason: String },

    // === Quorum Errors ===
    #[error("No majority: only {agreeing}/{total} vaults agree, need {required}")]
    NoQuorum {
        agreeing: usize,
        required: usize,
        total: usize,
    },

    // === I/O Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    // === Config Errors ===
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // === Generic ===
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Convert to HTTP status code
    pub fn to_http_status(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            Error::InvalidInput(_) | Error::Regression { .. } => StatusCode::BAD_REQUEST,
            Error::InvalidConfig(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<config::ConfigError> for Error {
    fn from(e: config::ConfigError) -> Self {
        Error::InvalidConfig(e.to_string())
    }
}
