/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use std::io;
use thiserror::Error;

/// Error conditions that can be returned
#[derive(Error, Debug)]
pub enum OnfidoError {
    #[error("I/O error")]
    Io(#[from] io::Error),

    #[error("Request network error")]
    Request(#[from] reqwest::Error),

    #[error("Request was cancelled")]
    Cancelled,

    #[error("Failed building request body: {0}")]
    Encoding(String),

    #[error("Deserialization error")]
    Deserialization(#[from] serde_json::Error),

    #[error("URL Parse error")]
    UrlParsing(#[from] url::ParseError),

    #[error("API Response was error: {status}, type: {error_type:?}, msg: {message}")]
    ApiResponse {
        status: u16,
        error_type: Option<String>,
        message: String,
    },

    #[error("Pager has no current item")]
    NoCurrentItem,

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl OnfidoError {
    /// True when the error came from the caller's cancellation token
    pub fn is_cancelled(&self) -> bool {
        matches!(self, OnfidoError::Cancelled)
    }

    /// HTTP status of a server error
    pub fn status(&self) -> Option<u16> {
        match self {
            OnfidoError::ApiResponse { status, .. } => Some(*status),
            OnfidoError::Request(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
