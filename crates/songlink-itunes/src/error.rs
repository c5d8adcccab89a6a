// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ItunesError>;

#[derive(Debug, Error)]
pub enum ItunesError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid catalog base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Invalid response from iTunes Search API: {0}")]
    InvalidResponse(String),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },
}
