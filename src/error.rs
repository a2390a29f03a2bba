// SPDX-License-Identifier: GPL-3.0-only

use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong while talking to the catalog or the
/// on-disk favorites snapshot.
#[derive(Debug, Error)]
pub enum WildError {
    /// The remote answered with a non-2xx status.
    #[error("request failed with status {status}: {body}")]
    Transport { status: StatusCode, body: String },

    /// The request never completed: connection, timeout or body read failure.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The remote reports no entry under the requested name.
    #[error("no catalog entry named '{0}'")]
    NotFound(String),

    /// Reading or writing the favorites snapshot failed.
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// A body or snapshot did not match the expected shape.
    #[error("malformed data: {0}")]
    Decode(#[from] serde_json::Error),

    /// The base address or a joined request path is not a valid URL.
    #[error("invalid url: {0}")]
    BadUrl(#[from] url::ParseError),
}

impl WildError {
    /// Whether this error means the entry simply does not exist,
    /// as opposed to the lookup itself failing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, WildError::NotFound(_))
    }
}
