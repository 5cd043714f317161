// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Veridian

//! SDK error taxonomy.
//!
//! Every operation resolves to either a verified, transformed payload or one
//! of these variants. Status-bearing variants (`Validation`, `Conflict`,
//! `NotFound`, `Service`) are produced by the [classifier](crate::classifier)
//! from non-2xx responses; the rest surface transport, signing, polling, and
//! local decoding failures.

use std::time::Duration;

/// Errors returned by SDK operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Connection, DNS, or TLS failure before a response was obtained.
    /// Never retried inside a single call.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response signature was absent or did not match the signature
    /// recomputed from the raw response bytes. Always fatal to the call;
    /// the response body is never exposed.
    #[error("the response signature failed validation")]
    SignatureInvalid,

    /// The service rejected the request payload.
    #[error("validation failed (status {status}): {message}")]
    Validation { status: u16, message: String },

    /// The request conflicts with existing server-side state.
    #[error("conflict (status {status}): {message}")]
    Conflict { status: u16, message: String },

    /// The requested resource does not exist (or does not exist yet, for
    /// resources observed through polling).
    #[error("not found (status {status}): {message}")]
    NotFound { status: u16, message: String },

    /// Any other non-2xx response.
    #[error("service error (status {status}): {message}")]
    Service { status: u16, message: String },

    /// The polling budget elapsed without a successful resolution.
    #[error("polling timed out after {0:?}")]
    Timeout(Duration),

    /// Invalid client configuration (unknown environment, malformed
    /// credential token, unusable base URL).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A verified response body could not be decoded into the expected shape.
    #[error("response body could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    /// A request URL could not be assembled.
    #[error("invalid request url: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// HTTP status carried by classified outcomes, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Validation { status, .. }
            | Error::Conflict { status, .. }
            | Error::NotFound { status, .. }
            | Error::Service { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this outcome is a not-found classification.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classified_outcomes_carry_their_status() {
        let err = Error::Conflict {
            status: 409,
            message: "already bound".to_string(),
        };
        assert_eq!(err.status(), Some(409));
        assert!(!err.is_not_found());
    }

    #[test]
    fn timeout_carries_the_budget() {
        let err = Error::Timeout(Duration::from_millis(120));
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("120ms"));
    }

    #[test]
    fn not_found_is_detectable_for_poll_filters() {
        let err = Error::NotFound {
            status: 404,
            message: "no paired code".to_string(),
        };
        assert!(err.is_not_found());
    }
}
