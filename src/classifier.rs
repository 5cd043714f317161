// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Veridian

//! Error classification for non-2xx responses.
//!
//! Classification is a pure function from (status, body) to a typed
//! [`Error`] outcome, never a thrown control structure. A default mapping
//! covers the common status classes; each operation may layer an override
//! table on top, because the same status can mean different things at
//! different endpoints (a 422 on activation is an unknown activation code,
//! a 422 on creation is a bad payload).

use serde_json::Value;

use crate::error::Error;

/// Outcome kinds a classifier can produce from a non-2xx response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    NotFound,
    Service,
}

impl ErrorKind {
    fn into_error(self, status: u16, message: String) -> Error {
        match self {
            ErrorKind::Validation => Error::Validation { status, message },
            ErrorKind::Conflict => Error::Conflict { status, message },
            ErrorKind::NotFound => Error::NotFound { status, message },
            ErrorKind::Service => Error::Service { status, message },
        }
    }
}

/// Per-operation override entry: status code, outcome kind, and a message
/// used when the response body does not carry one.
pub type Override = (u16, ErrorKind, &'static str);

/// Status/body to outcome mapping with per-operation overrides.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorClassifier {
    overrides: &'static [Override],
}

impl ErrorClassifier {
    /// Classifier with only the default status mapping.
    pub const fn new() -> Self {
        Self { overrides: &[] }
    }

    /// Classifier that consults `overrides` before the default mapping.
    pub const fn with_overrides(overrides: &'static [Override]) -> Self {
        Self { overrides }
    }

    /// Map a non-2xx response to a typed outcome.
    pub fn classify(&self, status: u16, body: &[u8]) -> Error {
        let body_message = extract_message(body);

        if let Some((_, kind, fallback)) = self
            .overrides
            .iter()
            .find(|(code, _, _)| *code == status)
        {
            let message = body_message.unwrap_or_else(|| (*fallback).to_string());
            return kind.into_error(status, message);
        }

        let kind = match status {
            404 => ErrorKind::NotFound,
            409 => ErrorKind::Conflict,
            400 | 422 => ErrorKind::Validation,
            _ => ErrorKind::Service,
        };
        let message =
            body_message.unwrap_or_else(|| "the service returned an error".to_string());
        kind.into_error(status, message)
    }
}

/// Pull a human-readable message out of a structured error body.
///
/// The service is not consistent about the field name, so `error`,
/// `message`, and `description` are all accepted; a non-JSON body falls
/// back to its raw text.
fn extract_message(body: &[u8]) -> Option<String> {
    if body.is_empty() {
        return None;
    }

    if let Ok(parsed) = serde_json::from_slice::<Value>(body) {
        for field in ["error", "message", "description"] {
            if let Some(message) = parsed.get(field).and_then(Value::as_str) {
                return Some(message.to_string());
            }
        }
        return None;
    }

    let text = String::from_utf8_lossy(body).trim().to_string();
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mapping_covers_status_classes() {
        let classifier = ErrorClassifier::new();
        assert!(matches!(
            classifier.classify(404, b""),
            Error::NotFound { .. }
        ));
        assert!(matches!(
            classifier.classify(409, b""),
            Error::Conflict { .. }
        ));
        assert!(matches!(
            classifier.classify(422, b""),
            Error::Validation { .. }
        ));
        assert!(matches!(
            classifier.classify(500, b""),
            Error::Service { .. }
        ));
    }

    #[test]
    fn overrides_take_precedence_over_defaults() {
        const OVERRIDES: &[Override] =
            &[(422, ErrorKind::NotFound, "activation code not recognized")];
        let classifier = ErrorClassifier::with_overrides(OVERRIDES);

        let outcome = classifier.classify(422, b"");
        assert!(matches!(outcome, Error::NotFound { status: 422, .. }));
    }

    #[test]
    fn same_status_classifies_differently_per_operation() {
        const CREATE: &[Override] = &[(422, ErrorKind::Validation, "payload rejected")];
        const ACTIVATE: &[Override] = &[(422, ErrorKind::NotFound, "unknown code")];

        assert!(matches!(
            ErrorClassifier::with_overrides(CREATE).classify(422, b""),
            Error::Validation { .. }
        ));
        assert!(matches!(
            ErrorClassifier::with_overrides(ACTIVATE).classify(422, b""),
            Error::NotFound { .. }
        ));
    }

    #[test]
    fn structured_body_message_is_preferred() {
        let classifier = ErrorClassifier::new();
        let outcome = classifier.classify(409, br#"{"error":"device already bound"}"#);
        match outcome {
            Error::Conflict { message, .. } => assert_eq!(message, "device already bound"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn body_message_beats_override_fallback() {
        const OVERRIDES: &[Override] = &[(409, ErrorKind::Conflict, "fallback")];
        let classifier = ErrorClassifier::with_overrides(OVERRIDES);
        let outcome = classifier.classify(409, br#"{"message":"from the body"}"#);
        match outcome {
            Error::Conflict { message, .. } => assert_eq!(message, "from the body"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn raw_text_body_is_used_verbatim() {
        let classifier = ErrorClassifier::new();
        let outcome = classifier.classify(503, b"upstream unavailable");
        match outcome {
            Error::Service { message, .. } => assert_eq!(message, "upstream unavailable"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
