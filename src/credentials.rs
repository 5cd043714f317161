// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Veridian

//! API credential pair.
//!
//! The token identifies the relying party; the secret is the HMAC key shared
//! with the service. Both are immutable for the lifetime of a client. The
//! secret is key material only: it is never transmitted, never serialized,
//! and the `Debug` impl redacts it.

use std::fmt;

use base64ct::{Base64UrlUnpadded, Encoding};
use serde_json::Value;

use crate::error::Error;

/// Immutable token/secret pair issued by Veridian.
#[derive(Clone)]
pub struct ApiCredentials {
    token: String,
    secret: String,
}

impl ApiCredentials {
    pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            secret: secret.into(),
        }
    }

    /// The access token carried in the authorization header.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// HMAC key material. Crate-internal; callers never see the secret.
    pub(crate) fn secret(&self) -> &[u8] {
        self.secret.as_bytes()
    }

    /// Relying party identifier, read from the `sub` claim of the token's
    /// JWT payload.
    ///
    /// The payload is decoded without signature verification; the result is
    /// only used to assemble the web SDK configuration, never to make an
    /// authorization decision.
    pub fn relying_party_id(&self) -> Result<String, Error> {
        let payload = self
            .token
            .split('.')
            .nth(1)
            .ok_or_else(|| Error::Config("access token is not a valid JWT".to_string()))?;

        let decoded = Base64UrlUnpadded::decode_vec(payload)
            .map_err(|_| Error::Config("access token payload is not valid base64".to_string()))?;

        let claims: Value = serde_json::from_slice(&decoded)
            .map_err(|_| Error::Config("access token payload is not valid JSON".to_string()))?;

        claims
            .get("sub")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| Error::Config("access token payload has no sub claim".to_string()))
    }
}

impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("token", &self.token)
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // header `{"alg":"HS256"}`, payload `{"sub":"rp-id-123"}`, junk signature
    fn jwt_token() -> String {
        let header = Base64UrlUnpadded::encode_string(br#"{"alg":"HS256"}"#);
        let payload = Base64UrlUnpadded::encode_string(br#"{"sub":"rp-id-123"}"#);
        format!("{header}.{payload}.sig")
    }

    #[test]
    fn relying_party_id_reads_sub_claim() {
        let credentials = ApiCredentials::new(jwt_token(), "secret");
        assert_eq!(credentials.relying_party_id().unwrap(), "rp-id-123");
    }

    #[test]
    fn opaque_token_is_rejected() {
        let credentials = ApiCredentials::new("not-a-jwt", "secret");
        assert!(matches!(
            credentials.relying_party_id(),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn payload_without_sub_is_rejected() {
        let header = Base64UrlUnpadded::encode_string(br#"{"alg":"HS256"}"#);
        let payload = Base64UrlUnpadded::encode_string(br#"{"iss":"veridian"}"#);
        let credentials = ApiCredentials::new(format!("{header}.{payload}.sig"), "secret");
        assert!(credentials.relying_party_id().is_err());
    }

    #[test]
    fn debug_redacts_the_secret() {
        let credentials = ApiCredentials::new("token", "super-secret");
        let rendered = format!("{credentials:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
