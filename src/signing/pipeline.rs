// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Veridian

//! Signing request pipeline.
//!
//! Turns a logical operation into a signed outbound request and a raw
//! response into a verified, transformed body. One call moves through
//! Building -> Signed -> Sent, then exactly one of Verified -> Transformed,
//! VerificationFailed, or NonSuccessStatus -> Classified.
//!
//! Only the method, path+query, body, and date header are signed; headers
//! attached after the canonical form is fixed (user-agent, content type)
//! do not affect the signature. Non-2xx responses bypass verification and
//! go straight to the operation's classifier, since the service does not
//! sign error bodies.
//!
//! The canonical message carries no nonce or expiry beyond the date header,
//! so the protocol authenticates but does not prevent replay. That matches
//! the counterpart service; do not add a nonce here.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{Client, Method};
use serde_json::Value;
use tracing::{debug, warn};

use crate::classifier::ErrorClassifier;
use crate::credentials::ApiCredentials;
use crate::error::Error;
use crate::signing::{canonical, hmac};
use crate::transform::{self, BodyTransform};

/// Value of the `user-agent` header. Not part of the signed canonical form.
pub const USER_AGENT: &str = "VeridianServerSdk/1.0";

/// Authorization scheme: `VERIDIAN <token>:<signature>`.
pub const AUTH_SCHEME: &str = "VERIDIAN";

/// Response header carrying the service-computed signature.
pub const SIGNATURE_HEADER: &str = "x-signature";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// A logical operation request before signing.
#[derive(Debug)]
pub struct RequestSpec {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub transform: BodyTransform,
    pub classifier: ErrorClassifier,
}

impl RequestSpec {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            transform: transform::identity,
            classifier: ErrorClassifier::new(),
        }
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Pure post-verification transform over the normalized body.
    pub fn transform(mut self, transform: BodyTransform) -> Self {
        self.transform = transform;
        self
    }

    /// Classifier consulted for non-2xx responses.
    pub fn classifier(mut self, classifier: ErrorClassifier) -> Self {
        self.classifier = classifier;
        self
    }
}

/// A fully assembled, signed, ready-to-send request.
#[derive(Debug)]
pub struct SignedRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<String>,
}

/// Outbound signing and inbound verification around one HTTPS client.
///
/// Immutable after construction; concurrent calls share it freely.
pub struct SigningPipeline {
    base_url: String,
    credentials: ApiCredentials,
    http: Client,
}

impl SigningPipeline {
    pub fn new(base_url: impl Into<String>, credentials: ApiCredentials) -> Result<Self, Error> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            base_url: base_url.into(),
            credentials,
            http,
        })
    }

    /// Run one signed round trip and return the verified, transformed body.
    pub async fn execute(&self, spec: RequestSpec) -> Result<Value, Error> {
        let date = http_date(Utc::now());
        let signed = self.prepare(&spec, &date)?;

        debug!(method = %signed.method, url = %signed.url, "dispatching signed request");

        let mut request = self.http.request(signed.method, &signed.url);
        for (name, value) in &signed.headers {
            request = request.header(*name, value);
        }
        if let Some(body) = signed.body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let signature = header_value(&response, SIGNATURE_HEADER);
        let response_date = header_value(&response, "date").unwrap_or_default();
        let body = response.bytes().await?;

        if !status.is_success() {
            debug!(status = status.as_u16(), path = %spec.path, "non-success status; classifying");
            return Err(spec.classifier.classify(status.as_u16(), &body));
        }

        self.verify_inbound(status.as_u16(), &response_date, signature.as_deref(), &body)?;

        let parsed = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body)?
        };
        Ok((spec.transform)(transform::normalize_keys(parsed)))
    }

    /// Assemble and sign an outbound request.
    ///
    /// `date` must be the exact value that will be transmitted in the `date`
    /// header; it is fixed before canonicalization so the signed form and
    /// the wire form cannot diverge.
    fn prepare(&self, spec: &RequestSpec, date: &str) -> Result<SignedRequest, Error> {
        let path_and_query = join_query(&spec.path, &spec.query);
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), path_and_query);

        let body = spec
            .body
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let message = canonical::request_message(
            spec.method.as_str(),
            &path_and_query,
            body.as_deref().map(str::as_bytes),
            date,
        );
        let signature = hmac::sign(&message, self.credentials.secret());

        let mut headers: Vec<(&'static str, String)> = vec![
            ("user-agent", USER_AGENT.to_string()),
            ("date", date.to_string()),
        ];
        if body.is_some() {
            headers.push(("content-type", "application/json".to_string()));
            headers.push(("accept", "application/json".to_string()));
        }
        headers.push((
            "authorization",
            format!("{AUTH_SCHEME} {}:{signature}", self.credentials.token()),
        ));

        Ok(SignedRequest {
            method: spec.method.clone(),
            url,
            headers,
            body,
        })
    }

    /// Check an inbound 2xx response against the signature the service sent.
    ///
    /// Runs over the raw bytes, before any parsing; an absent header is a
    /// mismatch, and a mismatch means the body is never exposed.
    fn verify_inbound(
        &self,
        status: u16,
        date: &str,
        signature: Option<&str>,
        body: &[u8],
    ) -> Result<(), Error> {
        let Some(signature) = signature else {
            warn!(status, "response carried no signature header");
            return Err(Error::SignatureInvalid);
        };

        let message = canonical::response_message(status, body, date);
        if hmac::verify(&message, self.credentials.secret(), signature) {
            Ok(())
        } else {
            warn!(status, "response signature mismatch; discarding body");
            Err(Error::SignatureInvalid)
        }
    }
}

fn http_date(now: DateTime<Utc>) -> String {
    now.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

fn header_value(response: &reqwest::Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

fn join_query(path: &str, query: &[(String, String)]) -> String {
    if query.is_empty() {
        return path.to_string();
    }
    let encoded: String = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(query)
        .finish();
    format!("{path}?{encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    const DATE: &str = "Tue, 25 Aug 2026 08:49:37 GMT";

    fn pipeline() -> SigningPipeline {
        SigningPipeline::new(
            "https://api.uat.veridian.net",
            ApiCredentials::new("token", "secret"),
        )
        .unwrap()
    }

    #[test]
    fn prepare_signs_over_the_transmitted_date() {
        let spec = RequestSpec::new(Method::POST, "/api/v2/user_devices")
            .body(json!({"user_identifier": "u1", "device_identifier": "d1"}));
        let signed = pipeline().prepare(&spec, DATE).unwrap();

        let body = serde_json::to_string(spec.body.as_ref().unwrap()).unwrap();
        let message =
            canonical::request_message("POST", "/api/v2/user_devices", Some(body.as_bytes()), DATE);
        let expected = hmac::sign(&message, b"secret");

        let authorization = signed
            .headers
            .iter()
            .find(|(name, _)| *name == "authorization")
            .map(|(_, value)| value.clone())
            .expect("authorization header is always set");
        assert_eq!(authorization, format!("VERIDIAN token:{expected}"));

        let date = signed
            .headers
            .iter()
            .find(|(name, _)| *name == "date")
            .map(|(_, value)| value.clone())
            .unwrap();
        assert_eq!(date, DATE);
    }

    #[test]
    fn prepare_is_deterministic_for_a_fixed_date() {
        let pipeline = pipeline();
        let a = pipeline
            .prepare(&RequestSpec::new(Method::GET, "/api/v2/devices/d1"), DATE)
            .unwrap();
        let b = pipeline
            .prepare(&RequestSpec::new(Method::GET, "/api/v2/devices/d1"), DATE)
            .unwrap();
        assert_eq!(a.headers, b.headers);
    }

    #[test]
    fn unsigned_headers_do_not_affect_the_signature() {
        let pipeline = pipeline();
        let spec = RequestSpec::new(Method::GET, "/api/v2/devices/d1");
        let mut signed = pipeline.prepare(&spec, DATE).unwrap();
        let authorization_before = signed.headers.last().unwrap().1.clone();

        // A tracing header attached after signing leaves the signature alone.
        signed.headers.push(("x-request-id", "trace-1".to_string()));
        let authorization_after = signed
            .headers
            .iter()
            .find(|(name, _)| *name == "authorization")
            .map(|(_, value)| value.clone())
            .unwrap();
        assert_eq!(authorization_before, authorization_after);

        // And the signed form never contained it to begin with.
        let message = canonical::request_message("GET", "/api/v2/devices/d1", None, DATE);
        assert_eq!(
            authorization_after,
            format!("VERIDIAN token:{}", hmac::sign(&message, b"secret"))
        );
    }

    #[test]
    fn bodyless_requests_omit_content_headers() {
        let signed = pipeline()
            .prepare(&RequestSpec::new(Method::GET, "/api/v2/devices/d1"), DATE)
            .unwrap();
        assert!(signed
            .headers
            .iter()
            .all(|(name, _)| *name != "content-type" && *name != "accept"));
    }

    #[test]
    fn query_parameters_are_part_of_the_signed_path() {
        let with_query = RequestSpec::new(Method::GET, "/api/v2/identity_documents")
            .query("user_identifier", "u1");
        let without = RequestSpec::new(Method::GET, "/api/v2/identity_documents");

        let pipeline = pipeline();
        let a = pipeline.prepare(&with_query, DATE).unwrap();
        let b = pipeline.prepare(&without, DATE).unwrap();
        assert!(a.url.ends_with("/api/v2/identity_documents?user_identifier=u1"));
        assert_ne!(a.headers.last(), b.headers.last());
    }

    #[test]
    fn verify_inbound_accepts_a_matching_signature() {
        let pipeline = pipeline();
        let body = br#"{"id":"pc-1"}"#;
        let message = canonical::response_message(200, body, DATE);
        let signature = hmac::sign(&message, b"secret");

        assert!(pipeline
            .verify_inbound(200, DATE, Some(&signature), body)
            .is_ok());
    }

    #[test]
    fn verify_inbound_rejects_a_tampered_body() {
        let pipeline = pipeline();
        let message = canonical::response_message(200, br#"{"id":"pc-1"}"#, DATE);
        let signature = hmac::sign(&message, b"secret");

        // One byte flipped after the service signed.
        let result = pipeline.verify_inbound(200, DATE, Some(&signature), br#"{"id":"pc-2"}"#);
        assert!(matches!(result, Err(Error::SignatureInvalid)));
    }

    #[test]
    fn verify_inbound_rejects_a_missing_signature() {
        let result = pipeline().verify_inbound(200, DATE, None, b"{}");
        assert!(matches!(result, Err(Error::SignatureInvalid)));
    }

    #[test]
    fn http_date_is_rfc1123() {
        let date = Utc.with_ymd_and_hms(2026, 8, 25, 8, 49, 37).unwrap();
        assert_eq!(http_date(date), "Tue, 25 Aug 2026 08:49:37 GMT");
    }

    #[test]
    fn join_query_encodes_pairs() {
        let joined = join_query(
            "/api/v2/identity_documents",
            &[("user_identifier".to_string(), "u 1".to_string())],
        );
        assert_eq!(joined, "/api/v2/identity_documents?user_identifier=u+1");
    }
}
