// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Veridian

//! HMAC-SHA256 signature generation and verification.
//!
//! Signatures are deterministic digests of (secret, canonical message) with
//! no nonce, encoded as standard base64. The same encoding is used when
//! producing the outbound authorization value and when checking an inbound
//! `x-signature` header. Verification is constant-time.

use base64ct::{Base64, Encoding};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Base64-encoded HMAC-SHA256 of `message` keyed by `secret`.
pub fn sign(message: &[u8], secret: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts keys of any length");
    mac.update(message);
    Base64::encode_string(&mac.finalize().into_bytes())
}

/// Whether `presented` is the valid signature for `message` under `secret`.
///
/// The digest comparison runs in constant time, so a forged signature leaks
/// no prefix-length timing information. A value that is not valid base64
/// cannot be a valid signature and fails outright.
pub fn verify(message: &[u8], secret: &[u8], presented: &str) -> bool {
    let Ok(presented) = Base64::decode_vec(presented) else {
        return false;
    };

    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts keys of any length");
    mac.update(message);
    mac.verify_slice(&presented).is_ok()
}
