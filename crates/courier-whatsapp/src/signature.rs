// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Payload signature check for `X-Hub-Signature-256`.

use courier_core::CourierError;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the payload signature.
pub const SIGNATURE_HEADER: &str = "x-hub-signature-256";

/// Verify that `header` (`sha256=<hex>`) is the HMAC-SHA256 of `body`
/// keyed with the app secret.
///
/// The comparison is constant-time.
pub fn verify_signature(body: &[u8], header: Option<&str>, secret: &str) -> Result<(), CourierError> {
    let header = header.ok_or_else(|| CourierError::Signature("missing signature header".into()))?;
    let hex_digest = header
        .trim()
        .strip_prefix("sha256=")
        .ok_or_else(|| CourierError::Signature("signature must start with `sha256=`".into()))?;
    let expected = hex::decode(hex_digest)
        .map_err(|_| CourierError::Signature("signature is not valid hex".into()))?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| CourierError::Internal(format!("invalid HMAC key: {e}")))?;
    mac.update(body);
    mac.verify_slice(&expected)
        .map_err(|_| CourierError::Signature("signature mismatch".into()))
}

/// `sha256=<hex>` header value for `body`. Used by tests and local tooling.
pub fn sign(body: &[u8], secret: &str) -> Result<String, CourierError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| CourierError::Internal(format!("invalid HMAC key: {e}")))?;
    mac.update(body);
    Ok(format!("sha256={}", hex::encode(mac.finalize().into_bytes())))
}
