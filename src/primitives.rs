//! Byte-level building blocks shared by every decoder: HMAC, the base64
//! flavors the supported schemes actually use, hex, and constant-time
//! comparison. Nothing here knows about any particular cookie format.

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use ring::hmac;

/// HMAC-SHA-256 of `message` under `key`.
pub fn hmac_sha256(key: &[u8], message: &[u8]) -> [u8; 32] {
    let key = hmac::Key::new(hmac::HMAC_SHA256, key);
    let tag = hmac::sign(&key, message);
    let mut out = [0u8; 32];
    out.copy_from_slice(tag.as_ref());
    out
}

/// HMAC-SHA-1 of `message` under `key`. Several legacy frameworks (Rack,
/// Flask/itsdangerous, Express) still sign with SHA-1; this only ever
/// touches attacker-controlled cookie values, never anything where
/// collision resistance matters, so the legacy algorithm is fine here.
pub fn hmac_sha1(key: &[u8], message: &[u8]) -> [u8; 20] {
    let key = hmac::Key::new(hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY, key);
    let tag = hmac::sign(&key, message);
    let mut out = [0u8; 20];
    out.copy_from_slice(tag.as_ref());
    out
}

/// Plain (non-HMAC) SHA-1 digest, needed only for itsdangerous's
/// `django-concat` key derivation.
pub fn sha1_digest(data: &[u8]) -> [u8; 20] {
    let digest = ring::digest::digest(&ring::digest::SHA1_FOR_LEGACY_USE_ONLY, data);
    let mut out = [0u8; 20];
    out.copy_from_slice(digest.as_ref());
    out
}

/// Plain (non-HMAC) SHA-256 digest, needed only for Django's signing key
/// derivation.
pub fn sha256_digest(data: &[u8]) -> [u8; 32] {
    let digest = ring::digest::digest(&ring::digest::SHA256, data);
    let mut out = [0u8; 32];
    out.copy_from_slice(digest.as_ref());
    out
}

/// Constant-time equality. Returns `false` immediately on length mismatch
/// (which is itself timing-observable but never secret-dependent: lengths
/// here come from the wire format, not the key). Never replace this with
/// `a == b` — that short-circuits on the first differing byte.
pub fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    ring::constant_time::verify_slices_are_equal(a, b).is_ok()
}

pub fn b64_std_decode(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(s)
}

pub fn b64_raw_decode(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD_NO_PAD.decode(s)
}

pub fn b64_url_decode(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    if s.contains('=') {
        URL_SAFE.decode(s)
    } else {
        URL_SAFE_NO_PAD.decode(s)
    }
}

pub fn b64_url_encode_nopad(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

pub fn hex_decode(s: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(s)
}

pub fn is_ascii_printable(bytes: &[u8]) -> bool {
    bytes.iter().all(|&b| (0x20..=0x7e).contains(&b))
}
