use super::{Decoder, ParsedData};
use crate::primitives::{b64_url_decode, ct_eq, hmac_sha1};

/// Flask's default session cookie format (itsdangerous `TimestampSigner`
/// wired up by `flask.sessions.SecureCookieSessionInterface`):
/// `payload.timestamp.signature`, dot-delimited, signature url-safe-base64.
/// The payload itself may be zlib-compressed (prefixed with `.`) or plain;
/// either is accepted here since compression state doesn't affect signing.
///
/// Flask derives its signing key via itsdangerous's `hmac` key-derivation
/// mode with the hardcoded salt `b"cookie-session"`:
/// `key = HMAC-SHA1(secret, salt)`, then `signature = HMAC-SHA1(key, payload.ts)`.
pub struct Flask;

const MIN_LENGTH: usize = 16;
const SALT: &[u8] = b"cookie-session";

fn derive_key(secret: &[u8]) -> [u8; 20] {
    hmac_sha1(secret, SALT)
}

impl Decoder for Flask {
    fn name(&self) -> &'static str {
        "flask"
    }

    fn try_decode(&self, raw: &str) -> Option<ParsedData> {
        if raw.len() < MIN_LENGTH {
            return None;
        }
        let parts: Vec<&str> = raw.split('.').collect();
        if parts.len() != 3 {
            return None;
        }
        let (payload, ts, sig_b64) = (parts[0], parts[1], parts[2]);
        if payload.is_empty() || ts.is_empty() || sig_b64.is_empty() {
            return None;
        }
        // The timestamp segment must itself be valid base64url (it is the
        // base64url encoding of a packed integer); this is the cheap check
        // that keeps this decoder from claiming arbitrary two-dot strings.
        b64_url_decode(ts).ok()?;
        let signature = b64_url_decode(sig_b64).ok()?;
        if signature.len() != 20 {
            return None;
        }
        let message = format!("{payload}.{ts}").into_bytes();
        Some(ParsedData::Flask { message, signature })
    }

    fn verify(&self, parsed: &ParsedData, secret: &[u8]) -> bool {
        let ParsedData::Flask { message, signature } = parsed else {
            return false;
        };
        let key = derive_key(secret);
        ct_eq(&hmac_sha1(&key, message), signature)
    }
}
