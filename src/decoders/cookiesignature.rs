use super::{Decoder, ParsedData};
use crate::primitives::{b64_raw_decode, b64_std_decode, ct_eq, hmac_sha256};

/// The generic `cookie-signature`-style format seen outside Express proper:
/// `payload.signature`, exactly one dot, signature standard-base64 (padded
/// or not — implementations are inconsistent about trailing `=`) decoding
/// to exactly 32 bytes. Plain HMAC-SHA256 over the payload string as-is.
pub struct CookieSignature;

const MIN_LENGTH: usize = 10;

impl Decoder for CookieSignature {
    fn name(&self) -> &'static str {
        "cookiesignature"
    }

    fn try_decode(&self, raw: &str) -> Option<ParsedData> {
        if raw.len() < MIN_LENGTH {
            return None;
        }
        let mut parts = raw.split('.');
        let payload = parts.next()?;
        let sig_b64 = parts.next()?;
        if parts.next().is_some() {
            return None;
        }
        if payload.is_empty() || sig_b64.is_empty() {
            return None;
        }
        let signature = b64_std_decode(sig_b64)
            .or_else(|_| b64_raw_decode(sig_b64))
            .ok()?;
        if signature.len() != 32 {
            return None;
        }
        Some(ParsedData::CookieSignature {
            message: payload.as_bytes().to_vec(),
            signature,
        })
    }

    fn verify(&self, parsed: &ParsedData, secret: &[u8]) -> bool {
        let ParsedData::CookieSignature { message, signature } = parsed else {
            return false;
        };
        ct_eq(&hmac_sha256(secret, message), signature)
    }
}
