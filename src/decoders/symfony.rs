use super::{Decoder, ParsedData};
use crate::primitives::{b64_std_decode, ct_eq, hmac_sha256, hex_decode};

/// Symfony's `RememberMeCookieProvider`/signed-payload convention:
/// `payload--signature`, split on the *first* `--`, signature lowercase hex
/// (32 bytes, HMAC-SHA256). The payload is frequently itself standard-base64
/// (Symfony base64-encodes the serialized remember-me data before signing);
/// when it decodes cleanly to a non-empty byte string that's what gets
/// signed, otherwise the raw payload string is used as-is.
pub struct Symfony;

const MIN_LENGTH: usize = 70;
const SIG_HEX_LEN: usize = 64;

impl Decoder for Symfony {
    fn name(&self) -> &'static str {
        "symfony"
    }

    fn try_decode(&self, raw: &str) -> Option<ParsedData> {
        if raw.len() < MIN_LENGTH {
            return None;
        }
        let (payload, sig_hex) = raw.split_once("--")?;
        if payload.is_empty() || sig_hex.len() != SIG_HEX_LEN {
            return None;
        }
        let signature = hex_decode(sig_hex).ok()?;
        if signature.len() != 32 {
            return None;
        }
        let message = match b64_std_decode(payload) {
            Ok(decoded) if !decoded.is_empty() => decoded,
            _ => payload.as_bytes().to_vec(),
        };
        Some(ParsedData::Symfony { message, signature })
    }

    fn verify(&self, parsed: &ParsedData, secret: &[u8]) -> bool {
        let ParsedData::Symfony { message, signature } = parsed else {
            return false;
        };
        ct_eq(&hmac_sha256(secret, message), signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    fn sign_raw(payload: &str, secret: &[u8]) -> String {
        let sig = hmac_sha256(secret, payload.as_bytes());
        format!("{payload}--{}", hex::encode(sig))
    }

    #[test]
    fn round_trips_with_raw_payload() {
        let secret = b"symfony-secret";
        let payload = "not-base64-!!!-padding-filler-text-to-reach-minimum-length";
        let value = sign_raw(payload, secret);
        let decoder = Symfony;
        let parsed = decoder.try_decode(&value).expect("should decode");
        assert!(decoder.verify(&parsed, secret));
        assert!(!decoder.verify(&parsed, b"wrong"));
    }

    #[test]
    fn round_trips_with_base64_payload() {
        let secret = b"symfony-secret";
        let decoded = b"serialized-remember-me-token-data-filler-to-reach-minimum";
        let payload = STANDARD.encode(decoded);
        let sig = hmac_sha256(secret, decoded);
        let value = format!("{payload}--{}", hex::encode(sig));
        let decoder = Symfony;
        let parsed = decoder.try_decode(&value).expect("should decode");
        assert!(decoder.verify(&parsed, secret));
    }

    #[test]
    fn rejects_short_input() {
        let decoder = Symfony;
        assert!(decoder.try_decode("short--deadbeef").is_none());
    }
}
