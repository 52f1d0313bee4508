use super::{Decoder, ParsedData};
use crate::primitives::{b64_url_decode, ct_eq, hmac_sha256};
use serde::Deserialize;

/// HS256-signed JSON Web Tokens: `header.payload.signature`, each segment
/// url-safe-base64 (unpadded), signature a plain HMAC-SHA256 of the exact
/// ASCII string `header.payload` (base64 text, not decoded bytes). Only
/// `alg: HS256` is in scope; `none` and the RS/ES families need an
/// asymmetric key or no key at all and aren't dictionary-attackable here.
pub struct Jwt;

#[derive(Deserialize)]
struct Header<'a> {
    alg: &'a str,
}

impl Decoder for Jwt {
    fn name(&self) -> &'static str {
        "jwt"
    }

    fn try_decode(&self, raw: &str) -> Option<ParsedData> {
        let parts: Vec<&str> = raw.split('.').collect();
        if parts.len() != 3 {
            return None;
        }
        let (header_b64, payload_b64, sig_b64) = (parts[0], parts[1], parts[2]);
        if header_b64.is_empty() || payload_b64.is_empty() || sig_b64.is_empty() {
            return None;
        }
        let header_bytes = b64_url_decode(header_b64).ok()?;
        let header: Header = serde_json::from_slice(&header_bytes).ok()?;
        if header.alg != "HS256" {
            return None;
        }
        let signature = b64_url_decode(sig_b64).ok()?;
        if signature.len() != 32 {
            return None;
        }
        let message = format!("{header_b64}.{payload_b64}").into_bytes();
        Some(ParsedData::Jwt { message, signature })
    }

    fn verify(&self, parsed: &ParsedData, secret: &[u8]) -> bool {
        let ParsedData::Jwt { message, signature } = parsed else {
            return false;
        };
        ct_eq(&hmac_sha256(secret, message), signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::b64_url_encode_nopad;

    fn sign(header_json: &str, payload_json: &str, secret: &[u8]) -> String {
        let header_b64 = b64_url_encode_nopad(header_json.as_bytes());
        let payload_b64 = b64_url_encode_nopad(payload_json.as_bytes());
        let message = format!("{header_b64}.{payload_b64}");
        let sig = hmac_sha256(secret, message.as_bytes());
        format!("{message}.{}", b64_url_encode_nopad(&sig))
    }

    #[test]
    fn round_trips() {
        let secret = b"jwt-secret";
        let value = sign(r#"{"alg":"HS256","typ":"JWT"}"#, r#"{"sub":"1234567890"}"#, secret);
        let decoder = Jwt;
        let parsed = decoder.try_decode(&value).expect("should decode");
        assert!(decoder.verify(&parsed, secret));
        assert!(!decoder.verify(&parsed, b"wrong"));
    }

    #[test]
    fn rejects_non_hs256_alg() {
        let secret = b"jwt-secret";
        let value = sign(r#"{"alg":"none"}"#, r#"{"sub":"x"}"#, secret);
        let decoder = Jwt;
        assert!(decoder.try_decode(&value).is_none());
    }
}
