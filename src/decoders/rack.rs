use super::{Decoder, ParsedData};
use crate::primitives::{ct_eq, hex_decode, hmac_sha1};

/// Rack's `Rack::Session::Cookie` format: `payload--signature`, split on the
/// last `--`, signature lowercase hex encoding a 20-byte HMAC-SHA1 of the
/// payload string as-is.
pub struct Rack;

const SIG_HEX_LEN: usize = 40;

impl Decoder for Rack {
    fn name(&self) -> &'static str {
        "rack"
    }

    fn try_decode(&self, raw: &str) -> Option<ParsedData> {
        let (payload, sig_hex) = raw.rsplit_once("--")?;
        if payload.is_empty() || sig_hex.len() != SIG_HEX_LEN {
            return None;
        }
        let signature = hex_decode(sig_hex).ok()?;
        if signature.len() != 20 {
            return None;
        }
        Some(ParsedData::Rack {
            message: payload.as_bytes().to_vec(),
            signature,
        })
    }

    fn verify(&self, parsed: &ParsedData, secret: &[u8]) -> bool {
        let ParsedData::Rack { message, signature } = parsed else {
            return false;
        };
        ct_eq(&hmac_sha1(secret, message), signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(payload: &str, secret: &[u8]) -> String {
        let sig = hmac_sha1(secret, payload.as_bytes());
        format!("{payload}--{}", hex::encode(sig))
    }

    #[test]
    fn round_trips() {
        let secret = b"rack-secret";
        let value = sign("BAh7BkkiCHVpZAY6BkVU", secret);
        let decoder = Rack;
        let parsed = decoder.try_decode(&value).expect("should decode");
        assert!(decoder.verify(&parsed, secret));
        assert!(!decoder.verify(&parsed, b"wrong"));
    }

    #[test]
    fn rejects_wrong_hex_length() {
        let decoder = Rack;
        assert!(decoder.try_decode("payload--deadbeef").is_none());
    }
}
