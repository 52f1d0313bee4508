use super::{Decoder, ParsedData};
use crate::primitives::{b64_std_decode, ct_eq, hex_decode, hmac_sha256};

/// Spring Security's `remember-me` cookie convention: `payload--signature`,
/// split on the *last* `--`, signature lowercase hex (32 bytes, HMAC-SHA256).
/// Unlike Symfony's variant, the payload here must be valid standard-base64
/// — Spring always base64-encodes the colon-joined token fields before
/// signing, so a payload that fails to decode isn't a Spring cookie at all.
pub struct Spring;

const MIN_LENGTH: usize = 70;
const SIG_HEX_LEN: usize = 64;

impl Decoder for Spring {
    fn name(&self) -> &'static str {
        "spring"
    }

    fn try_decode(&self, raw: &str) -> Option<ParsedData> {
        if raw.len() < MIN_LENGTH {
            return None;
        }
        let (payload, sig_hex) = raw.rsplit_once("--")?;
        if payload.is_empty() || sig_hex.len() != SIG_HEX_LEN {
            return None;
        }
        let signature = hex_decode(sig_hex).ok()?;
        if signature.len() != 32 {
            return None;
        }
        let message = b64_std_decode(payload).ok()?;
        if message.is_empty() {
            return None;
        }
        Some(ParsedData::Spring { message, signature })
    }

    fn verify(&self, parsed: &ParsedData, secret: &[u8]) -> bool {
        let ParsedData::Spring { message, signature } = parsed else {
            return false;
        };
        ct_eq(&hmac_sha256(secret, message), signature)
    }
}
