use super::{Decoder, ParsedData};
use crate::primitives::{b64_std_decode, ct_eq, hmac_sha256};

/// Gorilla's `securecookie` wire format, signed-only mode (no encryption):
/// the whole cookie value is one standard-base64 blob whose first 32 bytes
/// are an HMAC-SHA256 tag and whose remainder is the message it covers.
/// Encrypted gorilla cookies (the AES-GCM-wrapped variant) aren't in scope:
/// there's no way to tell "wrong secret" from "this is encrypted, not
/// signed-only" without already knowing the secret.
pub struct Gorilla;

const MIN_LENGTH: usize = 44;
const TAG_LEN: usize = 32;

impl Decoder for Gorilla {
    fn name(&self) -> &'static str {
        "gorilla"
    }

    fn try_decode(&self, raw: &str) -> Option<ParsedData> {
        if raw.len() < MIN_LENGTH {
            return None;
        }
        let decoded = b64_std_decode(raw).ok()?;
        if decoded.len() <= TAG_LEN {
            return None;
        }
        let (signature, message) = decoded.split_at(TAG_LEN);
        Some(ParsedData::Gorilla {
            message: message.to_vec(),
            signature: signature.to_vec(),
        })
    }

    fn verify(&self, parsed: &ParsedData, secret: &[u8]) -> bool {
        let ParsedData::Gorilla { message, signature } = parsed else {
            return false;
        };
        ct_eq(&hmac_sha256(secret, message), signature)
    }
}
