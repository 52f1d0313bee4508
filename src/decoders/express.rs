use super::{Decoder, ParsedData};
use crate::primitives::{b64_url_decode, ct_eq, hmac_sha1};

/// Express's `cookie-signature` package as wired up by `cookie-parser`'s
/// signed-cookie support: `name=value^signature`, signature url-safe-base64.
/// The signed message is the full `name=value` string to the left of the
/// `^`, not just `value` — `cookie-signature`'s `sign(val, secret)` is
/// always called with the whole `s=...` string the cookie jar produced.
/// Signature is a plain HMAC-SHA1.
pub struct Express;

const MIN_LENGTH: usize = 10;

impl Decoder for Express {
    fn name(&self) -> &'static str {
        "express"
    }

    fn try_decode(&self, raw: &str) -> Option<ParsedData> {
        if raw.len() < MIN_LENGTH {
            return None;
        }
        let (message, sig_b64) = raw.rsplit_once('^')?;
        if message.is_empty() || sig_b64.is_empty() || sig_b64.contains('^') {
            return None;
        }
        let signature = b64_url_decode(sig_b64).ok()?;
        if signature.len() != 20 {
            return None;
        }
        Some(ParsedData::Express {
            message: message.as_bytes().to_vec(),
            signature,
        })
    }

    fn verify(&self, parsed: &ParsedData, secret: &[u8]) -> bool {
        let ParsedData::Express { message, signature } = parsed else {
            return false;
        };
        ct_eq(&hmac_sha1(secret, message), signature)
    }
}
