use super::{Decoder, ParsedData};
use crate::primitives::{b64_url_decode, ct_eq, hmac_sha1, hmac_sha256, sha1_digest, sha256_digest};

/// Django's `django.core.signing.TimestampSigner` cookie format:
/// `payload:timestamp:signature`, colon-delimited, signature url-safe-base64.
/// Django derives the actual signing key rather than using the secret
/// directly: `key = hash(salt + b"signer" + secret)` where `salt` is the
/// signer's fully-qualified class name (`django.core.signing.Signer` for the
/// default signer) and `hash` is whatever digest the signer was configured
/// with, then signs with HMAC using that derived key and the same digest.
/// Django defaulted to SHA-1 before 3.1 and to SHA-256 from 3.1 onward, so
/// both are tried, selected by the decoded signature's length (20 vs 32
/// bytes) since that unambiguously identifies which digest produced it.
pub struct Django;

const MIN_LENGTH: usize = 16;
const KEY_SALT: &[u8] = b"django.core.signing.Signersigner";

fn derive_key_sha256(secret: &[u8]) -> [u8; 32] {
    let mut buf = Vec::with_capacity(KEY_SALT.len() + secret.len());
    buf.extend_from_slice(KEY_SALT);
    buf.extend_from_slice(secret);
    sha256_digest(&buf)
}

fn derive_key_sha1(secret: &[u8]) -> [u8; 20] {
    let mut buf = Vec::with_capacity(KEY_SALT.len() + secret.len());
    buf.extend_from_slice(KEY_SALT);
    buf.extend_from_slice(secret);
    sha1_digest(&buf)
}

impl Decoder for Django {
    fn name(&self) -> &'static str {
        "django"
    }

    fn try_decode(&self, raw: &str) -> Option<ParsedData> {
        if raw.len() < MIN_LENGTH {
            return None;
        }
        let parts: Vec<&str> = raw.split(':').collect();
        if parts.len() != 3 {
            return None;
        }
        let (payload, ts, sig_b64) = (parts[0], parts[1], parts[2]);
        if payload.is_empty() || ts.is_empty() || sig_b64.is_empty() {
            return None;
        }
        let signature = b64_url_decode(sig_b64).ok()?;
        if signature.is_empty() {
            return None;
        }
        let message = format!("{payload}:{ts}").into_bytes();
        Some(ParsedData::Django { message, signature })
    }

    fn verify(&self, parsed: &ParsedData, secret: &[u8]) -> bool {
        let ParsedData::Django { message, signature } = parsed else {
            return false;
        };
        match signature.len() {
            32 => ct_eq(&hmac_sha256(&derive_key_sha256(secret), message), signature),
            20 => ct_eq(&hmac_sha1(&derive_key_sha1(secret), message), signature),
            _ => false,
        }
    }
}
