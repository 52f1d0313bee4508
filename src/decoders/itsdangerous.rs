use super::{Decoder, ParsedData};
use crate::primitives::{b64_url_decode, ct_eq, hmac_sha1, sha1_digest};

/// Plain itsdangerous `Serializer`/`Signer` output (no timestamp): a single
/// dot joins the payload to its signature, signature url-safe-base64.
/// `Serializer.default_salt` is the literal string `"itsdangerous"`, and
/// `Signer`'s default key derivation is `django-concat`:
/// `key = SHA1(salt + b"signer" + secret)`, then `signature = HMAC-SHA1(key, payload)`.
pub struct ItsDangerous;

const MIN_LENGTH: usize = 10;
const SALT: &[u8] = b"itsdangerous";

fn derive_key(secret: &[u8]) -> [u8; 20] {
    let mut buf = Vec::with_capacity(SALT.len() + b"signer".len() + secret.len());
    buf.extend_from_slice(SALT);
    buf.extend_from_slice(b"signer");
    buf.extend_from_slice(secret);
    sha1_digest(&buf)
}

impl Decoder for ItsDangerous {
    fn name(&self) -> &'static str {
        "itsdangerous"
    }

    fn try_decode(&self, raw: &str) -> Option<ParsedData> {
        if raw.len() < MIN_LENGTH {
            return None;
        }
        let (payload, sig_b64) = raw.rsplit_once('.')?;
        if payload.is_empty() || sig_b64.is_empty() || payload.contains('.') {
            return None;
        }
        let signature = b64_url_decode(sig_b64).ok()?;
        if signature.len() != 20 {
            return None;
        }
        Some(ParsedData::ItsDangerous {
            message: payload.as_bytes().to_vec(),
            signature,
        })
    }

    fn verify(&self, parsed: &ParsedData, secret: &[u8]) -> bool {
        let ParsedData::ItsDangerous { message, signature } = parsed else {
            return false;
        };
        let key = derive_key(secret);
        ct_eq(&hmac_sha1(&key, message), signature)
    }
}
