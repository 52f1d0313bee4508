use super::{Decoder, ParsedData};
use crate::primitives::{b64_std_decode, ct_eq, hex_decode, hmac_sha256};
use serde::Deserialize;

/// Laravel's encrypted-cookie envelope (`Illuminate\Encryption\Encrypter`):
/// the cookie value is percent-encoded once, then standard-base64, then a
/// JSON object `{"iv": "...", "value": "...", "mac": "...", "tag": ""}`
/// where `iv` and `value` are themselves base64 strings but are signed as
/// their *string form*, not their decoded bytes: `mac = HMAC-SHA256(secret,
/// iv_string + value_string)`, hex-encoded. Verifying the mac is as far as
/// this goes — decrypting `value` needs the APP_KEY directly, not a
/// dictionary-guessable signing secret, so AES decryption is out of scope.
pub struct Laravel;

const MIN_LENGTH: usize = 40;

#[derive(Deserialize)]
struct Envelope {
    iv: String,
    value: String,
    mac: String,
}

fn percent_decode(s: &str) -> Option<Vec<u8>> {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hi = *bytes.get(i + 1)?;
                let lo = *bytes.get(i + 2)?;
                let hex_pair = [hi, lo];
                let hex_str = std::str::from_utf8(&hex_pair).ok()?;
                out.push(u8::from_str_radix(hex_str, 16).ok()?);
                i += 3;
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    Some(out)
}

impl Decoder for Laravel {
    fn name(&self) -> &'static str {
        "laravel"
    }

    fn try_decode(&self, raw: &str) -> Option<ParsedData> {
        if raw.len() < MIN_LENGTH {
            return None;
        }
        let decoded = percent_decode(raw)?;
        let json_str = std::str::from_utf8(&decoded).ok()?;
        let outer = b64_std_decode(json_str.trim()).ok()?;
        let envelope: Envelope = serde_json::from_slice(&outer).ok()?;
        let signature = hex_decode(&envelope.mac).ok()?;
        if signature.len() != 32 {
            return None;
        }
        let mut message = Vec::with_capacity(envelope.iv.len() + envelope.value.len());
        message.extend_from_slice(envelope.iv.as_bytes());
        message.extend_from_slice(envelope.value.as_bytes());
        Some(ParsedData::Laravel { message, signature })
    }

    fn verify(&self, parsed: &ParsedData, secret: &[u8]) -> bool {
        let ParsedData::Laravel { message, signature } = parsed else {
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

    fn build(iv: &str, value: &str, secret: &[u8]) -> String {
        let mut message = Vec::new();
        message.extend_from_slice(iv.as_bytes());
        message.extend_from_slice(value.as_bytes());
        let mac = hex::encode(hmac_sha256(secret, &message));
        let json = format!(
            r#"{{"iv":"{iv}","value":"{value}","mac":"{mac}","tag":""}}"#
        );
        let b64 = STANDARD.encode(json);
        urlencoding_minimal(&b64)
    }

    // Mirrors what a real Laravel cookie looks like on the wire: the
    // base64 payload's `+`, `/`, `=` get percent-encoded by the browser's
    // cookie jar. `percent_decode` above must invert exactly this.
    fn urlencoding_minimal(s: &str) -> String {
        s.chars()
            .map(|c| match c {
                '+' => "%2B".to_string(),
                '/' => "%2F".to_string(),
                '=' => "%3D".to_string(),
                other => other.to_string(),
            })
            .collect()
    }

    #[test]
    fn round_trips() {
        let secret = b"laravel-app-key";
        let value = build("aXZiYXNlNjQxNmJ5dGVzIQ==", "ZW5jcnlwdGVkLXZhbHVlLWJhc2U2NA==", secret);
        let decoder = Laravel;
        let parsed = decoder.try_decode(&value).expect("should decode");
        assert!(decoder.verify(&parsed, secret));
        assert!(!decoder.verify(&parsed, b"wrong"));
    }

    #[test]
    fn rejects_garbage() {
        let decoder = Laravel;
        assert!(decoder.try_decode("not%20a%20valid%20laravel%20cookie%20value%20at%20all").is_none());
    }
}
