//! One submodule per supported cookie-signing scheme. Each submodule owns a
//! zero-sized marker type implementing [`Decoder`] plus whatever
//! scheme-specific parsing it needs; none of them hold state of their own —
//! all state lives in the [`ParsedData`] produced by `try_decode`.

mod cookiesignature;
mod django;
mod express;
mod flask;
mod gorilla;
mod itsdangerous;
mod jwt;
mod laravel;
mod rack;
mod spring;
mod symfony;

use std::sync::OnceLock;

/// Scheme-specific parsed fields, ready to be fed to `verify` without any
/// further parsing. One variant per decoder; carrying the data this way
/// (rather than behind a `dyn Any` to downcast) means a malformed pairing
/// between decoder and `ParsedData` variant is a compile error, not a
/// runtime one.
#[derive(Debug, Clone)]
pub enum ParsedData {
    Django {
        message: Vec<u8>,
        signature: Vec<u8>,
    },
    Flask {
        message: Vec<u8>,
        signature: Vec<u8>,
    },
    ItsDangerous {
        message: Vec<u8>,
        signature: Vec<u8>,
    },
    Jwt {
        message: Vec<u8>,
        signature: Vec<u8>,
    },
    Express {
        message: Vec<u8>,
        signature: Vec<u8>,
    },
    CookieSignature {
        message: Vec<u8>,
        signature: Vec<u8>,
    },
    Gorilla {
        message: Vec<u8>,
        signature: Vec<u8>,
    },
    Rack {
        message: Vec<u8>,
        signature: Vec<u8>,
    },
    Symfony {
        message: Vec<u8>,
        signature: Vec<u8>,
    },
    Spring {
        message: Vec<u8>,
        signature: Vec<u8>,
    },
    Laravel {
        message: Vec<u8>,
        signature: Vec<u8>,
    },
}

impl ParsedData {
    /// The bytes that were signed, regardless of which scheme produced them.
    /// Exposed for `Cookie::result()` and for display.
    pub fn message(&self) -> &[u8] {
        match self {
            ParsedData::Django { message, .. }
            | ParsedData::Flask { message, .. }
            | ParsedData::ItsDangerous { message, .. }
            | ParsedData::Jwt { message, .. }
            | ParsedData::Express { message, .. }
            | ParsedData::CookieSignature { message, .. }
            | ParsedData::Gorilla { message, .. }
            | ParsedData::Rack { message, .. }
            | ParsedData::Symfony { message, .. }
            | ParsedData::Spring { message, .. }
            | ParsedData::Laravel { message, .. } => message,
        }
    }

    pub fn signature(&self) -> &[u8] {
        match self {
            ParsedData::Django { signature, .. }
            | ParsedData::Flask { signature, .. }
            | ParsedData::ItsDangerous { signature, .. }
            | ParsedData::Jwt { signature, .. }
            | ParsedData::Express { signature, .. }
            | ParsedData::CookieSignature { signature, .. }
            | ParsedData::Gorilla { signature, .. }
            | ParsedData::Rack { signature, .. }
            | ParsedData::Symfony { signature, .. }
            | ParsedData::Spring { signature, .. }
            | ParsedData::Laravel { signature, .. } => signature,
        }
    }

    /// A one-line field summary for `--verbose` output, mirroring the Go
    /// source's per-decoder `ParsedData.String()`: message as text when it's
    /// printable, otherwise its length, plus the signature's length and hex.
    pub fn summary(&self) -> String {
        let message = self.message();
        let message_field = if crate::primitives::is_ascii_printable(message) {
            format!("{:?}", String::from_utf8_lossy(message))
        } else {
            format!("{} bytes", message.len())
        };
        let signature = self.signature();
        format!(
            "message: {message_field}, signature: {} bytes ({})",
            signature.len(),
            hex::encode(signature)
        )
    }
}

/// A decoder recognizes one cookie-signing scheme: it can sniff+parse a raw
/// string (`try_decode`) and check a candidate secret against already-parsed
/// data (`verify`). Implementations must be pure, stateless, and must never
/// panic on adversarial input — a structural mismatch is `None`/`false`, not
/// a panic or an `Err`.
pub trait Decoder: Send + Sync {
    fn name(&self) -> &'static str;
    fn try_decode(&self, raw: &str) -> Option<ParsedData>;
    fn verify(&self, parsed: &ParsedData, secret: &[u8]) -> bool;
}

/// The process-wide, order-significant list of decoders. Order is the order
/// in which `Cookie::decode` attempts each decoder, and therefore the order
/// in which a cookie's matched decoders are tried during `unsign`.
static REGISTRY: OnceLock<Vec<&'static dyn Decoder>> = OnceLock::new();

pub fn registry() -> &'static [&'static dyn Decoder] {
    REGISTRY
        .get_or_init(|| {
            vec![
                &django::Django as &'static dyn Decoder,
                &flask::Flask,
                &itsdangerous::ItsDangerous,
                &jwt::Jwt,
                &express::Express,
                &cookiesignature::CookieSignature,
                &gorilla::Gorilla,
                &rack::Rack,
                &symfony::Symfony,
                &spring::Spring,
                &laravel::Laravel,
            ]
        })
        .as_slice()
}

/// Find a registered decoder by name, e.g. to dispatch `parsed_data_for`'s
/// `verify` calls without re-walking the registry by hand.
pub fn by_name(name: &str) -> Option<&'static dyn Decoder> {
    registry().iter().copied().find(|d| d.name() == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_renders_printable_message_as_text() {
        let parsed = ParsedData::Rack {
            message: b"printable-payload".to_vec(),
            signature: vec![0u8; 20],
        };
        let summary = parsed.summary();
        assert!(summary.contains(r#""printable-payload""#));
        assert!(summary.contains("signature: 20 bytes"));
        assert!(summary.contains(&hex::encode([0u8; 20])));
    }

    #[test]
    fn summary_renders_non_printable_message_as_length() {
        let parsed = ParsedData::Gorilla {
            message: vec![0xffu8, 0x00, 0x01, 0x02],
            signature: vec![0u8; 32],
        };
        let summary = parsed.summary();
        assert!(summary.contains("message: 4 bytes"));
        assert!(summary.contains("signature: 32 bytes"));
    }
}
