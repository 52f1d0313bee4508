use thiserror::Error;

/// Errors surfaced by the core. Decoders never raise these: a decoder miss is
/// `None`, a verify miss is `false`. Only wordlist loading and programmer
/// contract violations (asking for a decoder that never matched, or reading
/// an unloaded wordlist) raise.
#[derive(Debug, Error)]
pub enum MonsterError {
    #[error("failed to read wordlist {path}: {source}")]
    LoadIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid base64 on wordlist line {line}: {source}")]
    LoadBase64 {
        line: usize,
        #[source]
        source: base64::DecodeError,
    },

    #[error("entries() called on a wordlist that has never been loaded")]
    UnloadedWordlist,

    #[error("decoder {name:?} did not match this cookie")]
    NoSuchDecoder { name: &'static str },
}

pub type Result<T> = std::result::Result<T, MonsterError>;
