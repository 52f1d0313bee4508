//! Decoder registry, signature-verification engine, and parallel
//! dictionary-attack driver for recovering the secret behind a signed
//! cookie. See [`Cookie`] and [`Wordlist`] for the two types most callers
//! need; [`decoders::registry`] is the process-wide list of supported
//! cookie-signing schemes.

pub mod cookie;
pub mod decoders;
pub mod error;
mod primitives;
pub mod unsign;
pub mod wordlist;

pub use cookie::Cookie;
pub use decoders::{registry, ParsedData};
pub use error::{MonsterError, Result};
pub use wordlist::Wordlist;
