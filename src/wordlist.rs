//! An ordered, append-only list of candidate secrets, loaded from disk, an
//! in-memory string, a pre-decoded array, or the embedded defaults.

use std::sync::RwLock;

use rust_embed::RustEmbed;

use crate::error::{MonsterError, Result};
use crate::primitives::b64_std_decode;

#[derive(RustEmbed)]
#[folder = "wordlists/"]
struct EmbeddedWordlists;

/// Candidate secrets plus the `loaded` flag that distinguishes
/// empty-unloaded from empty-loaded. `entries` is behind an `RwLock` so
/// many workers can read concurrently while a load holds exclusive access;
/// in practice a load always completes before `unsign` starts reading, but
/// the discipline is enforced here rather than left to caller convention.
pub struct Wordlist {
    entries: RwLock<Vec<Vec<u8>>>,
    loaded: RwLock<bool>,
}

impl Wordlist {
    pub fn new() -> Self {
        Wordlist {
            entries: RwLock::new(Vec::new()),
            loaded: RwLock::new(false),
        }
    }

    pub fn load_from_path(&mut self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| MonsterError::LoadIo {
            path: path.display().to_string(),
            source,
        })?;
        self.load_from_string(&text)
    }

    pub fn load_from_string(&mut self, text: &str) -> Result<()> {
        let mut decoded = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let bytes = b64_std_decode(trimmed)
                .map_err(|source| MonsterError::LoadBase64 { line: line_no + 1, source })?;
            decoded.push(bytes);
        }
        self.append(decoded);
        Ok(())
    }

    pub fn load_from_array(&mut self, secrets: Vec<Vec<u8>>) {
        self.append(secrets);
    }

    /// Loads the two embedded wordlist blobs (primary, then extras),
    /// concatenated in that order, as if by `load_from_string`.
    pub fn load_default(&mut self) -> Result<()> {
        for name in ["flask-unsign.txt", "default-keys-extra.txt"] {
            let file = EmbeddedWordlists::get(name).ok_or_else(|| MonsterError::LoadIo {
                path: format!("<embedded>/{name}"),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "embedded wordlist missing"),
            })?;
            let text = std::str::from_utf8(&file.data).map_err(|_| MonsterError::LoadIo {
                path: format!("<embedded>/{name}"),
                source: std::io::Error::new(std::io::ErrorKind::InvalidData, "embedded wordlist not UTF-8"),
            })?;
            self.load_from_string(text)?;
        }
        Ok(())
    }

    fn append(&mut self, mut secrets: Vec<Vec<u8>>) {
        let mut guard = self.entries.write().unwrap_or_else(|e| e.into_inner());
        guard.append(&mut secrets);
        drop(guard);
        *self.loaded.write().unwrap_or_else(|e| e.into_inner()) = true;
    }

    pub fn count(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Returns a snapshot of every loaded entry. Fails with
    /// `UnloadedWordlist` if nothing has ever been loaded.
    pub fn entries(&self) -> Result<Vec<Vec<u8>>> {
        if !*self.loaded.read().unwrap_or_else(|e| e.into_inner()) {
            return Err(MonsterError::UnloadedWordlist);
        }
        Ok(self.entries.read().unwrap_or_else(|e| e.into_inner()).clone())
    }
}

impl Default for Wordlist {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_before_load_is_an_error() {
        let wordlist = Wordlist::new();
        assert!(matches!(wordlist.entries(), Err(MonsterError::UnloadedWordlist)));
    }

    #[test]
    fn load_from_array_round_trips() {
        let mut wordlist = Wordlist::new();
        let secrets = vec![b"one".to_vec(), b"two".to_vec(), b"three".to_vec()];
        wordlist.load_from_array(secrets.clone());
        assert_eq!(wordlist.entries().unwrap(), secrets);
        assert_eq!(wordlist.count(), 3);
    }

    #[test]
    fn load_from_string_skips_blank_lines_and_decodes_base64() {
        let mut wordlist = Wordlist::new();
        let text = "aGVsbG8=\n\n   \ndGhlcmU=\n";
        wordlist.load_from_string(text).unwrap();
        assert_eq!(wordlist.entries().unwrap(), vec![b"hello".to_vec(), b"there".to_vec()]);
    }

    #[test]
    fn load_from_string_rejects_invalid_base64() {
        let mut wordlist = Wordlist::new();
        let err = wordlist.load_from_string("not valid base64 !!!").unwrap_err();
        assert!(matches!(err, MonsterError::LoadBase64 { .. }));
    }

    #[test]
    fn load_default_populates_from_embedded_resources() {
        let mut wordlist = Wordlist::new();
        wordlist.load_default().expect("embedded wordlists should load");
        assert!(wordlist.count() > 0);
    }
}
