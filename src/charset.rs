//! # Charset Module
//!
//! The single text encoding active for a run. Every file read/write and all
//! subprocess stdin/stdout/stderr framing goes through this value, which is
//! resolved once at startup and threaded through calls read-only - there is
//! no ambient global encoding state, so repeated runs in tests stay isolated.

use crate::error::CompressError;
use encoding_rs::Encoding;

/// Active text encoding for file and pipe I/O
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Charset(&'static Encoding);

impl Charset {
    /// Resolve a WHATWG encoding label ("utf-8", "gbk", "iso-8859-1", ...)
    pub fn resolve(label: &str) -> Result<Self, CompressError> {
        Encoding::for_label(label.trim().as_bytes())
            .map(Charset)
            .ok_or_else(|| CompressError::UnknownCharset(label.to_string()))
    }

    /// Canonical name of the encoding, as passed to the external tools
    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Decode a full byte buffer.
    ///
    /// Malformed input under this encoding yields `None`, not a lossy decode:
    /// a file we cannot faithfully decode must never be overwritten with a
    /// mangled round-trip. Callers attach path context to the failure.
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        let (text, _, had_errors) = self.0.decode(bytes);
        if had_errors {
            None
        } else {
            Some(text.into_owned())
        }
    }

    /// Decode leniently, replacing malformed sequences.
    ///
    /// Used for tool stderr, where a diagnostic with replacement characters
    /// is better than losing the diagnostic.
    pub fn decode_lossy(&self, bytes: &[u8]) -> String {
        self.0.decode(bytes).0.into_owned()
    }

    /// Encode text to bytes, substituting unmappable characters.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        self.0.encode(text).0.into_owned()
    }
}

impl Default for Charset {
    fn default() -> Self {
        Charset(encoding_rs::UTF_8)
    }
}
