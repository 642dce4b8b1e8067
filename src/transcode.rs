//! # Transcode Module
//!
//! ASCII-safe unicode escaping for ferrying source text through the JS
//! compressor, which only accepts ASCII-safe input. The same escape is
//! applied on the way out: the tool emits this convention itself for any
//! non-ASCII it preserves, so there is no inverse operation.

/// Escape every non-ASCII character as `\uXXXX`.
///
/// Code points in `[0, 0x7F]` are copied verbatim. Everything else is
/// emitted per UTF-16 code unit as a fixed 6-character escape with four
/// lowercase, zero-padded hex digits; supplementary-plane characters
/// therefore become two surrogate escapes. Total function, defined for all
/// inputs including the empty string.
pub fn escape_non_ascii(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut units = [0u16; 2];
    for ch in text.chars() {
        if (ch as u32) <= 0x7f {
            out.push(ch);
        } else {
            for unit in ch.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{:04x}", unit));
            }
        }
    }
    out
}
