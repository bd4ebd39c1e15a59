//! Opaque pagination cursors.
//!
//! A cursor is `base64(decimal index)`: a zero-based position within one
//! ordered result set. Cursors carry no version or integrity tag, so a
//! cursor is only meaningful against the ordering it was produced from.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;

/// Standard alphabet, padded on encode, padding-agnostic on decode.
pub(crate) const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Encode a zero-based position as an opaque cursor.
pub fn encode_index(index: usize) -> String {
    BASE64.encode(index.to_string())
}

/// Decode a cursor back to its position.
///
/// Returns `None` for anything this codec did not produce: invalid
/// base64, non-UTF-8 payloads, non-numeric or negative numbers. Never
/// panics.
pub fn decode_index(cursor: &str) -> Option<usize> {
    let bytes = BASE64.decode(cursor).ok()?;
    let decoded = std::str::from_utf8(&bytes).ok()?;
    decoded.parse::<usize>().ok()
}
