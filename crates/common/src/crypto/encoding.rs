//! Base64 helpers for moving binary key material through text channels
//!
//! Message envelopes are encoded with the standard, padded alphabet and
//! decoded the way `atob` does: padding is optional and ASCII whitespace is
//! ignored. JWK integers use the unpadded URL-safe alphabet that RFC 7518
//! mandates.

use base64::alphabet;
use base64::engine::general_purpose::{
    GeneralPurpose, GeneralPurposeConfig, STANDARD, URL_SAFE_NO_PAD,
};
use base64::engine::DecodePaddingMode;
use base64::{DecodeError, Engine};

use crate::error::CryptoError;

/// Encode bytes as standard, padded base64
pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Standard alphabet, padding optional, stray trailing bits discarded
const FORGIVING: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Decode standard base64 into bytes
///
/// Accepts input with or without `=` padding and skips ASCII whitespace, so
/// envelopes that were re-wrapped or had their padding trimmed in transit
/// still decode.
pub fn from_base64(text: &str) -> Result<Vec<u8>, CryptoError> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(FORGIVING.decode(compact)?)
}

pub(crate) fn to_base64url(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

pub(crate) fn from_base64url(text: &str) -> Result<Vec<u8>, DecodeError> {
    URL_SAFE_NO_PAD.decode(text)
}
