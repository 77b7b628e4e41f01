//! base64url helpers.
//!
//! VAPID public keys arrive as unpadded base64url text while the platform
//! subscribe call wants raw bytes; subscription keys travel the other way.

use base64::{
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
    Engine as _,
};
use thiserror::Error;

/// Errors produced while decoding base64url text.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("base64url input is empty")]
    Empty,

    #[error("invalid base64url input: {0}")]
    Invalid(#[from] base64::DecodeError),
}

/// Decodes base64url (or plain base64) text, padded or not, into bytes.
///
/// The input is padded to a multiple of four and mapped onto the standard
/// alphabet before decoding, so `"FgQ"` yields `[0x16, 0x04]`.
pub fn decode_base64url(input: &str) -> Result<Vec<u8>, DecodeError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DecodeError::Empty);
    }

    let padding = (4 - trimmed.len() % 4) % 4;
    let mut normalized: String = trimmed
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    normalized.extend(std::iter::repeat('=').take(padding));

    Ok(STANDARD.decode(normalized)?)
}

/// Encodes bytes as unpadded base64url, the form `PushSubscription.toJSON()` uses.
pub fn encode_base64url(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}
