//! Subscription Text Codec
//!
//! Base64 transform used for vmess payloads and for whole subscription bodies.

use base64::engine::general_purpose;
use base64::Engine;

/// Errors produced while decoding codec text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("empty payload")]
    Empty,
    #[error("invalid base64 payload")]
    InvalidBase64,
    #[error("decoded payload is not valid UTF-8")]
    InvalidUtf8,
}

/// Encode UTF-8 text as padded standard base64.
pub fn encode(text: &str) -> String {
    general_purpose::STANDARD.encode(text.as_bytes())
}

/// Decode base64 text back into a UTF-8 string.
///
/// Whitespace is ignored, missing padding is tolerated and the URL-safe
/// alphabet is accepted as a fallback.
pub fn decode(text: &str) -> Result<String, CodecError> {
    let cleaned: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if cleaned.is_empty() {
        return Err(CodecError::Empty);
    }

    let unpadded = cleaned.trim_end_matches('=');
    let engines = [
        &general_purpose::STANDARD,
        &general_purpose::STANDARD_NO_PAD,
        &general_purpose::URL_SAFE,
        &general_purpose::URL_SAFE_NO_PAD,
    ];

    for (i, engine) in engines.iter().enumerate() {
        // the *_NO_PAD engines reject trailing '=' so feed them the stripped form
        let candidate = if i % 2 == 1 { unpadded } else { cleaned.as_str() };
        if let Ok(bytes) = engine.decode(candidate) {
            return String::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8);
        }
    }

    Err(CodecError::InvalidBase64)
}

/// Whether a body looks like codec text rather than a plain link list.
///
/// Only the standard alphabet counts, whitespace is ignored.
pub fn looks_encoded(text: &str) -> bool {
    let mut seen = false;
    for c in text.chars() {
        if c.is_whitespace() {
            continue;
        }
        if !(c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '=')) {
            return false;
        }
        seen = true;
    }
    seen
}
