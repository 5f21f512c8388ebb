//! Decoding and encoding of data-URL-embedded images. The browser hands the
//! backend a `data:<mime>;base64,<payload>` string; this module turns it into
//! a raw binary payload plus its MIME type, and back.

use base64::{engine::general_purpose, Engine as _};
use once_cell::sync::Lazy;
use regex::Regex;

// `type/subtype` token of the data-URL header, terminated by `;` or `,`.
static MIME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^data:([\w.+-]+/[\w.+-]+)[;,]").unwrap());

const BASE64_MARKER: &str = ";base64,";

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("malformed image data url: {0}")]
    MalformedImage(&'static str),

    #[error("invalid base64 image payload: {0}")]
    Decode(#[from] base64::DecodeError),
}

/// Split a data-URL into its MIME type and decoded binary payload.
///
/// The payload is everything after the first `;base64,` marker, decoded with
/// the standard alphabet and exact padding.
pub fn decode(data_url: &str) -> Result<(String, Vec<u8>), CodecError> {
    let mime = MIME_PATTERN
        .captures(data_url)
        .and_then(|c| c.get(1))
        .ok_or(CodecError::MalformedImage("no mime type found"))?
        .as_str()
        .to_string();

    let (_, payload) = data_url
        .split_once(BASE64_MARKER)
        .ok_or(CodecError::MalformedImage("no base64 marker found"))?;

    let bytes = general_purpose::STANDARD.decode(payload)?;
    Ok((mime, bytes))
}

/// Inverse of [`decode`]: wrap raw bytes back into a data-URL.
pub fn encode(bytes: &[u8], mime: &str) -> String {
    format!("data:{mime}{BASE64_MARKER}{}", general_purpose::STANDARD.encode(bytes))
}
