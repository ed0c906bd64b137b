//! Decoding of base64 avatar payloads.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use thiserror::Error;
use uuid::Uuid;

/// Avatars are stored as PNG regardless of what the browser sent.
pub const AVATAR_CONTENT_TYPE: &str = "image/png";
const AVATAR_EXTENSION: &str = "png";

/// Standard alphabet, padding optional.
const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Invalid base64 image data: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

/// Drop a `data:<mime>;base64,` prefix: keep what follows the first comma,
/// up to any further comma.
pub fn strip_data_url(input: &str) -> &str {
    input.split(',').nth(1).unwrap_or(input)
}

/// Strip the prefix, ignore whitespace and decode. An empty payload decodes
/// to an empty image.
pub fn decode_image(input: &str) -> Result<Vec<u8>, ImageError> {
    let payload: String = strip_data_url(input)
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    Ok(BASE64.decode(payload.as_bytes())?)
}

/// `<prefix>/<uuid-v4>.png`
pub fn avatar_key(prefix: &str) -> String {
    format!(
        "{}/{}.{}",
        prefix.trim_end_matches('/'),
        Uuid::new_v4(),
        AVATAR_EXTENSION
    )
}
