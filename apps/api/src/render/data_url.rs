//! `data:<mime>;base64,<payload>` URLs, the format images travel in between the
//! pipeline, the session and the browser.

use base64::{engine::general_purpose, Engine as _};

use crate::render::PosterError;

pub fn encode(mime_type: &str, bytes: &[u8]) -> String {
    format!(
        "data:{mime_type};base64,{}",
        general_purpose::STANDARD.encode(bytes)
    )
}

/// Splits a base64 data URL into its MIME type and decoded bytes.
pub fn decode(url: &str) -> Result<(String, Vec<u8>), PosterError> {
    let rest = url
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| PosterError::InvalidDataUrl("missing data: scheme".to_string()))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| PosterError::InvalidDataUrl("missing payload separator".to_string()))?;
    let mime_type = meta
        .strip_suffix(";base64")
        .ok_or_else(|| PosterError::InvalidDataUrl("payload is not base64".to_string()))?;

    let bytes = general_purpose::STANDARD.decode(payload)?;
    Ok((mime_type.to_string(), bytes))
}
