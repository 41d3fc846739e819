//! Figure payload encoding for the rendering layer.
//!
//! Renderers embed figures either as `data:` URIs in HTML/JSON or as files on
//! disk. Both need the image's real format, which is sniffed from the
//! payload's magic bytes rather than trusted from upstream metadata.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::ImageFormat;
use tracing::debug;

const FALLBACK_MIME: &str = "application/octet-stream";

/// Image format of a payload, if recognisable.
pub fn sniff_format(payload: &[u8]) -> Option<ImageFormat> {
    image::guess_format(payload).ok()
}

/// MIME type for a payload; `application/octet-stream` when unknown.
pub fn mime_type(payload: &[u8]) -> &'static str {
    sniff_format(payload)
        .map(|f| f.to_mime_type())
        .unwrap_or(FALLBACK_MIME)
}

/// File extension for a payload; `bin` when unknown.
pub fn file_extension(payload: &[u8]) -> &'static str {
    sniff_format(payload)
        .and_then(|f| f.extensions_str().first().copied())
        .unwrap_or("bin")
}

/// Encode a payload as a base64 `data:` URI.
pub fn data_uri(payload: &[u8]) -> String {
    let b64 = STANDARD.encode(payload);
    debug!("Encoded figure → {} bytes base64", b64.len());
    format!("data:{};base64,{}", mime_type(payload), b64)
}
