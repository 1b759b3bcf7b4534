/// Content type assumed when the magic bytes are not recognized. Posters are
/// requested as JPEG, so that is the likeliest payload.
pub const FALLBACK_IMAGE_MIME: &str = "image/jpeg";

/// Identify an image format from its leading bytes.
pub fn sniff_image_mime(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [0x89, 0x50, 0x4E, 0x47, ..] => Some("image/png"),
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Some("image/webp"),
        [0x47, 0x49, 0x46, 0x38, ..] => Some("image/gif"),
        _ => None,
    }
}

/// Like [`sniff_image_mime`], falling back to [`FALLBACK_IMAGE_MIME`].
pub fn detect_image_mime(bytes: &[u8]) -> &'static str {
    sniff_image_mime(bytes).unwrap_or_else(|| {
        tracing::warn!(
            "Unrecognized image format (first 4 bytes: {:02X?}), assuming {}",
            &bytes[..bytes.len().min(4)],
            FALLBACK_IMAGE_MIME
        );
        FALLBACK_IMAGE_MIME
    })
}
