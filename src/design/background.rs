//! Background image payload.
//!
//! Uploaded files are decoded once up front so a corrupt or non-image file
//! is rejected before it ever reaches the document. The original encoded
//! bytes are kept for the structured export (as a data URI), so a saved
//! design embeds the background byte-for-byte.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{DynamicImage, ImageFormat};

/// An in-memory, displayable background: the original encoded bytes plus
/// everything the canvas and exporter need without re-sniffing the file.
#[derive(Debug, Clone)]
pub struct BackgroundImage {
    pub bytes: Arc<Vec<u8>>,
    pub mime: String,
    pub width: u32,
    pub height: u32,
}

impl BackgroundImage {
    /// Decode-validate encoded image bytes. Rejects anything the `image`
    /// crate cannot identify and decode.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, String> {
        let format = image::guess_format(&bytes)
            .map_err(|e| format!("Unrecognized image format: {}", e))?;
        let decoded = image::load_from_memory_with_format(&bytes, format)
            .map_err(|e| format!("Failed to decode image: {}", e))?;
        Ok(Self {
            width: decoded.width(),
            height: decoded.height(),
            mime: mime_for(format).to_string(),
            bytes: Arc::new(bytes),
        })
    }

    /// Decode to pixels for texture upload or rasterization.
    pub fn decode(&self) -> Result<DynamicImage, String> {
        image::load_from_memory(&self.bytes).map_err(|e| format!("Failed to decode image: {}", e))
    }

    /// Encode as a `data:<mime>;base64,<payload>` URI for the structured
    /// export format.
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(self.bytes.as_slice()))
    }

    /// Parse a data URI produced by [`Self::to_data_uri`] (or any browser)
    /// back into a validated background.
    pub fn from_data_uri(uri: &str) -> Result<Self, String> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| "Background is not a data URI".to_string())?;
        let (_, payload) = rest
            .split_once(";base64,")
            .ok_or_else(|| "Background data URI is not base64-encoded".to_string())?;
        let bytes = STANDARD
            .decode(payload)
            .map_err(|e| format!("Invalid base64 in background: {}", e))?;
        Self::from_bytes(bytes)
    }

    /// A tiny solid PNG for tests.
    #[cfg(test)]
    pub fn for_tests(width: u32, height: u32) -> Self {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        Self::from_bytes(bytes).unwrap()
    }
}

fn mime_for(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Png => "image/png",
        ImageFormat::Jpeg => "image/jpeg",
        ImageFormat::WebP => "image/webp",
        ImageFormat::Gif => "image/gif",
        ImageFormat::Bmp => "image/bmp",
        _ => "application/octet-stream",
    }
}
