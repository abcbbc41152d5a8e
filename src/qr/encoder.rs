//! QR code encoder

use crate::config::EncoderOptions;
use crate::error::{Error, Result};
use crate::qr::Payload;
use image::{DynamicImage, Luma, Rgba, RgbaImage, imageops};
use qrcode::render::unicode;
use qrcode::{EcLevel, QrCode, Version};

const LIGHT: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// QR code encoder with fixed symbol parameters
///
/// The defaults (version 5, level H, 10 px modules, 5-module quiet zone)
/// produce a deterministic 470x470 px image. Level H tolerates the largest
/// occlusion, which is what makes a center logo safe to embed.
pub struct QrEncoder {
    version: Version,
    ec_level: EcLevel,
    module_size: u32,
    quiet_zone: u32,
}

impl QrEncoder {
    /// Create a new QR encoder with the default fixed parameters
    pub fn new() -> Self {
        Self::with_options(&EncoderOptions::default())
    }

    /// Create a new QR encoder from resolved configuration options
    pub fn with_options(options: &EncoderOptions) -> Self {
        Self {
            version: Version::Normal(options.version),
            ec_level: options.ec_level.into(),
            module_size: options.module_size.max(1),
            quiet_zone: options.quiet_zone,
        }
    }

    /// Encode a payload into an opaque black-on-white RGBA image
    pub fn encode(&self, payload: &Payload) -> Result<RgbaImage> {
        let code = self.symbol(payload)?;

        // Render the bare module grid; the quiet zone is padded on below so
        // its width in modules stays configurable rather than the renderer's
        // fixed four modules.
        let grid = code
            .render::<Luma<u8>>()
            .quiet_zone(false)
            .module_dimensions(self.module_size, self.module_size)
            .build();
        let modules = DynamicImage::ImageLuma8(grid).to_rgba8();

        let margin = self.quiet_zone * self.module_size;
        if margin == 0 {
            return Ok(modules);
        }

        let side = modules.width() + 2 * margin;
        let mut canvas = RgbaImage::from_pixel(side, side, LIGHT);
        imageops::overlay(&mut canvas, &modules, i64::from(margin), i64::from(margin));
        Ok(canvas)
    }

    /// Render the symbol as Unicode half-blocks for terminal display
    pub fn render_terminal(&self, payload: &Payload) -> Result<String> {
        let code = self.symbol(payload)?;
        Ok(code
            .render::<unicode::Dense1x2>()
            .dark_color(unicode::Dense1x2::Dark)
            .light_color(unicode::Dense1x2::Light)
            .build())
    }

    /// Side length in pixels of the image [`encode`](Self::encode) produces
    pub fn rendered_side(&self) -> u32 {
        let modules = match self.version {
            Version::Normal(v) => 17 + 4 * v as u32,
            Version::Micro(v) => 9 + 2 * v as u32,
        };
        (modules + 2 * self.quiet_zone) * self.module_size
    }

    fn symbol(&self, payload: &Payload) -> Result<QrCode> {
        QrCode::with_version(payload.as_bytes(), self.version, self.ec_level)
            .map_err(|e| Error::QrEncode(format!("Failed to create QR symbol: {e}")))
    }
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_fixed_dimensions() {
        let encoder = QrEncoder::new();
        let payload = Payload::new("https://example.com").unwrap();
        let image = encoder.encode(&payload).unwrap();

        // Version 5 is 37 modules; (37 + 2*5) * 10 px
        assert_eq!(image.width(), 470);
        assert_eq!(image.height(), 470);
        assert_eq!(image.width(), encoder.rendered_side());
    }

    #[test]
    fn test_identical_payloads_render_identically() {
        let encoder = QrEncoder::new();
        let payload = Payload::new("https://example.com").unwrap();

        let first = encoder.encode(&payload).unwrap();
        let second = encoder.encode(&payload).unwrap();
        assert_eq!(first.as_raw(), second.as_raw());
    }

    #[test]
    fn test_quiet_zone_is_blank() {
        let encoder = QrEncoder::new();
        let payload = Payload::new("https://example.com").unwrap();
        let image = encoder.encode(&payload).unwrap();

        // 5 modules * 10 px of white margin on every side
        assert_eq!(image.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
        assert_eq!(image.get_pixel(49, 49), &Rgba([255, 255, 255, 255]));
        // The first symbol module is the corner of a finder pattern
        assert_eq!(image.get_pixel(50, 50), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_rejects_payload_too_long_for_version() {
        let encoder = QrEncoder::new();
        let payload = Payload::new("x".repeat(200)).unwrap();

        match encoder.encode(&payload) {
            Err(Error::QrEncode(_)) => {}
            other => panic!("expected QrEncode error, got {other:?}"),
        }
    }

    #[test]
    fn test_terminal_rendering() {
        let encoder = QrEncoder::new();
        let payload = Payload::new("https://example.com").unwrap();
        let rendered = encoder.render_terminal(&payload).unwrap();
        assert!(!rendered.is_empty());
    }
}
