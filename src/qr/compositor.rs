//! Center-logo compositing over rendered QR symbols

use crate::error::{Error, Result};
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};
use std::path::Path;

/// Fraction of the QR side length the logo is scaled to
const LOGO_SCALE: f32 = 0.3;
/// Growth factor of the backing tile relative to the logo
const HALO_SCALE: f32 = 1.1;

/// Composites a logo onto the center of a rendered QR symbol.
///
/// The logo sits on an opaque backing tile slightly larger than itself, so
/// the modules directly behind it are fully occluded while the finder and
/// alignment patterns stay untouched. Callers must keep the encoder at
/// error-correction level H for the resulting occlusion to stay scannable.
pub struct LogoCompositor {
    background: Rgba<u8>,
}

impl LogoCompositor {
    /// Create a compositor with a white backing tile
    pub fn new() -> Self {
        Self::with_background(Rgba([255, 255, 255, 255]))
    }

    /// Create a compositor with a custom tile fill color
    pub fn with_background(background: Rgba<u8>) -> Self {
        Self { background }
    }

    /// Load a logo image from disk.
    ///
    /// An unreadable or corrupt file fails with [`Error::LogoDecode`];
    /// callers abort the whole generation in that case, no partial output
    /// is written.
    pub fn load_logo(path: &Path) -> Result<DynamicImage> {
        image::open(path).map_err(|e| Error::LogoDecode(format!("{}: {e}", path.display())))
    }

    /// Embed `logo` at the center of `qr`, returning a new image of the
    /// same dimensions. The input QR image is not modified.
    pub fn embed(&self, qr: &RgbaImage, logo: &DynamicImage) -> RgbaImage {
        let side = qr.width();
        let logo_size = (side as f32 * LOGO_SCALE) as u32;
        let tile_size = (logo_size as f32 * HALO_SCALE) as u32;

        // Aspect ratio is intentionally discarded; the logo becomes square.
        let scaled = logo.resize_exact(logo_size, logo_size, FilterType::Lanczos3);

        // Opaque tile with the logo alpha-blended at its center. Transparent
        // logo pixels keep the tile fill.
        let mut tile = RgbaImage::from_pixel(tile_size, tile_size, self.background);
        let inset = i64::from((tile_size - logo_size) / 2);
        imageops::overlay(&mut tile, &scaled, inset, inset);

        let mut output = qr.clone();
        let corner = i64::from((side - tile_size) / 2);
        imageops::overlay(&mut output, &tile, corner, corner);
        output
    }

    /// Side length of the backing tile embedded into a QR image of side `side`
    pub fn tile_size(side: u32) -> u32 {
        let logo_size = (side as f32 * LOGO_SCALE) as u32;
        (logo_size as f32 * HALO_SCALE) as u32
    }
}

impl Default for LogoCompositor {
    fn default() -> Self {
        Self::new()
    }
}
