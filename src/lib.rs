//! qrmark - URL to QR code PNG generation with a centered logo overlay
//!
//! This library encodes a text payload (usually a URL) into a QR code
//! image, optionally embeds a logo at its center on an opaque halo tile,
//! and writes the result to disk as a PNG. Matrix encoding and error
//! correction are delegated to the `qrcode` crate, pixel work to `image`;
//! this crate contributes payload validation, fixed-parameter rendering,
//! the logo compositor, and output path resolution.
//!
//! # Example
//!
//! ```no_run
//! use qrmark::{GenerateRequest, QrGenerator, QrmarkConfig};
//!
//! fn main() -> qrmark::Result<()> {
//!     let generator = QrGenerator::new(&QrmarkConfig::default())?;
//!
//!     let generated = generator.generate(&GenerateRequest {
//!         url: "https://example.com".to_string(),
//!         ..Default::default()
//!     })?;
//!
//!     println!("Saved to {}", generated.path.display());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod qr;

// Re-exports for convenience
pub use error::{Error, Result};

pub use config::{
    EcLevelOption, EncoderOptions, LogRotation, LoggingOptions, OutputOptions, QrmarkConfig,
};
pub use output::{GenerationReport, OutputTarget};
pub use qr::{LogoCompositor, Payload, QrEncoder};

use image::RgbaImage;
use std::path::PathBuf;

/// High-level generator combining encoder, compositor, and PNG writer
pub struct QrGenerator {
    encoder: QrEncoder,
    compositor: LogoCompositor,
    output: OutputOptions,
}

/// A single generation request: the four user-facing fields
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    /// Text payload (usually a URL) to encode. Must be non-empty.
    pub url: String,
    /// Output base name; blank selects the configured default
    pub name: String,
    /// Output directory; blank selects the configured default folder
    pub directory: String,
    /// Optional path to a logo image embedded at the center of the code
    pub logo: Option<PathBuf>,
    /// Replace an existing file at the target path. `None` defers to the
    /// configured default.
    pub overwrite: Option<bool>,
}

/// Result of a successful generation
#[derive(Debug, Clone)]
pub struct GeneratedQr {
    /// Path of the written PNG file
    pub path: PathBuf,
    /// The composited image as it was written (opaque RGBA)
    pub image: RgbaImage,
    /// Whether a logo was embedded at the center
    pub logo_embedded: bool,
}

impl QrGenerator {
    /// Create a generator from a resolved configuration.
    pub fn new(config: &QrmarkConfig) -> Result<Self> {
        let encoder = QrEncoder::with_options(&config.encoder.validated()?);
        Ok(Self {
            encoder,
            compositor: LogoCompositor::new(),
            output: config.output.clone(),
        })
    }

    /// Run one generation: validate, encode, optionally compose, write.
    ///
    /// Each call is independent and synchronous; the only shared state
    /// across calls is the output file on disk.
    pub fn generate(&self, request: &GenerateRequest) -> Result<GeneratedQr> {
        let payload = Payload::new(request.url.as_str())?;
        let qr = self.encoder.encode(&payload)?;

        let (image, logo_embedded) = match &request.logo {
            Some(path) => {
                let logo = LogoCompositor::load_logo(path)?;
                (self.compositor.embed(&qr, &logo), true)
            }
            None => (qr, false),
        };

        let target = OutputTarget::resolve(&request.name, &request.directory, &self.output)?;
        let overwrite = request.overwrite.unwrap_or(self.output.overwrite);
        output::write_png(&image, &target.path, overwrite)?;

        tracing::info!(
            path = %target.path.display(),
            logo = logo_embedded,
            "QR code written"
        );

        Ok(GeneratedQr {
            path: target.path,
            image,
            logo_embedded,
        })
    }

    /// Render the payload's symbol as Unicode half-blocks for terminal preview.
    pub fn preview(&self, url: &str) -> Result<String> {
        let payload = Payload::new(url)?;
        self.encoder.render_terminal(&payload)
    }
}
