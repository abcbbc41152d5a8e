//! Embed a logo at the center of a freshly generated QR code
//!
//! Usage: cargo run --example embed_logo

use image::{DynamicImage, Rgba, RgbaImage};
use qrmark::{LogoCompositor, Payload, QrEncoder};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let encoder = QrEncoder::new();
    let qr = encoder.encode(&Payload::new("https://example.com")?)?;

    // Stand-in logo: a solid square; any decodable image file works the same way
    let logo = DynamicImage::ImageRgba8(RgbaImage::from_pixel(64, 64, Rgba([180, 40, 40, 255])));

    let composited = LogoCompositor::new().embed(&qr, &logo);
    composited.save("qr_with_logo.png")?;

    println!("✓ QR code with center logo saved to qr_with_logo.png");

    Ok(())
}
