//! Generate a QR code and save it to a file
//!
//! Usage: cargo run --example generate_qr

use qrmark::{GenerateRequest, QrGenerator, QrmarkConfig};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let generator = QrGenerator::new(&QrmarkConfig::default())?;

    let generated = generator.generate(&GenerateRequest {
        url: "https://example.com".to_string(),
        name: "example".to_string(),
        directory: ".".to_string(),
        ..Default::default()
    })?;

    println!("✓ QR code generated and saved to {}", generated.path.display());
    println!("  {}x{} px", generated.image.width(), generated.image.height());

    Ok(())
}
