//! Output path resolution, PNG writing, and generation reports

use crate::config::OutputOptions;
use crate::error::{Error, Result};
use image::{ImageFormat, Rgba, RgbaImage, imageops};
use serde_json::{Value, json};
use std::env;
use std::path::{Path, PathBuf};

/// Resolved destination for a generated QR image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    /// Full path of the PNG file to be written
    pub path: PathBuf,
}

impl OutputTarget {
    /// Resolve user-supplied name and directory fields into a concrete path.
    ///
    /// Blank fields fall back to the configured defaults: the fixed base
    /// name, and a `qrcode/` folder beside the executable. The directory is
    /// created if missing, and the `.png` extension is always appended.
    pub fn resolve(name: &str, directory: &str, options: &OutputOptions) -> Result<Self> {
        let name = name.trim();
        let base = if name.is_empty() {
            options.default_name.as_str()
        } else {
            name
        };

        let directory = directory.trim();
        let dir = if directory.is_empty() {
            match &options.default_dir {
                Some(dir) => dir.clone(),
                None => default_output_dir()?,
            }
        } else {
            PathBuf::from(directory)
        };

        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            path: dir.join(format!("{base}.png")),
        })
    }
}

/// Default output directory: a `qrcode/` folder beside the executable,
/// falling back to the current directory when that cannot be determined.
fn default_output_dir() -> Result<PathBuf> {
    let base = match env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        Some(dir) => dir,
        None => env::current_dir()?,
    };
    Ok(base.join("qrcode"))
}

/// Flatten `image` onto an opaque white background and write it to `path`.
///
/// With `overwrite` disabled an existing file is left untouched and the
/// call fails with [`Error::OutputExists`]. With it enabled any existing
/// file is replaced in place; the write is not atomic.
pub fn write_png(image: &RgbaImage, path: &Path, overwrite: bool) -> Result<()> {
    if !overwrite && path.exists() {
        return Err(Error::OutputExists(path.to_path_buf()));
    }

    flatten(image).save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Composite the image over opaque white so the saved PNG carries no
/// remaining transparency.
fn flatten(image: &RgbaImage) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(
        image.width(),
        image.height(),
        Rgba([255, 255, 255, 255]),
    );
    imageops::overlay(&mut canvas, image, 0, 0);
    canvas
}

/// Combined structured and human-readable report of a finished generation
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Structured JSON representation suitable for downstream consumers
    pub json: Value,
    /// Human-readable lines for terminal presentation
    pub human: Vec<String>,
}

/// Render a completed generation into both JSON and human-readable forms.
pub fn render_generation(path: &Path, image: &RgbaImage, logo_embedded: bool) -> GenerationReport {
    let json = json!({
        "path": path.display().to_string(),
        "width": image.width(),
        "height": image.height(),
        "logo": logo_embedded,
    });

    let mut human = Vec::new();
    human.push(format!("QR code saved to: {}", path.display()));
    human.push(format!(
        "  Dimensions: {}x{} px",
        image.width(),
        image.height()
    ));
    if logo_embedded {
        human.push("  Center logo: embedded".to_string());
    }

    GenerationReport { json, human }
}
