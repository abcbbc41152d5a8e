//! qrmark CLI entrypoint

use clap::Parser;
use qrmark::output::{GenerationReport, render_generation};
use qrmark::{GenerateRequest, QrGenerator, QrmarkConfig, Result, logging};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "qrmark",
    version,
    about = "Encode a URL into a QR code PNG with an optional center logo"
)]
struct Cli {
    /// Text payload (usually a URL) to encode
    url: String,

    /// Output base name without extension (default: "qrcode")
    #[arg(long, value_name = "NAME", default_value = "")]
    name: String,

    /// Output directory (default: qrcode/ beside the executable)
    #[arg(long, value_name = "DIR", default_value = "")]
    dir: String,

    /// Logo image to embed at the center of the code
    #[arg(long, value_name = "PATH")]
    logo: Option<PathBuf>,

    /// Optional configuration file (toml/yaml). Defaults to qrmark.{toml,yaml} in cwd/XDG config.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output results as formatted JSON instead of human-readable text
    #[arg(long)]
    json: bool,

    /// Fail instead of replacing an existing output file
    #[arg(long)]
    no_clobber: bool,

    /// Additionally print the code to the terminal as Unicode blocks
    #[arg(long)]
    preview: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = QrmarkConfig::load(cli.config.as_deref())?;
    logging::init(&config.logging)?;

    let generator = QrGenerator::new(&config)?;

    if cli.preview {
        println!("{}", generator.preview(&cli.url)?);
    }

    let request = GenerateRequest {
        url: cli.url,
        name: cli.name,
        directory: cli.dir,
        logo: cli.logo,
        overwrite: cli.no_clobber.then_some(false),
    };

    let generated = generator.generate(&request)?;
    let report = render_generation(&generated.path, &generated.image, generated.logo_embedded);
    emit(&report, cli.json)
}

fn emit(report: &GenerationReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&report.json)?);
    } else {
        for line in &report.human {
            println!("{line}");
        }
    }
    Ok(())
}
