use image::{Rgba, RgbaImage};
use qrmark::{Error, GenerateRequest, QrGenerator, QrmarkConfig};
use std::path::Path;

fn generator() -> QrGenerator {
    QrGenerator::new(&QrmarkConfig::default()).expect("construct generator")
}

fn request(url: &str, name: &str, dir: &Path) -> GenerateRequest {
    GenerateRequest {
        url: url.to_string(),
        name: name.to_string(),
        directory: dir.display().to_string(),
        logo: None,
        overwrite: None,
    }
}

#[test]
fn generates_png_that_round_trips() {
    let dir = tempfile::tempdir().expect("create temp dir");

    let generated = generator()
        .generate(&request("https://example.com", "test", dir.path()))
        .expect("generate");

    assert_eq!(generated.path, dir.path().join("test.png"));
    assert!(generated.path.is_file());

    let saved = image::open(&generated.path).expect("reopen png");
    // version 5, level H, 10 px modules, 5-module quiet zone
    assert_eq!(saved.width(), 470);
    assert_eq!(saved.height(), 470);

    let mut prepared = rqrr::PreparedImage::prepare(saved.to_luma8());
    let grids = prepared.detect_grids();
    assert_eq!(grids.len(), 1, "expected exactly one QR symbol");
    let (_meta, content) = grids[0].decode().expect("decode symbol");
    assert_eq!(content, "https://example.com");
}

#[test]
fn regeneration_overwrites_with_identical_content() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let req = request("https://example.com", "test", dir.path());
    let generator = generator();

    generator.generate(&req).expect("first generation");
    let first = std::fs::read(dir.path().join("test.png")).expect("read first");

    generator.generate(&req).expect("second generation");
    let second = std::fs::read(dir.path().join("test.png")).expect("read second");

    assert_eq!(first, second);
}

#[test]
fn empty_payload_creates_no_file() {
    let dir = tempfile::tempdir().expect("create temp dir");

    let result = generator().generate(&request("", "test", dir.path()));
    assert!(matches!(result, Err(Error::EmptyPayload)));

    let entries = std::fs::read_dir(dir.path()).expect("read dir").count();
    assert_eq!(entries, 0, "no partial output expected");
}

#[test]
fn blank_name_uses_default_base_name() {
    let dir = tempfile::tempdir().expect("create temp dir");

    let generated = generator()
        .generate(&request("https://example.com", "", dir.path()))
        .expect("generate");

    assert_eq!(generated.path, dir.path().join("qrcode.png"));
    assert!(generated.path.is_file());
}

#[test]
fn no_clobber_refuses_existing_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let mut req = request("https://example.com", "test", dir.path());
    let generator = generator();

    generator.generate(&req).expect("first write");

    req.overwrite = Some(false);
    match generator.generate(&req) {
        Err(Error::OutputExists(path)) => assert_eq!(path, dir.path().join("test.png")),
        other => panic!("expected OutputExists, got {other:?}"),
    }
}

#[test]
fn unreadable_logo_aborts_without_output() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let generator = generator();

    // Missing file
    let mut req = request("https://example.com", "test", dir.path());
    req.logo = Some(dir.path().join("missing.png"));
    assert!(matches!(generator.generate(&req), Err(Error::LogoDecode(_))));
    assert!(!dir.path().join("test.png").exists());

    // Present but not an image
    let bogus = dir.path().join("bogus.png");
    std::fs::write(&bogus, b"not an image").expect("write bogus logo");
    req.logo = Some(bogus);
    assert!(matches!(generator.generate(&req), Err(Error::LogoDecode(_))));
    assert!(!dir.path().join("test.png").exists());
}

#[test]
fn logo_difference_is_bounded_by_the_halo_tile() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let generator = generator();

    let logo_path = dir.path().join("logo.png");
    RgbaImage::from_pixel(64, 64, Rgba([200, 30, 30, 255]))
        .save(&logo_path)
        .expect("write logo");

    let plain = generator
        .generate(&request("https://example.com", "plain", dir.path()))
        .expect("generate without logo");

    let mut badged_req = request("https://example.com", "badged", dir.path());
    badged_req.logo = Some(logo_path);
    let badged = generator.generate(&badged_req).expect("generate with logo");

    let plain_img = image::open(&plain.path).expect("open plain").to_rgba8();
    let badged_img = image::open(&badged.path).expect("open badged").to_rgba8();
    assert_eq!(plain_img.dimensions(), badged_img.dimensions());

    // tile side = floor(floor(470 * 0.3) * 1.1) = 155, centered at (470 - 155) / 2
    let corner = 157;
    let tile = 155;
    for (x, y, pixel) in badged_img.enumerate_pixels() {
        let inside = (corner..corner + tile).contains(&x) && (corner..corner + tile).contains(&y);
        if !inside {
            assert_eq!(
                pixel,
                plain_img.get_pixel(x, y),
                "pixel ({x},{y}) changed outside the halo tile"
            );
        }
    }

    // the center itself now shows the logo
    assert_ne!(badged_img.get_pixel(235, 235), plain_img.get_pixel(235, 235));
}
