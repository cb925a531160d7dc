use std::fs;
use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};
use tempfile::TempDir;
use white_bg_strip_wasm::assets::{BatchConfig, process_assets, process_entries};

fn write_png(path: &Path, img: &RgbaImage) {
    img.save_with_format(path, ImageFormat::Png).unwrap();
}

fn sticker() -> RgbaImage {
    let mut img = RgbaImage::from_pixel(5, 5, Rgba([255, 255, 255, 255]));
    img.put_pixel(2, 2, Rgba([40, 80, 160, 255]));
    img
}

#[test]
fn test_processes_and_renames_matching_artifact() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("artifacts");
    let dest = dir.path().join("public/images/decorations");
    fs::create_dir_all(&src).unwrap();

    write_png(&src.join("moon_milk_20240101.png"), &sticker());
    fs::write(src.join("other.png"), "unrelated").unwrap();

    let mut config = BatchConfig::new(&src, &dest);
    config.names = vec!["moon_milk".to_string()];

    let report = process_assets(&config).unwrap();
    assert!(report.missing.is_empty());
    assert_eq!(report.processed.len(), 1);
    assert_eq!(report.processed[0].cleared, 24);
    assert_eq!(report.processed[0].destination, dest.join("moon-milk.png"));

    let out = image::open(dest.join("moon-milk.png")).unwrap().to_rgba8();
    assert_eq!(*out.get_pixel(0, 0), Rgba([255, 255, 255, 0]));
    assert_eq!(*out.get_pixel(2, 2), Rgba([40, 80, 160, 255]));
}

#[test]
fn test_missing_assets_are_reported_not_fatal() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("artifacts");
    fs::create_dir_all(&src).unwrap();
    write_png(&src.join("toy_rocket_1.png"), &sticker());

    let config = BatchConfig::new(&src, dir.path().join("out"));
    let report = process_assets(&config).unwrap();

    assert_eq!(report.processed.len(), 1);
    assert_eq!(report.processed[0].name, "toy_rocket");
    assert_eq!(report.missing.len(), 5);
    assert!(report.missing.contains(&"space_suit".to_string()));
    assert!(dir.path().join("out/toy-rocket.png").exists());
    assert!(!dir.path().join("out/space-suit.png").exists());
}

#[test]
fn test_corrupt_candidate_falls_through_to_next_match() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("artifacts");
    let dest = dir.path().join("out");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(&dest).unwrap();
    fs::write(src.join("wizard_hat_a.png"), "not a png").unwrap();
    write_png(&src.join("wizard_hat_b.png"), &sticker());

    let mut config = BatchConfig::new(&src, &dest);
    config.names = vec!["wizard_hat".to_string()];

    // Corrupt file listed first so the failure path runs before the valid one.
    let listing = vec!["wizard_hat_a.png".to_string(), "wizard_hat_b.png".to_string()];
    let report = process_entries(&config, &listing);

    assert!(report.missing.is_empty());
    assert_eq!(report.processed.len(), 1);
    assert!(report.processed[0].source.ends_with("wizard_hat_b.png"));
    assert!(dest.join("wizard-hat.png").exists());
}

#[test]
fn test_only_corrupt_candidates_counts_as_missing() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("artifacts");
    fs::create_dir_all(&src).unwrap();
    fs::write(src.join("sunglasses_1.png"), "garbage").unwrap();

    let mut config = BatchConfig::new(&src, dir.path().join("out"));
    config.names = vec!["sunglasses".to_string()];

    let report = process_assets(&config).unwrap();
    assert!(report.processed.is_empty());
    assert_eq!(report.missing, vec!["sunglasses".to_string()]);
}

#[test]
fn test_unlistable_source_is_fatal() {
    let dir = TempDir::new().unwrap();
    let config = BatchConfig::new(dir.path().join("does-not-exist"), dir.path().join("out"));
    assert!(process_assets(&config).is_err());
}
