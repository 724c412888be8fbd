use std::fs;
use std::path::{Path, PathBuf};

use image::Rgba;
use pwa_icons::config::Config;
use pwa_icons::generator::{summarize, IconGenerator};
use pwa_icons::icon_spec::IconSpec;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

const OPAQUE_SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="512" height="512" viewBox="0 0 512 512">
  <rect x="0" y="0" width="512" height="512" fill="#ff0000"/>
</svg>"##;

const CIRCLE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="512" height="512" viewBox="0 0 512 512">
  <circle cx="256" cy="256" r="200" fill="#ff0000"/>
</svg>"##;

const WIDE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100" viewBox="0 0 200 100">
  <rect x="0" y="0" width="200" height="100" fill="#ff0000"/>
</svg>"##;

/// Lay out a throwaway public/ directory with favicon.svg in it
fn public_dir_with(svg: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let public = dir.path().join("public");
    fs::create_dir(&public).unwrap();
    fs::write(public.join("favicon.svg"), svg).unwrap();
    (dir, public)
}

fn generator(public: &Path) -> IconGenerator {
    let config = Config::default();
    IconGenerator::from_config(&config, &public.join(&config.source), public)
        .expect("Failed to create generator")
        .quiet(true)
}

#[test]
fn test_default_run_writes_all_icons_with_documented_sizes() {
    let (_dir, public) = public_dir_with(OPAQUE_SQUARE);

    let generated = generator(&public).generate_all(&IconSpec::defaults()).unwrap();
    assert_eq!(generated.len(), 5);

    let expected = [
        ("icon-192.png", 192),
        ("icon-512.png", 512),
        ("icon-maskable-192.png", 192),
        ("icon-maskable-512.png", 512),
        ("apple-touch-icon.png", 180),
    ];
    for (name, size) in expected {
        let path = public.join(name);
        assert!(path.exists(), "{name} missing");
        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (size, size), "{name}");
    }
}

#[test]
fn test_maskable_192_has_white_border_around_artwork() {
    let (_dir, public) = public_dir_with(OPAQUE_SQUARE);
    let spec = IconSpec::new("icon-maskable-192.png", 192, 0.1);

    let icon = generator(&public).generate(&spec).unwrap();
    assert_eq!((icon.width, icon.height), (192, 192));

    let img = image::open(public.join("icon-maskable-192.png")).unwrap().to_rgba8();

    // Artwork occupies [19, 172) on both axes
    for &(x, y) in &[(0, 0), (18, 18), (18, 96), (96, 18), (172, 172), (172, 96), (191, 191)] {
        assert_eq!(*img.get_pixel(x, y), WHITE, "({x}, {y}) should be border");
    }
    for &(x, y) in &[(20, 20), (96, 96), (170, 170), (20, 170)] {
        assert_eq!(*img.get_pixel(x, y), RED, "({x}, {y}) should be artwork");
    }
    assert!(img.pixels().all(|p| p.0[3] == 255));
}

#[test]
fn test_unpadded_icon_keeps_transparency() {
    let (_dir, public) = public_dir_with(CIRCLE);
    let spec = IconSpec::new("icon-192.png", 192, 0.0);

    generator(&public).generate(&spec).unwrap();
    let img = image::open(public.join("icon-192.png")).unwrap().to_rgba8();

    assert_eq!(img.get_pixel(0, 0).0[3], 0);
    assert_eq!(*img.get_pixel(96, 96), RED);
}

#[test]
fn test_padded_icon_fills_transparent_areas_with_white() {
    let (_dir, public) = public_dir_with(CIRCLE);
    let spec = IconSpec::new("icon-maskable-512.png", 512, 0.1);

    generator(&public).generate(&spec).unwrap();
    let img = image::open(public.join("icon-maskable-512.png")).unwrap().to_rgba8();

    // Inside the artwork square but outside the circle
    assert_eq!(*img.get_pixel(60, 60), WHITE);
    assert_eq!(*img.get_pixel(256, 256), RED);
}

#[test]
fn test_non_square_source_is_centred_without_stretching() {
    let (_dir, public) = public_dir_with(WIDE);
    let spec = IconSpec::new("wide.png", 64, 0.0);

    generator(&public).generate(&spec).unwrap();
    let img = image::open(public.join("wide.png")).unwrap().to_rgba8();

    // 200x100 scaled to 64x32, centred vertically at [16, 48)
    assert_eq!(img.get_pixel(32, 4).0[3], 0);
    assert_eq!(img.get_pixel(32, 60).0[3], 0);
    assert_eq!(*img.get_pixel(32, 32), RED);
    assert_eq!(*img.get_pixel(1, 32), RED);
}

#[test]
fn test_regeneration_is_byte_identical() {
    let (_dir, public) = public_dir_with(CIRCLE);
    let generator = generator(&public);
    let specs = IconSpec::defaults();

    generator.generate_all(&specs).unwrap();
    let first: Vec<Vec<u8>> = specs
        .iter()
        .map(|s| fs::read(public.join(&s.name)).unwrap())
        .collect();

    generator.generate_all(&specs).unwrap();
    for (spec, before) in specs.iter().zip(first) {
        let after = fs::read(public.join(&spec.name)).unwrap();
        assert_eq!(before, after, "{} changed between runs", spec.name);
    }
}

#[test]
fn test_missing_source_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let public = dir.path().join("public");
    fs::create_dir(&public).unwrap();

    let result = IconGenerator::new(&public.join("favicon.svg"), &public, [255; 4]);
    assert!(result.is_err());
    assert_eq!(fs::read_dir(&public).unwrap().count(), 0);
}

#[test]
fn test_malformed_svg_is_an_error() {
    let (_dir, public) = public_dir_with("this is not svg");
    let result = IconGenerator::new(&public.join("favicon.svg"), &public, [255; 4]);
    assert!(result.is_err());
}

#[test]
fn test_output_directory_is_created() {
    let (dir, public) = public_dir_with(OPAQUE_SQUARE);
    let out_dir = dir.path().join("dist").join("icons");

    let generator = IconGenerator::new(&public.join("favicon.svg"), &out_dir, [255; 4])
        .unwrap()
        .quiet(true);
    generator
        .generate_all(&[IconSpec::new("icon-192.png", 192, 0.0)])
        .unwrap();

    assert!(out_dir.join("icon-192.png").exists());
}

#[test]
fn test_summary_reports_written_files() {
    let (_dir, public) = public_dir_with(OPAQUE_SQUARE);
    let generated = generator(&public).generate_all(&IconSpec::defaults()).unwrap();

    fs::remove_file(public.join("icon-512.png")).unwrap();
    let summary = summarize(&generated);

    let names: Vec<&str> = summary.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(
        names,
        vec!["icon-192.png", "icon-maskable-192.png", "icon-maskable-512.png", "apple-touch-icon.png"]
    );
    assert!(summary.iter().all(|(_, bytes)| *bytes > 0));
}

#[test]
fn test_manifest_drives_generation() {
    let (dir, public) = public_dir_with(OPAQUE_SQUARE);
    let manifest = dir.path().join("pwa-icons.yaml");
    fs::write(
        &manifest,
        "background: [0, 0, 0, 255]\nicons:\n  - name: tiny.png\n    size: 40\n    padding: 0.25\n",
    )
    .unwrap();

    let config = Config::load(Some(&manifest)).unwrap();
    let generator = IconGenerator::from_config(&config, &public.join(&config.source), &public)
        .unwrap()
        .quiet(true);
    generator.generate_all(&config.icons).unwrap();

    let img = image::open(public.join("tiny.png")).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (40, 40));
    assert_eq!(*img.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
    assert_eq!(*img.get_pixel(20, 20), RED);
}

#[test]
fn test_init_config_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pwa-icons.yaml");

    Config::default().save_new(&path).unwrap();
    assert_eq!(Config::load(Some(&path)).unwrap(), Config::default());

    assert!(Config::default().save_new(&path).is_err());
}
