//! Integration tests for the slicing workflow

use std::fs;
use std::path::Path;

use image::{Rgba, RgbaImage};

use rasterslice::utils::logger::Logger;
use rasterslice::{Canvas, LeftoverMap, Manifest, Slicer, SlicerConfig, TaskOutcome};

const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

fn write_png(path: &Path, image: &RgbaImage) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    image.save(path).unwrap();
}

#[test]
fn test_manifest_workflow_with_leftovers() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("assets");
    let output = dir.path().join("build");
    let leftovers = dir.path().join("leftovers");

    write_png(&input.join("sprite.png"), &RgbaImage::from_pixel(4, 4, RED));
    write_png(&input.join("ui/buttons.png"), &RgbaImage::from_pixel(8, 2, RED));

    let manifest = Manifest::from_str(r##"
[[input]]
path = "sprite.png"
  [[input.output]]
  path = "sprite/top_left.png"
  region = "0,0,2,2"

[[input]]
path = "ui/buttons.png"
  [[input.output]]
  kind = "sheet"
  path = "ui/ok.png"
  size = "2,1"
  template = "4,1"
    [[input.output.place]]
    from = "0,0,2,1"
    to = "0,0"

[[input]]
path = "gone.png"

[[input]]
path = "sprite.png"
  [[input.output]]
  path = "sprite/bottom_right.png"
  region = "2,2,2,2"
  leftover = "#0000ff"
"##).unwrap();

    let logger = Logger::new(&dir.path().join("run.log")).unwrap();
    let config = SlicerConfig::new(&input, &output).leftover_root(&leftovers);
    let report = Slicer::new(config, &logger).run(manifest.tasks()).unwrap();

    assert!(report.is_success());
    assert_eq!(report.processed.len(), 3);
    assert_eq!(report.skipped.len(), 1);
    assert!(report.skipped[0].ends_with("gone.png"));
    assert_eq!(report.leftovers_written, 2);

    // 8x2 source against a 4x1 template doubles everything
    let ok = image::open(output.join("ui/ok.png")).unwrap().to_rgba8();
    assert_eq!(ok.dimensions(), (4, 2));

    let sprite = Canvas::load(&leftovers.join("sprite.png")).unwrap();
    assert_eq!(sprite.pixel(0, 0)[3], 0);
    assert_eq!(sprite.pixel(3, 0), RED);
    assert_eq!(sprite.pixel(3, 3), Rgba([0, 0, 255, 255]));

    let buttons = Canvas::load(&leftovers.join("ui/buttons.png")).unwrap();
    assert_eq!(buttons.pixel(3, 1)[3], 0);
    assert_eq!(buttons.pixel(4, 1), RED);

    assert!(!leftovers.join("gone.png").exists());
    let log = fs::read_to_string(dir.path().join("run.log")).unwrap();
    assert!(log.contains("Skipped"));
}

#[test]
fn test_shared_leftover_map_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in");
    write_png(&input.join("tiles.png"), &RgbaImage::from_pixel(2, 2, RED));

    let first = Manifest::from_str(r#"
[[input]]
path = "tiles.png"
  [[input.output]]
  path = "a.png"
  region = "0,0,1,2"
"#).unwrap();
    let second = Manifest::from_str(r#"
[[input]]
path = "tiles.png"
  [[input.output]]
  path = "b.png"
  region = "1,0,1,1"
"#).unwrap();

    let logger = Logger::sink();
    let slicer = Slicer::new(SlicerConfig::new(&input, dir.path().join("out")), &logger);
    let mut leftovers = LeftoverMap::new();
    slicer.run_with(first.tasks(), &mut leftovers).unwrap();
    slicer.run_with(second.tasks(), &mut leftovers).unwrap();

    assert_eq!(leftovers.len(), 1);
    let canvas = leftovers.get("tiles.png").unwrap();
    assert_eq!(canvas.pixel(0, 0)[3], 0);
    assert_eq!(canvas.pixel(1, 0)[3], 0);
    assert_eq!(canvas.pixel(1, 1), RED);
}

#[test]
fn test_missing_input_through_task_api() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = Manifest::from_str("[[input]]\npath = \"nothing.png\"\n").unwrap();

    let mut leftovers = LeftoverMap::new();
    let outcome = manifest.tasks()[0]
        .process(dir.path(), &dir.path().join("out"), &mut leftovers)
        .unwrap();

    assert!(matches!(outcome, TaskOutcome::Skipped { .. }));
    assert!(!dir.path().join("out").exists());
}
