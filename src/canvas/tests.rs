//! Tests for canvases and drawing surfaces

use image::{Rgba, RgbaImage};

use super::{Canvas, Region};

const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

#[test]
fn test_new_canvas_is_transparent() {
    let canvas = Canvas::new(3, 2);
    assert_eq!(canvas.width(), 3);
    assert_eq!(canvas.height(), 2);
    assert!(canvas.pixels().pixels().all(|p| p[3] == 0));
}

#[test]
fn test_draw_image_copies_onto_transparent_canvas() {
    let mut canvas = Canvas::new(4, 4);
    let source = RgbaImage::from_pixel(4, 4, RED);
    canvas.draw_image(&source, 0, 0);
    assert_eq!(canvas.pixels(), &source);
}

#[test]
fn test_draw_image_keeps_partial_alpha_exact() {
    let mut source = RgbaImage::new(4, 1);
    source.put_pixel(0, 0, Rgba([10, 20, 30, 128]));
    source.put_pixel(1, 0, Rgba([254, 127, 1, 9]));
    source.put_pixel(2, 0, Rgba([128, 64, 127, 1]));
    source.put_pixel(3, 0, Rgba([7, 8, 9, 0]));

    let mut canvas = Canvas::new(4, 1);
    canvas.draw_image(&source, 0, 0);

    assert_eq!(canvas.pixels(), &source);
}

#[test]
fn test_draw_image_clips_partially_visible_source() {
    let mut canvas = Canvas::new(2, 2);
    let source = RgbaImage::from_pixel(3, 3, BLUE);

    canvas.draw_image(&source, 1, -2);

    assert_eq!(canvas.pixel(1, 0), BLUE);
    assert_eq!(canvas.pixel(0, 0), CLEAR);
    assert_eq!(canvas.pixel(1, 1), CLEAR);
}

#[test]
fn test_draw_image_is_source_over() {
    let mut canvas = Canvas::from_image(RgbaImage::from_pixel(2, 1, RED));
    let mut source = RgbaImage::new(2, 1);
    source.put_pixel(0, 0, BLUE);
    source.put_pixel(1, 0, CLEAR);

    canvas.draw_image(&source, 0, 0);

    assert_eq!(canvas.pixel(0, 0), BLUE);
    // A transparent source pixel leaves the destination untouched
    assert_eq!(canvas.pixel(1, 0), RED);
}

#[test]
fn test_draw_image_clips_out_of_bounds() {
    let mut canvas = Canvas::new(4, 4);
    let source = RgbaImage::from_pixel(3, 3, BLUE);

    canvas.draw_image(&source, -2, 2);

    assert_eq!(canvas.pixel(0, 2), BLUE);
    assert_eq!(canvas.pixel(0, 3), BLUE);
    assert_eq!(canvas.pixel(1, 2), CLEAR);
    assert_eq!(canvas.pixel(0, 1), CLEAR);

    // Entirely off-canvas draws are a no-op, not an error
    canvas.draw_image(&source, 10, 10);
}

#[test]
fn test_surface_release_is_counted_once() {
    let mut canvas = Canvas::new(2, 2);
    {
        let mut surface = canvas.acquire_surface();
        surface.fill_rect(Region::new(0, 0, 1, 1), RED);
        surface.fill_rect(Region::new(1, 1, 1, 1), BLUE);
    }
    assert_eq!(canvas.acquisitions(), 1);
    assert_eq!(canvas.releases(), 1);

    drop(canvas.acquire_surface());
    assert_eq!(canvas.acquisitions(), 2);
    assert_eq!(canvas.releases(), 2);
}

#[test]
fn test_clear_rect_zeroes_alpha_and_clips() {
    let mut canvas = Canvas::from_image(RgbaImage::from_pixel(4, 4, RED));
    {
        let mut surface = canvas.acquire_surface();
        surface.clear_rect(Region::new(2, 2, 8, 8));
    }

    assert_eq!(canvas.pixel(1, 1), RED);
    assert_eq!(canvas.pixel(2, 2), CLEAR);
    assert_eq!(canvas.pixel(3, 3), CLEAR);
    assert_eq!(canvas.pixel(3, 1), RED);
}

#[test]
fn test_fill_rect_composites_marker() {
    let mut canvas = Canvas::from_image(RgbaImage::from_pixel(2, 2, RED));
    {
        let mut surface = canvas.acquire_surface();
        surface.fill_rect(Region::new(0, 0, 1, 2), BLUE);
        surface.fill_rect(Region::new(1, 0, 1, 2), CLEAR);
    }

    assert_eq!(canvas.pixel(0, 1), BLUE);
    assert_eq!(canvas.pixel(1, 1), RED);
}

#[test]
fn test_fill_rect_on_cleared_pixels_keeps_marker_exact() {
    let marker = Rgba([254, 127, 1, 9]);
    let mut canvas = Canvas::new(2, 1);
    {
        let mut surface = canvas.acquire_surface();
        surface.fill_rect(Region::new(0, 0, 2, 1), marker);
    }

    assert_eq!(canvas.pixel(0, 0), marker);
    assert_eq!(canvas.pixel(1, 0), marker);
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/deeper/leftover.png");

    let mut pixels = RgbaImage::from_pixel(3, 3, RED);
    pixels.put_pixel(1, 1, CLEAR);
    pixels.put_pixel(2, 0, Rgba([10, 20, 30, 128]));
    let canvas = Canvas::from_image(pixels.clone());

    canvas.save(&path).unwrap();
    let loaded = Canvas::load(&path).unwrap();

    assert_eq!(loaded.pixel(0, 0), RED);
    assert_eq!(loaded.pixel(1, 1)[3], 0);
    assert_eq!(loaded.pixel(2, 0)[3], 128);
    assert_eq!(loaded.pixel(2, 0), *pixels.get_pixel(2, 0));
}

#[test]
fn test_load_rejects_garbage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"definitely not an image").unwrap();

    let err = Canvas::load(&path).unwrap_err();
    assert!(matches!(err, crate::errors::SliceError::Decode { .. }));
}
