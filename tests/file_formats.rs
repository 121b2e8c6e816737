use std::fs;
use std::path::PathBuf;

use image::{Rgba, RgbaImage};
use pixeleon::file_handler::{self, ICO_SIZES};
use pixeleon::{Canvas, Color, Editor, SaveFormat};
use uuid::Uuid;

fn temp_path(ext: &str) -> PathBuf {
    std::env::temp_dir().join(format!("pixeleon_{}.{}", Uuid::new_v4(), ext))
}

// Left half red, right half blue
fn create_test_canvas() -> Canvas {
    let image = RgbaImage::from_fn(16, 16, |x, _| {
        if x < 8 {
            Rgba([255, 0, 0, 255])
        } else {
            Rgba([0, 0, 255, 255])
        }
    });
    Canvas::from_image(image).unwrap()
}

/// Read `(width, height)` of every directory entry of an ICO file
fn ico_entries(bytes: &[u8]) -> Vec<(u32, u32)> {
    assert_eq!(&bytes[0..4], &[0, 0, 1, 0], "not an icon file");
    let count = u16::from_le_bytes([bytes[4], bytes[5]]) as usize;
    (0..count)
        .map(|i| {
            let entry = &bytes[6 + i * 16..6 + (i + 1) * 16];
            let dim = |b: u8| if b == 0 { 256 } else { b as u32 };
            (dim(entry[0]), dim(entry[1]))
        })
        .collect()
}

#[test]
fn test_ico_has_three_sizes() {
    let editor = Editor::with_canvas(create_test_canvas());
    let path = temp_path("ico");

    assert_eq!(editor.save(&path).unwrap(), SaveFormat::Ico);
    let bytes = fs::read(&path).unwrap();
    fs::remove_file(&path).unwrap();

    let entries = ico_entries(&bytes);
    assert_eq!(entries, ICO_SIZES.iter().map(|&s| (s, s)).collect::<Vec<_>>());
    assert_eq!(entries, vec![(16, 16), (32, 32), (48, 48)]);
}

#[test]
fn test_ico_entries_are_nearest_neighbour() {
    let bytes = file_handler::encode(create_test_canvas().image(), SaveFormat::Ico).unwrap();
    // The decoder picks the largest entry
    let decoded = file_handler::decode(&bytes).unwrap();
    assert_eq!(decoded.dimensions(), (48, 48));

    let colors: Vec<Rgba<u8>> = decoded.pixels().copied().collect();
    assert!(colors.iter().all(|p| *p == Rgba([255, 0, 0, 255]) || *p == Rgba([0, 0, 255, 255])));
    assert_eq!(*decoded.get_pixel(0, 0), Rgba([255, 0, 0, 255]));
    assert_eq!(*decoded.get_pixel(47, 47), Rgba([0, 0, 255, 255]));
}

#[test]
fn test_ico_from_non_square_canvas() {
    let canvas = Canvas::create(5, 3, Color::GREEN.to_rgba()).unwrap();
    let bytes = file_handler::encode(canvas.image(), SaveFormat::Ico).unwrap();
    assert_eq!(ico_entries(&bytes), vec![(16, 16), (32, 32), (48, 48)]);
}

#[test]
fn test_png_save_and_load_round_trip() {
    let mut editor = Editor::with_canvas(create_test_canvas());
    editor.stroke_start(3, 3);
    editor.stroke_end();
    let expected = editor.canvas().clone();

    let path = temp_path("png");
    editor.save(&path).unwrap();

    editor.new_image();
    editor.load(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(editor.canvas(), &expected);
    assert_eq!(editor.history().len(), 1);
    assert!(!editor.undo());
}

#[test]
fn test_unknown_extension_saves_png() {
    let editor = Editor::new();
    let path = temp_path("dat");
    assert_eq!(editor.save(&path).unwrap(), SaveFormat::Png);
    let bytes = fs::read(&path).unwrap();
    fs::remove_file(&path).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn test_every_format_reloads() {
    for ext in ["png", "jpg", "jpeg", "bmp", "gif", "ico"] {
        let editor = Editor::with_canvas(create_test_canvas());
        let path = temp_path(ext);
        editor.save(&path).unwrap();

        let mut reloaded = Editor::new();
        reloaded.load(&path).unwrap();
        fs::remove_file(&path).unwrap();

        let expected = if ext == "ico" { (48, 48) } else { (16, 16) };
        assert_eq!(
            (reloaded.canvas().width(), reloaded.canvas().height()),
            expected,
            "{ext}"
        );
    }
}

#[test]
fn test_load_missing_file_fails() {
    let mut editor = Editor::new();
    let err = editor.load(&temp_path("png")).unwrap_err();
    assert!(matches!(err, pixeleon::CanvasError::Io(_)));
    assert_eq!(editor.history().len(), 1);
}
