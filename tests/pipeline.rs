use gifscii::{extract_frames, open_animation, BitmapFont, Converter, FrameStore, GlyphWeights};
use image::codecs::gif::GifEncoder;
use image::{Frame, Rgba, RgbaImage};
use std::path::Path;

fn write_gif(path: &Path, frames: Vec<RgbaImage>) {
    let file = std::fs::File::create(path).unwrap();
    let mut encoder = GifEncoder::new(file);
    encoder.encode_frames(frames.into_iter().map(Frame::new)).unwrap();
}

#[test]
fn black_gif_converts_to_blank_frames() {
    let tmp = tempfile::tempdir().unwrap();
    let gif = tmp.path().join("black.gif");
    let black = RgbaImage::from_pixel(16, 16, Rgba([0, 0, 0, 255]));
    write_gif(&gif, vec![black.clone(), black]);

    let frames = extract_frames(open_animation(&gif).unwrap(), true).unwrap();
    assert_eq!(frames.len(), 2);

    let converter = Converter::new(GlyphWeights::build(&BitmapFont)).with_intensity(4.0);
    let ascii = converter.convert_all(&frames);

    let store = FrameStore::new(tmp.path().join("frames"));
    store.reset().unwrap();
    store.write_all(&ascii).unwrap();

    let loaded = store.read_all().unwrap();
    assert_eq!(loaded, vec!["  \n  \n".to_string(), "  \n  \n".to_string()]);
}

#[test]
fn frames_keep_animation_order() {
    let tmp = tempfile::tempdir().unwrap();
    let gif = tmp.path().join("fade.gif");
    // 12 frames so that lexical and numeric file order differ
    let frames: Vec<RgbaImage> = (0..12u8)
        .map(|i| {
            let v = if i % 2 == 0 { 0 } else { 255 };
            RgbaImage::from_pixel(8, 8, Rgba([v, v, v, 255]))
        })
        .collect();
    write_gif(&gif, frames);

    let raster = extract_frames(open_animation(&gif).unwrap(), true).unwrap();
    let converter = Converter::new(GlyphWeights::build(&BitmapFont));
    let ascii = converter.convert_all(&raster);

    let store = FrameStore::new(tmp.path().join("frames"));
    store.write_all(&ascii).unwrap();
    let loaded = store.read_all().unwrap();

    let bright = format!("{}\n", converter.weights().nearest(0.25));
    assert_eq!(loaded.len(), 12);
    for (i, text) in loaded.iter().enumerate() {
        let expected = if i % 2 == 0 { " \n" } else { bright.as_str() };
        assert_eq!(text, expected, "frame {i}");
    }
}

#[test]
fn transparent_gif_fills_white() {
    let tmp = tempfile::tempdir().unwrap();
    let gif = tmp.path().join("clear.gif");
    write_gif(&gif, vec![RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 0]))]);

    let frames = extract_frames(open_animation(&gif).unwrap(), true).unwrap();
    assert_eq!(frames.len(), 1);
    assert!(frames[0].image.pixels().all(|p| p.0 == [255, 255, 255, 255]));
}
