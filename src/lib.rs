//! Animated image to ASCII art converter and terminal player.

pub mod config;
pub mod extract;
pub mod font;
pub mod player;
pub mod store;
pub mod weights;

pub use config::Config;
pub use extract::{extract_frames, open_animation, RasterFrame};
pub use font::{BitmapFont, GlyphFont, TrueTypeFont};
pub use player::{Player, PlayerOptions, Screen, TerminalScreen};
pub use store::FrameStore;
pub use weights::GlyphWeights;

use image::imageops::FilterType;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GifsciiError {
    #[error("{0}")]
    Usage(String),
    #[error("Extract directory {} is not empty ({entry}), canceling delete. Choose another directory.", .dir.display())]
    UnsafeDirectoryState { dir: PathBuf, entry: String },
    #[error("Frame directory {} not found. Please convert a gif first.", .0.display())]
    DirectoryNotFound(PathBuf),
    #[error("No frames to play. Please convert a gif first.")]
    NoFrames,
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Font error: {0}")]
    Font(String),
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GifsciiError>;

pub const DEFAULT_INTENSITY: f32 = 4.0;

/// One raster frame rendered as text: `rows` lines of `cols` characters, each ending in `\n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsciiFrame {
    pub index: usize,
    pub text: String,
}

impl fmt::Display for AsciiFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Maps raster frames to text by nearest glyph weight
pub struct Converter {
    weights: GlyphWeights,
    intensity: f32,
}

impl Converter {
    pub fn new(weights: GlyphWeights) -> Self {
        Self { weights, intensity: DEFAULT_INTENSITY }
    }

    /// Divisor applied to normalized luminance before the glyph lookup.
    /// Values above 1 push bright regions toward sparser glyphs. Must be
    /// positive and finite; `Config::validate` enforces this for CLI input.
    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn weights(&self) -> &GlyphWeights {
        &self.weights
    }

    pub fn convert(&self, frame: &RasterFrame) -> AsciiFrame {
        let (cell_w, cell_h) = self.weights.cell_size();
        let (img_w, img_h) = frame.image.dimensions();

        let out_w = if cell_w == 0 { 0 } else { img_w / cell_w };
        let out_h = if cell_h == 0 { 0 } else { img_h / cell_h };
        if out_w == 0 || out_h == 0 {
            return AsciiFrame { index: frame.index, text: String::new() };
        }

        // Must stay a smooth filter; nearest-neighbour output is visibly worse
        let small = image::imageops::resize(&frame.image, out_w, out_h, FilterType::CatmullRom);
        let gray = image::DynamicImage::ImageRgba8(small).to_luma8();

        let mut text = String::with_capacity(((out_w + 1) * out_h) as usize);
        for y in 0..out_h {
            for x in 0..out_w {
                let w = gray.get_pixel(x, y).0[0] as f32 / 255.0 / self.intensity;
                text.push(self.weights.nearest(w));
            }
            text.push('\n');
        }

        AsciiFrame { index: frame.index, text }
    }

    pub fn convert_all(&self, frames: &[RasterFrame]) -> Vec<AsciiFrame> {
        frames
            .iter()
            .map(|frame| {
                let ascii = self.convert(frame);
                tracing::debug!(index = frame.index, "converted frame");
                ascii
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn solid(index: usize, w: u32, h: u32, pixel: [u8; 4]) -> RasterFrame {
        RasterFrame { index, image: RgbaImage::from_pixel(w, h, Rgba(pixel)) }
    }

    fn converter() -> Converter {
        Converter::new(GlyphWeights::build(&BitmapFont))
    }

    #[test]
    fn black_frames_render_as_blank_grid() {
        let conv = converter().with_intensity(4.0);
        let frames = [solid(0, 16, 16, [0, 0, 0, 255]), solid(1, 16, 16, [0, 0, 0, 255])];
        let out = conv.convert_all(&frames);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].text, "  \n  \n");
        assert_eq!(out[0].text, out[1].text);
        assert_eq!(out[1].index, 1);
    }

    #[test]
    fn uniform_color_uses_one_glyph() {
        let conv = converter();
        for pixel in [[255, 255, 255, 255], [128, 64, 200, 255], [40, 40, 40, 255]] {
            let out = conv.convert(&solid(0, 40, 24, pixel));
            let lines: Vec<&str> = out.text.lines().collect();
            assert_eq!(lines.len(), 3);
            assert!(lines.iter().all(|l| l.chars().count() == 5));

            let first = out.text.chars().next().unwrap();
            assert!(out.text.chars().filter(|&c| c != '\n').all(|c| c == first), "{pixel:?}");
        }
    }

    #[test]
    fn white_maps_to_quarter_weight_glyph() {
        let conv = converter();
        let expected = conv.weights().nearest(0.25);
        let out = conv.convert(&solid(0, 8, 8, [255, 255, 255, 255]));
        assert_eq!(out.text, format!("{expected}\n"));
    }

    #[test]
    fn intensity_scales_lookup() {
        let conv = converter().with_intensity(1.0);
        let expected = conv.weights().nearest(1.0);
        let out = conv.convert(&solid(0, 8, 8, [255, 255, 255, 255]));
        assert_eq!(out.text, format!("{expected}\n"));
    }

    #[test]
    fn sub_cell_frames_are_empty() {
        let conv = converter();
        assert_eq!(conv.convert(&solid(0, 7, 64, [0, 0, 0, 255])).text, "");
        assert_eq!(conv.convert(&solid(0, 64, 7, [0, 0, 0, 255])).text, "");
        assert_eq!(conv.convert(&solid(0, 0, 0, [0, 0, 0, 255])).text, "");
    }

    #[test]
    fn grid_dimensions_floor() {
        let out = converter().convert(&solid(3, 23, 17, [0, 0, 0, 255]));
        assert_eq!(out.index, 3);
        assert_eq!(out.text, "  \n  \n");
    }
}
