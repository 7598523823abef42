//! Animation decoding - turns an image file into an ordered list of RGBA frames.

use crate::Result;
use image::codecs::gif::GifDecoder;
use image::codecs::png::PngDecoder;
use image::codecs::webp::WebPDecoder;
use image::{imageops, AnimationDecoder, Frame, Frames, ImageFormat, ImageReader, ImageResult};
use image::{Rgba, RgbaImage};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// One decoded frame of the source animation.
#[derive(Debug, Clone)]
pub struct RasterFrame {
    pub index: usize,
    pub image: RgbaImage,
}

/// Open an animated image as a lazy, consume-once frame sequence.
///
/// GIF, APNG and animated WebP yield every frame; any other image the
/// `image` crate can decode yields a single frame.
pub fn open_animation(path: impl AsRef<Path>) -> Result<Frames<'static>> {
    let path = path.as_ref();
    let format = ImageReader::open(path)?.with_guessed_format()?.format();
    let reader = || -> Result<BufReader<File>> { Ok(BufReader::new(File::open(path)?)) };

    let frames = match format {
        Some(ImageFormat::Gif) => GifDecoder::new(reader()?)?.into_frames(),
        Some(ImageFormat::Png) => {
            let decoder = PngDecoder::new(reader()?)?;
            if decoder.is_apng()? {
                decoder.apng()?.into_frames()
            } else {
                still(path)?
            }
        }
        Some(ImageFormat::WebP) => {
            let decoder = WebPDecoder::new(reader()?)?;
            if decoder.has_animation() {
                decoder.into_frames()
            } else {
                still(path)?
            }
        }
        _ => still(path)?,
    };

    tracing::debug!(path = %path.display(), ?format, "opened animation");
    Ok(frames)
}

fn still(path: &Path) -> Result<Frames<'static>> {
    let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    let frame = Frame::new(image.to_rgba8());
    Ok(Frames::new(Box::new(std::iter::once(Ok(frame)))))
}

/// Drain `frames` into raster frames, in source order.
///
/// With `fill_empty` each frame is painted over an opaque white canvas.
/// Otherwise transparent pixels keep whatever color they carry.
pub fn extract_frames<I>(frames: I, fill_empty: bool) -> Result<Vec<RasterFrame>>
where
    I: IntoIterator<Item = ImageResult<Frame>>,
{
    let mut out = Vec::new();
    for (index, frame) in frames.into_iter().enumerate() {
        let mut image = frame?.into_buffer();
        if fill_empty {
            image = fill_background(&image);
        }
        tracing::debug!(index, width = image.width(), height = image.height(), "extracted frame");
        out.push(RasterFrame { index, image });
    }

    tracing::info!(count = out.len(), "extracted frames");
    Ok(out)
}

fn fill_background(image: &RgbaImage) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(image.width(), image.height(), Rgba([255, 255, 255, 255]));
    imageops::overlay(&mut canvas, image, 0, 0);
    canvas
}

/// Save extracted frames as `frame{index}.png`, to check what each frame is supposed to look like.
pub fn save_frames(frames: &[RasterFrame], dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;
    for frame in frames {
        frame.image.save(dir.join(format!("frame{}.png", frame.index)))?;
    }
    tracing::info!(count = frames.len(), dir = %dir.display(), "saved raster frames");
    Ok(())
}
