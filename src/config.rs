//! Conversion and playback settings, loadable from a JSON file.

use crate::font::MAX_FONT_PX;
use crate::{GifsciiError, PlayerOptions, Result, DEFAULT_INTENSITY};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Frame store directory shared by convert and replay.
    pub frames_dir: PathBuf,
    pub intensity_multiplier: f32,
    /// Seconds between frames.
    pub frame_pause: f64,
    pub clear_prev_frame: bool,
    /// Composite frames onto opaque white before rendering.
    pub fill_empty: bool,
    /// TrueType font used for glyph weights instead of the built-in bitmap font.
    pub font: Option<PathBuf>,
    pub font_size: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frames_dir: PathBuf::from("./frames/"),
            intensity_multiplier: DEFAULT_INTENSITY,
            frame_pause: 0.02,
            clear_prev_frame: true,
            fill_empty: true,
            font: None,
            font_size: 16.0,
        }
    }
}

/// Longest accepted pause between frames, in seconds.
pub const MAX_FRAME_PAUSE: f64 = 3600.0;

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the renderer or player cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(self.intensity_multiplier.is_finite() && self.intensity_multiplier > 0.0) {
            return Err(GifsciiError::Usage(format!(
                "intensity multiplier must be a positive number, got {}",
                self.intensity_multiplier
            )));
        }
        if !(0.0..=MAX_FRAME_PAUSE).contains(&self.frame_pause) {
            return Err(GifsciiError::Usage(format!(
                "frame pause must be between 0 and {MAX_FRAME_PAUSE} seconds, got {}",
                self.frame_pause
            )));
        }
        if !(self.font_size > 0.0 && self.font_size <= MAX_FONT_PX) {
            return Err(GifsciiError::Usage(format!(
                "font size must be in (0, {MAX_FONT_PX}], got {}",
                self.font_size
            )));
        }
        Ok(())
    }

    pub fn player_options(&self) -> Result<PlayerOptions> {
        let frame_pause = Duration::try_from_secs_f64(self.frame_pause).map_err(|e| {
            GifsciiError::Usage(format!("invalid frame pause {}: {e}", self.frame_pause))
        })?;
        Ok(PlayerOptions { frame_pause, clear_prev_frame: self.clear_prev_frame })
    }
}
