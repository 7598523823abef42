//! On-disk frame store - one `{index}_asciiframe.txt` file per converted frame.

use crate::{AsciiFrame, GifsciiError, Result};
use std::fs;
use std::path::{Path, PathBuf};

const SUFFIX: &str = "_asciiframe.txt";

/// Index encoded in a frame file name, if the name follows the store convention.
pub fn parse_frame_name(name: &str) -> Option<usize> {
    let digits = name.strip_suffix(SUFFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

pub fn frame_name(index: usize) -> String {
    format!("{index}{SUFFIX}")
}

/// Directory bridging the convert run and the replay run.
#[derive(Debug, Clone)]
pub struct FrameStore {
    dir: PathBuf,
}

impl FrameStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn exists(&self) -> bool {
        self.dir.is_dir()
    }

    /// Fail if the directory holds anything other than frame files.
    /// A missing directory is clean.
    pub fn check_clean(&self) -> Result<()> {
        if !self.exists() {
            return Ok(());
        }
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if !entry.file_type()?.is_file() || parse_frame_name(&name).is_none() {
                return Err(GifsciiError::UnsafeDirectoryState { dir: self.dir.clone(), entry: name });
            }
        }
        Ok(())
    }

    /// Empty the store for a fresh conversion. Aborts before deleting anything
    /// if the directory contains foreign entries.
    pub fn reset(&self) -> Result<()> {
        self.check_clean()?;
        if self.exists() {
            fs::remove_dir_all(&self.dir)?;
            tracing::debug!(dir = %self.dir.display(), "removed previous frames");
        }
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    pub fn write_all(&self, frames: &[AsciiFrame]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        for (i, frame) in frames.iter().enumerate() {
            fs::write(self.dir.join(frame_name(frame.index)), &frame.text)?;
            tracing::info!("writing {}/{}", i + 1, frames.len());
        }
        Ok(())
    }

    /// Load every frame file, ordered by index.
    pub fn read_all(&self) -> Result<Vec<String>> {
        if !self.exists() {
            return Err(GifsciiError::DirectoryNotFound(self.dir.clone()));
        }

        let mut frames = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let index = name.to_str().and_then(parse_frame_name);
            let Some(index) = index.filter(|_| entry.path().is_file()) else {
                tracing::warn!(entry = %name.to_string_lossy(), "skipping unrecognized entry");
                continue;
            };
            frames.push((index, fs::read_to_string(entry.path())?));
        }

        frames.sort_by_key(|(index, _)| *index);
        tracing::debug!(count = frames.len(), dir = %self.dir.display(), "loaded frames");
        Ok(frames.into_iter().map(|(_, text)| text).collect())
    }
}
