//! Glyph density calibration - ink fraction per printable character.

use crate::font::{GlyphFont, FIRST_GLYPH, LAST_GLYPH};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphWeight {
    pub ch: char,
    /// Fraction of the glyph cell covered by ink, in [0.0, 1.0].
    pub weight: f32,
}

/// Weights for codepoints 32..=126 in ascending order, tied to one font cell size.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphWeights {
    cell_w: u32,
    cell_h: u32,
    entries: Vec<GlyphWeight>,
}

impl GlyphWeights {
    pub fn build(font: &impl GlyphFont) -> Self {
        let (cell_w, cell_h) = font.cell_size();
        let area = cell_w as f64 * cell_h as f64;

        let entries = (FIRST_GLYPH..=LAST_GLYPH)
            .filter_map(char::from_u32)
            .map(|ch| {
                let ink = font.rasterize(ch).iter().filter(|&&s| s > 0).count();
                let weight = if area > 0.0 { (ink as f64 / area) as f32 } else { 0.0 };
                GlyphWeight { ch, weight }
            })
            .collect();

        Self { cell_w, cell_h, entries }
    }

    pub fn cell_size(&self) -> (u32, u32) {
        (self.cell_w, self.cell_h)
    }

    pub fn entries(&self) -> &[GlyphWeight] {
        &self.entries
    }

    /// Character whose weight is closest to `target`.
    ///
    /// The table is scanned in ascending code order and only a strictly closer
    /// entry replaces the current best, so exact ties keep the lowest code.
    pub fn nearest(&self, target: f32) -> char {
        let mut best = ' ';
        let mut best_dist = f32::INFINITY;
        for entry in &self.entries {
            let dist = (entry.weight - target).abs();
            if dist < best_dist {
                best_dist = dist;
                best = entry.ch;
            }
        }
        best
    }
}
