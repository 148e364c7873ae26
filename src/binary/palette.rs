use image::Rgba;
use thiserror::Error;

use super::chunks::palette::PaletteChunk;

/// Indexed pixels are a single byte, so the table never grows past this
pub const PALETTE_CAPACITY: usize = 256;

/// Running color table for indexed sprites.
/// Palette chunks write into it in file order; entries never written read as
/// fully transparent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub colors: [Rgba<u8>; PALETTE_CAPACITY],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: [Rgba([0; 4]); PALETTE_CAPACITY],
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    #[error("color index {0} not in range 0..=255")]
    ColorIndexOutOfBounds(u64),
    #[error("first color index {first} > last color index {last}")]
    FirstColorIndexGreaterThanLastColorIndex { first: u32, last: u32 },
}

impl Palette {
    pub fn get(&self, index: u8) -> Rgba<u8> {
        self.colors[index as usize]
    }

    /// Writes every entry of the chunk, skipping the ones out of bounds.
    /// Returns the skipped entries.
    pub fn apply(&mut self, chunk: &PaletteChunk<'_>) -> Vec<PaletteError> {
        let mut errors = Vec::new();
        if chunk.first_index > chunk.last_index {
            errors.push(PaletteError::FirstColorIndexGreaterThanLastColorIndex {
                first: chunk.first_index,
                last: chunk.last_index,
            });
        }
        for (index, entry) in chunk.indexed_entries() {
            match usize::try_from(index).ok().and_then(|i| self.colors.get_mut(i)) {
                Some(color) => *color = entry.color.into(),
                None => errors.push(PaletteError::ColorIndexOutOfBounds(index)),
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::{chunks::palette::PaletteEntry, scalars::Color};

    fn chunk(first: u32, colors: &[[u8; 4]]) -> PaletteChunk<'static> {
        PaletteChunk {
            palette_size: first + colors.len() as u32,
            first_index: first,
            last_index: first + colors.len() as u32 - 1,
            entries: colors
                .iter()
                .map(|&[red, green, blue, alpha]| PaletteEntry {
                    color: Color {
                        red,
                        green,
                        blue,
                        alpha,
                    },
                    name: None,
                })
                .collect(),
            truncated: false,
        }
    }

    #[test]
    fn test_default_is_transparent() {
        let palette = Palette::default();
        assert_eq!(palette.get(0), Rgba([0, 0, 0, 0]));
        assert_eq!(palette.get(255), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_apply_is_cumulative() {
        let mut palette = Palette::default();
        assert!(palette.apply(&chunk(1, &[[1, 1, 1, 255], [2, 2, 2, 255]])).is_empty());
        assert!(palette.apply(&chunk(2, &[[9, 9, 9, 128]])).is_empty());
        assert_eq!(palette.get(1), Rgba([1, 1, 1, 255]));
        assert_eq!(palette.get(2), Rgba([9, 9, 9, 128]));
    }

    #[test]
    fn test_apply_out_of_bounds() {
        let mut palette = Palette::default();
        let errors = palette.apply(&chunk(254, &[[1, 0, 0, 255], [2, 0, 0, 255], [3, 0, 0, 255]]));
        assert_eq!(errors, vec![PaletteError::ColorIndexOutOfBounds(256)]);
        assert_eq!(palette.get(254), Rgba([1, 0, 0, 255]));
        assert_eq!(palette.get(255), Rgba([2, 0, 0, 255]));
    }
}
