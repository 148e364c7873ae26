use super::scalars::Word;

/// Color depth (bits per pixel) from the file header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorDepth {
    /// 32 bpp, RGBA
    Rgba,
    /// 16 bpp, value + alpha
    Grayscale,
    /// 8 bpp, index into the palette
    Indexed,
    Unknown(Word),
}

impl ColorDepth {
    pub fn bits_per_pixel(&self) -> Word {
        match self {
            ColorDepth::Rgba => 32,
            ColorDepth::Grayscale => 16,
            ColorDepth::Indexed => 8,
            ColorDepth::Unknown(bpp) => *bpp,
        }
    }

    /// Bytes per pixel of a decompressed cel, for the depths the decoder draws
    pub fn bytes_per_pixel(&self) -> Option<usize> {
        match self {
            ColorDepth::Rgba => Some(4),
            ColorDepth::Indexed => Some(1),
            ColorDepth::Grayscale | ColorDepth::Unknown(_) => None,
        }
    }
}

impl From<Word> for ColorDepth {
    fn from(bpp: Word) -> Self {
        match bpp {
            32 => ColorDepth::Rgba,
            16 => ColorDepth::Grayscale,
            8 => ColorDepth::Indexed,
            other => ColorDepth::Unknown(other),
        }
    }
}
