use flate2::{Decompress, FlushDecompress, Status};
use thiserror::Error;

use super::scalars::Word;

/// Compressed image cel payload
#[derive(Debug, Clone, Copy)]
pub struct Image<'a> {
    /// Width in pixels
    pub width: Word,
    /// Height in pixels
    pub height: Word,
    /// "Raw Cel" data compressed with ZLIB method:
    /// row by row from top to bottom,
    /// for each scanline read pixels from left to right.
    pub data: &'a [u8],
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecompressError {
    #[error("corrupt pixel stream: {0}")]
    Corrupt(String),
    #[error("pixel stream ended after {actual} of {expected} bytes")]
    TooShort { expected: usize, actual: usize },
    #[error("pixel stream holds more than the expected {expected} bytes")]
    TooLong { expected: usize },
}

impl Image<'_> {
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Inflates the pixel stream, which must hold exactly
    /// `width * height * bytes_per_pixel` bytes.
    pub fn decompress(&self, bytes_per_pixel: usize) -> Result<Vec<u8>, DecompressError> {
        let expected = self.pixel_count() * bytes_per_pixel;
        if expected == 0 {
            return Ok(Vec::new());
        }
        // the output never grows past `expected`, so a bad stream can't balloon
        let mut buf = Vec::with_capacity(expected);
        let mut decompressor = Decompress::new(true);
        let status = decompressor
            .decompress_vec(self.data, &mut buf, FlushDecompress::Finish)
            .map_err(|e| DecompressError::Corrupt(e.to_string()))?;
        match status {
            Status::StreamEnd if buf.len() == expected => Ok(buf),
            _ if buf.len() < expected => Err(DecompressError::TooShort {
                expected,
                actual: buf.len(),
            }),
            _ => Err(DecompressError::TooLong { expected }),
        }
    }
}
