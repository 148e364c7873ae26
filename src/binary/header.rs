use nom::bytes::complete::take;

use super::{
    color_depth::ColorDepth,
    errors::ParseResult,
    scalars::{byte, dword, word, Byte, Dword, Word},
};

/// Fixed size of the file header; the first frame starts right after it.
pub const HEADER_SIZE: usize = 128;

const HEADER_MAGIC_NUMBER: Word = 0xA5E0;

/// Which of the two header layouts a file was written with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Magic number `0xA5E0` at offset 4, frame count at offset 6.
    /// Frame headers carry the `0xF1FA` magic and cel types sit right after
    /// the opacity byte.
    Aseprite,
    /// No magic numbers: frame count at offset 4, frame magic unchecked,
    /// cel type one byte further on (chunk offset 14).
    Bare,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// File size as declared by the file, not checked against the buffer
    pub file_size: Dword,
    pub layout: Layout,
    /// Number of frames
    pub frames: Word,
    /// Width in pixels
    pub width: Word,
    /// Height in pixels
    pub height: Word,
    pub color_depth: ColorDepth,
    /// 1 = Layer opacity has valid value
    pub flags: Dword,
    /// Deprecated, frames carry their own duration
    pub speed: Word,
    /// Palette entry which represent transparent color
    /// in all non-background layers (only for Indexed sprites).
    pub transparent_index: Byte,
    /// Number of colors (0 means 256 for old sprites)
    pub number_of_colors: Word,
}

pub fn parse_header(input: &[u8]) -> ParseResult<'_, Header> {
    let (input, file_size) = dword(input)?;
    let (input, magic_or_frames) = word(input)?;
    let (input, word_at_6) = word(input)?;
    // a bare file with exactly 0xA5E0 frames reads as the Aseprite layout
    let (layout, frames) = if magic_or_frames == HEADER_MAGIC_NUMBER {
        (Layout::Aseprite, word_at_6)
    } else {
        (Layout::Bare, magic_or_frames)
    };
    let (input, width) = word(input)?;
    let (input, height) = word(input)?;
    let (input, color_depth) = word(input)?;
    let (input, flags) = dword(input)?;
    let (input, speed) = word(input)?;
    let (input, _) = take(8usize)(input)?;
    let (input, transparent_index) = byte(input)?;
    let (input, _) = take(3usize)(input)?;
    let (input, number_of_colors) = word(input)?;
    // pixel ratio, grid and reserved bytes
    let (input, _) = take(94usize)(input)?;
    Ok((
        input,
        Header {
            file_size,
            layout,
            frames,
            width,
            height,
            color_depth: color_depth.into(),
            flags,
            speed,
            transparent_index,
            number_of_colors,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_bytes(magic: Word) -> Vec<u8> {
        let mut bytes = vec![0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&1000u32.to_le_bytes());
        bytes[4..6].copy_from_slice(&magic.to_le_bytes());
        bytes[6..8].copy_from_slice(&3u16.to_le_bytes());
        bytes[8..10].copy_from_slice(&32u16.to_le_bytes());
        bytes[10..12].copy_from_slice(&24u16.to_le_bytes());
        bytes[12..14].copy_from_slice(&8u16.to_le_bytes());
        bytes[28] = 5;
        bytes[32..34].copy_from_slice(&16u16.to_le_bytes());
        bytes.extend_from_slice(&[0xEE; 4]);
        bytes
    }

    #[test]
    fn test_header() {
        let bytes = header_bytes(HEADER_MAGIC_NUMBER);
        let (rest, header) = parse_header(&bytes).unwrap();
        assert_eq!(rest, &[0xEE; 4]);
        assert_eq!(header.layout, Layout::Aseprite);
        assert_eq!(header.frames, 3);
        assert_eq!((header.width, header.height), (32, 24));
        assert_eq!(header.color_depth, ColorDepth::Indexed);
        assert_eq!(header.transparent_index, 5);
        assert_eq!(header.number_of_colors, 16);
    }

    #[test]
    fn test_bare_header() {
        let mut bytes = header_bytes(7);
        bytes[6..8].copy_from_slice(&0xFFFFu16.to_le_bytes());
        let (_, header) = parse_header(&bytes).unwrap();
        assert_eq!(header.layout, Layout::Bare);
        assert_eq!(header.frames, 7);
        assert_eq!((header.width, header.height), (32, 24));
    }
}
