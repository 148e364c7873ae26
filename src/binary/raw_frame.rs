use nom::bytes::complete::take;

use super::{
    errors::{ParseError, ParseResult},
    header::Layout,
    scalars::{dword, dword_size, word, Word},
};

/// Bytes between the start of a frame and its first chunk
pub const FRAME_HEADER_SIZE: usize = 16;

const FRAME_MAGIC_NUMBER: Word = 0xF1FA;

/// Old chunk count value meaning "read the DWORD count instead"
const CHUNK_COUNT_ESCAPE: Word = 0xFFFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Bytes in this frame, header included
    pub size: usize,
    /// Frame duration in milliseconds
    pub duration: Word,
    pub chunk_count: u32,
}

/// Bare-layout files don't carry the frame magic, so it is only checked for
/// [`Layout::Aseprite`].
pub fn parse_frame_header(input: &[u8], layout: Layout) -> ParseResult<'_, FrameHeader> {
    let (input, size) = dword_size(input, FRAME_HEADER_SIZE, ParseError::InvalidFrameSize)?;
    let (input, magic) = word(input)?;
    if layout == Layout::Aseprite && magic != FRAME_MAGIC_NUMBER {
        return Err(nom::Err::Failure(ParseError::InvalidMagicNumber {
            expected: FRAME_MAGIC_NUMBER,
            found: magic,
        }));
    }
    let (input, old_chunk_count) = word(input)?;
    let (input, duration) = word(input)?;
    let (input, _) = take(2usize)(input)?;
    let (input, new_chunk_count) = dword(input)?;
    let chunk_count = if old_chunk_count == CHUNK_COUNT_ESCAPE {
        new_chunk_count
    } else {
        old_chunk_count.into()
    };
    Ok((
        input,
        FrameHeader {
            size,
            duration,
            chunk_count,
        },
    ))
}
