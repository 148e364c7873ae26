use strum_macros::FromRepr;

use super::{
    chunks::{
        cel::{parse_cel_chunk, CelChunk},
        palette::{parse_palette_chunk, PaletteChunk},
        tags::{parse_tags_chunk, TagsChunk},
    },
    errors::ParseResult,
    header::Layout,
    scalars::Word,
};

/// DWORD size + WORD type
pub const CHUNK_HEADER_SIZE: usize = 6;

/// A chunk located by the container reader, not yet decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkDescriptor<'a> {
    pub chunk_type: Word,
    /// Absolute offset of the chunk header in the file
    pub offset: usize,
    /// The whole chunk, header included
    pub bytes: &'a [u8],
}

impl<'a> ChunkDescriptor<'a> {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Chunk data after the size and type fields
    pub fn body(&self) -> &'a [u8] {
        self.bytes.get(CHUNK_HEADER_SIZE..).unwrap_or_default()
    }
}

#[derive(FromRepr, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ChunkType {
    Palette0004 = 0x0004,
    Palette0011 = 0x0011,
    Layer = 0x2004,
    Cel = 0x2005,
    CelExtra = 0x2006,
    ColorProfile = 0x2007,
    ExternalFiles = 0x2008,
    Mask = 0x2016,
    Path = 0x2017,
    Tags = 0x2018,
    Palette = 0x2019,
    UserData = 0x2020,
    Slice = 0x2022,
    Tileset = 0x2023,
}

#[derive(Debug)]
pub enum Chunk<'a> {
    Palette(PaletteChunk<'a>),
    Cel(CelChunk<'a>),
    Tags(TagsChunk<'a>),
    /// Known chunk kind the decoder has no use for
    Unsupported(ChunkType),
    Unknown(Word),
}

pub fn parse_chunk<'a>(
    chunk: &ChunkDescriptor<'a>,
    layout: Layout,
) -> ParseResult<'a, Chunk<'a>> {
    let input = chunk.body();
    match ChunkType::from_repr(chunk.chunk_type) {
        Some(ChunkType::Palette) => {
            let (input, palette) = parse_palette_chunk(input)?;
            Ok((input, Chunk::Palette(palette)))
        }
        Some(ChunkType::Cel) => {
            let (input, cel) = parse_cel_chunk(input, layout)?;
            Ok((input, Chunk::Cel(cel)))
        }
        Some(ChunkType::Tags) => {
            let (input, tags) = parse_tags_chunk(input)?;
            Ok((input, Chunk::Tags(tags)))
        }
        Some(other) => Ok((input, Chunk::Unsupported(other))),
        None => Ok((input, Chunk::Unknown(chunk.chunk_type))),
    }
}

#[test]
fn test_dispatch() {
    let bytes = [8, 0, 0, 0, 0x04, 0x20, 0xAB, 0xCD];
    let descriptor = ChunkDescriptor {
        chunk_type: 0x2004,
        offset: 0,
        bytes: &bytes,
    };
    let (_, chunk) = parse_chunk(&descriptor, Layout::Aseprite).unwrap();
    assert!(matches!(chunk, Chunk::Unsupported(ChunkType::Layer)));

    let descriptor = ChunkDescriptor {
        chunk_type: 0x7777,
        ..descriptor
    };
    let (_, chunk) = parse_chunk(&descriptor, Layout::Aseprite).unwrap();
    assert!(matches!(chunk, Chunk::Unknown(0x7777)));
}
