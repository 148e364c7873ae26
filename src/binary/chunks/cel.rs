use nom::{bytes::complete::take, combinator::rest};

use crate::binary::{
    errors::ParseResult,
    header::Layout,
    image::Image,
    scalars::{byte, short, word, Byte, Short, Word},
};

#[derive(Debug, Clone, Copy)]
pub struct CelChunk<'a> {
    /// Layer index, unused since cels are drawn as a single layer
    pub layer_index: Word,
    /// X position, may be negative or past the canvas
    pub x: Short,
    /// Y position, may be negative or past the canvas
    pub y: Short,
    /// Opacity level
    pub opacity: Byte,
    /// Z-Index, read and ignored; always 0 for [`Layout::Bare`]
    pub z_index: Short,
    pub content: CelContent<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum CelContent<'a> {
    /// 0 - Raw image data (unused, compressed image is preferred)
    RawImage,
    /// 1 - Linked Cel
    LinkedCel { frame_position: Word },
    /// 2 - Compressed Image
    Image(Image<'a>),
    /// 3 - Compressed Tilemap
    CompressedTilemap,
    Unknown(Word),
}

impl CelContent<'_> {
    pub fn cel_type(&self) -> Word {
        match self {
            CelContent::RawImage => 0,
            CelContent::LinkedCel { .. } => 1,
            CelContent::Image(_) => 2,
            CelContent::CompressedTilemap => 3,
            CelContent::Unknown(cel_type) => *cel_type,
        }
    }
}

/// Both layouts keep the image size 16 bytes into the chunk body; they only
/// disagree on where the cel type sits in between.
pub fn parse_cel_chunk(input: &[u8], layout: Layout) -> ParseResult<'_, CelChunk<'_>> {
    let (input, layer_index) = word(input)?;
    let (input, x) = short(input)?;
    let (input, y) = short(input)?;
    let (input, opacity) = byte(input)?;
    let (input, cel_type, z_index) = match layout {
        Layout::Aseprite => {
            let (input, cel_type) = word(input)?;
            let (input, z_index) = short(input)?;
            let (input, _) = take(5usize)(input)?;
            (input, cel_type, z_index)
        }
        Layout::Bare => {
            let (input, _) = byte(input)?;
            let (input, cel_type) = word(input)?;
            let (input, _) = take(6usize)(input)?;
            (input, cel_type, 0)
        }
    };
    let (input, content) = match cel_type {
        0 => (input, CelContent::RawImage),
        1 => {
            let (input, frame_position) = word(input)?;
            (input, CelContent::LinkedCel { frame_position })
        }
        2 => {
            let (input, width) = word(input)?;
            let (input, height) = word(input)?;
            let (input, data) = rest(input)?;
            (
                input,
                CelContent::Image(Image {
                    width,
                    height,
                    data,
                }),
            )
        }
        3 => (input, CelContent::CompressedTilemap),
        other => (input, CelContent::Unknown(other)),
    };
    Ok((
        input,
        CelChunk {
            layer_index,
            x,
            y,
            opacity,
            z_index,
            content,
        },
    ))
}
