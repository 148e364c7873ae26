use super::{
    chunk::{ChunkDescriptor, CHUNK_HEADER_SIZE},
    errors::{into_parse_error, ParseResult},
    header::{parse_header, Header, Layout, HEADER_SIZE},
    raw_frame::{parse_frame_header, FrameHeader, FRAME_HEADER_SIZE},
    scalars::{dword, word},
};
use crate::warnings::DecodeWarning;

/// The whole file: header plus the bytes the frames are walked in
#[derive(Debug, Clone, Copy)]
pub struct RawFile<'a> {
    pub header: Header,
    data: &'a [u8],
}

pub fn parse_raw_file(data: &[u8]) -> ParseResult<'_, RawFile<'_>> {
    let (rest, header) = parse_header(data)?;
    Ok((rest, RawFile { header, data }))
}

impl<'a> RawFile<'a> {
    /// Walks the frame records in file order
    pub fn frames(&self) -> RawFrames<'a> {
        RawFrames {
            data: self.data,
            offset: HEADER_SIZE,
            index: 0,
            count: self.header.frames as usize,
            layout: self.header.layout,
            done: false,
        }
    }
}

/// Iterator over frame records.
/// Each frame is located by adding the previous frame's declared size;
/// the walk ends at the first frame whose header can't be read.
#[derive(Debug, Clone)]
pub struct RawFrames<'a> {
    data: &'a [u8],
    offset: usize,
    index: usize,
    count: usize,
    layout: Layout,
    done: bool,
}

impl<'a> Iterator for RawFrames<'a> {
    type Item = Result<RawFrame<'a>, DecodeWarning>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.index >= self.count {
            return None;
        }
        let frame = self.index;
        let offset = self.offset;
        let Some(input) = self
            .data
            .get(offset..)
            .filter(|input| input.len() >= FRAME_HEADER_SIZE)
        else {
            self.done = true;
            return Some(Err(DecodeWarning::TruncatedFrame { frame, offset }));
        };
        let header = match parse_frame_header(input, self.layout) {
            Ok((_, header)) => header,
            Err(e) => {
                self.done = true;
                return Some(Err(DecodeWarning::InvalidFrame {
                    frame,
                    offset,
                    message: into_parse_error(e).to_string(),
                }));
            }
        };
        self.index += 1;
        self.offset = offset.saturating_add(header.size);
        Some(Ok(RawFrame {
            index: frame,
            offset,
            header,
            data: self.data,
        }))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RawFrame<'a> {
    pub index: usize,
    /// Absolute offset of the frame header
    pub offset: usize,
    pub header: FrameHeader,
    data: &'a [u8],
}

impl<'a> RawFrame<'a> {
    pub fn chunks(&self) -> RawChunks<'a> {
        RawChunks {
            data: self.data,
            frame: self.index,
            offset: self.offset + FRAME_HEADER_SIZE,
            remaining: self.header.chunk_count,
            done: false,
        }
    }
}

/// Iterator over the chunks of one frame.
/// Chunks are bounded by the buffer, not by the frame's declared size.
#[derive(Debug, Clone)]
pub struct RawChunks<'a> {
    data: &'a [u8],
    frame: usize,
    offset: usize,
    remaining: u32,
    done: bool,
}

impl<'a> RawChunks<'a> {
    fn read_chunk(&self) -> Result<ChunkDescriptor<'a>, DecodeWarning> {
        let frame = self.frame;
        let offset = self.offset;
        let truncated = DecodeWarning::TruncatedChunk { frame, offset };
        let input = self.data.get(offset..).ok_or(truncated.clone())?;
        let (_, (size, chunk_type)) = chunk_header(input).map_err(|_| truncated.clone())?;
        let size = size as usize;
        if size < CHUNK_HEADER_SIZE {
            return Err(DecodeWarning::InvalidChunkSize {
                frame,
                offset,
                size,
            });
        }
        let bytes = input.get(..size).ok_or(truncated)?;
        Ok(ChunkDescriptor {
            chunk_type,
            offset,
            bytes,
        })
    }
}

fn chunk_header(input: &[u8]) -> ParseResult<'_, (u32, u16)> {
    let (input, size) = dword(input)?;
    let (input, chunk_type) = word(input)?;
    Ok((input, (size, chunk_type)))
}

impl<'a> Iterator for RawChunks<'a> {
    type Item = Result<ChunkDescriptor<'a>, DecodeWarning>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.remaining == 0 {
            return None;
        }
        match self.read_chunk() {
            Ok(chunk) => {
                self.remaining -= 1;
                self.offset += chunk.len();
                Some(Ok(chunk))
            }
            Err(warning) => {
                self.done = true;
                Some(Err(warning))
            }
        }
    }
}
