//! Writes small Aseprite files for the integration tests

#![allow(dead_code)]

use std::io::Write;

use flate2::{write::ZlibEncoder, Compression};

pub const CEL: u16 = 0x2005;
pub const TAGS: u16 = 0x2018;
pub const PALETTE: u16 = 0x2019;
pub const LAYER: u16 = 0x2004;

pub fn compress(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

pub struct AseBuilder {
    width: u16,
    height: u16,
    color_depth: u16,
    /// No magic numbers, frame count at offset 4, cel type at chunk offset 14
    bare: bool,
    frames: Vec<(u16, Vec<Vec<u8>>)>,
}

impl AseBuilder {
    pub fn new(width: u16, height: u16, color_depth: u16) -> Self {
        Self {
            width,
            height,
            color_depth,
            bare: false,
            frames: Vec::new(),
        }
    }

    pub fn bare(width: u16, height: u16, color_depth: u16) -> Self {
        Self {
            bare: true,
            ..Self::new(width, height, color_depth)
        }
    }

    pub fn frame(mut self, duration: u16) -> Self {
        self.frames.push((duration, Vec::new()));
        self
    }

    /// Adds a raw chunk to the last frame
    pub fn chunk(mut self, chunk_type: u16, body: &[u8]) -> Self {
        let mut bytes = ((body.len() + 6) as u32).to_le_bytes().to_vec();
        bytes.extend_from_slice(&chunk_type.to_le_bytes());
        bytes.extend_from_slice(body);
        self.frames
            .last_mut()
            .expect("add a frame first")
            .1
            .push(bytes);
        self
    }

    pub fn palette(self, first: u32, colors: &[[u8; 4]]) -> Self {
        let last = first + colors.len() as u32 - 1;
        let mut body = Vec::new();
        body.extend_from_slice(&(last + 1).to_le_bytes());
        body.extend_from_slice(&first.to_le_bytes());
        body.extend_from_slice(&last.to_le_bytes());
        body.extend_from_slice(&[0; 8]);
        for color in colors {
            body.extend_from_slice(&0u16.to_le_bytes());
            body.extend_from_slice(color);
        }
        self.chunk(PALETTE, &body)
    }

    /// Compressed image cel holding `pixels` uncompressed
    pub fn cel(self, x: i16, y: i16, opacity: u8, width: u16, height: u16, pixels: &[u8]) -> Self {
        let mut body = cel_header(self.bare, x, y, opacity, 2);
        body.extend_from_slice(&width.to_le_bytes());
        body.extend_from_slice(&height.to_le_bytes());
        body.extend_from_slice(&compress(pixels));
        self.chunk(CEL, &body)
    }

    pub fn linked_cel(self, frame_position: u16) -> Self {
        let mut body = cel_header(self.bare, 0, 0, 255, 1);
        body.extend_from_slice(&frame_position.to_le_bytes());
        self.chunk(CEL, &body)
    }

    /// `(name, from, to, direction)`
    pub fn tags(self, tags: &[(&str, u16, u16, u8)]) -> Self {
        let mut body = (tags.len() as u16).to_le_bytes().to_vec();
        body.extend_from_slice(&[0; 8]);
        for (name, from, to, direction) in tags {
            body.extend_from_slice(&from.to_le_bytes());
            body.extend_from_slice(&to.to_le_bytes());
            body.push(*direction);
            body.extend_from_slice(&0u16.to_le_bytes());
            body.extend_from_slice(&[0; 6]);
            body.extend_from_slice(&[0, 0, 0, 0]);
            body.extend_from_slice(&(name.len() as u16).to_le_bytes());
            body.extend_from_slice(name.as_bytes());
        }
        self.chunk(TAGS, &body)
    }

    pub fn build(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; 128];
        let frame_count = (self.frames.len() as u16).to_le_bytes();
        if self.bare {
            bytes[4..6].copy_from_slice(&frame_count);
        } else {
            bytes[4..6].copy_from_slice(&0xA5E0u16.to_le_bytes());
            bytes[6..8].copy_from_slice(&frame_count);
        }
        bytes[8..10].copy_from_slice(&self.width.to_le_bytes());
        bytes[10..12].copy_from_slice(&self.height.to_le_bytes());
        bytes[12..14].copy_from_slice(&self.color_depth.to_le_bytes());
        for (duration, chunks) in &self.frames {
            let size = 16 + chunks.iter().map(Vec::len).sum::<usize>();
            bytes.extend_from_slice(&(size as u32).to_le_bytes());
            let magic: u16 = if self.bare { 0 } else { 0xF1FA };
            bytes.extend_from_slice(&magic.to_le_bytes());
            if chunks.len() < 0xFFFF {
                bytes.extend_from_slice(&(chunks.len() as u16).to_le_bytes());
            } else {
                bytes.extend_from_slice(&0xFFFFu16.to_le_bytes());
            }
            bytes.extend_from_slice(&duration.to_le_bytes());
            bytes.extend_from_slice(&[0, 0]);
            bytes.extend_from_slice(&(chunks.len() as u32).to_le_bytes());
            for chunk in chunks {
                bytes.extend_from_slice(chunk);
            }
        }
        let file_size = bytes.len() as u32;
        bytes[0..4].copy_from_slice(&file_size.to_le_bytes());
        bytes
    }
}

/// Cel fields up to the image size, 16 bytes in either layout
fn cel_header(bare: bool, x: i16, y: i16, opacity: u8, cel_type: u16) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(&0u16.to_le_bytes());
    body.extend_from_slice(&x.to_le_bytes());
    body.extend_from_slice(&y.to_le_bytes());
    body.push(opacity);
    if bare {
        body.push(0);
        body.extend_from_slice(&cel_type.to_le_bytes());
        body.extend_from_slice(&[0; 6]);
    } else {
        body.extend_from_slice(&cel_type.to_le_bytes());
        body.extend_from_slice(&0i16.to_le_bytes());
        body.extend_from_slice(&[0; 5]);
    }
    body
}

/// Solid RGBA pixel data
pub fn solid(color: [u8; 4], width: u16, height: u16) -> Vec<u8> {
    color.repeat(width as usize * height as usize)
}
