use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};

use image::RgbaImage;
use thiserror::Error;

use crate::{
    binary::{
        chunk::{parse_chunk, Chunk},
        chunks::tags::AnimationDirection,
        color_depth::ColorDepth,
        errors::into_parse_error,
        header::{Header, HEADER_SIZE},
        palette::Palette,
        raw_file::{parse_raw_file, RawFile},
        scalars::Word,
    },
    make_image::{draw_cel, LoadImageError},
    warnings::{DecodeWarning, Warnings},
    wrappers::{Frame, Tag},
};

#[derive(Error, Debug)]
pub enum LoadSpriteError {
    #[error("file is {0} bytes, shorter than the {} byte header", HEADER_SIZE)]
    HeaderTooShort(usize),
    #[error("canvas size {width}x{height} is empty")]
    EmptyCanvas { width: Word, height: Word },
    #[error("unsupported color depth: {0} bits per pixel")]
    UnsupportedColorDepth(Word),
    #[error("parsing failed {message}")]
    Parse { message: String },
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A fully decoded sprite
#[derive(Debug, Clone)]
pub struct Sprite {
    pub header: Header,
    /// All frames in the file in order
    pub frames: Vec<Frame>,
    /// All tags in the file, in the order they were found
    pub tags: Vec<Tag>,
    /// Problems that were skipped over while decoding
    pub warnings: Vec<DecodeWarning>,
}

impl Sprite {
    /// Decodes a sprite from the bytes of an `.ase`/`.aseprite` file
    pub fn from_bytes(data: &[u8]) -> Result<Self, LoadSpriteError> {
        if data.len() < HEADER_SIZE {
            return Err(LoadSpriteError::HeaderTooShort(data.len()));
        }
        let (_, raw_file) = parse_raw_file(data).map_err(|e| LoadSpriteError::Parse {
            message: into_parse_error(e).to_string(),
        })?;
        check_header(&raw_file.header)?;
        Ok(Self::new(raw_file))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadSpriteError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| LoadSpriteError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_bytes(&data)
    }

    fn new(file: RawFile<'_>) -> Self {
        let header = file.header;
        let mut warnings = Warnings::default();
        // palette chunks accumulate across frames, never reset
        let mut palette = Palette::default();
        let mut frames = Vec::with_capacity(header.frames as usize);
        let mut tags = Vec::new();

        for raw_frame in file.frames() {
            let raw_frame = match raw_frame {
                Ok(raw_frame) => raw_frame,
                Err(warning) => {
                    warnings.push(warning);
                    break;
                }
            };
            let frame = raw_frame.index;
            log::debug!(
                "frame {frame}: {} chunks at byte {}",
                raw_frame.header.chunk_count,
                raw_frame.offset
            );

            let mut image = RgbaImage::new(header.width.into(), header.height.into());
            for descriptor in raw_frame.chunks() {
                let descriptor = match descriptor {
                    Ok(descriptor) => descriptor,
                    Err(warning) => {
                        warnings.push(warning);
                        break;
                    }
                };
                let chunk = match parse_chunk(&descriptor, header.layout) {
                    Ok((_, chunk)) => chunk,
                    Err(e) => {
                        warnings.push(DecodeWarning::MalformedChunk {
                            frame,
                            chunk_type: descriptor.chunk_type,
                            message: into_parse_error(e).to_string(),
                        });
                        continue;
                    }
                };
                match chunk {
                    Chunk::Palette(chunk) => {
                        for source in palette.apply(&chunk) {
                            warnings.push(DecodeWarning::Palette { frame, source });
                        }
                        if chunk.truncated {
                            warnings.push(DecodeWarning::TruncatedPalette { frame });
                        }
                    }
                    Chunk::Cel(cel) => {
                        match draw_cel(&mut image, &cel, header.color_depth, &palette) {
                            Ok(()) => {}
                            Err(LoadImageError::UnsupportedCelType(cel_type)) => {
                                warnings.push(DecodeWarning::UnsupportedCelType { frame, cel_type })
                            }
                            Err(source) => warnings.push(DecodeWarning::Cel { frame, source }),
                        }
                    }
                    Chunk::Tags(chunk) => {
                        if chunk.truncated {
                            warnings.push(DecodeWarning::TruncatedTags { frame });
                        }
                        tags.extend(chunk.tags.into_iter().map(Tag::from));
                    }
                    Chunk::Unsupported(chunk_type) => {
                        log::debug!("frame {frame}: skipping {chunk_type:?} chunk")
                    }
                    Chunk::Unknown(chunk_type) => {
                        log::debug!("frame {frame}: skipping unknown chunk {chunk_type:#06x}")
                    }
                }
            }

            frames.push(Frame {
                duration: raw_frame.header.duration.into(),
                image,
            });
        }

        // tags may come before the frames they cover, so check them last
        let frame_count = frames.len();
        tags.retain(|tag: &Tag| {
            let valid = tag.from <= tag.to && (tag.to as usize) < frame_count;
            if !valid {
                warnings.push(DecodeWarning::InvalidTagRange {
                    name: tag.name.clone(),
                    from: tag.from,
                    to: tag.to,
                    frames: frame_count,
                });
            }
            valid
        });

        log::info!(
            "decoded {}x{} sprite: {} of {} frames, {} tags",
            header.width,
            header.height,
            frames.len(),
            header.frames,
            tags.len()
        );

        Self {
            header,
            frames,
            tags,
            warnings: warnings.into_inner(),
        }
    }

    pub fn canvas_height(&self) -> u16 {
        self.header.height
    }

    pub fn canvas_width(&self) -> u16 {
        self.header.width
    }

    pub fn pixel_count(&self) -> usize {
        self.header.width as usize * self.header.height as usize
    }

    /// First tag with exactly this name
    pub fn tag_by_name(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.name == name)
    }

    /// First tag whose range contains the frame, else the first tag, else
    /// every frame. `None` only for a sprite without frames.
    pub fn tag_for_frame(&self, frame: usize) -> Option<Cow<'_, Tag>> {
        match self.tags.iter().find(|tag| tag.contains(frame)) {
            Some(tag) => Some(Cow::Borrowed(tag)),
            None => self.default_range(),
        }
    }

    /// Range to play for an animation name: the first tag matching it
    /// case-insensitively, else the first tag, else every frame.
    /// `None` only for a sprite without frames.
    pub fn animation_range(&self, name: &str) -> Option<Cow<'_, Tag>> {
        match self
            .tags
            .iter()
            .find(|tag| tag.name.eq_ignore_ascii_case(name))
        {
            Some(tag) => Some(Cow::Borrowed(tag)),
            None => self.default_range(),
        }
    }

    /// The first tag, or an unnamed forward tag over every frame
    fn default_range(&self) -> Option<Cow<'_, Tag>> {
        if let Some(tag) = self.tags.first() {
            return Some(Cow::Borrowed(tag));
        }
        let last = self.frames.len().checked_sub(1)?;
        Some(Cow::Owned(Tag {
            name: String::new(),
            from: 0,
            to: u16::try_from(last).unwrap_or(u16::MAX),
            direction: AnimationDirection::Forward,
            repeat: 0,
        }))
    }
}

fn check_header(header: &Header) -> Result<(), LoadSpriteError> {
    if header.width == 0 || header.height == 0 {
        return Err(LoadSpriteError::EmptyCanvas {
            width: header.width,
            height: header.height,
        });
    }
    match header.color_depth {
        ColorDepth::Rgba | ColorDepth::Indexed => Ok(()),
        depth => Err(LoadSpriteError::UnsupportedColorDepth(depth.bits_per_pixel())),
    }
}
