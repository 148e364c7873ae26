//! Issues the decoder recovered from instead of failing.

use thiserror::Error;

use crate::{
    binary::{palette::PaletteError, scalars::Word},
    make_image::LoadImageError,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeWarning {
    #[error("frame {frame}: frame header at byte {offset} runs past the end of the file")]
    TruncatedFrame { frame: usize, offset: usize },
    #[error("frame {frame}: invalid frame header at byte {offset}: {message}")]
    InvalidFrame {
        frame: usize,
        offset: usize,
        message: String,
    },
    #[error("frame {frame}: chunk at byte {offset} runs past the end of the file")]
    TruncatedChunk { frame: usize, offset: usize },
    #[error("frame {frame}: chunk at byte {offset} declares impossible size {size}")]
    InvalidChunkSize {
        frame: usize,
        offset: usize,
        size: usize,
    },
    #[error("frame {frame}: malformed chunk {chunk_type:#06x}: {message}")]
    MalformedChunk {
        frame: usize,
        chunk_type: Word,
        message: String,
    },
    #[error("frame {frame}: cel type {cel_type} is not supported, skipped")]
    UnsupportedCelType { frame: usize, cel_type: Word },
    #[error("frame {frame}: cel skipped: {source}")]
    Cel {
        frame: usize,
        #[source]
        source: LoadImageError,
    },
    #[error("frame {frame}: palette entry skipped: {source}")]
    Palette {
        frame: usize,
        #[source]
        source: PaletteError,
    },
    #[error("frame {frame}: palette chunk ends before its last entry")]
    TruncatedPalette { frame: usize },
    #[error("frame {frame}: tags chunk ends before its last tag")]
    TruncatedTags { frame: usize },
    #[error("tag {name:?} covers frames {from}..={to} but the sprite has {frames} frames")]
    InvalidTagRange {
        name: String,
        from: Word,
        to: Word,
        frames: usize,
    },
}

impl DecodeWarning {
    /// Frame the issue was found in, if it belongs to one
    pub fn frame(&self) -> Option<usize> {
        match self {
            DecodeWarning::TruncatedFrame { frame, .. }
            | DecodeWarning::InvalidFrame { frame, .. }
            | DecodeWarning::TruncatedChunk { frame, .. }
            | DecodeWarning::InvalidChunkSize { frame, .. }
            | DecodeWarning::MalformedChunk { frame, .. }
            | DecodeWarning::UnsupportedCelType { frame, .. }
            | DecodeWarning::Cel { frame, .. }
            | DecodeWarning::Palette { frame, .. }
            | DecodeWarning::TruncatedPalette { frame }
            | DecodeWarning::TruncatedTags { frame } => Some(*frame),
            DecodeWarning::InvalidTagRange { .. } => None,
        }
    }
}

/// Collects warnings, logging each one as it is recorded
#[derive(Debug, Default)]
pub(crate) struct Warnings(Vec<DecodeWarning>);

impl Warnings {
    pub fn push(&mut self, warning: DecodeWarning) {
        log::warn!("{warning}");
        self.0.push(warning);
    }

    pub fn into_inner(self) -> Vec<DecodeWarning> {
        self.0
    }
}
