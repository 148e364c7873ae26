use std::ops::RangeInclusive;

use crate::binary::chunks::tags::{AnimationDirection, TagChunk};

/// A decoded frame, always the size of the canvas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// In milliseconds
    pub duration: u32,
    pub image: image::RgbaImage,
}

impl Frame {
    /// RGBA bytes, row-major from the top-left corner
    pub fn pixels(&self) -> &[u8] {
        self.image.as_raw()
    }
}

/// A named range of frames.
/// Names are not unique; lookups return the first match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    /// First frame, inclusive
    pub from: u16,
    /// Last frame, inclusive
    pub to: u16,
    pub direction: AnimationDirection,
    /// Times to play the range, 0 when unspecified
    pub repeat: u16,
}

impl From<TagChunk<'_>> for Tag {
    fn from(chunk: TagChunk<'_>) -> Self {
        Self {
            name: chunk.name.into_owned(),
            from: chunk.frames.0,
            to: chunk.frames.1,
            direction: chunk.animation_direction,
            repeat: chunk.animation_repeat,
        }
    }
}

impl Tag {
    pub fn frame_range(&self) -> RangeInclusive<usize> {
        self.from as usize..=self.to as usize
    }

    pub fn contains(&self, frame: usize) -> bool {
        self.frame_range().contains(&frame)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Frame indices of a single pass through the tag, in the order the
    /// direction plays them. Ping-pong doesn't repeat the turning frames.
    pub fn playback_order(&self) -> Vec<usize> {
        let (from, to) = (self.from as usize, self.to as usize);
        let inner = (from + 1)..to;
        match self.direction {
            AnimationDirection::Reverse => (from..=to).rev().collect(),
            AnimationDirection::PingPong => (from..=to).chain(inner.rev()).collect(),
            AnimationDirection::PingPongReverse => (from..=to).rev().chain(inner).collect(),
            AnimationDirection::Forward | AnimationDirection::Unknown(_) => (from..=to).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(from: u16, to: u16, direction: AnimationDirection) -> Tag {
        Tag {
            name: "walk".to_string(),
            from,
            to,
            direction,
            repeat: 0,
        }
    }

    #[test]
    fn test_playback_order() {
        assert_eq!(tag(2, 5, AnimationDirection::Forward).playback_order(), vec![2, 3, 4, 5]);
        assert_eq!(tag(2, 5, AnimationDirection::Reverse).playback_order(), vec![5, 4, 3, 2]);
        assert_eq!(
            tag(2, 5, AnimationDirection::PingPong).playback_order(),
            vec![2, 3, 4, 5, 4, 3]
        );
        assert_eq!(
            tag(2, 5, AnimationDirection::PingPongReverse).playback_order(),
            vec![5, 4, 3, 2, 3, 4]
        );
        assert_eq!(tag(1, 3, AnimationDirection::Unknown(8)).playback_order(), vec![1, 2, 3]);
    }

    #[test]
    fn test_single_frame_ping_pong() {
        assert_eq!(tag(4, 4, AnimationDirection::PingPong).playback_order(), vec![4]);
        assert_eq!(tag(4, 5, AnimationDirection::PingPong).playback_order(), vec![4, 5]);
    }

    #[test]
    fn test_contains() {
        let walk = tag(2, 4, AnimationDirection::Forward);
        assert!(!walk.contains(1));
        assert!(walk.contains(2));
        assert!(walk.contains(4));
        assert!(!walk.contains(5));
    }
}
