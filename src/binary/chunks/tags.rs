use std::borrow::Cow;

use nom::bytes::complete::take;
use strum_macros::{Display, FromRepr};

use crate::binary::{
    errors::ParseResult,
    scalars::{byte, parse_string, word, Byte, Word},
};

#[derive(Debug)]
/// After the tags chunk, you can write one user data chunk for each tag. E.g. if there are 10 tags, you can then write 10 user data chunks one for each tag.
pub struct TagsChunk<'a> {
    pub tags: Vec<TagChunk<'a>>,
    /// The chunk ended before the declared number of tags was read
    pub truncated: bool,
}

/// A tag in the file
/// This is a range of frames over the frames in the file, ordered by frame index
#[derive(Debug, Clone)]
pub struct TagChunk<'a> {
    /// Both Inclusive, not validated against the frame count here
    pub frames: (Word, Word),
    pub animation_direction: AnimationDirection,
    /// Repeat N times. Play this animation section N times:
    ///   0 = Doesn't specify (plays infinite in UI, once on export,
    ///       for ping-pong it plays once in each direction)
    ///   1 = Plays once (for ping-pong, it plays just in one direction)
    ///   2 = Plays twice (for ping-pong, it plays once in one direction,
    ///       and once in reverse)
    ///   n = Plays N times
    pub animation_repeat: Word,
    pub name: Cow<'a, str>,
}

#[derive(FromRepr, Display, Debug, Copy, Clone, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
pub enum AnimationDirection {
    Forward,
    Reverse,
    PingPong,
    PingPongReverse,
    #[strum(to_string = "unknown")]
    Unknown(Byte),
}

impl From<Byte> for AnimationDirection {
    fn from(byte: Byte) -> Self {
        match AnimationDirection::from_repr(byte.into()) {
            Some(AnimationDirection::Unknown(_)) | None => AnimationDirection::Unknown(byte),
            Some(direction) => direction,
        }
    }
}

pub fn parse_tags_chunk(input: &[u8]) -> ParseResult<'_, TagsChunk<'_>> {
    let (input, number_of_tags) = word(input)?;
    let (mut input, _) = take(8usize)(input)?;
    let mut tags = Vec::new();
    let mut truncated = false;
    for _ in 0..number_of_tags {
        match parse_tag(input) {
            Ok((rest, tag)) => {
                tags.push(tag);
                input = rest;
            }
            Err(_) => {
                truncated = true;
                break;
            }
        }
    }
    Ok((input, TagsChunk { tags, truncated }))
}

pub fn parse_tag(input: &[u8]) -> ParseResult<'_, TagChunk<'_>> {
    let (input, from_frame) = word(input)?;
    let (input, to_frame) = word(input)?;
    let (input, animation_direction) = byte(input)?;
    let animation_direction = AnimationDirection::from(animation_direction);
    let (input, animation_repeat) = word(input)?;
    let (input, _) = take(6usize)(input)?;
    let (input, color) = take(3usize)(input)?;
    let _ = color; // color of the tag, is deprecated, color in userdata used instead
    let (input, _) = byte(input)?;
    let (input, name) = parse_string(input)?;
    Ok((
        input,
        TagChunk {
            frames: (from_frame, to_frame),
            animation_direction,
            animation_repeat,
            name,
        },
    ))
}
