use std::borrow::Cow;

use nom::{
    bytes::complete::take,
    number::complete::{le_i16, le_u16, le_u32, le_u8},
};

use super::errors::{ParseError, ParseResult};

pub type Byte = u8;
pub type Word = u16;
pub type Short = i16;
pub type Dword = u32;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub red: Byte,
    pub green: Byte,
    pub blue: Byte,
    pub alpha: Byte,
}

impl From<Color> for image::Rgba<u8> {
    fn from(color: Color) -> Self {
        image::Rgba([color.red, color.green, color.blue, color.alpha])
    }
}

pub fn byte(input: &[u8]) -> ParseResult<'_, Byte> {
    le_u8(input)
}

pub fn word(input: &[u8]) -> ParseResult<'_, Word> {
    le_u16(input)
}

pub fn short(input: &[u8]) -> ParseResult<'_, Short> {
    le_i16(input)
}

pub fn dword(input: &[u8]) -> ParseResult<'_, Dword> {
    le_u32(input)
}

/// Reads a DWORD size field that counts its own bytes and must cover at
/// least `min` bytes.
pub fn dword_size(
    input: &[u8],
    min: usize,
    error: impl Fn(Dword) -> ParseError,
) -> ParseResult<'_, usize> {
    let (rest, size) = dword(input)?;
    if (size as usize) < min {
        return Err(nom::Err::Failure(error(size)));
    }
    Ok((rest, size as usize))
}

pub fn parse_color(input: &[u8]) -> ParseResult<'_, Color> {
    let (input, red) = byte(input)?;
    let (input, green) = byte(input)?;
    let (input, blue) = byte(input)?;
    let (input, alpha) = byte(input)?;
    Ok((
        input,
        Color {
            red,
            green,
            blue,
            alpha,
        },
    ))
}

/// WORD length followed by that many bytes of UTF-8.
/// Invalid sequences are replaced rather than rejected.
pub fn parse_string(input: &[u8]) -> ParseResult<'_, Cow<'_, str>> {
    let (input, len) = word(input)?;
    let (input, bytes) = take(len)(input)?;
    Ok((input, String::from_utf8_lossy(bytes)))
}

#[test]
fn test_parse_string() {
    let input = [5, 0, b'i', b'd', b'l', b'e', b'!', 0xAA];
    let (rest, s) = parse_string(&input).unwrap();
    assert_eq!(s, "idle!");
    assert_eq!(rest, &[0xAA]);

    let err = parse_string(&[9, 0, b'a']).unwrap_err();
    assert!(crate::binary::errors::into_parse_error(err).is_eof());
}
