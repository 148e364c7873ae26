use std::borrow::Cow;

use bitflags::bitflags;
use nom::{bytes::complete::take, combinator::cond};

use crate::binary::{
    errors::ParseResult,
    scalars::{dword, parse_color, parse_string, word, Color, Dword, Word},
};

/// Size of an entry without its optional name
const PALETTE_ENTRY_SIZE: usize = 6;

#[derive(Debug)]
pub struct PaletteChunk<'a> {
    /// New palette size (total number of entries)
    pub palette_size: Dword,
    pub first_index: Dword,
    pub last_index: Dword,
    /// Entries for `first_index..=last_index`, in order
    pub entries: Vec<PaletteEntry<'a>>,
    /// The chunk ended before `last_index` was reached
    pub truncated: bool,
}

#[derive(Debug)]
pub struct PaletteEntry<'a> {
    pub color: Color,
    pub name: Option<Cow<'a, str>>,
}

bitflags! {
    #[derive(Debug, Clone, Copy)]
    pub struct PaletteEntryFlags: Word {
        const HAS_NAME = 0x1;
    }
}

impl<'a> PaletteChunk<'a> {
    /// Palette indices paired with their entries
    pub fn indexed_entries(&self) -> impl Iterator<Item = (u64, &PaletteEntry<'a>)> + '_ {
        (u64::from(self.first_index)..).zip(self.entries.iter())
    }
}

pub fn parse_palette_chunk(input: &[u8]) -> ParseResult<'_, PaletteChunk<'_>> {
    let (input, palette_size) = dword(input)?;
    let (input, first_index) = dword(input)?;
    let (input, last_index) = dword(input)?;
    let (mut input, _) = take(8usize)(input)?;

    let declared = if last_index >= first_index {
        (last_index - first_index) as usize + 1
    } else {
        0
    };
    let mut entries = Vec::with_capacity(declared.min(input.len() / PALETTE_ENTRY_SIZE));
    let mut truncated = false;
    for _ in 0..declared {
        match parse_palette_entry(input) {
            Ok((rest, entry)) => {
                entries.push(entry);
                input = rest;
            }
            Err(_) => {
                truncated = true;
                break;
            }
        }
    }
    Ok((
        input,
        PaletteChunk {
            palette_size,
            first_index,
            last_index,
            entries,
            truncated,
        },
    ))
}

pub fn parse_palette_entry(input: &[u8]) -> ParseResult<'_, PaletteEntry<'_>> {
    let (input, flags) = word(input)?;
    let flags = PaletteEntryFlags::from_bits_truncate(flags);
    let (input, color) = parse_color(input)?;
    let (input, name) = cond(flags.contains(PaletteEntryFlags::HAS_NAME), parse_string)(input)?;
    Ok((input, PaletteEntry { color, name }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette_body(first: u32, last: u32, entries: &[&[u8]]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&(last + 1).to_le_bytes());
        bytes.extend_from_slice(&first.to_le_bytes());
        bytes.extend_from_slice(&last.to_le_bytes());
        bytes.extend_from_slice(&[0; 8]);
        for entry in entries {
            bytes.extend_from_slice(entry);
        }
        bytes
    }

    #[test]
    fn test_palette_with_names() {
        let body = palette_body(
            2,
            4,
            &[
                &[0, 0, 255, 0, 0, 255],
                &[1, 0, 0, 255, 0, 128, 3, 0, b'r', b'e', b'd'],
                &[0, 0, 0, 0, 255, 255],
            ],
        );
        let (rest, chunk) = parse_palette_chunk(&body).unwrap();
        assert!(rest.is_empty());
        assert!(!chunk.truncated);
        assert_eq!(chunk.entries.len(), 3);
        assert_eq!(chunk.entries[1].name.as_deref(), Some("red"));
        assert_eq!(
            chunk.entries[2].color,
            Color {
                red: 0,
                green: 0,
                blue: 255,
                alpha: 255
            }
        );
        let indices: Vec<_> = chunk.indexed_entries().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![2, 3, 4]);
    }

    #[test]
    fn test_palette_truncated() {
        let body = palette_body(0, 9, &[&[0, 0, 1, 2, 3, 4], &[0, 0, 5]]);
        let (_, chunk) = parse_palette_chunk(&body).unwrap();
        assert!(chunk.truncated);
        assert_eq!(chunk.entries.len(), 1);
    }

    #[test]
    fn test_palette_reversed_range() {
        let body = palette_body(5, 2, &[&[0, 0, 1, 2, 3, 4]]);
        let (_, chunk) = parse_palette_chunk(&body).unwrap();
        assert!(chunk.entries.is_empty());
        assert!(!chunk.truncated);
    }
}
