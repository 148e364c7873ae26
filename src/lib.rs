//! Decoder for Aseprite (`.ase`/`.aseprite`) files.
//!
//! [`Sprite::from_bytes`] reads the whole file and produces one canvas-sized
//! RGBA image per frame plus the animation tags. Damage past the header is
//! skipped where possible and reported in [`Sprite::warnings`].

pub mod binary;
pub mod loader;
pub mod make_image;
pub mod warnings;
pub mod wrappers;

pub use binary::chunks::tags::AnimationDirection;
pub use binary::header::Layout;
pub use loader::{LoadSpriteError, Sprite};
pub use warnings::DecodeWarning;
pub use wrappers::{Frame, Tag};
