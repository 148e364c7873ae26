pub mod chunk;
pub mod chunks;
pub mod color_depth;
pub mod errors;
pub mod header;
pub mod image;
pub mod palette;
pub mod raw_file;
pub mod raw_frame;
pub mod scalars;
