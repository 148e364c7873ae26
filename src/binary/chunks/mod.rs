pub mod cel;
pub mod palette;
pub mod tags;
