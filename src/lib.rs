pub mod clock;
pub mod error;
pub mod geometry;
pub mod markers;
pub mod render;
pub mod surface;
pub mod terminal;
pub mod theme;
pub mod ticker;
