pub mod angle;
pub mod geometry;
