pub mod cartesian;
pub mod geometry;
