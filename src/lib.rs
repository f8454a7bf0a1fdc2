pub mod camera;
pub mod config;
pub mod pattern;
pub mod quadtree;
pub mod universe;

pub type WorldOffset = i64;
