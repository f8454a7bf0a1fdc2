//! Quadtree representation of a Life universe, along with the operations that build, step and
//! flatten it.

use thiserror::Error;

pub use crate::quadtree::build::build_tree;
pub use crate::quadtree::node::Node;
pub use crate::quadtree::node::Quadrant;
pub use crate::quadtree::render::format_grid;
pub use crate::quadtree::render::render;
pub use crate::quadtree::step::expand;
pub use crate::quadtree::step::generate_next_generation;
pub use crate::quadtree::step::next_generation;

mod build;
mod centered;
mod node;
mod render;
mod step;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("Grid of {len} cells does not have the stated size {width}x{height}")]
    InvalidArgument {
        len: usize,
        width: usize,
        height: usize,
    },

    #[error("Cell ({x}, {y}) is outside of a {width}x{width} node")]
    OutOfBounds { x: usize, y: usize, width: usize },
}
