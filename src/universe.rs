use tracing::debug;

use crate::WorldOffset;
use crate::pattern::Pattern;
use crate::quadtree;
use crate::quadtree::Node;
use crate::quadtree::TreeError;

/// A Life universe that grows whenever its pattern reaches the edge.
///
/// Cells are addressed in world coordinates, which stay fixed as the universe grows. The root
/// node covers the square starting at `origin`.
pub struct Universe {
    /// The whole universe
    root: Node,

    /// World coordinates of the top left cell of `root`
    origin: (WorldOffset, WorldOffset),

    /// Number of generations computed so far
    generation: u64,
}

impl Universe {
    /// Create a universe from a row-major grid. Cell `(0, 0)` of the grid sits at the world
    /// origin.
    pub fn from_grid(cells: &[bool], width: usize, height: usize) -> Result<Self, TreeError> {
        let root = quadtree::build_tree(cells, width, height)?;

        Ok(Self {
            root,
            origin: (0, 0),
            generation: 0,
        })
    }

    pub fn from_pattern(pattern: &Pattern) -> Result<Self, TreeError> {
        Self::from_grid(pattern.cells(), pattern.width(), pattern.height())
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn width(&self) -> usize {
        self.root.width()
    }

    pub fn origin(&self) -> (WorldOffset, WorldOffset) {
        self.origin
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> u64 {
        self.root.population()
    }

    /// Advance the universe by one generation.
    ///
    /// If a live cell touches the edge of the root, the root is first re-centered inside a node
    /// twice as wide, so nothing born next to the edge is lost.
    pub fn step(&mut self) {
        if self.root.touches_border() {
            self.grow();
        }

        self.root = quadtree::generate_next_generation(&self.root);
        self.generation += 1;
    }

    pub fn step_n(&mut self, n: u64) {
        for _ in 0..n {
            self.step();
        }
    }

    fn grow(&mut self) {
        let shift = (self.root.width() / 2) as WorldOffset;

        self.root = quadtree::expand(&self.root);
        self.origin = (self.origin.0 - shift, self.origin.1 - shift);

        debug!(
            level = self.root.level(),
            width = self.root.width(),
            origin = ?self.origin,
            "grew universe"
        );
    }

    /// The root flattened into a row-major grid, see [`Universe::width`]
    pub fn render(&self) -> Vec<bool> {
        quadtree::render(&self.root)
    }

    /// World coordinates of every live cell, in row-major order
    pub fn alive_cells(&self) -> Vec<(WorldOffset, WorldOffset)> {
        let width = self.width();
        let (ox, oy) = self.origin;

        self.render()
            .into_iter()
            .enumerate()
            .filter(|&(_, alive)| alive)
            .map(|(i, _)| (ox + (i % width) as WorldOffset, oy + (i / width) as WorldOffset))
            .collect()
    }
}
