use tracing::debug;

use crate::quadtree::Node;
use crate::quadtree::TreeError;

/// Smallest level whose width, `2^(level + 1)`, holds `side` cells.
fn level_for(side: usize) -> u8 {
    side.next_power_of_two().trailing_zeros().saturating_sub(1) as u8
}

/// Builds the smallest tree holding the row-major `width` x `height` grid `cells`.
///
/// The grid is placed in the top left corner of the tree, the rest of the tree is dead.
pub fn build_tree(cells: &[bool], width: usize, height: usize) -> Result<Node, TreeError> {
    if width.checked_mul(height) != Some(cells.len()) {
        return Err(TreeError::InvalidArgument {
            len: cells.len(),
            width,
            height,
        });
    }

    let level = level_for(width.max(height));
    let mut tree = Node::empty(level);

    for (i, _) in cells.iter().enumerate().filter(|&(_, &alive)| alive) {
        tree.set_alive_at(i % width, i / width)?;
    }

    debug!(width, height, level, population = tree.population(), "built tree");

    Ok(tree)
}
