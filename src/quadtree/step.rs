use tracing::trace;
use tracing::trace_span;

use crate::quadtree::Node;
use crate::quadtree::Quadrant;
use crate::quadtree::Quadrant::BottomLeft;
use crate::quadtree::Quadrant::BottomRight;
use crate::quadtree::Quadrant::TopLeft;
use crate::quadtree::Quadrant::TopRight;
use crate::quadtree::centered::centered_horizontal;
use crate::quadtree::centered::centered_sub_subnode;
use crate::quadtree::centered::centered_subnode;
use crate::quadtree::centered::centered_vertical;

/// Life rule B3/S23
fn next_state(alive: bool, neighbors: usize) -> bool {
    if alive {
        neighbors == 2 || neighbors == 3
    } else {
        neighbors == 3
    }
}

/// Computes the center half of `node`, one generation later. The result is one level below
/// `node`.
///
/// # Panics
/// If `node` is a leaf.
pub fn next_generation(node: &Node) -> Node {
    match node.level() {
        0 => panic!("invalid state: cannot step a leaf"),
        1 => next_generation_leaves(node),
        _ => next_generation_branch(node),
    }
}

/// Base case, `node` is 4x4 and its children are leaves.
///
///   a b | c d
///   e f | g h
///   ----+----
///   i j | k l
///   m n | o p
///
/// The result is the 2x2 block `f g / j k`.
fn next_generation_leaves(node: &Node) -> Node {
    let (tl, tr) = (node.child(TopLeft), node.child(TopRight));
    let (bl, br) = (node.child(BottomLeft), node.child(BottomRight));

    let count = |cells: [bool; 8]| cells.into_iter().filter(|&c| c).count();

    let f = tl.is_populated(BottomRight);
    let g = tr.is_populated(BottomLeft);
    let j = bl.is_populated(TopRight);
    let k = br.is_populated(TopLeft);

    let f_neighbors = count([
        tl.is_populated(TopLeft),
        tl.is_populated(TopRight),
        tr.is_populated(TopLeft),
        tl.is_populated(BottomLeft),
        g,
        bl.is_populated(TopLeft),
        j,
        k,
    ]);

    let g_neighbors = count([
        tl.is_populated(TopRight),
        tr.is_populated(TopLeft),
        tr.is_populated(TopRight),
        f,
        tr.is_populated(BottomRight),
        j,
        k,
        br.is_populated(TopRight),
    ]);

    let j_neighbors = count([
        tl.is_populated(BottomLeft),
        f,
        g,
        bl.is_populated(TopLeft),
        k,
        bl.is_populated(BottomLeft),
        bl.is_populated(BottomRight),
        br.is_populated(BottomLeft),
    ]);

    let k_neighbors = count([
        f,
        g,
        tr.is_populated(BottomRight),
        j,
        br.is_populated(TopRight),
        bl.is_populated(BottomRight),
        br.is_populated(BottomLeft),
        br.is_populated(BottomRight),
    ]);

    let mut result = Node::empty(0);

    for (q, alive, neighbors) in [
        (TopLeft, f, f_neighbors),
        (TopRight, g, g_neighbors),
        (BottomLeft, j, j_neighbors),
        (BottomRight, k, k_neighbors),
    ] {
        if next_state(alive, neighbors) {
            result.set_alive(q);
        }
    }

    result
}

/// General case. With the children of `node` split into nine overlapping sub-squares
///
///   n00 n01 n02
///   n10 n11 n12
///   n20 n21 n22
///
/// each `nij` here is already the center of that sub-square, so the nine tile the center
/// three quarters of `node`. Stepping the four 2x2 groups of them gives the four quadrants of
/// the result.
fn next_generation_branch(node: &Node) -> Node {
    let (tl, tr) = (node.child(TopLeft), node.child(TopRight));
    let (bl, br) = (node.child(BottomLeft), node.child(BottomRight));

    let n00 = centered_subnode(tl);
    let n01 = centered_horizontal(tl, tr);
    let n02 = centered_subnode(tr);
    let n10 = centered_vertical(tl, bl);
    let n11 = centered_sub_subnode(node);
    let n12 = centered_vertical(tr, br);
    let n20 = centered_subnode(bl);
    let n21 = centered_horizontal(bl, br);
    let n22 = centered_subnode(br);

    let group = |tl: &Node, tr: &Node, bl: &Node, br: &Node| {
        next_generation(&Node::from_children(
            tl.clone(),
            tr.clone(),
            bl.clone(),
            br.clone(),
        ))
    };

    Node::from_children(
        group(&n00, &n01, &n10, &n11),
        group(&n01, &n02, &n11, &n12),
        group(&n10, &n11, &n20, &n21),
        group(&n11, &n12, &n21, &n22),
    )
}

/// Embeds `node` in the center of a node one level up, surrounded by dead cells.
///
/// Each quadrant of the result holds one child of `node` in its innermost corner. A leaf is
/// treated as a node whose children are single cells.
pub fn expand(node: &Node) -> Node {
    let corner = |q: Quadrant| -> Node {
        let inner = q.flip();

        match node {
            Node::Leaf(_) => {
                let mut leaf = Node::empty(0);
                if node.is_populated(q) {
                    leaf.set_alive(inner);
                }

                leaf
            }
            Node::Branch { .. } => {
                let empty = Node::empty(node.level() - 1);
                let mut slots = [empty.clone(), empty.clone(), empty.clone(), empty];
                slots[inner.index()] = node.child(q).clone();

                let [a, b, c, d] = slots;
                Node::from_children(a, b, c, d)
            }
        }
    };

    Node::from_children(
        corner(TopLeft),
        corner(TopRight),
        corner(BottomLeft),
        corner(BottomRight),
    )
}

/// Advances `node` by one generation, treating everything outside it as dead.
///
/// The result is the same size as `node` and covers the same region. Live cells that would be
/// born outside of it are dropped, see [`crate::universe::Universe`] for a universe that grows
/// to hold them.
pub fn generate_next_generation(node: &Node) -> Node {
    let _span = trace_span!("generation", level = node.level()).entered();

    let result = next_generation(&expand(node));

    trace!(population = result.population(), "stepped");

    result
}

#[cfg(test)]
mod test {
    use super::expand;
    use super::generate_next_generation;
    use super::next_generation;
    use crate::quadtree::Node;
    use crate::quadtree::Quadrant;
    use crate::quadtree::build_tree;
    use crate::quadtree::render;

    fn tree_from(width: usize, cells: &[(usize, usize)]) -> Node {
        let mut grid = vec![false; width * width];
        for &(x, y) in cells {
            grid[y * width + x] = true;
        }

        build_tree(&grid, width, width).unwrap()
    }

    fn cells_of(node: &Node) -> Vec<(usize, usize)> {
        let w = node.width();

        render(node)
            .into_iter()
            .enumerate()
            .filter(|&(_, alive)| alive)
            .map(|(i, _)| (i % w, i / w))
            .collect()
    }

    #[test]
    fn leaf_level_birth() {
        // f has exactly three neighbors: a, b, e
        let node = tree_from(4, &[(0, 0), (1, 0), (0, 1)]);
        let next = next_generation(&node);

        assert_eq!(next.level(), 0);
        assert!(next.is_populated(Quadrant::TopLeft));
        assert!(!next.is_populated(Quadrant::TopRight));
        assert!(!next.is_populated(Quadrant::BottomLeft));
        assert!(!next.is_populated(Quadrant::BottomRight));
    }

    #[test]
    fn leaf_level_overcrowding() {
        // every cell alive: each center cell has eight neighbors
        let node = tree_from(4, &(0..16).map(|i| (i % 4, i / 4)).collect::<Vec<_>>());

        assert_eq!(next_generation(&node), Node::empty(0));
    }

    #[test]
    fn leaf_level_block_survives() {
        let node = tree_from(4, &[(1, 1), (2, 1), (1, 2), (2, 2)]);

        assert_eq!(next_generation(&node), Node::leaf(true, true, true, true));
    }

    #[test]
    fn leaf_level_neighbor_sets() {
        // Each corner of the 4x4 neighbors exactly one of the result cells
        for (corner, q) in [
            ((0, 0), Quadrant::TopLeft),
            ((3, 0), Quadrant::TopRight),
            ((0, 3), Quadrant::BottomLeft),
            ((3, 3), Quadrant::BottomRight),
        ] {
            let node = tree_from(4, &[corner, (1, 1), (2, 2), (2, 1), (1, 2)]);
            let next = next_generation(&node);

            // the cell nearest the live corner has four live neighbors and dies
            assert!(!next.is_populated(q), "{q:?}");

            // the others have three and survive
            for other in Quadrant::ALL.into_iter().filter(|&o| o != q) {
                assert!(next.is_populated(other), "{q:?} {other:?}");
            }
        }
    }

    #[test]
    fn branch_blinker_in_center() {
        // 8x8 tree, the center 4x4 spans 2..6
        let node = tree_from(8, &[(2, 3), (3, 3), (4, 3)]);
        let next = next_generation(&node);

        assert_eq!(next.level(), 1);
        assert_eq!(cells_of(&next), vec![(1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn deep_branch_matches_shallow() {
        // The same glider in the center of a 16x16 and of a 32x32 steps the same way
        let glider = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];

        let small = tree_from(16, &glider.map(|(x, y)| (x + 6, y + 6)));
        let large = tree_from(32, &glider.map(|(x, y)| (x + 14, y + 14)));

        let small = cells_of(&next_generation(&small));
        let large = cells_of(&next_generation(&large));

        // results are 8x8 from offset 4 and 16x16 from offset 8, so both land on the
        // small tree's coordinates
        let small: Vec<_> = small.into_iter().map(|(x, y)| (x + 4, y + 4)).collect();

        assert_eq!(small, large);
        assert_eq!(small, vec![(6, 7), (8, 7), (7, 8), (8, 8), (7, 9)]);
    }

    #[test]
    fn expand_centers_the_node() {
        let node = tree_from(4, &[(0, 0), (3, 0), (1, 2), (3, 3)]);
        let big = expand(&node);

        assert_eq!(big.level(), 2);
        assert_eq!(cells_of(&big), vec![(2, 2), (5, 2), (3, 4), (5, 5)]);
    }

    #[test]
    fn expand_leaf() {
        let big = expand(&Node::leaf(true, false, false, true));

        assert_eq!(big.level(), 1);
        assert_eq!(cells_of(&big), vec![(1, 1), (2, 2)]);
    }

    #[test]
    fn generation_keeps_size() {
        let node = tree_from(8, &[(0, 0), (1, 0), (0, 1), (1, 1)]);
        let next = generate_next_generation(&node);

        assert_eq!(next, node);
    }

    #[test]
    fn generation_of_leaf() {
        let next = generate_next_generation(&Node::leaf(true, true, true, true));

        assert_eq!(next, Node::leaf(true, true, true, true));

        let next = generate_next_generation(&Node::leaf(true, false, false, true));

        assert_eq!(next, Node::empty(0));
    }

    #[test]
    #[should_panic(expected = "invalid state")]
    fn leaf_cannot_step() {
        next_generation(&Node::empty(0));
    }
}
