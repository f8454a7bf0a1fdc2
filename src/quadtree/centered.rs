//! Helpers that assemble the overlapping sub-squares used by the next generation recursion.
//!
//! Each helper takes nodes of some level `n` and returns a node of level `n - 1` made of their
//! innermost corners. When the corners are single cells (the operands are level `1`) the result
//! is a leaf read straight from the bits.

use crate::quadtree::Node;
use crate::quadtree::Quadrant::BottomLeft;
use crate::quadtree::Quadrant::BottomRight;
use crate::quadtree::Quadrant::TopLeft;
use crate::quadtree::Quadrant::TopRight;

/// Given four nodes laid out as
///
/// ```notrust
///   tl tr
///   bl br
/// ```
///
/// returns the node, of the same level, made of their corners touching the center of the
/// layout.
fn inner_corners(tl: &Node, tr: &Node, bl: &Node, br: &Node) -> Node {
    if tl.is_leaf() {
        return Node::leaf(
            tl.is_populated(BottomRight),
            tr.is_populated(BottomLeft),
            bl.is_populated(TopRight),
            br.is_populated(TopLeft),
        );
    }

    Node::from_children(
        tl.child(BottomRight).clone(),
        tr.child(BottomLeft).clone(),
        bl.child(TopRight).clone(),
        br.child(TopLeft).clone(),
    )
}

/// Given an n-node, returns the (n - 1)-node at its center
pub(crate) fn centered_subnode(node: &Node) -> Node {
    inner_corners(
        node.child(TopLeft),
        node.child(TopRight),
        node.child(BottomLeft),
        node.child(BottomRight),
    )
}

/// Given two n-nodes with `left` to the left and `right` to the right, returns the (n - 1)-node
/// centered on their boundary
pub(crate) fn centered_horizontal(left: &Node, right: &Node) -> Node {
    inner_corners(
        left.child(TopRight),
        right.child(TopLeft),
        left.child(BottomRight),
        right.child(BottomLeft),
    )
}

/// Given two n-nodes with `top` above and `bottom` below, returns the (n - 1)-node centered on
/// their boundary
pub(crate) fn centered_vertical(top: &Node, bottom: &Node) -> Node {
    inner_corners(
        top.child(BottomLeft),
        top.child(BottomRight),
        bottom.child(TopLeft),
        bottom.child(TopRight),
    )
}

/// On an n-node, returns its (n - 2)-node center
pub(crate) fn centered_sub_subnode(node: &Node) -> Node {
    inner_corners(
        node.child(TopLeft).child(BottomRight),
        node.child(TopRight).child(BottomLeft),
        node.child(BottomLeft).child(TopRight),
        node.child(BottomRight).child(TopLeft),
    )
}
