use std::fmt::Debug;

use crate::quadtree::TreeError;

/// One of the four sub-regions of a [`Node`].
///
/// The discriminant is the bit that stores the quadrant inside a leaf mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Quadrant {
    TopLeft = 0b0001,
    TopRight = 0b0010,
    BottomLeft = 0b0100,
    BottomRight = 0b1000,
}

impl Quadrant {
    /// All quadrants in row-major order, which is also the order children are stored in.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    /// Row-major index of the quadrant, `y * 2 + x`.
    pub const fn index(self) -> usize {
        match self {
            Quadrant::TopLeft => 0,
            Quadrant::TopRight => 1,
            Quadrant::BottomLeft => 2,
            Quadrant::BottomRight => 3,
        }
    }

    /// Column and row of the quadrant inside its parent, each either `0` or `1`.
    pub const fn offset(self) -> (usize, usize) {
        let i = self.index();

        (i & 1, i >> 1)
    }

    /// The diagonally opposite quadrant
    pub const fn flip(self) -> Quadrant {
        match self {
            Quadrant::TopLeft => Quadrant::BottomRight,
            Quadrant::TopRight => Quadrant::BottomLeft,
            Quadrant::BottomLeft => Quadrant::TopRight,
            Quadrant::BottomRight => Quadrant::TopLeft,
        }
    }

    const fn bit(self) -> u8 {
        self as u8
    }
}

/// A square region of the universe, `2^(level + 1)` cells on a side.
///
/// A level `0` node is a leaf and stores its 2x2 cells as the low four bits of a mask (see
/// [`Quadrant`]). Any other node owns exactly four children, one level below it. Children are
/// never shared between parents: cloning a node deep-copies its whole subtree.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Node {
    Leaf(u8),
    Branch { level: u8, children: Box<[Node; 4]> },
}

impl Node {
    /// A node of the given level where every cell is dead.
    pub fn empty(level: u8) -> Self {
        if level == 0 {
            return Node::Leaf(0);
        }

        Node::Branch {
            level,
            children: Box::new([
                Node::empty(level - 1),
                Node::empty(level - 1),
                Node::empty(level - 1),
                Node::empty(level - 1),
            ]),
        }
    }

    /// A leaf built from its four cells.
    pub fn leaf(tl: bool, tr: bool, bl: bool, br: bool) -> Self {
        let mut mask = 0;

        for (alive, q) in [tl, tr, bl, br].into_iter().zip(Quadrant::ALL) {
            if alive {
                mask |= q.bit();
            }
        }

        Node::Leaf(mask)
    }

    /// Builds the node whose quadrants are the given children.
    ///
    /// # Panics
    /// If the children are not all of the same level.
    pub fn from_children(tl: Node, tr: Node, bl: Node, br: Node) -> Self {
        let level = tl.level();

        assert!(
            tr.level() == level && bl.level() == level && br.level() == level,
            "invalid state: children of unequal levels ({}, {}, {}, {})",
            level,
            tr.level(),
            bl.level(),
            br.level()
        );

        Node::Branch {
            level: level + 1,
            children: Box::new([tl, tr, bl, br]),
        }
    }

    pub fn level(&self) -> u8 {
        match self {
            Node::Leaf(_) => 0,
            Node::Branch { level, .. } => *level,
        }
    }

    /// Side length of the node in cells, `2^(level + 1)`.
    pub fn width(&self) -> usize {
        2 << self.level()
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    pub fn children(&self) -> Option<&[Node; 4]> {
        match self {
            Node::Leaf(_) => None,
            Node::Branch { children, .. } => Some(children),
        }
    }

    /// The child in quadrant `q`.
    ///
    /// # Panics
    /// If this is a leaf.
    pub fn child(&self, q: Quadrant) -> &Node {
        match self {
            Node::Leaf(_) => panic!("invalid state: a leaf has no {q:?} child"),
            Node::Branch { children, .. } => &children[q.index()],
        }
    }

    fn child_mut(&mut self, q: Quadrant) -> &mut Node {
        match self {
            Node::Leaf(_) => panic!("invalid state: a leaf has no {q:?} child"),
            Node::Branch { children, .. } => &mut children[q.index()],
        }
    }

    fn mask(&self) -> u8 {
        match self {
            Node::Leaf(mask) => *mask,
            Node::Branch { level, .. } => {
                panic!("invalid state: leaf operation on a level {level} node")
            }
        }
    }

    fn mask_mut(&mut self) -> &mut u8 {
        match self {
            Node::Leaf(mask) => mask,
            Node::Branch { level, .. } => {
                panic!("invalid state: leaf operation on a level {level} node")
            }
        }
    }

    /// Whether the leaf cell in quadrant `q` is alive.
    ///
    /// # Panics
    /// If this is not a leaf.
    pub fn is_populated(&self, q: Quadrant) -> bool {
        self.mask() & q.bit() != 0
    }

    // Leaf mutation is only meant for nodes that are still being built.

    pub fn set_alive(&mut self, q: Quadrant) {
        *self.mask_mut() |= q.bit();
    }

    pub fn set_dead(&mut self, q: Quadrant) {
        *self.mask_mut() &= !q.bit();
    }

    pub fn toggle(&mut self, q: Quadrant) {
        *self.mask_mut() ^= q.bit();
    }

    /// Number of live cells
    pub fn population(&self) -> u64 {
        match self {
            Node::Leaf(mask) => mask.count_ones() as u64,
            Node::Branch { children, .. } => children.iter().map(Node::population).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Node::Leaf(mask) => *mask == 0,
            Node::Branch { children, .. } => children.iter().all(Node::is_empty),
        }
    }

    /// Whether the cell at `(x, y)` is alive. The origin is the top left corner.
    pub fn get(&self, x: usize, y: usize) -> Result<bool, TreeError> {
        self.check_bounds(x, y)?;

        let mut node = self;
        let (mut x, mut y) = (x, y);

        while let Node::Branch { .. } = node {
            let half = node.width() / 2;
            let q = Self::quadrant_of(x, y, half);
            let (dx, dy) = q.offset();

            node = node.child(q);
            (x, y) = (x - dx * half, y - dy * half);
        }

        Ok(node.is_populated(Self::quadrant_of(x, y, 1)))
    }

    /// Brings the cell at `(x, y)` to life. The origin is the top left corner.
    pub fn set_alive_at(&mut self, x: usize, y: usize) -> Result<(), TreeError> {
        self.check_bounds(x, y)?;
        self.birth_cell_at(x, y);

        Ok(())
    }

    fn birth_cell_at(&mut self, x: usize, y: usize) {
        if self.is_leaf() {
            self.set_alive(Self::quadrant_of(x, y, 1));
            return;
        }

        let half = self.width() / 2;
        let q = Self::quadrant_of(x, y, half);
        let (dx, dy) = q.offset();

        self.child_mut(q).birth_cell_at(x - dx * half, y - dy * half);
    }

    fn quadrant_of(x: usize, y: usize, half: usize) -> Quadrant {
        let (qx, qy) = ((x >= half) as usize, (y >= half) as usize);

        Quadrant::ALL[qy * 2 + qx]
    }

    fn check_bounds(&self, x: usize, y: usize) -> Result<(), TreeError> {
        let width = self.width();

        if x >= width || y >= width {
            return Err(TreeError::OutOfBounds { x, y, width });
        }

        Ok(())
    }

    /// Whether any live cell lies on the outermost one-cell ring of the node.
    pub fn touches_border(&self) -> bool {
        self.edge_populated(Edges {
            top: true,
            bottom: true,
            left: true,
            right: true,
        })
    }

    fn edge_populated(&self, edges: Edges) -> bool {
        if !edges.any() {
            return false;
        }

        match self {
            Node::Leaf(_) => Quadrant::ALL
                .into_iter()
                .any(|q| edges.restrict(q).any() && self.is_populated(q)),
            Node::Branch { children, .. } => Quadrant::ALL
                .into_iter()
                .any(|q| children[q.index()].edge_populated(edges.restrict(q))),
        }
    }
}

/// Which outer edges of the universe a node lies on.
#[derive(Clone, Copy)]
struct Edges {
    top: bool,
    bottom: bool,
    left: bool,
    right: bool,
}

impl Edges {
    fn any(self) -> bool {
        self.top || self.bottom || self.left || self.right
    }

    /// The outer edges still touched by quadrant `q` of a node lying on `self`.
    fn restrict(self, q: Quadrant) -> Edges {
        let (x, y) = q.offset();

        Edges {
            top: self.top && y == 0,
            bottom: self.bottom && y == 1,
            left: self.left && x == 0,
            right: self.right && x == 1,
        }
    }
}

impl Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Leaf(mask) => write!(f, "Leaf({mask:#06b})"),
            Node::Branch { level, .. } => write!(
                f,
                "Branch[level: {}, width: {}, population: {}]",
                level,
                self.width(),
                self.population()
            ),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Node;
    use super::Quadrant;
    use crate::quadtree::TreeError;

    #[test]
    fn empty_is_dead_everywhere() {
        let node = Node::empty(3);

        assert_eq!(node.level(), 3);
        assert_eq!(node.width(), 16);
        assert_eq!(node.population(), 0);
        assert!(node.is_empty());
        assert!(!node.touches_border());
    }

    #[test]
    fn leaf_bits() {
        let mut leaf = Node::leaf(true, false, false, true);

        assert!(leaf.is_populated(Quadrant::TopLeft));
        assert!(!leaf.is_populated(Quadrant::TopRight));
        assert!(!leaf.is_populated(Quadrant::BottomLeft));
        assert!(leaf.is_populated(Quadrant::BottomRight));

        leaf.set_alive(Quadrant::TopRight);
        leaf.set_dead(Quadrant::TopLeft);
        leaf.toggle(Quadrant::BottomLeft);
        leaf.toggle(Quadrant::BottomRight);

        assert_eq!(leaf, Node::leaf(false, true, true, false));
        assert_eq!(leaf.width(), 2);
    }

    #[test]
    #[should_panic(expected = "invalid state")]
    fn leaf_operation_on_branch() {
        Node::empty(1).is_populated(Quadrant::TopLeft);
    }

    #[test]
    #[should_panic(expected = "invalid state")]
    fn children_of_unequal_level() {
        Node::from_children(Node::empty(1), Node::empty(0), Node::empty(0), Node::empty(0));
    }

    #[test]
    fn set_and_get() {
        let mut node = Node::empty(2);

        node.set_alive_at(0, 0).unwrap();
        node.set_alive_at(5, 2).unwrap();
        node.set_alive_at(7, 7).unwrap();

        assert!(node.get(0, 0).unwrap());
        assert!(node.get(5, 2).unwrap());
        assert!(node.get(7, 7).unwrap());
        assert!(!node.get(2, 5).unwrap());
        assert_eq!(node.population(), 3);

        // (5, 2) lives in the top right child, in the top right cell of its bottom left leaf
        let leaf = node.child(Quadrant::TopRight).child(Quadrant::BottomLeft);
        assert!(leaf.is_populated(Quadrant::TopRight));
    }

    #[test]
    fn out_of_bounds() {
        let mut node = Node::empty(1);

        assert!(matches!(
            node.set_alive_at(4, 0),
            Err(TreeError::OutOfBounds { x: 4, y: 0, width: 4 })
        ));
        assert!(matches!(
            node.get(0, 9),
            Err(TreeError::OutOfBounds { x: 0, y: 9, width: 4 })
        ));
        assert!(node.is_empty());
    }

    #[test]
    fn border() {
        let mut inner = Node::empty(2);
        inner.set_alive_at(1, 6).unwrap();
        assert!(!inner.touches_border());

        let mut edge = Node::empty(2);
        edge.set_alive_at(7, 3).unwrap();
        assert!(edge.touches_border());

        let mut corner = Node::empty(2);
        corner.set_alive_at(0, 7).unwrap();
        assert!(corner.touches_border());

        assert!(Node::leaf(false, false, true, false).touches_border());
    }

    #[test]
    fn quadrant_layout() {
        for (i, q) in Quadrant::ALL.into_iter().enumerate() {
            assert_eq!(q.index(), i);
            assert_eq!(q.flip().flip(), q);
        }

        assert_eq!(Quadrant::BottomLeft.offset(), (0, 1));
        assert_eq!(Quadrant::TopRight.flip(), Quadrant::BottomLeft);
    }
}
