use crate::quadtree::Node;
use crate::quadtree::Quadrant;

/// Flattens `node` into a row-major grid of `node.width()` cells on a side.
pub fn render(node: &Node) -> Vec<bool> {
    let width = node.width();
    let mut cells = vec![false; width * width];

    render_into(node, &mut cells, 0, 0, width);

    cells
}

fn render_into(node: &Node, cells: &mut [bool], x: usize, y: usize, stride: usize) {
    match node.children() {
        None => {
            for q in Quadrant::ALL {
                let (dx, dy) = q.offset();
                cells[(y + dy) * stride + x + dx] = node.is_populated(q);
            }
        }
        Some(children) => {
            let half = node.width() / 2;

            for (child, q) in children.iter().zip(Quadrant::ALL) {
                let (dx, dy) = q.offset();
                render_into(child, cells, x + dx * half, y + dy * half, stride);
            }
        }
    }
}

/// Formats a row-major grid as text, `O` for live cells and `.` for dead ones, one row per
/// line.
pub fn format_grid(cells: &[bool], width: usize) -> String {
    if width == 0 {
        return String::new();
    }

    let mut s = String::with_capacity(cells.len() + cells.len() / width);

    for row in cells.chunks(width) {
        s.extend(row.iter().map(|&alive| if alive { 'O' } else { '.' }));
        s.push('\n');
    }

    s
}
