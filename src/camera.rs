use crate::WorldOffset;
use crate::universe::Universe;

/// Hex values of braille dots
///
/// ```notrust
///   1   8
///   2  10
///   4  20
///  40  80
/// ```
///
/// Where the base blank pattern is codepoint `0x2800` (or U+2800)
///
/// To get other configurations, just add the numbers above.
const BRAILLE_EMPTY: u32 = 0x2800;

/// Draws a window of the universe as braille characters, each character holding 2x4 cells.
pub struct Camera {
    /// The cell buffer
    cb: Vec<bool>,

    /// The frame buffer
    fb: String,

    /// Codepoints, one per braille character
    cp: Vec<u32>,

    /// Width of the cell buffer
    w: usize,

    /// Height of the cell buffer
    h: usize,

    /// World `x` coordinate of the top left cell
    x: WorldOffset,

    /// World `y` coordinate of the top left cell
    y: WorldOffset,
}

impl Camera {
    pub fn new(w: usize, h: usize) -> Self {
        // Each braille character is 3 bytes, and each line ends with a one byte newline
        let (bw, bh) = (w.div_ceil(2), h.div_ceil(4));

        Self {
            cb: vec![false; w * h],
            fb: String::with_capacity(3 * (bw * bh) + bh),
            cp: vec![BRAILLE_EMPTY; bw * bh],
            w,
            h,
            x: 0,
            y: 0,
        }
    }

    /// Moves the camera so the world cell `(x, y)` is drawn at its top left.
    pub fn look_at(&mut self, x: WorldOffset, y: WorldOffset) {
        (self.x, self.y) = (x, y);
    }

    /// Moves the camera so the world cell `(x, y)` is drawn at its center.
    pub fn center_on(&mut self, x: WorldOffset, y: WorldOffset) {
        self.look_at(x - (self.w / 2) as WorldOffset, y - (self.h / 2) as WorldOffset);
    }

    /// Reset the cell buffer
    pub fn reset(&mut self) {
        self.cb.fill(false);
    }

    /// Plots every live cell of the universe in view. The view is fixed in world coordinates,
    /// so it does not move when the universe grows.
    pub fn draw(&mut self, universe: &Universe) {
        for (x, y) in universe.alive_cells() {
            let (Ok(x), Ok(y)) = (usize::try_from(x - self.x), usize::try_from(y - self.y)) else {
                continue;
            };

            if x < self.w && y < self.h {
                self.cb[y * self.w + x] = true;
            }
        }
    }

    pub fn render(&mut self) -> &str {
        let bw = self.w.div_ceil(2);

        self.cp.fill(BRAILLE_EMPTY);

        for (n, &px) in self.cb.iter().enumerate() {
            let (x, y) = (n % self.w, n / self.w);

            if px {
                self.cp[(y / 4) * bw + (x / 2)] += Self::get_hex_value(x, y);
            }
        }

        self.fb.clear();

        for (i, &c) in self.cp.iter().enumerate() {
            if i > 0 && i % bw == 0 {
                self.fb.push('\n');
            }

            self.fb.push(char::from_u32(c).unwrap_or(' '));
        }
        self.fb.push('\n');

        &self.fb
    }

    fn get_hex_value(x: usize, y: usize) -> u32 {
        match (x % 2, y % 4) {
            (0, 0) => 0x1,
            (1, 0) => 0x8,
            (0, 1) => 0x2,
            (1, 1) => 0x10,
            (0, 2) => 0x4,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            (1, 3) => 0x80,
            _ => unreachable!(),
        }
    }
}
