use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("Grid of {len} cells does not have the stated size {width}x{height}")]
    SizeMismatch {
        len: usize,
        width: usize,
        height: usize,
    },

    #[error("Unexpected '{got}' at row {row}, column {col}, expected 'O', '*' or '.'")]
    UnexpectedChar { row: usize, col: usize, got: char },

    #[error("Unknown pattern \"{name}\"")]
    UnknownPattern { name: String },

    #[error("A {width}x{height} pattern does not fit in a {side}x{side} grid")]
    TooLarge {
        width: usize,
        height: usize,
        side: usize,
    },
}

/// A rectangular grid of cells used to seed a universe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    width: usize,
    height: usize,

    /// Row-major cells, `true` is alive
    cells: Vec<bool>,
}

impl Pattern {
    pub fn new(cells: Vec<bool>, width: usize, height: usize) -> Result<Self, PatternError> {
        if width.checked_mul(height) != Some(cells.len()) {
            return Err(PatternError::SizeMismatch {
                len: cells.len(),
                width,
                height,
            });
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Parse plaintext rows, where `O` or `*` is a live cell and `.` a dead one. Short rows are
    /// padded with dead cells.
    pub fn from_rows(rows: &[&str]) -> Result<Self, PatternError> {
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let height = rows.len();
        let mut cells = vec![false; width * height];

        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                cells[y * width + x] = match c {
                    'O' | '*' => true,
                    '.' => false,
                    got => {
                        return Err(PatternError::UnexpectedChar {
                            row: y,
                            col: x,
                            got,
                        });
                    }
                };
            }
        }

        Self::new(cells, width, height)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Place the pattern in the middle of a `side` x `side` grid of dead cells.
    pub fn centered_in(&self, side: usize) -> Result<Self, PatternError> {
        if self.width > side || self.height > side {
            return Err(PatternError::TooLarge {
                width: self.width,
                height: self.height,
                side,
            });
        }

        let (dx, dy) = ((side - self.width) / 2, (side - self.height) / 2);
        let mut cells = vec![false; side * side];

        for (y, row) in self.cells.chunks(self.width.max(1)).enumerate() {
            for (x, &alive) in row.iter().enumerate() {
                cells[(y + dy) * side + x + dx] = alive;
            }
        }

        Self::new(cells, side, side)
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    /// Look up a pattern by name
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let rows: &[&str] = match name {
            "block" => &["OO", "OO"],
            "blinker" => &["...", "OOO", "..."],
            "glider" => &[".O.", "..O", "OOO"],
            "r-pentomino" => &[".OO", "OO.", ".O."],

            // A vertical line of five on the top edge of an 8x8 grid
            "line5" => &[
                "...O....", "...O....", "...O....", "...O....", "...O....", "........",
                "........", "........",
            ],

            _ => {
                return Err(PatternError::UnknownPattern {
                    name: name.to_string(),
                });
            }
        };

        Self::from_rows(rows)
    }
}
