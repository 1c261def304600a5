//! Named seed patterns.

use crate::grid::Grid;
use life_core::{Error, Position, Result};

/// A pattern as live cells relative to its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "block",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1)],
    },
    Pattern {
        name: "beehive",
        cells: &[(0, 1), (0, 2), (1, 0), (1, 3), (2, 1), (2, 2)],
    },
    Pattern {
        name: "blinker",
        cells: &[(0, 0), (0, 1), (0, 2)],
    },
    Pattern {
        name: "toad",
        cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
    },
    Pattern {
        name: "beacon",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
    },
    Pattern {
        name: "glider",
        cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
    },
    Pattern {
        name: "r-pentomino",
        cells: &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
    },
];

impl Pattern {
    /// Look a pattern up by name, ignoring case.
    pub fn by_name(name: &str) -> Result<&'static Pattern> {
        PATTERNS
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnknownPattern(name.to_string()))
    }

    /// `(rows, cols)` of the bounding box.
    pub fn extent(&self) -> (usize, usize) {
        self.cells.iter().fold((0, 0), |(rows, cols), &(r, c)| {
            (rows.max(r + 1), cols.max(c + 1))
        })
    }

    /// Copy of `grid` with this pattern's cells switched on, top-left corner
    /// at `origin`. Cells already alive stay alive.
    pub fn place(&self, grid: &Grid, origin: Position) -> Result<Grid> {
        let mut next = grid.clone();
        for &(r, c) in self.cells {
            let pos = Position::new(origin.row.saturating_add(r), origin.col.saturating_add(c));
            next.set(pos, true)?;
        }
        Ok(next)
    }

    /// Place the pattern in the middle of `grid`.
    pub fn place_centered(&self, grid: &Grid) -> Result<Grid> {
        let (rows, cols) = self.extent();
        let size = grid.size();
        if rows > size || cols > size {
            return Err(Error::OutOfBounds {
                row: rows.saturating_sub(1),
                col: cols.saturating_sub(1),
                size,
            });
        }
        self.place(grid, Position::new((size - rows) / 2, (size - cols) / 2))
    }
}
