//! Bounded square grid of live/dead cells.

use life_core::{Error, Position, Result, MAX_GRID_SIZE};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A `size`x`size` grid. Off-grid cells do not exist and read as dead.
///
/// Serializes as its row matrix; deserialization rejects ragged or
/// non-square input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<bool>>", into = "Vec<Vec<bool>>")]
pub struct Grid {
    size: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create an all-dead grid. `size` must be in `1..=MAX_GRID_SIZE`.
    pub fn empty(size: usize) -> Result<Self> {
        if size == 0 || size > MAX_GRID_SIZE {
            return Err(Error::InvalidSize(size));
        }
        let len = size.checked_mul(size).ok_or(Error::InvalidSize(size))?;
        Ok(Self {
            size,
            cells: vec![false; len],
        })
    }

    /// Build a grid from a row matrix, failing fast on any shape problem.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(Error::MalformedGrid("grid has no rows".to_string()));
        }
        if size > MAX_GRID_SIZE {
            return Err(Error::InvalidSize(size));
        }

        let len = size.checked_mul(size).ok_or(Error::InvalidSize(size))?;
        let mut cells = Vec::with_capacity(len);
        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(Error::MalformedGrid(format!(
                    "row {} has {} cells, expected {} for a square grid",
                    idx,
                    row.len(),
                    size
                )));
            }
            cells.extend(row);
        }

        Ok(Self { size, cells })
    }

    /// Build a grid with exactly the listed cells alive.
    pub fn with_alive(size: usize, alive: &[(usize, usize)]) -> Result<Self> {
        let mut grid = Self::empty(size)?;
        for &cell in alive {
            grid.set(cell.into(), true)?;
        }
        Ok(grid)
    }

    /// Fill a grid at random; each cell is alive with probability `density`.
    pub fn random(size: usize, density: f64, rng: &mut ChaCha8Rng) -> Result<Self> {
        if !(0.0..=1.0).contains(&density) {
            return Err(Error::Configuration(format!(
                "random density {} is outside [0, 1]",
                density
            )));
        }
        let mut grid = Self::empty(size)?;
        for cell in &mut grid.cells {
            *cell = rng.gen_bool(density);
        }
        Ok(grid)
    }

    /// Row-major cells of a grid already known to be `size`x`size`.
    pub(crate) fn from_parts(size: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        Self { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Cell state, or `None` off-grid.
    pub fn get(&self, pos: Position) -> Option<bool> {
        if pos.in_bounds(self.size) {
            Some(self.cells[self.pos_to_index(pos)])
        } else {
            None
        }
    }

    pub fn is_alive(&self, pos: Position) -> bool {
        self.get(pos).unwrap_or(false)
    }

    /// Set a cell in place. Used while building a grid; the engine itself
    /// never mutates a grid it was handed.
    pub fn set(&mut self, pos: Position, alive: bool) -> Result<()> {
        let index = self.checked_index(pos)?;
        self.cells[index] = alive;
        Ok(())
    }

    /// Copy of this grid with one cell flipped.
    pub fn toggled(&self, pos: Position) -> Result<Self> {
        let index = self.checked_index(pos)?;
        let mut next = self.clone();
        next.cells[index] = !next.cells[index];
        Ok(next)
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// True when every cell is dead.
    pub fn is_extinct(&self) -> bool {
        self.cells.iter().all(|&alive| !alive)
    }

    /// Positions of live cells in row-major order.
    pub fn alive_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.iter().filter(|&(_, alive)| alive).map(|(pos, _)| pos)
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        Position::new(index / self.size, index % self.size)
    }

    /// Iterator over all cells with positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, bool)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &alive)| (self.index_to_pos(i), alive))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells.chunks(self.size)
    }

    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.rows().map(<[bool]>::to_vec).collect()
    }

    fn pos_to_index(&self, pos: Position) -> usize {
        pos.row * self.size + pos.col
    }

    fn checked_index(&self, pos: Position) -> Result<usize> {
        if pos.in_bounds(self.size) {
            Ok(self.pos_to_index(pos))
        } else {
            Err(Error::OutOfBounds {
                row: pos.row,
                col: pos.col,
                size: self.size,
            })
        }
    }
}

impl TryFrom<Vec<Vec<bool>>> for Grid {
    type Error = Error;

    fn try_from(rows: Vec<Vec<bool>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl From<Grid> for Vec<Vec<bool>> {
    fn from(grid: Grid) -> Self {
        grid.to_rows()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(|&alive| if alive { '#' } else { '.' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Create an all-dead `size`x`size` grid.
pub fn create_empty_grid(size: usize) -> Result<Grid> {
    Grid::empty(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::empty(10).unwrap();
        assert_eq!(grid.size(), 10);
        assert_eq!(grid.cells.len(), 100);
        assert!(grid.is_extinct());
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(Grid::empty(0), Err(Error::InvalidSize(0))));
        assert!(matches!(create_empty_grid(0), Err(Error::InvalidSize(0))));
    }

    #[test]
    fn test_oversized_rejected() {
        let huge = 1usize << 32;
        assert!(matches!(Grid::empty(huge), Err(Error::InvalidSize(s)) if s == huge));
        assert!(matches!(Grid::empty(usize::MAX), Err(Error::InvalidSize(_))));
        assert!(matches!(
            Grid::empty(MAX_GRID_SIZE + 1),
            Err(Error::InvalidSize(_))
        ));
        assert_eq!(Grid::empty(MAX_GRID_SIZE).unwrap().size(), MAX_GRID_SIZE);

        let tall = vec![Vec::new(); MAX_GRID_SIZE + 1];
        assert!(matches!(Grid::from_rows(tall), Err(Error::InvalidSize(_))));
    }

    #[test]
    fn test_from_rows_rejects_malformed() {
        let ragged = vec![vec![false, true], vec![true]];
        assert!(matches!(Grid::from_rows(ragged), Err(Error::MalformedGrid(_))));

        let wide = vec![vec![false, false, false], vec![false, false, false]];
        assert!(matches!(Grid::from_rows(wide), Err(Error::MalformedGrid(_))));

        assert!(matches!(Grid::from_rows(vec![]), Err(Error::MalformedGrid(_))));
    }

    #[test]
    fn test_from_rows_round_trip() {
        let rows = vec![
            vec![true, false, false],
            vec![false, true, false],
            vec![false, false, true],
        ];
        let grid = Grid::from_rows(rows.clone()).unwrap();
        assert_eq!(grid.population(), 3);
        assert!(grid.is_alive(Position::new(1, 1)));
        assert_eq!(grid.to_rows(), rows);
    }

    #[test]
    fn test_off_grid_reads_dead() {
        let grid = Grid::from_rows(vec![vec![true; 3]; 3]).unwrap();
        assert_eq!(grid.get(Position::new(3, 0)), None);
        assert!(!grid.is_alive(Position::new(0, 3)));
    }

    #[test]
    fn test_toggled_leaves_original() {
        let grid = Grid::empty(4).unwrap();
        let toggled = grid.toggled(Position::new(2, 3)).unwrap();
        assert!(grid.is_extinct());
        assert!(toggled.is_alive(Position::new(2, 3)));
        assert_eq!(toggled.population(), 1);

        let back = toggled.toggled(Position::new(2, 3)).unwrap();
        assert_eq!(back, grid);
    }

    #[test]
    fn test_out_of_bounds_writes() {
        let mut grid = Grid::empty(4).unwrap();
        assert!(matches!(
            grid.set(Position::new(4, 0), true),
            Err(Error::OutOfBounds { row: 4, col: 0, size: 4 })
        ));
        assert!(grid.toggled(Position::new(0, 9)).is_err());
    }

    #[test]
    fn test_alive_cells_row_major() {
        let grid = Grid::with_alive(3, &[(2, 0), (0, 2), (1, 1)]).unwrap();
        let alive: Vec<_> = grid.alive_cells().collect();
        assert_eq!(
            alive,
            vec![Position::new(0, 2), Position::new(1, 1), Position::new(2, 0)]
        );
    }

    #[test]
    fn test_serde_validates_shape() {
        let grid = Grid::with_alive(2, &[(0, 1)]).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(json, "[[false,true],[false,false]]");

        let parsed: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, grid);

        let bad: std::result::Result<Grid, _> = serde_json::from_str("[[true,false],[true]]");
        assert!(bad.is_err());
    }

    #[test]
    fn test_random_is_reproducible() {
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);
        let first = Grid::random(20, 0.3, &mut a).unwrap();
        let second = Grid::random(20, 0.3, &mut b).unwrap();
        assert_eq!(first, second);
        assert!(first.population() > 0);
        assert!(first.population() < 400);

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(Grid::random(5, 0.0, &mut rng).unwrap().is_extinct());
        assert_eq!(Grid::random(5, 1.0, &mut rng).unwrap().population(), 25);
        assert!(Grid::random(5, 1.5, &mut rng).is_err());
        assert!(Grid::random(5, f64::NAN, &mut rng).is_err());
    }

    #[test]
    fn test_display() {
        let grid = Grid::with_alive(3, &[(1, 0), (1, 1), (1, 2)]).unwrap();
        assert_eq!(grid.to_string(), "...\n###\n...\n");
    }
}
