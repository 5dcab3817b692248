//! Square tile grid.
//!
//! ### Text format
//! One ASCII digit per tile, one row per line, `N` rows of `N` digits.
//! `0` is empty floor, anything else is a wall variant.
//!
//! Every query is total: reads outside `[0, N)²` yield [`EMPTY`] and writes
//! there are dropped.

use std::{fs, io, path::Path};
use thiserror::Error;

/// Tile code stored in each cell.
pub type Tile = u8;

/// Empty floor.
pub const EMPTY: Tile = 0;

/// Plain wall, the code `toggle` writes.
pub const WALL: Tile = 1;

/// Highest wall variant reachable with `cycle`.
pub const MAX_VARIANT: Tile = 3;

/// Errors that can be encountered while building a grid.
#[derive(Error, Debug)]
pub enum GridError {
    /// Underlying I/O failure – propagated unchanged.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("row {row}, column {col}: expected a digit, found {found:?}")]
    BadCell { row: usize, col: usize, found: char },

    #[error("row {row} has {found} tiles, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("grid has {found} rows, expected {expected}")]
    RowCount { expected: usize, found: usize },

    #[error("grid has {found} cells, expected {expected}")]
    CellCount { expected: usize, found: usize },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    dim: usize,
    /// Row-major, `dim * dim` codes.
    cells: Vec<Tile>,
}

impl Grid {
    // ---------------------------------------------------------------------
    // Constructors
    // ---------------------------------------------------------------------

    /// All-empty `dim × dim` grid.
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            cells: vec![EMPTY; dim * dim],
        }
    }

    /// Empty room enclosed by a one-tile [`WALL`] border.
    pub fn bordered(dim: usize) -> Self {
        let mut grid = Self::new(dim);
        let last = dim as i32 - 1;
        for i in 0..dim as i32 {
            grid.set_tile(i, 0, WALL);
            grid.set_tile(i, last, WALL);
            grid.set_tile(0, i, WALL);
            grid.set_tile(last, i, WALL);
        }
        grid
    }

    /// Wrap a literal row-major table.
    pub fn from_cells(dim: usize, cells: Vec<Tile>) -> Result<Self, GridError> {
        if cells.len() != dim * dim {
            return Err(GridError::CellCount {
                expected: dim * dim,
                found: cells.len(),
            });
        }
        Ok(Self { dim, cells })
    }

    /// Parse the digit format described in the module docs.
    /// Blank lines are skipped; `\r\n` endings are accepted.
    pub fn parse(text: &str, dim: usize) -> Result<Self, GridError> {
        let mut cells = Vec::with_capacity(dim * dim);
        let mut rows = 0;

        for line in text.lines().map(|l| l.trim_end_matches('\r')) {
            if line.is_empty() {
                continue;
            }
            let mut width = 0;
            for (col, ch) in line.chars().enumerate() {
                let code = ch.to_digit(10).ok_or(GridError::BadCell {
                    row: rows,
                    col,
                    found: ch,
                })?;
                cells.push(code as Tile);
                width += 1;
            }
            if width != dim {
                return Err(GridError::RowWidth {
                    row: rows,
                    expected: dim,
                    found: width,
                });
            }
            rows += 1;
        }

        if rows != dim {
            return Err(GridError::RowCount {
                expected: dim,
                found: rows,
            });
        }
        Self::from_cells(dim, cells)
    }

    /// Load a grid file from disk.
    pub fn from_file<P: AsRef<Path>>(path: P, dim: usize) -> Result<Self, GridError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text, dim)
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    /// Side length in tiles.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let n = self.dim as i32;
        (0..n).contains(&x) && (0..n).contains(&y)
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.contains(x, y)
            .then(|| y as usize * self.dim + x as usize)
    }

    /// Tile code at `(x, y)`, [`EMPTY`] outside the grid.
    #[inline]
    pub fn tile(&self, x: i32, y: i32) -> Tile {
        self.index(x, y).map_or(EMPTY, |i| self.cells[i])
    }

    #[inline]
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.tile(x, y) != EMPTY
    }

    // ---------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------

    /// Overwrite the code at `(x, y)`; ignored outside the grid.
    pub fn set_tile(&mut self, x: i32, y: i32, code: Tile) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = code;
        }
    }

    /// Flip between empty and [`WALL`].
    pub fn toggle(&mut self, x: i32, y: i32) {
        let next = if self.is_solid(x, y) { EMPTY } else { WALL };
        self.set_tile(x, y, next);
    }

    /// Step through `0, 1, …, MAX_VARIANT, 0, …`.
    pub fn cycle(&mut self, x: i32, y: i32) {
        let next = match self.tile(x, y) {
            c if c >= MAX_VARIANT => EMPTY,
            c => c + 1,
        };
        self.set_tile(x, y, next);
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn set_then_get_in_bounds() {
        let mut grid = Grid::new(4);
        for y in 0..4 {
            for x in 0..4 {
                let code = ((x + y) % 4) as Tile;
                grid.set_tile(x, y, code);
                assert_eq!(grid.tile(x, y), code);
            }
        }
    }

    #[test]
    fn out_of_bounds_reads_empty_and_writes_nothing() {
        let mut grid = Grid::bordered(5);
        let before = grid.clone();
        for (x, y) in [(-1, 0), (0, -1), (5, 0), (0, 5), (5, 5), (i32::MIN, i32::MAX)] {
            assert_eq!(grid.tile(x, y), EMPTY);
            grid.set_tile(x, y, 2);
            grid.toggle(x, y);
            grid.cycle(x, y);
        }
        assert_eq!(grid, before);
    }

    #[test]
    fn bordered_room_layout() {
        let grid = Grid::bordered(10);
        assert!(grid.is_solid(0, 0));
        assert!(grid.is_solid(9, 4));
        assert!(grid.is_solid(4, 9));
        assert!(!grid.is_solid(1, 1));
        assert!(!grid.is_solid(8, 8));
    }

    #[test]
    fn toggle_and_cycle() {
        let mut grid = Grid::new(3);
        grid.toggle(1, 1);
        assert_eq!(grid.tile(1, 1), WALL);
        grid.toggle(1, 1);
        assert_eq!(grid.tile(1, 1), EMPTY);

        let seen: Vec<Tile> = (0..5)
            .map(|_| {
                grid.cycle(2, 0);
                grid.tile(2, 0)
            })
            .collect();
        assert_eq!(seen, [1, 2, 3, 0, 1]);

        grid.set_tile(0, 0, 3);
        grid.toggle(0, 0);
        assert_eq!(grid.tile(0, 0), EMPTY);
    }

    #[test]
    fn parses_digit_rows() {
        let grid = Grid::parse("111\r\n102\n\n131\n", 3).unwrap();
        assert_eq!(grid.tile(1, 1), 0);
        assert_eq!(grid.tile(2, 1), 2);
        assert_eq!(grid.tile(1, 2), 3);
    }

    #[test]
    fn rejects_malformed_text() {
        assert!(matches!(
            Grid::parse("111\n1x1\n111", 3),
            Err(GridError::BadCell { row: 1, col: 1, found: 'x' })
        ));
        assert!(matches!(
            Grid::parse("111\n11\n111", 3),
            Err(GridError::RowWidth { row: 1, expected: 3, found: 2 })
        ));
        assert!(matches!(
            Grid::parse("111\n111", 3),
            Err(GridError::RowCount { expected: 3, found: 2 })
        ));
        assert!(matches!(
            Grid::from_cells(3, vec![0; 8]),
            Err(GridError::CellCount { expected: 9, found: 8 })
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut tmp = tempfile::NamedTempFile::new().expect("tempfile");
        write!(tmp, "1111\n1001\n1021\n1111\n").unwrap();
        let grid = Grid::from_file(tmp.path(), 4).unwrap();
        assert_eq!(grid.tile(2, 2), 2);
        assert_eq!(grid.dim(), 4);
    }

    /// `<repo>/assets/map.txt`, the map the binary is usually started with.
    #[test]
    fn shipped_map_is_enclosed() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("assets")
            .join("map.txt");
        let grid = Grid::from_file(path, 20).expect("cannot load assets/map.txt");
        for i in 0..20 {
            assert!(grid.is_solid(i, 0) && grid.is_solid(i, 19));
            assert!(grid.is_solid(0, i) && grid.is_solid(19, i));
        }
        assert!(!grid.is_solid(2, 2), "default spawn tile must be open");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Grid::from_file(dir.path().join("nope.txt"), 4).unwrap_err();
        assert!(matches!(err, GridError::Io(_)));
    }
}
