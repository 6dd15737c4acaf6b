//! Grid module - the match-3 playfield
//!
//! The grid is `rows x cols` cells stored in a flat row-major vector, row 0 at the top.
//! A cell holds a deity or is empty; empty cells exist only between clearing a
//! cascade pass and refilling it.
//!
//! Grids cross the embedder boundary as a list of rows (serde), and have a compact
//! text form used by tests and logs: one string per row, a digit per cell giving
//! the deity's palette index, `.` for an empty cell.

use std::fmt;

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

use crate::types::{Cell, Deity, Position};

/// Structural problems with row data handed to [`Grid::from_rows`] or [`Grid::from_digits`]
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum GridError {
    #[display("grid has no cells")]
    Empty,
    #[display("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[display("unknown cell symbol {symbol:?} in row {row}")]
    BadSymbol { row: usize, symbol: char },
}

/// The game board
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Cell>>", into = "Vec<Vec<Cell>>")]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Flat array of cells, row-major order (row * cols + col)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell empty
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    /// Build a grid from row data; every row must have the same non-zero length
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if rows.is_empty() || cols == 0 {
            return Err(GridError::Empty);
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (row, data) in rows.iter().enumerate() {
            if data.len() != cols {
                return Err(GridError::Ragged {
                    row,
                    expected: cols,
                    found: data.len(),
                });
            }
            cells.extend_from_slice(data);
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    /// Build a grid from its text form
    ///
    /// ```
    /// use japa_match_core::Grid;
    /// use japa_match_core::types::{Deity, Position};
    ///
    /// let grid = Grid::from_digits(&["012", "3.1"]).unwrap();
    /// assert_eq!(grid.get(Position::new(1, 0)), Some(Some(Deity::Rama)));
    /// assert_eq!(grid.get(Position::new(1, 1)), Some(None));
    /// ```
    pub fn from_digits(rows: &[&str]) -> Result<Self, GridError> {
        let mut parsed = Vec::with_capacity(rows.len());
        for (row, line) in rows.iter().enumerate() {
            let mut cells = Vec::with_capacity(line.len());
            for symbol in line.chars() {
                let cell = match symbol {
                    '.' => None,
                    _ => {
                        let deity = symbol
                            .to_digit(10)
                            .and_then(|d| Deity::from_index(d as usize))
                            .ok_or(GridError::BadSymbol { row, symbol })?;
                        Some(deity)
                    }
                };
                cells.push(cell);
            }
            parsed.push(cells);
        }
        Self::from_rows(parsed)
    }

    /// Text form, one string per row (inverse of [`Grid::from_digits`])
    pub fn to_digits(&self) -> Vec<String> {
        self.row_slices()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Some(deity) => char::from(b'0' + deity.index() as u8),
                        None => '.',
                    })
                    .collect()
            })
            .collect()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(&self, pos: Position) -> Option<usize> {
        if pos.row >= self.rows || pos.col >= self.cols {
            return None;
        }
        Some(pos.row * self.cols + pos.col)
    }

    /// Check if a position lies on the board
    pub fn contains(&self, pos: Position) -> bool {
        self.index(pos).is_some()
    }

    /// Get cell at a position
    /// Returns None if out of bounds
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Deity at a position; None if empty or out of bounds
    pub fn deity_at(&self, pos: Position) -> Option<Deity> {
        self.get(pos).flatten()
    }

    /// Set cell at a position
    /// Returns false if out of bounds
    pub fn set(&mut self, pos: Position, cell: Cell) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Exchange two cells
    /// Returns false (and leaves the grid untouched) if either is out of bounds
    pub fn swap(&mut self, a: Position, b: Position) -> bool {
        match (self.index(a), self.index(b)) {
            (Some(ia), Some(ib)) => {
                self.cells.swap(ia, ib);
                true
            }
            _ => false,
        }
    }

    /// True when no cell is empty
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    /// Every position on the board in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Position::new(row, col)))
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn row_slices(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols.max(1))
    }

    /// Convert to row data (inverse of [`Grid::from_rows`])
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.row_slices().map(<[Cell]>::to_vec).collect()
    }
}

impl TryFrom<Vec<Vec<Cell>>> for Grid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<Cell>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<Grid> for Vec<Vec<Cell>> {
    fn from(grid: Grid) -> Self {
        grid.to_rows()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.to_digits().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", row)?;
        }
        Ok(())
    }
}
