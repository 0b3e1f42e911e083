use std::fmt;

use serde::{Deserialize, Serialize};

use super::position::Position;

/// A filled scratch-card grid.
///
/// Cells are stored row-major. A grid is immutable once built; the generator produces
/// one per round and the evaluator only reads it.
///
/// In JSON a grid is a matrix of symbol identifiers (`[["A", "B"], ["C", "D"]]`).
///
/// # Example
///
/// ```
/// use scratch_engine::{Grid, Position};
///
/// let grid = Grid::from_rows([["A", "B"], ["C", "10x"]]).unwrap();
/// assert_eq!(grid.rows(), 2);
/// assert_eq!(grid.get(Position::new(1, 1)), Some("10x"));
/// assert_eq!(grid.get(Position::new(2, 0)), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<String>,
}

/// Error returned when a matrix cannot form a grid.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridShapeError {
    #[display("grid must contain at least one row and one column")]
    Empty,
    #[display("row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

impl Grid {
    /// Builds a grid from a matrix of symbol identifiers.
    ///
    /// All rows must have the same, non-zero length.
    pub fn from_rows<I, R, S>(rows: I) -> Result<Self, GridShapeError>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cells = vec![];
        let mut num_rows = 0;
        let mut columns = None;
        for (row, symbols) in rows.into_iter().enumerate() {
            let before = cells.len();
            cells.extend(symbols.into_iter().map(Into::into));
            let actual = cells.len() - before;
            let expected = *columns.get_or_insert(actual);
            if actual != expected {
                return Err(GridShapeError::RaggedRow {
                    row,
                    expected,
                    actual,
                });
            }
            num_rows += 1;
        }
        match columns {
            Some(columns) if columns > 0 => Ok(Self {
                rows: num_rows,
                columns,
                cells,
            }),
            _ => Err(GridShapeError::Empty),
        }
    }

    /// Builds a grid from row-major cells.
    pub(crate) fn from_cells(rows: usize, columns: usize, cells: Vec<String>) -> Self {
        debug_assert_eq!(cells.len(), rows * columns);
        Self {
            rows,
            columns,
            cells,
        }
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Returns `true` if the position lies on the grid.
    #[must_use]
    pub const fn contains(&self, pos: Position) -> bool {
        pos.row() < self.rows && pos.column() < self.columns
    }

    /// Returns the symbol at `pos`, or `None` if the position is off the grid.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<&str> {
        if !self.contains(pos) {
            return None;
        }
        Some(&self.cells[pos.row() * self.columns + pos.column()])
    }

    /// Iterates over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Position, &str)> + '_ {
        self.cells.iter().enumerate().map(|(i, symbol)| {
            (
                Position::new(i / self.columns, i % self.columns),
                symbol.as_str(),
            )
        })
    }

    /// Iterates over the rows of the grid, top to bottom.
    pub fn row_slices(&self) -> impl Iterator<Item = &[String]> + '_ {
        self.cells.chunks(self.columns)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.row_slices().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}

impl Serialize for Grid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.row_slices())
    }
}

impl<'de> Deserialize<'de> for Grid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let rows = Vec::<Vec<String>>::deserialize(deserializer)?;
        Self::from_rows(rows).map_err(serde::de::Error::custom)
    }
}
