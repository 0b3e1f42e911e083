use std::fmt;

use serde::{Deserialize, Serialize};

/// A cell coordinate on the grid, zero-based from the top-left corner.
///
/// In configuration files a position is written as `"row:column"` (e.g. `"1:2"`).
///
/// # Example
///
/// ```
/// use scratch_engine::Position;
///
/// let pos: Position = serde_json::from_str("\"1:2\"").unwrap();
/// assert_eq!(pos, Position::new(1, 2));
/// assert_eq!(pos.to_string(), "1:2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    row: usize,
    column: usize,
}

impl Position {
    #[must_use]
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    #[must_use]
    pub const fn row(&self) -> usize {
        self.row
    }

    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

impl Serialize for Position {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        let (row_str, column_str) = s.split_once(':').ok_or_else(|| {
            serde::de::Error::custom(format!("expected position 'row:column', got '{s}'"))
        })?;

        let row = row_str.trim().parse::<usize>().map_err(|e| {
            serde::de::Error::custom(format!("invalid row in position '{s}' ({e})"))
        })?;
        let column = column_str.trim().parse::<usize>().map_err(|e| {
            serde::de::Error::custom(format!("invalid column in position '{s}' ({e})"))
        })?;

        Ok(Self { row, column })
    }
}
