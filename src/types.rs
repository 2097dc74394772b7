//! Core domain types for the grid world.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Side length of the (square) grid.
pub const GRID_SIZE: usize = 10;

/// Value read for off-grid neighbors during policy evaluation.
///
/// Padding the value grid with a strongly negative constant keeps the greedy
/// policy from favoring moves that would run off the board.
pub const EDGE_PENALTY: f64 = -2.0;

/// Probability that `act` executes the requested direction unchanged.
pub const MOVE_FIDELITY: f64 = 0.7;

/// A cell on the grid, addressed as (row, col) with both in [0, GRID_SIZE).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    /// Create a new cell, validating both coordinates are on the grid.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidCell`] if either coordinate is
    /// >= [`GRID_SIZE`].
    pub fn new(row: usize, col: usize) -> Result<Self, crate::Error> {
        if row < GRID_SIZE && col < GRID_SIZE {
            Ok(Cell { row, col })
        } else {
            Err(crate::Error::InvalidCell { row, col })
        }
    }

    /// Create a cell without bounds validation.
    ///
    /// Callers must guarantee both coordinates are < [`GRID_SIZE`].
    pub(crate) fn new_unchecked(row: usize, col: usize) -> Self {
        debug_assert!(row < GRID_SIZE && col < GRID_SIZE);
        Cell { row, col }
    }

    /// The orthogonal neighbor in `direction`, or `None` at the grid edge.
    pub fn neighbor(&self, direction: Direction) -> Option<Cell> {
        match direction {
            Direction::Up if self.row != 0 => Some(Cell {
                row: self.row - 1,
                ..*self
            }),
            Direction::Down if self.row != GRID_SIZE - 1 => Some(Cell {
                row: self.row + 1,
                ..*self
            }),
            Direction::Left if self.col != 0 => Some(Cell {
                col: self.col - 1,
                ..*self
            }),
            Direction::Right if self.col != GRID_SIZE - 1 => Some(Cell {
                col: self.col + 1,
                ..*self
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the four orthogonal movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in policy evaluation order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The three directions other than `self`, in [`Direction::ALL`] order.
    pub fn others(&self) -> [Direction; 3] {
        let mut out = [*self; 3];
        let mut next = 0;
        for direction in Self::ALL {
            if direction != *self {
                out[next] = direction;
                next += 1;
            }
        }
        out
    }

    /// Lowercase name, matching the `FromStr` spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            other => Err(crate::Error::ParseDirection {
                input: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_validation() {
        assert!(Cell::new(0, 0).is_ok());
        assert!(Cell::new(9, 9).is_ok());
        assert!(Cell::new(10, 0).is_err());
        assert!(Cell::new(0, 10).is_err());
    }

    #[test]
    fn test_neighbor_interior() {
        let cell = Cell::new(5, 5).unwrap();
        assert_eq!(cell.neighbor(Direction::Up), Some(Cell { row: 4, col: 5 }));
        assert_eq!(cell.neighbor(Direction::Down), Some(Cell { row: 6, col: 5 }));
        assert_eq!(cell.neighbor(Direction::Left), Some(Cell { row: 5, col: 4 }));
        assert_eq!(cell.neighbor(Direction::Right), Some(Cell { row: 5, col: 6 }));
    }

    #[test]
    fn test_neighbor_edges() {
        let corner = Cell::new(0, 0).unwrap();
        assert_eq!(corner.neighbor(Direction::Up), None);
        assert_eq!(corner.neighbor(Direction::Left), None);

        let far = Cell::new(9, 9).unwrap();
        assert_eq!(far.neighbor(Direction::Down), None);
        assert_eq!(far.neighbor(Direction::Right), None);
    }

    #[test]
    fn test_others_excludes_self() {
        for direction in Direction::ALL {
            let others = direction.others();
            assert_eq!(others.len(), 3);
            assert!(!others.contains(&direction));
        }
    }

    #[test]
    fn test_direction_round_trip() {
        for direction in Direction::ALL {
            assert_eq!(direction.as_str().parse::<Direction>().unwrap(), direction);
        }
        assert!(" Up ".parse::<Direction>().is_ok());
        assert!("sideways".parse::<Direction>().is_err());
    }
}
