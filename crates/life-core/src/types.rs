//! Core type definitions for the simulator.

use std::fmt;

/// Cell coordinate on the grid, addressed as `[row][col]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn add(&self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// Apply toroidal wrapping for given grid dimensions
    pub fn wrap(&self, width: i32, height: i32) -> Self {
        Self {
            row: self.row.rem_euclid(height),
            col: self.col.rem_euclid(width),
        }
    }

    /// Whether the position lies inside `[0, height) x [0, width)`
    pub fn in_bounds(&self, width: i32, height: i32) -> bool {
        (0..height).contains(&self.row) && (0..width).contains(&self.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The eight directions of the Moore neighborhood
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    /// Offset as `(drow, dcol)`; rows grow downwards
    pub fn to_delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
            Direction::NorthEast => (-1, 1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (1, -1),
        }
    }

    pub fn all() -> [Direction; 8] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
            Direction::NorthEast,
            Direction::NorthWest,
            Direction::SouthEast,
            Direction::SouthWest,
        ]
    }
}

/// Engine-level mode: cells are edited while paused, generations advance while running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Editing,
    Running,
}

impl RunState {
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running)
    }
}

impl From<bool> for RunState {
    fn from(running: bool) -> Self {
        if running {
            RunState::Running
        } else {
            RunState::Editing
        }
    }
}
