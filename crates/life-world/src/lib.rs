//! Game of Life simulation engine.
//!
//! This module implements the fixed-size toroidal grid, the B3/S23 transition
//! rule and the engine that owns the grid and applies edits and generations.

pub mod grid;
pub mod rule;
pub mod history;
pub mod patterns;
pub mod simulation;

pub use grid::Grid;
pub use history::CycleHistory;
pub use patterns::Pattern;
pub use simulation::{Simulation, StepReport};
