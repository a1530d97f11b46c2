//! 2D grid of live/dead cells.

use life_core::{Direction, Error, GridConfig, Position, Result};
use rand::Rng;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// A fixed-size 2D toroidal grid of boolean cells, stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<bool>,
}

impl Grid {
    /// Create a grid with every cell dead
    pub fn new(width: i32, height: i32) -> Result<Self> {
        let size = GridConfig { width, height }.cell_count()?;
        Ok(Self {
            width,
            height,
            cells: vec![false; size],
        })
    }

    pub fn from_config(config: &GridConfig) -> Result<Self> {
        Self::new(config.width, config.height)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get cell state at position
    pub fn get(&self, pos: Position) -> Result<bool> {
        let index = self.checked_index(pos)?;
        Ok(self.cells[index])
    }

    /// Set cell state at position
    pub fn set(&mut self, pos: Position, alive: bool) -> Result<()> {
        let index = self.checked_index(pos)?;
        self.cells[index] = alive;
        Ok(())
    }

    /// Flip cell state at position, returning the new state
    pub fn toggle(&mut self, pos: Position) -> Result<bool> {
        let index = self.checked_index(pos)?;
        self.cells[index] = !self.cells[index];
        Ok(self.cells[index])
    }

    /// Set every cell to `alive`
    pub fn fill(&mut self, alive: bool) {
        self.cells.fill(alive);
    }

    /// Set each cell alive independently with the given probability
    pub fn randomize<R: Rng + ?Sized>(&mut self, alive_probability: f64, rng: &mut R) {
        for cell in &mut self.cells {
            *cell = rng.gen::<f64>() < alive_probability;
        }
    }

    /// Mark the given offsets alive relative to `origin`, wrapping around the edges
    pub fn stamp(&mut self, offsets: &[(i32, i32)], origin: Position) {
        for &(drow, dcol) in offsets {
            let index = self.wrapped_index(origin.add(drow, dcol));
            self.cells[index] = true;
        }
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Live cells among the eight neighbors of `pos`
    pub fn live_neighbors(&self, pos: Position) -> Result<u8> {
        self.checked_index(pos)?;
        Ok(self.count_neighbors(pos))
    }

    /// Live neighbor count of every cell, row-major, computed from the current state
    pub fn neighbor_counts(&self) -> Vec<u8> {
        self.positions().map(|pos| self.count_neighbors(pos)).collect()
    }

    /// Hash of the cell states
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.cells.hash(&mut hasher);
        hasher.finish()
    }

    /// Raw cell states, row-major
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [bool] {
        &mut self.cells
    }

    fn count_neighbors(&self, pos: Position) -> u8 {
        Direction::all()
            .iter()
            .filter(|direction| {
                let (drow, dcol) = direction.to_delta();
                self.cells[self.wrapped_index(pos.add(drow, dcol))]
            })
            .count() as u8
    }

    fn checked_index(&self, pos: Position) -> Result<usize> {
        if !pos.in_bounds(self.width, self.height) {
            return Err(Error::OutOfRange {
                row: pos.row,
                col: pos.col,
                height: self.height,
                width: self.width,
            });
        }
        Ok(self.pos_to_index(pos))
    }

    fn wrapped_index(&self, pos: Position) -> usize {
        self.pos_to_index(pos.wrap(self.width, self.height))
    }

    fn pos_to_index(&self, pos: Position) -> usize {
        pos.row as usize * self.width as usize + pos.col as usize
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        let width = self.width as usize;
        Position::new((index / width) as i32, (index % width) as i32)
    }

    /// Iterator over all positions
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cells.len()).map(move |i| self.index_to_pos(i))
    }

    /// Iterator over all cells with positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, bool)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &alive)| (self.index_to_pos(i), alive))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(10, 6).unwrap();
        assert_eq!(grid.width(), 10);
        assert_eq!(grid.height(), 6);
        assert_eq!(grid.len(), 60);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_rejects_empty_dimensions() {
        assert!(matches!(Grid::new(0, 10), Err(Error::InvalidConfig(_))));
        assert!(matches!(Grid::new(10, -1), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_cell_count_beyond_i32() {
        assert!(matches!(Grid::new(65536, 32769), Err(Error::InvalidConfig(_))));
        assert!(matches!(Grid::new(i32::MAX, 2), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_wide_grid_indexing() {
        let width = 1 << 20;
        let mut grid = Grid::new(width, 3).unwrap();
        let corner = Position::new(2, width - 1);
        assert!(!grid.get(corner).unwrap());
        grid.set(corner, true).unwrap();
        assert_eq!(grid.index_to_pos(grid.len() - 1), corner);
        assert_eq!(grid.live_neighbors(Position::new(0, 0)).unwrap(), 1);
    }

    #[test]
    fn test_get_set_bounds() {
        let mut grid = Grid::new(4, 3).unwrap();
        grid.set(Position::new(2, 3), true).unwrap();
        assert!(grid.get(Position::new(2, 3)).unwrap());
        assert_eq!(grid.population(), 1);

        assert!(grid.get(Position::new(3, 0)).unwrap_err().is_out_of_range());
        assert!(grid.get(Position::new(0, 4)).unwrap_err().is_out_of_range());
        assert!(grid.get(Position::new(0, -1)).unwrap_err().is_out_of_range());
        assert!(grid.set(Position::new(-1, 0), true).unwrap_err().is_out_of_range());
        assert!(grid.toggle(Position::new(3, 3)).unwrap_err().is_out_of_range());
    }

    #[test]
    fn test_index_layout_is_row_major() {
        let mut grid = Grid::new(5, 3).unwrap();
        grid.set(Position::new(1, 2), true).unwrap();
        assert!(grid.cells()[7]);
        assert_eq!(grid.index_to_pos(7), Position::new(1, 2));
    }

    #[test]
    fn test_fill() {
        let mut grid = Grid::new(8, 8).unwrap();
        grid.fill(true);
        assert_eq!(grid.population(), 64);
        grid.fill(false);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_toroidal_neighbors() {
        let mut grid = Grid::new(10, 8).unwrap();
        grid.set(Position::new(7, 9), true).unwrap();

        // Opposite corner is a diagonal neighbor
        assert_eq!(grid.live_neighbors(Position::new(0, 0)).unwrap(), 1);
        // Same row wraps horizontally
        assert_eq!(grid.live_neighbors(Position::new(7, 0)).unwrap(), 1);
        // Same column wraps vertically
        assert_eq!(grid.live_neighbors(Position::new(0, 9)).unwrap(), 1);
        // The cell does not count itself
        assert_eq!(grid.live_neighbors(Position::new(7, 9)).unwrap(), 0);
        assert_eq!(grid.live_neighbors(Position::new(3, 3)).unwrap(), 0);
    }

    #[test]
    fn test_neighbor_counts_full_ring() {
        let mut grid = Grid::new(5, 5).unwrap();
        for (drow, dcol) in Direction::all().iter().map(|d| d.to_delta()) {
            grid.set(Position::new(2 + drow, 2 + dcol), true).unwrap();
        }

        let counts = grid.neighbor_counts();
        assert_eq!(counts.len(), 25);
        assert_eq!(counts[2 * 5 + 2], 8);
        assert_eq!(counts[0], 1);
    }

    #[test]
    fn test_randomize_is_seeded() {
        let mut first = Grid::new(20, 20).unwrap();
        let mut second = Grid::new(20, 20).unwrap();
        first.randomize(0.5, &mut ChaCha8Rng::seed_from_u64(42));
        second.randomize(0.5, &mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(first, second);

        let population = first.population();
        assert!(population > 100 && population < 300);
    }

    #[test]
    fn test_randomize_extremes() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut grid = Grid::new(12, 12).unwrap();
        grid.randomize(1.0, &mut rng);
        assert_eq!(grid.population(), 144);
        grid.randomize(0.0, &mut rng);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_stamp_wraps() {
        let mut grid = Grid::new(4, 4).unwrap();
        grid.stamp(&[(0, 0), (0, 1), (1, 0)], Position::new(3, 3));
        assert!(grid.get(Position::new(3, 3)).unwrap());
        assert!(grid.get(Position::new(3, 0)).unwrap());
        assert!(grid.get(Position::new(0, 3)).unwrap());
        assert_eq!(grid.population(), 3);
    }

    #[test]
    fn test_fingerprint_tracks_state() {
        let mut grid = Grid::new(6, 6).unwrap();
        let empty = grid.fingerprint();
        grid.toggle(Position::new(1, 1)).unwrap();
        assert_ne!(grid.fingerprint(), empty);
        grid.toggle(Position::new(1, 1)).unwrap();
        assert_eq!(grid.fingerprint(), empty);
    }

    #[test]
    fn test_iter_visits_every_cell() {
        let mut grid = Grid::new(3, 2).unwrap();
        grid.set(Position::new(1, 0), true).unwrap();
        let cells: Vec<_> = grid.iter().collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], (Position::new(0, 0), false));
        assert_eq!(cells[3], (Position::new(1, 0), true));
    }
}
