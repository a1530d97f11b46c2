//! The B3/S23 transition rule.

/// State of a cell in the next generation given its current state and live neighbor count
pub fn next_state(alive: bool, live_neighbors: u8) -> bool {
    match (alive, live_neighbors) {
        (true, 2) | (true, 3) => true, // Survival
        (false, 3) => true,            // Birth
        _ => false,                    // Under/overpopulation or stays dead
    }
}
