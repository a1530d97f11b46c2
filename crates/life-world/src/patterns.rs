//! Well-known starting patterns, as `(row, col)` offsets from the top-left corner.

/// A named set of live cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(i32, i32)],
}

impl Pattern {
    /// Rows spanned by the pattern
    pub fn height(&self) -> i32 {
        self.cells.iter().map(|&(row, _)| row + 1).max().unwrap_or(0)
    }

    /// Columns spanned by the pattern
    pub fn width(&self) -> i32 {
        self.cells.iter().map(|&(_, col)| col + 1).max().unwrap_or(0)
    }
}

pub const BLOCK: Pattern = Pattern {
    name: "Block",
    cells: &[(0, 0), (0, 1), (1, 0), (1, 1)],
};

pub const BLINKER: Pattern = Pattern {
    name: "Blinker",
    cells: &[(0, 0), (0, 1), (0, 2)],
};

pub const TOAD: Pattern = Pattern {
    name: "Toad",
    cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
};

pub const BEACON: Pattern = Pattern {
    name: "Beacon",
    cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
};

pub const GLIDER: Pattern = Pattern {
    name: "Glider",
    cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
};

pub const R_PENTOMINO: Pattern = Pattern {
    name: "R-pentomino",
    cells: &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
};

pub const PULSAR: Pattern = Pattern {
    name: "Pulsar",
    cells: &[
        // Top half
        (0, 2), (0, 3), (0, 4), (0, 8), (0, 9), (0, 10),
        (2, 0), (2, 5), (2, 7), (2, 12),
        (3, 0), (3, 5), (3, 7), (3, 12),
        (4, 0), (4, 5), (4, 7), (4, 12),
        (5, 2), (5, 3), (5, 4), (5, 8), (5, 9), (5, 10),
        // Bottom half (mirrored)
        (7, 2), (7, 3), (7, 4), (7, 8), (7, 9), (7, 10),
        (8, 0), (8, 5), (8, 7), (8, 12),
        (9, 0), (9, 5), (9, 7), (9, 12),
        (10, 0), (10, 5), (10, 7), (10, 12),
        (12, 2), (12, 3), (12, 4), (12, 8), (12, 9), (12, 10),
    ],
};

pub const GOSPER_GLIDER_GUN: Pattern = Pattern {
    name: "Gosper Glider Gun",
    cells: &[
        (4, 0), (4, 1), (5, 0), (5, 1),
        (4, 10), (5, 10), (6, 10), (3, 11), (7, 11), (2, 12), (8, 12),
        (2, 13), (8, 13), (5, 14), (3, 15), (7, 15), (4, 16), (5, 16),
        (6, 16), (5, 17), (2, 20), (3, 20), (4, 20), (2, 21), (3, 21),
        (4, 21), (1, 22), (5, 22), (0, 24), (1, 24), (5, 24), (6, 24),
        (2, 34), (3, 34), (2, 35), (3, 35),
    ],
};

pub const PATTERNS: &[Pattern] = &[
    BLOCK,
    BLINKER,
    TOAD,
    BEACON,
    GLIDER,
    R_PENTOMINO,
    PULSAR,
    GOSPER_GLIDER_GUN,
];

/// Look a pattern up by name, ignoring case
pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS
        .iter()
        .find(|pattern| pattern.name.eq_ignore_ascii_case(name))
}
