use super::PlayerId;
use crate::error::ConfigError;

pub const DEFAULT_HEIGHT: usize = 6;
pub const DEFAULT_WIDTH: usize = 7;
/// Largest height or width a board may have.
pub const MAX_DIMENSION: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Occupied(PlayerId),
}

impl Cell {
    pub fn owner(self) -> Option<PlayerId> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(id) => Some(id),
        }
    }
}

/// Fixed-size grid of cells, stored row-major.
///
/// Row 0 is the top, row `height - 1` is the bottom and fills first.
/// Cells only ever go from empty to occupied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    height: usize,
    width: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board. Both dimensions must be in `1..=MAX_DIMENSION`.
    pub fn new(height: usize, width: usize) -> Result<Self, ConfigError> {
        let in_range = |d: usize| (1..=MAX_DIMENSION).contains(&d);
        let len = height
            .checked_mul(width)
            .filter(|_| in_range(height) && in_range(width))
            .ok_or(ConfigError::InvalidDimensions { height, width })?;
        Ok(Board {
            height,
            width,
            cells: vec![Cell::Empty; len],
        })
    }

    /// An empty board with the same dimensions as this one.
    pub fn cleared(&self) -> Board {
        Board {
            height: self.height,
            width: self.width,
            cells: vec![Cell::Empty; self.cells.len()],
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the cell at a specific position.
    /// Panics if the position is off the board.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        assert!(
            row < self.height && col < self.width,
            "({row}, {col}) is outside a {}x{} board",
            self.height,
            self.width
        );
        self.cells[row * self.width + col]
    }

    /// Owner of the cell at signed coordinates; off-board positions have no owner.
    pub fn owner_at(&self, row: isize, col: isize) -> Option<PlayerId> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= self.height || col >= self.width {
            return None;
        }
        self.cells[row * self.width + col].owner()
    }

    /// Row a piece dropped into `col` would come to rest on, scanning from the
    /// bottom up. `None` if the column is full or off the board.
    pub fn find_landing_row(&self, col: usize) -> Option<usize> {
        if col >= self.width {
            return None;
        }
        (0..self.height)
            .rev()
            .find(|&row| self.cells[row * self.width + col] == Cell::Empty)
    }

    /// Mark a cell as taken. The row must come from `find_landing_row`.
    pub fn occupy(&mut self, row: usize, col: usize, player: PlayerId) {
        let idx = row * self.width + col;
        debug_assert_eq!(self.cells[idx], Cell::Empty, "cell ({row}, {col}) already taken");
        self.cells[idx] = Cell::Occupied(player);
    }

    /// Check if a column is full. Columns off the board count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        self.find_landing_row(col).is_none()
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Cell::Empty)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != Cell::Empty).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Board {
            height: DEFAULT_HEIGHT,
            width: DEFAULT_WIDTH,
            cells: vec![Cell::Empty; DEFAULT_HEIGHT * DEFAULT_WIDTH],
        }
    }
}
