use super::Player;
use crate::error::MoveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Occupied(Player),
}

/// An N x N grid stored as N column stacks, bottom to top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    columns: Vec<Vec<Player>>,
}

impl Board {
    /// Create a new empty board. Any size from 1 up is accepted.
    pub fn new(size: usize) -> Result<Self, MoveError> {
        if size == 0 {
            return Err(MoveError::InvalidSize { size });
        }
        Ok(Board::empty(size))
    }

    pub(super) fn empty(size: usize) -> Self {
        Board {
            size,
            columns: (0..size).map(|_| Vec::with_capacity(size)).collect(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Get the cell at a specific position.
    /// Row 0 is the bottom row.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        match self.columns[col].get(row) {
            Some(&player) => player.to_cell(),
            None => Cell::Empty,
        }
    }

    /// Number of tokens stacked in a column
    pub fn column_height(&self, col: usize) -> usize {
        self.columns[col].len()
    }

    /// Check if a column is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        match self.columns.get(col) {
            Some(stack) => stack.len() == self.size,
            None => true,
        }
    }

    /// Check that a drop into `col` would succeed, without touching the board.
    pub fn check_drop(&self, col: usize) -> Result<(), MoveError> {
        if col >= self.size {
            return Err(MoveError::ColumnOutOfRange {
                column: col,
                size: self.size,
            });
        }
        if self.is_column_full(col) {
            return Err(MoveError::ColumnFull { column: col });
        }
        Ok(())
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop(&mut self, col: usize, player: Player) -> Result<usize, MoveError> {
        self.check_drop(col)?;
        let stack = &mut self.columns[col];
        stack.push(player);
        Ok(stack.len() - 1)
    }

    /// Columns that can still take a token
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..self.size)
            .filter(|&col| !self.is_column_full(col))
            .collect()
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..self.size).all(|col| self.is_column_full(col))
    }

    /// Total number of tokens on the board
    pub fn token_count(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty(4)
    }
}

/// Plain-text picture, top row first: `R` for First, `B` for Second, as in a
/// replayed game where the human opens.
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in (0..self.size).rev() {
            let line: String = (0..self.size)
                .map(|col| match self.get(row, col) {
                    Cell::Empty => '.',
                    Cell::Occupied(Player::First) => 'R',
                    Cell::Occupied(Player::Second) => 'B',
                })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
